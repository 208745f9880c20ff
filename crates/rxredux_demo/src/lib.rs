//! Console user-list screen driven by an rxredux store.
pub mod app;
pub mod config;
pub mod persistence;
pub mod repository;
pub mod script;
pub mod view;
pub mod view_model;

pub use app::run_screen;
pub use config::DemoConfig;
pub use repository::{InMemoryUserRepository, RepositoryError, User, UserRepository};
pub use script::{parse_command, parse_script, ScriptError};
pub use view::ConsoleView;
pub use view_model::{DeletedUsers, UserEvent, UserListResult, UserListState, UserListViewModel};
