//! RxRedux engine: async event pipeline, reducers on worker tasks and
//! ordered model delivery.
mod action;
mod error;
mod hub;
mod pipeline;
mod settings;
mod stage;
mod store;
mod view_model;

pub use action::{Action, ActionKind, ActionStream, Emission};
pub use error::StoreError;
pub use settings::StoreSettings;
pub use stage::event_results;
pub use store::{StoreHandle, Subscription};
pub use view_model::{ModelOf, OutcomeOf, ViewModel, ViewModelExt};
