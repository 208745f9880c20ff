//! RxRedux core: pure model hierarchy, reducers and observer dispatch.
mod error;
mod event;
mod model;
mod observer;
mod outcome;
mod reducer;

pub use error::{ActionError, ProtocolViolation};
pub use event::{Bundle, Event};
pub use model::{EffectModel, Model, StateModel};
pub use observer::{default_error_message, ErrorMessageFactory, ModelObserver, View};
pub use outcome::{EffectResult, Outcome, StateResult};
pub use reducer::{EffectReducer, StateReducer};
