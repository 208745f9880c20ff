use std::fmt::Debug;
use std::sync::Arc;

use engine_logging::{engine_debug, engine_error};
use futures_util::Stream;
use rxredux_core::{ActionError, Bundle, EffectModel, Event, Model, Outcome};

use crate::{Action, StoreHandle, StoreSettings};

pub type ModelOf<VM> = Model<
    <VM as ViewModel>::State,
    <VM as ViewModel>::Effect,
    <VM as ViewModel>::Event,
>;

pub type OutcomeOf<VM> = Outcome<
    <VM as ViewModel>::Result,
    <VM as ViewModel>::Effect,
    <VM as ViewModel>::Event,
>;

/// The hooks a screen supplies to a store.
pub trait ViewModel: Send + Sync + 'static {
    type Event: Event;
    /// Value produced by state actions, folded by [`ViewModel::reducer`].
    type Result: Debug + Send + 'static;
    type State: Bundle;
    type Effect: Bundle;

    /// Maps one event to the action that serves it.
    fn map_events_to_actions(&self, event: &Self::Event) -> Action<Self::Result, Self::Effect>;

    /// Pure fold of an incoming value into the next durable state.
    fn reducer(
        &self,
        incoming: Self::Result,
        event: &Self::Event,
        current: &Self::State,
    ) -> Self::State;

    fn error_message_factory(&self, error: &ActionError, _event: &Self::Event) -> String {
        error.to_string()
    }

    /// Observes every model right before delivery. Must not block.
    fn middleware(&self, tag: &str, model: &ModelOf<Self>) {
        engine_debug!("[{}] PModel: {}", tag, model);
        if let Model::Effect(EffectModel::Error { error, event, .. }) = model {
            engine_error!("[{}] Error for {:?}: {}", tag, event, error);
        }
    }
}

pub trait ViewModelExt: ViewModel + Sized {
    /// Starts a store for this view model on the current tokio runtime.
    fn store<St>(
        self: Arc<Self>,
        events: St,
        initial_state: Self::State,
        settings: StoreSettings,
    ) -> StoreHandle<Self>
    where
        St: Stream<Item = Self::Event> + Send + 'static,
    {
        StoreHandle::spawn(self, events, initial_state, settings)
    }
}

impl<VM: ViewModel> ViewModelExt for VM {}
