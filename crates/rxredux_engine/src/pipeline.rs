use std::sync::Arc;

use engine_logging::{engine_debug, engine_error};
use futures_util::stream::{Stream, StreamExt};
use rxredux_core::{EffectReducer, Model, Outcome, StateReducer};
use tokio::sync::{mpsc, Notify};
use tokio_util::sync::CancellationToken;

use crate::stage::event_results;
use crate::{ModelOf, StoreError, StoreSettings, ViewModel};

/// What the reducer task hands to the delivery hub.
pub(crate) enum Signal<M> {
    Model(M),
    Fatal(StoreError),
}

/// Waits for `start`, then runs the pipeline on its own task.
///
/// A pipeline that dies without returning, such as on a panic in the action
/// mapper or the reducer, is reported to the hub as a fatal signal.
pub(crate) async fn supervise<VM, St>(
    view_model: Arc<VM>,
    events: St,
    initial_state: VM::State,
    settings: StoreSettings,
    signals: mpsc::Sender<Signal<ModelOf<VM>>>,
    start: Arc<Notify>,
    cancel: CancellationToken,
) -> Result<(), StoreError>
where
    VM: ViewModel,
    St: Stream<Item = VM::Event> + Send + 'static,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(StoreError::Cancelled),
        _ = start.notified() => {}
    }

    let tag = settings.tag.clone();
    let fatal = signals.clone();
    let worker = tokio::spawn(run_pipeline(
        view_model,
        events,
        initial_state,
        settings,
        signals,
        cancel,
    ));
    match worker.await {
        Ok(outcome) => outcome,
        Err(err) => {
            let error = if err.is_cancelled() {
                StoreError::Cancelled
            } else {
                StoreError::WorkerPanicked(err.to_string())
            };
            engine_error!("[{}] Pipeline stopped: {}", tag, error);
            let _ = fatal.send(Signal::Fatal(error.clone())).await;
            Err(error)
        }
    }
}

/// Runs the event stage and both reducers on one task.
///
/// The task is the single writer of the current state and effect. It ends
/// when the event source ends, when the hub goes away, on cancellation, or on
/// the first protocol violation.
async fn run_pipeline<VM, St>(
    view_model: Arc<VM>,
    events: St,
    initial_state: VM::State,
    settings: StoreSettings,
    signals: mpsc::Sender<Signal<ModelOf<VM>>>,
    cancel: CancellationToken,
) -> Result<(), StoreError>
where
    VM: ViewModel,
    St: Stream<Item = VM::Event> + Send + 'static,
{
    let tag = settings.tag.clone();
    let mut state_reducer = StateReducer::new(initial_state);
    let mut effect_reducer = EffectReducer::new();

    if settings.emit_initial_state {
        let seed = Model::State(state_reducer.current().clone());
        if !forward(&signals, &cancel, Signal::Model(seed)).await? {
            return Ok(());
        }
    }

    let mut results = event_results(
        view_model.clone(),
        events,
        settings.collapse_duplicate_events,
        tag.clone(),
    );

    loop {
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(StoreError::Cancelled),
            next = results.next() => match next {
                Some(outcome) => outcome,
                None => break,
            },
        };

        let model = match outcome {
            Outcome::State(result) => Some(Model::State(state_reducer.fold(
                result,
                |incoming, event, current| view_model.reducer(incoming, event, current),
            ))),
            Outcome::Effect(result) => {
                match effect_reducer.fold(result, |error, event| {
                    view_model.error_message_factory(error, event)
                }) {
                    Ok(effect) => effect.map(Model::Effect),
                    Err(violation) => {
                        engine_error!("[{}] {}", tag, violation);
                        let error = StoreError::from(violation);
                        let _ = forward(&signals, &cancel, Signal::Fatal(error.clone())).await;
                        return Err(error);
                    }
                }
            }
        };

        if let Some(model) = model {
            if !forward(&signals, &cancel, Signal::Model(model)).await? {
                break;
            }
        }
    }

    engine_debug!("[{}] Event source completed", tag);
    Ok(())
}

/// Sends one signal to the hub. `Ok(false)` means the hub is gone.
async fn forward<M>(
    signals: &mpsc::Sender<Signal<M>>,
    cancel: &CancellationToken,
    signal: Signal<M>,
) -> Result<bool, StoreError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(StoreError::Cancelled),
        sent = signals.send(signal) => Ok(sent.is_ok()),
    }
}
