use std::sync::Arc;

use engine_logging::{engine_debug, engine_trace};
use rxredux_core::{Model, StateModel};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::pipeline::Signal;
use crate::{ModelOf, StoreError, ViewModel};

/// What a subscriber receives.
pub(crate) enum Delivery<M> {
    Model(M),
    Failed(StoreError),
}

pub(crate) type DeliverySender<M> = mpsc::UnboundedSender<Delivery<M>>;

/// Merges reducer output into one ordered stream and fans it out.
///
/// The hub task is the only owner of the latest state and of the subscriber
/// list. Attaching is a message to this task, so a new subscriber sees the
/// replayed state and then exactly the models published after it.
pub(crate) struct DeliveryHub<VM: ViewModel> {
    view_model: Arc<VM>,
    tag: String,
    latest_state: Option<StateModel<VM::State, VM::Event>>,
    subscribers: Vec<DeliverySender<ModelOf<VM>>>,
    failure: Option<StoreError>,
    source_done: bool,
}

impl<VM: ViewModel> DeliveryHub<VM> {
    pub(crate) fn new(view_model: Arc<VM>, tag: String) -> Self {
        Self {
            view_model,
            tag,
            latest_state: None,
            subscribers: Vec::new(),
            failure: None,
            source_done: false,
        }
    }

    pub(crate) async fn run(
        mut self,
        mut signals: mpsc::Receiver<Signal<ModelOf<VM>>>,
        mut attachments: mpsc::UnboundedReceiver<DeliverySender<ModelOf<VM>>>,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                attachment = attachments.recv() => match attachment {
                    Some(subscriber) => self.attach(subscriber),
                    None => break,
                },
                signal = signals.recv(), if !self.source_done => match signal {
                    Some(Signal::Model(model)) => self.publish(model),
                    Some(Signal::Fatal(error)) => self.fail(error),
                    None => self.complete(),
                },
            }
        }
        engine_debug!("[{}] Delivery stopped", self.tag);
    }

    fn attach(&mut self, subscriber: DeliverySender<ModelOf<VM>>) {
        if let Some(error) = &self.failure {
            let _ = subscriber.send(Delivery::Failed(error.clone()));
            return;
        }
        if let Some(state) = &self.latest_state {
            engine_trace!("[{}] Replaying {}", self.tag, state.name());
            if subscriber
                .send(Delivery::Model(Model::State(state.clone())))
                .is_err()
            {
                return;
            }
        }
        if !self.source_done {
            self.subscribers.push(subscriber);
        }
    }

    fn publish(&mut self, model: ModelOf<VM>) {
        self.view_model.middleware(&self.tag, &model);
        if let Model::State(state @ (StateModel::Loading { .. } | StateModel::Success { .. })) =
            &model
        {
            self.latest_state = Some(state.clone());
        }
        self.subscribers
            .retain(|subscriber| subscriber.send(Delivery::Model(model.clone())).is_ok());
    }

    fn fail(&mut self, error: StoreError) {
        for subscriber in self.subscribers.drain(..) {
            let _ = subscriber.send(Delivery::Failed(error.clone()));
        }
        self.failure = Some(error);
        self.source_done = true;
    }

    /// The event source ended: current subscribers see the end of the stream,
    /// later ones still get the replayed state.
    fn complete(&mut self) {
        self.source_done = true;
        self.subscribers.clear();
    }
}
