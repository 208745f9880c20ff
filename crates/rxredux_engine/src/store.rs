use std::sync::Arc;

use engine_logging::{engine_info, engine_trace};
use futures_util::stream::{self, Stream};
use rxredux_core::{Model, ModelObserver, View};
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::hub::{Delivery, DeliveryHub, DeliverySender};
use crate::pipeline::supervise;
use crate::{ModelOf, StoreError, StoreSettings, ViewModel};

/// Owner of a running store.
///
/// The reducers and the delivery hub run on tokio tasks. Dropping the handle
/// cancels both.
pub struct StoreHandle<VM: ViewModel> {
    attach_tx: mpsc::UnboundedSender<DeliverySender<ModelOf<VM>>>,
    start: Arc<Notify>,
    cancel: CancellationToken,
    pipeline: Option<JoinHandle<Result<(), StoreError>>>,
    outcome: Option<Result<(), StoreError>>,
}

impl<VM: ViewModel> StoreHandle<VM> {
    /// Prepares a store for `events` on the current tokio runtime.
    ///
    /// Events are processed once the first subscriber attaches, or once
    /// [`StoreHandle::join`] is awaited, so the first subscriber sees every
    /// model.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn spawn<St>(
        view_model: Arc<VM>,
        events: St,
        initial_state: VM::State,
        settings: StoreSettings,
    ) -> Self
    where
        St: Stream<Item = VM::Event> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let (signal_tx, signal_rx) = mpsc::channel(settings.model_buffer.max(1));
        let (attach_tx, attach_rx) = mpsc::unbounded_channel();

        engine_info!("[{}] Store created", settings.tag);
        let hub = DeliveryHub::new(view_model.clone(), settings.tag.clone());
        tokio::spawn(hub.run(signal_rx, attach_rx, cancel.clone()));
        let start = Arc::new(Notify::new());
        let pipeline = tokio::spawn(supervise(
            view_model,
            events,
            initial_state,
            settings,
            signal_tx,
            start.clone(),
            cancel.clone(),
        ));

        Self {
            attach_tx,
            start,
            cancel,
            pipeline: Some(pipeline),
            outcome: None,
        }
    }

    /// Attaches a new subscriber. It first receives the latest state, if any,
    /// then every model published after it attached.
    pub fn subscribe(&self) -> Subscription<ModelOf<VM>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let _ = self.attach_tx.send(tx);
        self.start.notify_one();
        Subscription {
            rx,
            cancel: self.cancel.clone(),
        }
    }

    /// Stops the store. Nothing is delivered after this returns.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Waits until the event source is exhausted, the store is cancelled, or
    /// the store failed. Subscriptions keep draining after this returns.
    pub async fn join(&mut self) -> Result<(), StoreError> {
        self.start.notify_one();
        if let Some(pipeline) = self.pipeline.take() {
            let outcome = match pipeline.await {
                Ok(outcome) => outcome,
                Err(err) if err.is_cancelled() => Err(StoreError::Cancelled),
                Err(err) => Err(StoreError::WorkerPanicked(err.to_string())),
            };
            self.outcome = Some(outcome);
        }
        self.outcome.clone().unwrap_or(Ok(()))
    }
}

impl<VM: ViewModel> Drop for StoreHandle<VM> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// An ordered view of the models of one store.
pub struct Subscription<M> {
    rx: mpsc::UnboundedReceiver<Delivery<M>>,
    cancel: CancellationToken,
}

impl<M> Subscription<M> {
    /// Next model in delivery order.
    ///
    /// `None` once the store completed or was cancelled; models still queued
    /// at cancellation are discarded.
    pub async fn next(&mut self) -> Option<Result<M, StoreError>> {
        if self.cancel.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            delivery = self.rx.recv() => delivery.map(|delivery| match delivery {
                Delivery::Model(model) => Ok(model),
                Delivery::Failed(error) => Err(error),
            }),
        }
    }

    pub fn into_stream(self) -> impl Stream<Item = Result<M, StoreError>> {
        stream::unfold(self, |mut subscription| async move {
            let item = subscription.next().await?;
            Some((item, subscription))
        })
    }
}

impl<S, E, V: 'static> Subscription<Model<S, E, V>> {
    /// Drives `observer` with every model on the calling task, one at a time.
    ///
    /// Returns when the store completes or is cancelled, or with the error
    /// that killed it.
    pub async fn observe<W>(mut self, observer: &mut ModelObserver<W, V>) -> Result<(), StoreError>
    where
        W: View<S, E, V>,
    {
        while let Some(delivery) = self.next().await {
            let model = delivery?;
            engine_trace!("Delivering {}", model.name());
            observer.on_changed(&model);
        }
        Ok(())
    }
}
