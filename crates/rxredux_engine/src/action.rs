use std::future::Future;

use futures_util::stream::{self, BoxStream, Stream, StreamExt};
use rxredux_core::ActionError;

/// Which reducer brackets an action with its loading result.
///
/// Errors are one-shot effects for both kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Loading becomes durable state until the action ends.
    State,
    /// Loading and errors become one-shot effects.
    Effect,
}

/// A value produced by an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission<R, E> {
    /// Folded into durable state by the user reducer.
    State(R),
    /// Delivered once as a success effect.
    Effect(E),
}

pub type ActionStream<R, E> = BoxStream<'static, Result<Emission<R, E>, ActionError>>;

/// The asynchronous work triggered by one event.
///
/// Nothing runs until the pipeline polls the stream, so building an action
/// must stay cheap.
pub struct Action<R, E> {
    kind: ActionKind,
    stream: ActionStream<R, E>,
}

impl<R, E> Action<R, E>
where
    R: Send + 'static,
    E: Send + 'static,
{
    /// An action of the given kind over raw emissions.
    pub fn new<St>(kind: ActionKind, stream: St) -> Self
    where
        St: Stream<Item = Result<Emission<R, E>, ActionError>> + Send + 'static,
    {
        Self {
            kind,
            stream: stream.boxed(),
        }
    }

    /// A state action yielding any number of values.
    pub fn state<St>(stream: St) -> Self
    where
        St: Stream<Item = Result<R, ActionError>> + Send + 'static,
    {
        Self {
            kind: ActionKind::State,
            stream: stream.map(|item| item.map(Emission::State)).boxed(),
        }
    }

    /// A state action with an already known value.
    pub fn single(value: R) -> Self {
        Self::state(stream::iter([Ok(value)]))
    }

    /// A state action yielding a single value.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = Result<R, ActionError>> + Send + 'static,
    {
        Self::state(stream::once(future))
    }

    /// An effect action. It may also emit state values.
    pub fn effect<St>(stream: St) -> Self
    where
        St: Stream<Item = Result<Emission<R, E>, ActionError>> + Send + 'static,
    {
        Self::new(ActionKind::Effect, stream)
    }

    /// An effect action yielding a single effect.
    pub fn effect_from_future<F>(future: F) -> Self
    where
        F: Future<Output = Result<E, ActionError>> + Send + 'static,
    {
        Self::effect(stream::once(async move { future.await.map(Emission::Effect) }))
    }

    /// A state action without values: loading, then settled on the current state.
    pub fn none() -> Self {
        Self::state(stream::empty())
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub(crate) fn into_parts(self) -> (ActionKind, ActionStream<R, E>) {
        (self.kind, self.stream)
    }
}
