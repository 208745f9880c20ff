use std::fmt;

use crate::ActionError;

/// Durable, replayable snapshot of application data.
#[derive(Debug, Clone, PartialEq)]
pub enum StateModel<S, V> {
    Loading {
        bundle: S,
        event: V,
    },
    /// Never replayed. [`StateReducer`](crate::StateReducer) reports
    /// failures as [`EffectModel::Error`] instead.
    Error {
        error: ActionError,
        bundle: S,
        event: V,
    },
    /// `event` is `None` only for the initial state.
    Success {
        bundle: S,
        event: Option<V>,
    },
    /// Nothing changed since the previous state; suppresses re-rendering.
    Empty,
}

/// Transient, at-most-once occurrence such as a toast or a spinner.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectModel<E, V> {
    /// Idle phase before the first effect.
    Empty,
    Loading {
        bundle: Option<E>,
        event: V,
    },
    Success {
        bundle: E,
        event: V,
    },
    Error {
        error: ActionError,
        message: String,
        bundle: Option<E>,
        event: V,
    },
}

/// A single value delivered to observers.
#[derive(Debug, Clone, PartialEq)]
pub enum Model<S, E, V> {
    State(StateModel<S, V>),
    Effect(EffectModel<E, V>),
}

impl<S, V> StateModel<S, V> {
    pub fn bundle(&self) -> Option<&S> {
        match self {
            Self::Loading { bundle, .. }
            | Self::Error { bundle, .. }
            | Self::Success { bundle, .. } => Some(bundle),
            Self::Empty => None,
        }
    }

    pub fn event(&self) -> Option<&V> {
        match self {
            Self::Loading { event, .. } | Self::Error { event, .. } => Some(event),
            Self::Success { event, .. } => event.as_ref(),
            Self::Empty => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading { .. } => "LoadingState",
            Self::Error { .. } => "ErrorState",
            Self::Success { .. } => "SuccessState",
            Self::Empty => "EmptySuccessState",
        }
    }
}

impl<E, V> EffectModel<E, V> {
    pub fn bundle(&self) -> Option<&E> {
        match self {
            Self::Loading { bundle, .. } | Self::Error { bundle, .. } => bundle.as_ref(),
            Self::Success { bundle, .. } => Some(bundle),
            Self::Empty => None,
        }
    }

    pub fn event(&self) -> Option<&V> {
        match self {
            Self::Loading { event, .. }
            | Self::Success { event, .. }
            | Self::Error { event, .. } => Some(event),
            Self::Empty => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "EmptySuccessEffect",
            Self::Loading { .. } => "LoadingEffect",
            Self::Success { .. } => "SuccessEffect",
            Self::Error { .. } => "ErrorEffect",
        }
    }
}

impl<S, E, V> Model<S, E, V> {
    pub fn is_loading(&self) -> bool {
        match self {
            Self::State(state) => state.is_loading(),
            Self::Effect(effect) => effect.is_loading(),
        }
    }

    pub fn event(&self) -> Option<&V> {
        match self {
            Self::State(state) => state.event(),
            Self::Effect(effect) => effect.event(),
        }
    }

    /// True for the no-render sentinels.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::State(state) => state.is_empty(),
            Self::Effect(effect) => effect.is_empty(),
        }
    }

    pub fn is_effect(&self) -> bool {
        matches!(self, Self::Effect(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::State(state) => state.name(),
            Self::Effect(effect) => effect.name(),
        }
    }
}

impl<S: fmt::Debug, E: fmt::Debug, V: fmt::Debug> fmt::Display for Model<S, E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, event: {:?}", self.name(), self.event())?;
        match self {
            Self::State(StateModel::Success { bundle, .. }) => write!(f, ", bundle: {bundle:?}"),
            Self::State(StateModel::Error { error, .. }) => write!(f, ", error: {error}"),
            Self::Effect(EffectModel::Success { bundle, .. }) => {
                write!(f, ", bundle: {bundle:?}")
            }
            Self::Effect(EffectModel::Error { error, .. }) => write!(f, ", error: {error}"),
            _ => Ok(()),
        }
    }
}
