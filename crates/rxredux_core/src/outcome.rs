use crate::ActionError;

/// Intermediate result produced for one event, before reduction.
///
/// The two halves are folded by independent reducers: [`StateResult`] into
/// durable state, [`EffectResult`] into the one-shot effect phase machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<R, E, V> {
    State(StateResult<R, V>),
    Effect(EffectResult<E, V>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateResult<R, V> {
    /// Emitted before a state action starts.
    Loading { event: V },
    /// A value to fold into durable state.
    Success { bundle: R, event: V },
    /// A state action ended without folding any value. Settles the loading
    /// state on the current bundle.
    Finished { event: V },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EffectResult<E, V> {
    /// Emitted before an effect action starts.
    Loading { event: V },
    Success { bundle: E, event: V },
    Error { error: ActionError, event: V },
}

impl<R, E, V> Outcome<R, E, V> {
    pub fn loading(event: V) -> Self {
        Self::State(StateResult::Loading { event })
    }

    pub fn success(bundle: R, event: V) -> Self {
        Self::State(StateResult::Success { bundle, event })
    }

    pub fn finished(event: V) -> Self {
        Self::State(StateResult::Finished { event })
    }

    pub fn loading_effect(event: V) -> Self {
        Self::Effect(EffectResult::Loading { event })
    }

    pub fn success_effect(bundle: E, event: V) -> Self {
        Self::Effect(EffectResult::Success { bundle, event })
    }

    pub fn error_effect(error: ActionError, event: V) -> Self {
        Self::Effect(EffectResult::Error { error, event })
    }

    pub fn event(&self) -> &V {
        match self {
            Self::State(result) => result.event(),
            Self::Effect(result) => result.event(),
        }
    }

    pub fn is_effect(&self) -> bool {
        matches!(self, Self::Effect(_))
    }
}

impl<R, V> StateResult<R, V> {
    pub fn event(&self) -> &V {
        match self {
            Self::Loading { event } | Self::Success { event, .. } | Self::Finished { event } => {
                event
            }
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Loading { .. } => "LoadingResult",
            Self::Success { .. } => "SuccessResult",
            Self::Finished { .. } => "FinishedResult",
        }
    }
}

impl<E, V> EffectResult<E, V> {
    pub fn event(&self) -> &V {
        match self {
            Self::Loading { event } | Self::Success { event, .. } | Self::Error { event, .. } => {
                event
            }
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Loading { .. } => "LoadingEffectResult",
            Self::Success { .. } => "SuccessEffectResult",
            Self::Error { .. } => "ErrorEffectResult",
        }
    }
}
