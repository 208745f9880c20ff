use std::fmt::Debug;

use engine_logging::engine_trace;

use crate::{ActionError, EffectModel, EffectResult, ProtocolViolation, StateModel, StateResult};

/// Running fold of state results into durable state.
///
/// Owns the current state for the lifetime of a store. A fold that yields a
/// state equal to the current one returns [`StateModel::Empty`] instead.
/// Failures never reach this fold; they travel as error effects.
#[derive(Debug, Clone)]
pub struct StateReducer<S, V> {
    bundle: S,
    current: StateModel<S, V>,
}

impl<S, V> StateReducer<S, V>
where
    S: Clone + PartialEq,
    V: Clone + PartialEq,
{
    pub fn new(initial: S) -> Self {
        Self {
            current: StateModel::Success {
                bundle: initial.clone(),
                event: None,
            },
            bundle: initial,
        }
    }

    /// The seed state, before any result was folded.
    pub fn current(&self) -> &StateModel<S, V> {
        &self.current
    }

    pub fn bundle(&self) -> &S {
        &self.bundle
    }

    /// Folds one result. `reduce` receives the incoming value, its event and
    /// the current bundle, and returns the next bundle.
    pub fn fold<R, F>(&mut self, result: StateResult<R, V>, reduce: F) -> StateModel<S, V>
    where
        F: FnOnce(R, &V, &S) -> S,
    {
        let name = result.name();
        let next = match result {
            StateResult::Loading { event } => StateModel::Loading {
                bundle: self.bundle.clone(),
                event,
            },
            StateResult::Success { bundle, event } => StateModel::Success {
                bundle: reduce(bundle, &event, &self.bundle),
                event: Some(event),
            },
            StateResult::Finished { event } => StateModel::Success {
                bundle: self.bundle.clone(),
                event: Some(event),
            },
        };

        if next == self.current {
            engine_trace!("{} produced an unchanged state", name);
            return StateModel::Empty;
        }
        if let Some(bundle) = next.bundle() {
            self.bundle = bundle.clone();
        }
        self.current = next.clone();
        next
    }
}

/// Phase machine for one-shot effects.
///
/// `Empty | Success | Error -> Loading -> Success | Error`. A terminal result
/// outside the loading phase is a [`ProtocolViolation`].
#[derive(Debug, Clone)]
pub struct EffectReducer<E, V> {
    phase: EffectModel<E, V>,
}

impl<E, V> Default for EffectReducer<E, V> {
    fn default() -> Self {
        Self {
            phase: EffectModel::Empty,
        }
    }
}

impl<E, V> EffectReducer<E, V>
where
    E: Clone + PartialEq + Debug,
    V: Clone + PartialEq + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &EffectModel<E, V> {
        &self.phase
    }

    /// Folds one result into the phase machine.
    ///
    /// Returns `Ok(None)` when the new phase equals the previous one, since an
    /// effect is never delivered twice. `format` renders the user-facing
    /// message of an error effect.
    pub fn fold<F>(
        &mut self,
        result: EffectResult<E, V>,
        format: F,
    ) -> Result<Option<EffectModel<E, V>>, ProtocolViolation>
    where
        F: FnOnce(&ActionError, &V) -> String,
    {
        let next = match (result, &self.phase) {
            (EffectResult::Loading { event }, phase) => EffectModel::Loading {
                bundle: phase.bundle().cloned(),
                event,
            },
            (EffectResult::Success { bundle, event }, EffectModel::Loading { .. }) => {
                EffectModel::Success { bundle, event }
            }
            (EffectResult::Error { error, event }, EffectModel::Loading { bundle, .. }) => {
                EffectModel::Error {
                    message: format(&error, &event),
                    error,
                    bundle: bundle.clone(),
                    event,
                }
            }
            (result @ (EffectResult::Success { .. } | EffectResult::Error { .. }), phase) => {
                return Err(ProtocolViolation {
                    phase: phase.name(),
                    result: format!("{} {:?}", result.name(), result),
                });
            }
        };

        if next == self.phase {
            engine_trace!("dropping repeated {}", next.name());
            return Ok(None);
        }
        self.phase = next.clone();
        Ok(Some(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn append(incoming: Vec<u32>, _event: &&'static str, current: &Vec<u32>) -> Vec<u32> {
        let mut next = current.clone();
        next.extend(incoming);
        next
    }

    fn raw(error: &ActionError, _event: &&'static str) -> String {
        error.to_string()
    }

    #[test]
    fn loading_keeps_current_bundle() {
        let mut reducer = StateReducer::new(vec![7]);
        let model = reducer.fold::<Vec<u32>, _>(StateResult::Loading { event: "fetch" }, append);
        assert_eq!(
            model,
            StateModel::Loading {
                bundle: vec![7],
                event: "fetch"
            }
        );
    }

    #[test]
    fn success_folds_with_user_reducer() {
        let mut reducer = StateReducer::new(vec![1]);
        let model = reducer.fold(
            StateResult::Success {
                bundle: vec![2, 3],
                event: "fetch",
            },
            append,
        );
        assert_eq!(model.bundle(), Some(&vec![1, 2, 3]));
        assert_eq!(reducer.bundle(), &vec![1, 2, 3]);
    }

    #[test]
    fn identical_state_becomes_empty() {
        let mut reducer = StateReducer::new(Vec::<u32>::new());
        let first = reducer.fold(
            StateResult::Success {
                bundle: vec![],
                event: "noop",
            },
            append,
        );
        let second = reducer.fold(
            StateResult::Success {
                bundle: vec![],
                event: "noop",
            },
            append,
        );
        assert!(!first.is_empty());
        assert_eq!(second, StateModel::Empty);
        assert_eq!(reducer.current(), &first);
    }

    #[test]
    fn finished_settles_loading_on_current_bundle() {
        let mut reducer = StateReducer::new(vec![4]);
        reducer.fold::<Vec<u32>, _>(StateResult::Loading { event: "fetch" }, append);
        let model = reducer.fold::<Vec<u32>, _>(StateResult::Finished { event: "fetch" }, append);
        assert_eq!(
            model,
            StateModel::Success {
                bundle: vec![4],
                event: Some("fetch"),
            }
        );
        assert!(!reducer.current().is_loading());
    }

    #[test]
    fn finished_without_loading_is_unchanged() {
        let mut reducer = StateReducer::new(vec![4]);
        reducer.fold(
            StateResult::Success {
                bundle: vec![],
                event: "fetch",
            },
            append,
        );
        let model = reducer.fold::<Vec<u32>, _>(StateResult::Finished { event: "fetch" }, append);
        assert_eq!(model, StateModel::Empty);
    }

    #[test]
    fn effect_cycle_loading_then_success() {
        let mut reducer = EffectReducer::<String, &'static str>::new();
        let loading = reducer
            .fold(EffectResult::Loading { event: "delete" }, raw)
            .unwrap();
        assert_eq!(
            loading,
            Some(EffectModel::Loading {
                bundle: None,
                event: "delete"
            })
        );
        let success = reducer
            .fold(
                EffectResult::Success {
                    bundle: "deleted".to_string(),
                    event: "delete",
                },
                raw,
            )
            .unwrap();
        assert_eq!(
            success,
            Some(EffectModel::Success {
                bundle: "deleted".to_string(),
                event: "delete"
            })
        );
    }

    #[test]
    fn loading_carries_previous_effect_bundle() {
        let mut reducer = EffectReducer::<String, &'static str>::new();
        reducer.fold(EffectResult::Loading { event: "a" }, raw).unwrap();
        reducer
            .fold(
                EffectResult::Success {
                    bundle: "done".to_string(),
                    event: "a",
                },
                raw,
            )
            .unwrap();
        let loading = reducer.fold(EffectResult::Loading { event: "b" }, raw).unwrap();
        assert_eq!(
            loading,
            Some(EffectModel::Loading {
                bundle: Some("done".to_string()),
                event: "b"
            })
        );
    }

    #[test]
    fn error_effect_uses_formatter() {
        let mut reducer = EffectReducer::<String, &'static str>::new();
        reducer.fold(EffectResult::Loading { event: "delete" }, raw).unwrap();
        let model = reducer
            .fold(
                EffectResult::Error {
                    error: ActionError::new("no such user"),
                    event: "delete",
                },
                |error, event| format!("{event}: {error}"),
            )
            .unwrap();
        assert_eq!(
            model,
            Some(EffectModel::Error {
                error: ActionError::new("no such user"),
                message: "delete: no such user".to_string(),
                bundle: None,
                event: "delete",
            })
        );
    }

    #[test]
    fn repeated_loading_is_dropped() {
        let mut reducer = EffectReducer::<String, &'static str>::new();
        assert!(reducer.fold(EffectResult::Loading { event: "a" }, raw).unwrap().is_some());
        assert!(reducer.fold(EffectResult::Loading { event: "a" }, raw).unwrap().is_none());
    }

    #[test]
    fn success_while_idle_is_a_violation() {
        let mut reducer = EffectReducer::<String, &'static str>::new();
        let err = reducer
            .fold(
                EffectResult::Success {
                    bundle: "x".to_string(),
                    event: "a",
                },
                raw,
            )
            .unwrap_err();
        assert_eq!(err.phase, "EmptySuccessEffect");
        assert!(err.result.starts_with("SuccessEffectResult"));
        assert!(reducer.phase().is_empty());
    }

    #[test]
    fn error_after_terminal_phase_is_a_violation() {
        let mut reducer = EffectReducer::<String, &'static str>::new();
        reducer.fold(EffectResult::Loading { event: "a" }, raw).unwrap();
        reducer
            .fold(
                EffectResult::Success {
                    bundle: "x".to_string(),
                    event: "a",
                },
                raw,
            )
            .unwrap();
        let err = reducer
            .fold(
                EffectResult::Error {
                    error: ActionError::new("late"),
                    event: "a",
                },
                raw,
            )
            .unwrap_err();
        assert_eq!(err.phase, "SuccessEffect");
    }
}
