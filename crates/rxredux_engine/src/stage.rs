use std::future::ready;
use std::sync::Arc;

use engine_logging::{engine_debug, engine_trace};
use futures_util::stream::{self, BoxStream, Stream, StreamExt};
use rxredux_core::Outcome;

use crate::{ActionKind, ActionStream, Emission, OutcomeOf, ViewModel};

/// Turns events into bracketed results, one event at a time.
///
/// Each event yields its loading result first, then the mapped values of its
/// action. The first error ends the action and is reported as an error
/// effect; a state action is first bracketed with a loading effect so the
/// phase machine accepts it. A state action that folded no value ends with a
/// finished result, so its loading state never outlives it.
/// The action of the next event is only built once the previous one is
/// exhausted. With `collapse_duplicates`, an event equal to its predecessor
/// is dropped before reaching the action mapper.
pub fn event_results<VM, St>(
    view_model: Arc<VM>,
    events: St,
    collapse_duplicates: bool,
    tag: String,
) -> BoxStream<'static, OutcomeOf<VM>>
where
    VM: ViewModel,
    St: Stream<Item = VM::Event> + Send + 'static,
{
    let dedupe_tag = tag.clone();
    events
        .scan(None::<VM::Event>, move |last, event| {
            let duplicate = collapse_duplicates && last.as_ref() == Some(&event);
            if duplicate {
                engine_trace!("[{}] Collapsed duplicate event: {:?}", dedupe_tag, event);
            }
            *last = Some(event.clone());
            ready(Some((!duplicate).then_some(event)))
        })
        .filter_map(ready)
        .flat_map(move |event| {
            engine_debug!("[{}] Event: {:?}", tag, event);
            results_for(view_model.as_ref(), event)
        })
        .boxed()
}

fn results_for<VM: ViewModel>(
    view_model: &VM,
    event: VM::Event,
) -> BoxStream<'static, OutcomeOf<VM>> {
    let (kind, action) = view_model.map_events_to_actions(&event).into_parts();
    let loading = match kind {
        ActionKind::State => Outcome::loading(event.clone()),
        ActionKind::Effect => Outcome::loading_effect(event.clone()),
    };
    let bracket: Bracket<VM> = Bracket {
        action,
        kind,
        event,
        folded_state: false,
        done: false,
    };

    let values = stream::unfold(bracket, |mut bracket| async move {
        if bracket.done {
            return None;
        }
        let batch = match bracket.action.next().await {
            Some(Ok(Emission::State(bundle))) => {
                bracket.folded_state = true;
                vec![Outcome::success(bundle, bracket.event.clone())]
            }
            Some(Ok(Emission::Effect(bundle))) => {
                vec![Outcome::success_effect(bundle, bracket.event.clone())]
            }
            Some(Err(error)) => {
                bracket.done = true;
                let mut batch = Vec::with_capacity(3);
                if bracket.kind == ActionKind::State {
                    batch.push(Outcome::loading_effect(bracket.event.clone()));
                }
                batch.push(Outcome::error_effect(error, bracket.event.clone()));
                batch.extend(bracket.settle());
                batch
            }
            None => {
                bracket.done = true;
                bracket.settle().into_iter().collect()
            }
        };
        Some((batch, bracket))
    });

    stream::once(ready(loading))
        .chain(values.flat_map(stream::iter))
        .boxed()
}

/// One running action and what it has produced so far.
struct Bracket<VM: ViewModel> {
    action: ActionStream<VM::Result, VM::Effect>,
    kind: ActionKind,
    event: VM::Event,
    folded_state: bool,
    done: bool,
}

impl<VM: ViewModel> Bracket<VM> {
    /// A state action that folded nothing still has to leave its loading state.
    fn settle(&self) -> Option<OutcomeOf<VM>> {
        (self.kind == ActionKind::State && !self.folded_state)
            .then(|| Outcome::finished(self.event.clone()))
    }
}
