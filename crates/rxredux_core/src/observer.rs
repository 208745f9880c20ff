use crate::{ActionError, EffectModel, Model, StateModel};

/// Screen-side contract driven by [`ModelObserver`].
pub trait View<S, E, V> {
    fn toggle_views(&mut self, is_loading: bool, event: Option<&V>);

    fn show_error(&mut self, message: &str, event: &V);

    /// Stores the durable state, e.g. for saving on teardown.
    fn set_state(&mut self, bundle: &S);

    fn render_success_state(&mut self, bundle: &S);

    fn render_success_effect(&mut self, _bundle: &E, _event: &V) {}
}

/// Formats an error for display.
pub type ErrorMessageFactory<V> = Box<dyn Fn(&ActionError, &V) -> String + Send + Sync>;

/// Default formatter: the error's own description.
pub fn default_error_message<V>(error: &ActionError, _event: &V) -> String {
    error.to_string()
}

/// Translates delivered models into [`View`] calls.
pub struct ModelObserver<W, V> {
    view: W,
    error_message_factory: ErrorMessageFactory<V>,
}

impl<W, V: 'static> ModelObserver<W, V> {
    pub fn new(view: W) -> Self {
        Self {
            view,
            error_message_factory: Box::new(default_error_message::<V>),
        }
    }

    pub fn with_error_message_factory<F>(view: W, factory: F) -> Self
    where
        F: Fn(&ActionError, &V) -> String + Send + Sync + 'static,
    {
        Self {
            view,
            error_message_factory: Box::new(factory),
        }
    }

    pub fn view(&self) -> &W {
        &self.view
    }

    pub fn into_view(self) -> W {
        self.view
    }

    pub fn on_changed<S, E>(&mut self, model: &Model<S, E, V>)
    where
        W: View<S, E, V>,
    {
        if model.is_empty() {
            return;
        }
        self.view.toggle_views(model.is_loading(), model.event());
        match model {
            Model::State(StateModel::Error { error, event, .. }) => {
                let message = (self.error_message_factory)(error, event);
                self.view.show_error(&message, event);
            }
            Model::State(StateModel::Success { bundle, .. }) => {
                self.view.set_state(bundle);
                self.view.render_success_state(bundle);
            }
            Model::Effect(EffectModel::Error { message, event, .. }) => {
                self.view.show_error(message, event);
            }
            Model::Effect(EffectModel::Success { bundle, event }) => {
                self.view.render_success_effect(bundle, event);
            }
            Model::State(StateModel::Loading { .. } | StateModel::Empty)
            | Model::Effect(EffectModel::Loading { .. } | EffectModel::Empty) => {}
        }
    }
}
