#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use futures_util::stream::{self, BoxStream, StreamExt};
use rxredux_core::{ActionError, Model, View};
use rxredux_engine::{Action, ActionKind, Emission, ModelOf, StoreError, Subscription, ViewModel};
use tokio::sync::mpsc;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserEvent {
    Fetch(u32),
    Delete(Vec<String>),
    /// State action that yields the same page twice.
    Refresh,
    /// Effect action that fails.
    FailDelete,
    /// State action that fails.
    FailFetch,
    /// State action that illegally emits an effect.
    Broken,
    /// State action that never completes.
    Hang,
    /// State action without values.
    Nothing,
    /// Mapper panics.
    Explode,
}

pub type UserModel = ModelOf<UsersViewModel>;

pub fn page(n: u32) -> Vec<String> {
    if n > 2 {
        return Vec::new();
    }
    vec![format!("user{n}a"), format!("user{n}b")]
}

/// Set when the hanging action is dropped.
pub struct DropFlag(pub Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct UsersViewModel {
    pub mapper_calls: AtomicUsize,
    pub middleware_seen: Mutex<Vec<&'static str>>,
    pub hang_dropped: Arc<AtomicBool>,
}

impl ViewModel for UsersViewModel {
    type Event = UserEvent;
    type Result = Vec<String>;
    type State = Vec<String>;
    type Effect = Vec<String>;

    fn map_events_to_actions(&self, event: &UserEvent) -> Action<Vec<String>, Vec<String>> {
        self.mapper_calls.fetch_add(1, Ordering::SeqCst);
        match event {
            UserEvent::Fetch(n) => {
                let n = *n;
                Action::from_future(async move { Ok(page(n)) })
            }
            UserEvent::Delete(logins) => {
                let logins = logins.clone();
                Action::effect_from_future(async move { Ok(logins) })
            }
            UserEvent::Refresh => Action::state(stream::iter(vec![Ok(page(0)), Ok(page(0))])),
            UserEvent::FailDelete => {
                Action::effect_from_future(async { Err(ActionError::new("user not found")) })
            }
            UserEvent::FailFetch => {
                Action::from_future(async { Err(ActionError::new("network down")) })
            }
            UserEvent::Broken => Action::new(
                ActionKind::State,
                stream::iter(vec![Ok(Emission::Effect(page(0)))]),
            ),
            UserEvent::Nothing => Action::none(),
            UserEvent::Explode => panic!("mapper exploded"),
            UserEvent::Hang => {
                let flag = DropFlag(self.hang_dropped.clone());
                Action::from_future(async move {
                    let _flag = flag;
                    futures_util::future::pending::<()>().await;
                    Ok(Vec::new())
                })
            }
        }
    }

    fn reducer(
        &self,
        incoming: Vec<String>,
        _event: &UserEvent,
        current: &Vec<String>,
    ) -> Vec<String> {
        let mut next = current.clone();
        for login in incoming {
            if !next.contains(&login) {
                next.push(login);
            }
        }
        next
    }

    fn error_message_factory(&self, error: &ActionError, event: &UserEvent) -> String {
        format!("{event:?} failed: {error}")
    }

    fn middleware(&self, _tag: &str, model: &UserModel) {
        if let Ok(mut seen) = self.middleware_seen.lock() {
            seen.push(model.name());
        }
    }
}

pub fn events_channel() -> (mpsc::UnboundedSender<UserEvent>, BoxStream<'static, UserEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let events = stream::unfold(rx, |mut rx| async move {
        let event = rx.recv().await?;
        Some((event, rx))
    })
    .boxed();
    (tx, events)
}

pub async fn drain(
    subscription: &mut Subscription<UserModel>,
) -> Vec<Result<UserModel, StoreError>> {
    let mut delivered = Vec::new();
    while let Some(item) = subscription.next().await {
        delivered.push(item);
    }
    delivered
}

pub async fn take(subscription: &mut Subscription<UserModel>, count: usize) -> Vec<UserModel> {
    let mut delivered = Vec::new();
    for _ in 0..count {
        match subscription.next().await {
            Some(Ok(model)) => delivered.push(model),
            other => panic!("expected a model, got {other:?}"),
        }
    }
    delivered
}

pub fn models(delivered: Vec<Result<UserModel, StoreError>>) -> Vec<UserModel> {
    delivered
        .into_iter()
        .map(|item| item.expect("model"))
        .collect()
}

#[derive(Default)]
pub struct RecordingView {
    pub calls: Vec<String>,
}

impl View<Vec<String>, Vec<String>, UserEvent> for RecordingView {
    fn toggle_views(&mut self, is_loading: bool, _event: Option<&UserEvent>) {
        self.calls.push(format!("toggle {is_loading}"));
    }

    fn show_error(&mut self, message: &str, _event: &UserEvent) {
        self.calls.push(format!("error {message}"));
    }

    fn set_state(&mut self, bundle: &Vec<String>) {
        self.calls.push(format!("set {}", bundle.len()));
    }

    fn render_success_state(&mut self, bundle: &Vec<String>) {
        self.calls.push(format!("render {}", bundle.join(",")));
    }

    fn render_success_effect(&mut self, bundle: &Vec<String>, _event: &UserEvent) {
        self.calls.push(format!("effect {}", bundle.join(",")));
    }
}

pub fn is_state(model: &UserModel) -> bool {
    matches!(model, Model::State(_))
}
