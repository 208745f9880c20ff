use std::io::Write;
use std::sync::Arc;

use engine_logging::{engine_error, engine_info};
use futures_util::stream;
use rxredux_core::{ActionError, ModelObserver};
use rxredux_engine::{StoreSettings, ViewModel, ViewModelExt};

use crate::config::DemoConfig;
use crate::persistence::{load_state, save_state};
use crate::repository::InMemoryUserRepository;
use crate::view::ConsoleView;
use crate::view_model::{UserEvent, UserListState, UserListViewModel};

/// Runs the user list screen over `events`, rendering to `out`.
///
/// The screen starts from the saved state, replays it first, and saves the
/// last rendered state when the events are exhausted.
pub async fn run_screen<W: Write>(
    config: &DemoConfig,
    events: Vec<UserEvent>,
    out: W,
) -> anyhow::Result<(W, UserListState)> {
    let initial = load_state(&config.state_file);
    let repository = Arc::new(InMemoryUserRepository::seeded(config.latency));
    let view_model = Arc::new(UserListViewModel::new(repository, config.page_size));

    let settings = StoreSettings {
        emit_initial_state: true,
        ..StoreSettings::with_tag("UserList")
    };
    let messages = view_model.clone();
    let mut store = view_model.store(stream::iter(events), initial.clone(), settings);
    let subscription = store.subscribe();

    let mut observer = ModelObserver::with_error_message_factory(
        ConsoleView::new(out),
        move |error: &ActionError, event: &UserEvent| {
            messages.error_message_factory(error, event)
        },
    );
    subscription.observe(&mut observer).await?;
    store.join().await?;

    let (out, rendered) = observer.into_view().into_parts();
    let state = rendered.unwrap_or(initial);
    if let Err(err) = save_state(&config.state_file, &state) {
        engine_error!("Failed to save state to {:?}: {}", config.state_file, err);
    } else {
        engine_info!("Saved {} users to {:?}", state.users.len(), config.state_file);
    }
    Ok((out, state))
}
