use std::io::Write;

use engine_logging::engine_warn;
use rxredux_core::View;

use crate::view_model::{DeletedUsers, UserEvent, UserListState};

/// Renders the user list as plain text lines.
pub struct ConsoleView<W: Write> {
    out: W,
    loading: bool,
    state: Option<UserListState>,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            loading: false,
            state: None,
        }
    }

    /// Last state handed to [`View::set_state`].
    pub fn state(&self) -> Option<&UserListState> {
        self.state.as_ref()
    }

    pub fn into_parts(self) -> (W, Option<UserListState>) {
        (self.out, self.state)
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            engine_warn!("Failed to write to console: {}", err);
        }
    }
}

impl<W: Write> View<UserListState, DeletedUsers, UserEvent> for ConsoleView<W> {
    fn toggle_views(&mut self, is_loading: bool, event: Option<&UserEvent>) {
        if is_loading && !self.loading {
            let label = event.map(describe).unwrap_or_else(|| "working".to_string());
            self.line(&format!("... {label}"));
        }
        self.loading = is_loading;
    }

    fn show_error(&mut self, message: &str, _event: &UserEvent) {
        self.line(&format!("!! {message}"));
    }

    fn set_state(&mut self, bundle: &UserListState) {
        self.state = Some(bundle.clone());
    }

    fn render_success_state(&mut self, bundle: &UserListState) {
        let header = match &bundle.query {
            Some(query) => format!("== {} users matching \"{query}\"", bundle.users.len()),
            None => format!("== {} users", bundle.users.len()),
        };
        self.line(&header);
        for user in &bundle.users {
            self.line(&format!("   {:<8} {}", user.login, user.name));
        }
    }

    fn render_success_effect(&mut self, bundle: &DeletedUsers, _event: &UserEvent) {
        self.line(&format!("-- deleted {}", bundle.logins.join(", ")));
    }
}

fn describe(event: &UserEvent) -> String {
    match event {
        UserEvent::GetPaginatedUsers(page) => format!("loading page {page}"),
        UserEvent::DeleteUsers(logins) => format!("deleting {}", logins.join(", ")),
        UserEvent::SearchUsers(query) => format!("searching \"{query}\""),
    }
}
