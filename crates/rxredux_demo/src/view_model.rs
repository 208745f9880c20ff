use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use rxredux_core::ActionError;
use rxredux_engine::{Action, Emission, ViewModel};
use serde::{Deserialize, Serialize};

use crate::repository::{User, UserRepository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    GetPaginatedUsers(u32),
    DeleteUsers(Vec<String>),
    SearchUsers(String),
}

/// Durable state of the user list screen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserListState {
    pub users: Vec<User>,
    pub last_page: Option<u32>,
    pub query: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserListResult {
    Page { page: u32, users: Vec<User> },
    Search { query: String, users: Vec<User> },
    Deleted(Vec<String>),
}

/// One-shot confirmation shown after a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedUsers {
    pub logins: Vec<String>,
}

pub struct UserListViewModel {
    repository: Arc<dyn UserRepository>,
    page_size: usize,
}

impl UserListViewModel {
    pub fn new(repository: Arc<dyn UserRepository>, page_size: usize) -> Self {
        Self {
            repository,
            page_size,
        }
    }
}

impl ViewModel for UserListViewModel {
    type Event = UserEvent;
    type Result = UserListResult;
    type State = UserListState;
    type Effect = DeletedUsers;

    fn map_events_to_actions(&self, event: &UserEvent) -> Action<UserListResult, DeletedUsers> {
        let repository = self.repository.clone();
        match event.clone() {
            UserEvent::GetPaginatedUsers(page) => {
                let size = self.page_size;
                Action::from_future(async move {
                    let users = repository
                        .page(page, size)
                        .await
                        .map_err(ActionError::from_error)?;
                    Ok(UserListResult::Page { page, users })
                })
            }
            UserEvent::SearchUsers(query) => Action::from_future(async move {
                let users = repository
                    .search(&query)
                    .await
                    .map_err(ActionError::from_error)?;
                Ok(UserListResult::Search { query, users })
            }),
            // The confirmation ends the loading effect before the shrunk list
            // is rendered.
            UserEvent::DeleteUsers(logins) => {
                let deleted = async move {
                    repository
                        .delete(&logins)
                        .await
                        .map_err(ActionError::from_error)
                };
                Action::effect(stream::once(deleted).flat_map(|result| {
                    let emissions = match result {
                        Ok(logins) => vec![
                            Ok(Emission::Effect(DeletedUsers {
                                logins: logins.clone(),
                            })),
                            Ok(Emission::State(UserListResult::Deleted(logins))),
                        ],
                        Err(error) => vec![Err(error)],
                    };
                    stream::iter(emissions)
                }))
            }
        }
    }

    fn reducer(
        &self,
        incoming: UserListResult,
        _event: &UserEvent,
        current: &UserListState,
    ) -> UserListState {
        reduce_user_list(incoming, current)
    }

    fn error_message_factory(&self, error: &ActionError, event: &UserEvent) -> String {
        match event {
            UserEvent::GetPaginatedUsers(page) => format!("Could not load page {page}: {error}"),
            UserEvent::DeleteUsers(_) => format!("Could not delete: {error}"),
            UserEvent::SearchUsers(query) => format!("Search for \"{query}\" failed: {error}"),
        }
    }
}

/// Pure fold of one result into the screen state.
pub fn reduce_user_list(incoming: UserListResult, current: &UserListState) -> UserListState {
    let mut next = current.clone();
    match incoming {
        UserListResult::Page { page, users } => {
            if next.query.take().is_some() {
                next.users.clear();
            }
            for user in users {
                if !next.users.iter().any(|known| known.login == user.login) {
                    next.users.push(user);
                }
            }
            next.users.sort();
            next.last_page = Some(page);
        }
        UserListResult::Search { query, users } => {
            next.users = users;
            next.query = Some(query);
        }
        UserListResult::Deleted(logins) => {
            next.users.retain(|user| !logins.contains(&user.login));
        }
    }
    next
}
