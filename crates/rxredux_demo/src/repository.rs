use std::sync::Mutex;
use std::time::Duration;

use engine_logging::engine_debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub name: String,
}

impl User {
    pub fn new(login: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("unknown users: {}", .0.join(", "))]
    UnknownUsers(Vec<String>),
    #[error("empty search query")]
    EmptyQuery,
    #[error("user store is unavailable")]
    Unavailable,
}

#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// One page of users ordered by login; empty past the last page.
    async fn page(&self, page: u32, size: usize) -> Result<Vec<User>, RepositoryError>;

    /// Users whose login or name contains `query`, ignoring case.
    async fn search(&self, query: &str) -> Result<Vec<User>, RepositoryError>;

    /// Removes all `logins`, or none of them if any is unknown.
    async fn delete(&self, logins: &[String]) -> Result<Vec<String>, RepositoryError>;
}

/// Repository over a fixed in-memory user list with simulated latency.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    latency: Duration,
}

impl InMemoryUserRepository {
    pub fn new(mut users: Vec<User>, latency: Duration) -> Self {
        users.sort();
        Self {
            users: Mutex::new(users),
            latency,
        }
    }

    pub fn seeded(latency: Duration) -> Self {
        let users = [
            ("alice", "Alice Liddell"),
            ("bob", "Bob Marley"),
            ("carol", "Carol Danvers"),
            ("dave", "Dave Grohl"),
            ("erin", "Erin Brockovich"),
            ("frank", "Frank Ocean"),
            ("grace", "Grace Hopper"),
        ]
        .into_iter()
        .map(|(login, name)| User::new(login, name))
        .collect();
        Self::new(users, latency)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn with_users<T>(&self, f: impl FnOnce(&mut Vec<User>) -> T) -> Result<T, RepositoryError> {
        let mut users = self.users.lock().map_err(|_| RepositoryError::Unavailable)?;
        Ok(f(&mut users))
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn page(&self, page: u32, size: usize) -> Result<Vec<User>, RepositoryError> {
        self.simulate_latency().await;
        let start = (page as usize).saturating_mul(size);
        self.with_users(|users| users.iter().skip(start).take(size).cloned().collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<User>, RepositoryError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(RepositoryError::EmptyQuery);
        }
        self.simulate_latency().await;
        self.with_users(|users| {
            users
                .iter()
                .filter(|user| {
                    user.login.to_lowercase().contains(&needle)
                        || user.name.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect()
        })
    }

    async fn delete(&self, logins: &[String]) -> Result<Vec<String>, RepositoryError> {
        self.simulate_latency().await;
        self.with_users(|users| {
            let unknown: Vec<String> = logins
                .iter()
                .filter(|login| !users.iter().any(|user| &user.login == *login))
                .cloned()
                .collect();
            if !unknown.is_empty() {
                return Err(RepositoryError::UnknownUsers(unknown));
            }
            users.retain(|user| !logins.contains(&user.login));
            engine_debug!("Deleted {} users, {} left", logins.len(), users.len());
            Ok(logins.to_vec())
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository() -> InMemoryUserRepository {
        InMemoryUserRepository::seeded(Duration::ZERO)
    }

    #[tokio::test]
    async fn pages_are_ordered_and_bounded() {
        let repo = repository();
        let first = repo.page(0, 3).await.unwrap();
        let logins: Vec<_> = first.iter().map(|user| user.login.as_str()).collect();
        assert_eq!(logins, vec!["alice", "bob", "carol"]);
        assert_eq!(repo.page(2, 3).await.unwrap().len(), 1);
        assert!(repo.page(9, 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_matches_login_or_name() {
        let repo = repository();
        let found = repo.search("HOPPER").await.unwrap();
        assert_eq!(found, vec![User::new("grace", "Grace Hopper")]);
        assert!(matches!(repo.search("  ").await, Err(RepositoryError::EmptyQuery)));
    }

    #[tokio::test]
    async fn delete_is_all_or_nothing() {
        let repo = repository();
        let err = repo
            .delete(&["alice".to_string(), "zed".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown users: zed");
        assert_eq!(repo.page(0, 10).await.unwrap().len(), 7);

        let deleted = repo.delete(&["alice".to_string()]).await.unwrap();
        assert_eq!(deleted, vec!["alice".to_string()]);
        assert_eq!(repo.page(0, 10).await.unwrap().len(), 6);
    }
}
