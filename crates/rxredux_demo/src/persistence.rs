use std::fs;
use std::io::{self, Write};
use std::path::Path;

use chrono::Utc;
use engine_logging::{engine_info, engine_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::view_model::UserListState;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("could not serialize state: {0}")]
    Serialize(#[from] ron::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedScreen {
    saved_utc: String,
    state: UserListState,
}

/// Loads the saved screen state. Missing or unreadable files yield the
/// default state.
pub fn load_state(path: &Path) -> UserListState {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return UserListState::default();
        }
        Err(err) => {
            engine_warn!("Failed to read persisted state from {:?}: {}", path, err);
            return UserListState::default();
        }
    };

    match ron::from_str::<PersistedScreen>(&content) {
        Ok(screen) => {
            engine_info!(
                "Restored {} users saved at {} from {:?}",
                screen.state.users.len(),
                screen.saved_utc,
                path
            );
            screen.state
        }
        Err(err) => {
            engine_warn!("Failed to parse persisted state from {:?}: {}", path, err);
            UserListState::default()
        }
    }
}

/// Atomically replaces the saved screen state.
pub fn save_state(path: &Path, state: &UserListState) -> Result<(), PersistError> {
    let screen = PersistedScreen {
        saved_utc: Utc::now().to_rfc3339(),
        state: state.clone(),
    };
    let content = ron::ser::to_string_pretty(&screen, ron::ser::PrettyConfig::new())?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|err| PersistError::Io(err.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::User;

    #[test]
    fn state_survives_a_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screen.ron");
        let state = UserListState {
            users: vec![User::new("bob", "Bob Marley")],
            last_page: Some(0),
            query: None,
        };
        save_state(&path, &state).unwrap();
        assert_eq!(load_state(&path), state);
    }

    #[test]
    fn missing_or_corrupt_files_give_default_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screen.ron");
        assert_eq!(load_state(&path), UserListState::default());

        fs::write(&path, "not ron at all (").unwrap();
        assert_eq!(load_state(&path), UserListState::default());
    }
}
