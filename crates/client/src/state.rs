use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::session::Session;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct SavedSession {
    user_id: String,
    email: String,
    access_token: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    session: Option<SavedSession>,
}

/// On-disk state so a session survives between invocations.
///
/// Stored as pretty JSON and written via a tmp-file rename so a crash mid
/// write cannot truncate the previous state.
#[derive(Clone, Debug)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load_session(&self) -> Option<Session> {
        let file = read_json_file(&self.path)?;
        file.session.map(|saved| Session {
            user_id: saved.user_id,
            email: saved.email,
            access_token: saved.access_token,
        })
    }

    pub fn save_session(&self, session: Option<&Session>) -> Result<(), std::io::Error> {
        let file = StateFile {
            session: session.map(|session| SavedSession {
                user_id: session.user_id.clone(),
                email: session.email.clone(),
                access_token: session.access_token.clone(),
            }),
        };
        write_json_file(&self.path, &file)
    }
}

fn read_json_file(path: &Path) -> Option<StateFile> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

fn write_json_file(path: &Path, state: &StateFile) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(state)
        .map_err(|_| std::io::Error::other("serialize failed"))?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(&tmp, path)?;
            let _ = fs::remove_file(&tmp);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_state_path() -> PathBuf {
        std::env::temp_dir().join(format!("divvy_state_{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn session_round_trips_through_the_state_file() {
        let path = temp_state_path();
        let store = StateStore::new(path.clone());

        let session = Session {
            user_id: "a".to_string(),
            email: "a@example.com".to_string(),
            access_token: "token".to_string(),
        };
        store.save_session(Some(&session)).unwrap();
        assert_eq!(store.load_session(), Some(session));

        store.save_session(None).unwrap();
        assert_eq!(store.load_session(), None);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_or_garbage_file_loads_as_no_session() {
        let path = temp_state_path();
        let store = StateStore::new(path.clone());
        assert_eq!(store.load_session(), None);

        fs::write(&path, "not json").unwrap();
        assert_eq!(store.load_session(), None);
        let _ = fs::remove_file(path);
    }
}
