//! Durable storage of the session.
//!
//! The snapshot lives under a single versioned key. A snapshot written with a
//! different version, or one that cannot be parsed, is dropped on rehydration
//! and the session starts from its initial value.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::session::{Session, SessionCommand, SessionStore};
use crate::UserName;

pub const KEY_PREFIX: &str = "persist:";
pub const DEFAULT_KEY: &str = "user";
pub const DEFAULT_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("storage_error: {0}")]
    Storage(String),
    #[error("serialize_error")]
    Serialize(#[from] serde_json::Error),
}

/// Key-value backend the snapshot is written to.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistError>;
    fn remove(&self, key: &str) -> Result<(), PersistError>;
}

/// In-memory backend. Clones share the same entries, so a clone survives a
/// simulated restart of the persistor that owned the original.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistConfig {
    pub key: String,
    pub version: u32,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_KEY.to_owned(),
            version: DEFAULT_VERSION,
        }
    }
}

impl PersistConfig {
    pub fn storage_key(&self) -> String {
        format!("{KEY_PREFIX}{key}", key = self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PersistMeta {
    version: u32,
    #[serde(default)]
    rehydrated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    #[serde(default)]
    token: String,
    #[serde(default)]
    user_name: UserName,
    #[serde(default)]
    persist_is_checked: bool,
    #[serde(rename = "_persist", default)]
    meta: Option<PersistMeta>,
}

impl Snapshot {
    fn of(session: &Session, version: u32) -> Self {
        Self {
            token: session.token.clone(),
            user_name: (*session.user_name).clone(),
            persist_is_checked: session.persist_is_checked,
            meta: Some(PersistMeta {
                version,
                rehydrated: true,
            }),
        }
    }

    fn into_session(self) -> Session {
        Session {
            token: self.token,
            user_name: Rc::new(self.user_name),
            persist_is_checked: self.persist_is_checked,
        }
    }
}

pub struct Persistor<S> {
    storage: S,
    config: PersistConfig,
    paused: Cell<bool>,
    last_written: RefCell<Option<String>>,
}

impl<S: SessionStorage> Persistor<S> {
    pub fn new(storage: S, config: PersistConfig) -> Self {
        Self {
            storage,
            config,
            paused: Cell::new(false),
            last_written: RefCell::new(None),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &PersistConfig {
        &self.config
    }

    /// Loads the stored snapshot, falling back to the initial session when
    /// there is none or when it cannot be used.
    pub fn rehydrate(&self) -> Result<Session, PersistError> {
        let key = self.config.storage_key();
        let Some(raw) = self.storage.get(&key)? else {
            log::debug!("No persisted session, key={key}");
            return Ok(Session::default());
        };

        let snapshot = match serde_json::from_str::<Snapshot>(&raw) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                log::warn!("Discarding unreadable session snapshot, key={key}, error={error}");
                self.storage.remove(&key)?;
                return Ok(Session::default());
            }
        };

        let stored_version = snapshot.meta.as_ref().map(|meta| meta.version);
        if stored_version != Some(self.config.version) {
            log::warn!(
                "Discarding session snapshot, key={key}, stored_version={stored_version:?}, expected_version={expected}",
                expected = self.config.version,
            );
            self.storage.remove(&key)?;
            return Ok(Session::default());
        }

        *self.last_written.borrow_mut() = Some(raw);
        let session = snapshot.into_session();
        log::info!("Session rehydrated, key={key}, logged={}", session.logged());
        Ok(session)
    }

    /// Writes the session snapshot. Returns whether storage was touched.
    pub fn persist(&self, session: &Session) -> Result<bool, PersistError> {
        if self.paused.get() {
            return Ok(false);
        }
        let mut last_written = self.last_written.borrow_mut();
        if last_written.is_none() && session.is_initial() {
            return Ok(false);
        }
        let raw = serde_json::to_string(&Snapshot::of(session, self.config.version))?;
        if last_written.as_deref() == Some(raw.as_str()) {
            return Ok(false);
        }
        self.storage.set(&self.config.storage_key(), &raw)?;
        *last_written = Some(raw);
        Ok(true)
    }

    pub fn pause(&self) {
        self.paused.set(true);
    }

    pub fn resume(&self) {
        self.paused.set(false);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get()
    }

    /// Removes the stored snapshot. Purging an empty storage is not an error.
    pub fn purge(&self) -> Result<(), PersistError> {
        let key = self.config.storage_key();
        self.storage.remove(&key)?;
        *self.last_written.borrow_mut() = None;
        log::info!("Session purged, key={key}");
        Ok(())
    }

    pub fn purge_store(&self, store: &SessionStore) -> Result<SessionStore, PersistError> {
        self.purge()?;
        Ok(store.reduce(SessionCommand::Reset))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum GateState {
    Closed,
    /// Snapshot read, waiting for the store to apply it.
    Pending(Session),
    Open,
}

/// Holds writes back until the rehydrated session has reached the store.
///
/// Rehydration is read first and applied later, so between the two the store
/// still carries its initial value. Writing it then would overwrite the stored
/// snapshot. The gate opens on the first `persist` of the session returned by
/// `rehydrate`; every earlier write is skipped.
pub struct PersistGate<S> {
    persistor: Persistor<S>,
    state: RefCell<GateState>,
}

impl<S: SessionStorage> PersistGate<S> {
    pub fn new(persistor: Persistor<S>) -> Self {
        Self {
            persistor,
            state: RefCell::new(GateState::Closed),
        }
    }

    pub fn persistor(&self) -> &Persistor<S> {
        &self.persistor
    }

    pub fn is_open(&self) -> bool {
        *self.state.borrow() == GateState::Open
    }

    /// A failed read still arms the gate with the initial session, which is
    /// what the store falls back to.
    pub fn rehydrate(&self) -> Result<Session, PersistError> {
        let result = self.persistor.rehydrate();
        let expected = result.as_ref().cloned().unwrap_or_default();
        *self.state.borrow_mut() = GateState::Pending(expected);
        result
    }

    pub fn persist(&self, session: &Session) -> Result<bool, PersistError> {
        let mut state = self.state.borrow_mut();
        match &*state {
            GateState::Open => {}
            GateState::Pending(expected) if expected == session => {
                log::debug!("Persist gate open");
                *state = GateState::Open;
            }
            GateState::Closed | GateState::Pending(_) => {
                log::debug!("Persist skipped, rehydration not applied yet");
                return Ok(false);
            }
        }
        drop(state);
        self.persistor.persist(session)
    }

    pub fn purge(&self) -> Result<(), PersistError> {
        self.persistor.purge()
    }
}
