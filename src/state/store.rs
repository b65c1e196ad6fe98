//! Key/value persistence for the timer record

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{debug, warn};

use super::TimerState;

/// Slot the timer record lives under
pub const TIMER_KEY: &str = "pvptimer";

/// String-keyed store holding opaque string values
pub trait KeyValueStore: Send {
    /// Read a value, `Ok(None)` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Overwrite a value
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
}

/// Store keeping one `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(format!("Failed to read {}: {}", path.display(), e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        fs::create_dir_all(&self.root)
            .map_err(|e| format!("Failed to create {}: {}", self.root.display(), e))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .map_err(|e| format!("Failed to write {}: {}", tmp.display(), e))?;
        fs::rename(&tmp, &path)
            .map_err(|e| format!("Failed to replace {}: {}", path.display(), e))
    }
}

/// In-process store, nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.values
            .lock()
            .map(|values| values.get(key).cloned())
            .map_err(|e| format!("Failed to lock memory store: {}", e))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut values = self.values.lock()
            .map_err(|e| format!("Failed to lock memory store: {}", e))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load the timer record, falling back to defaults on absence or bad data
pub fn load_timer_state(store: &dyn KeyValueStore) -> TimerState {
    let raw = match store.get(TIMER_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No persisted timer record, using defaults");
            return TimerState::default();
        }
        Err(e) => {
            warn!("Failed to read timer record, using defaults: {}", e);
            return TimerState::default();
        }
    };

    let mut state: TimerState = match serde_json::from_str(&raw) {
        Ok(state) => state,
        Err(e) => {
            warn!("Persisted timer record is unreadable, using defaults: {}", e);
            return TimerState::default();
        }
    };

    if !state.has_valid_bounds() {
        let defaults = TimerState::default();
        warn!(
            "Persisted bounds {}..{} are invalid, resetting to {}..{}",
            state.min_seconds, state.max_seconds, defaults.min_seconds, defaults.max_seconds
        );
        state.min_seconds = defaults.min_seconds;
        state.max_seconds = defaults.max_seconds;
    }

    state
}

/// Persist the full timer record
pub fn save_timer_state(store: &dyn KeyValueStore, state: &TimerState) -> Result<(), String> {
    let json = serde_json::to_string(state)
        .map_err(|e| format!("Failed to encode timer record: {}", e))?;
    store.set(TIMER_KEY, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_store(label: &str) -> FileStore {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        let root = std::env::temp_dir().join(format!("pvp-timer-{}-{}", label, suffix));
        FileStore::new(root)
    }

    #[test]
    fn missing_record_loads_defaults() {
        let store = MemoryStore::new();
        assert_eq!(load_timer_state(&store), TimerState::default());
    }

    #[test]
    fn unparsable_record_loads_defaults() {
        let store = MemoryStore::new();
        store.set(TIMER_KEY, "{not json").unwrap();
        assert_eq!(load_timer_state(&store), TimerState::default());
    }

    #[test]
    fn invalid_bounds_are_reset() {
        let store = MemoryStore::new();
        store
            .set(TIMER_KEY, r#"{"currentTime":7,"enabled":true,"pvpState":true,"minTime":90,"maxTime":10}"#)
            .unwrap();
        let state = load_timer_state(&store);
        assert_eq!(state.current_countdown, 7);
        assert!(state.enabled);
        assert_eq!(state.min_seconds, 60);
        assert_eq!(state.max_seconds, 180);
    }

    #[test]
    fn negative_min_keeps_rest_of_record() {
        let store = MemoryStore::new();
        store
            .set(TIMER_KEY, r#"{"currentTime":15,"enabled":true,"pvpState":true,"minTime":-5,"maxTime":10}"#)
            .unwrap();
        let state = load_timer_state(&store);
        assert_eq!(state.current_countdown, 15);
        assert!(state.enabled);
        assert!(state.rule_state);
        assert_eq!(state.countdown_range(), 60..=180);
    }

    #[test]
    fn file_store_survives_reopen() {
        let store = temp_store("reopen");
        let mut state = TimerState::new();
        state.enabled = true;
        state.current_countdown = 42;
        state.min_seconds = 10;
        state.max_seconds = 20;
        save_timer_state(&store, &state).unwrap();

        let reopened = FileStore::new(store.root().to_path_buf());
        assert_eq!(load_timer_state(&reopened), state);
        assert!(store.root().join("pvptimer.json").exists());

        fs::remove_dir_all(store.root()).ok();
    }

    #[test]
    fn file_store_reports_absent_key() {
        let store = temp_store("absent");
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn last_write_wins() {
        let store = MemoryStore::new();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
    }
}
