//! Plugin settings snapshot
//!
//! Settings are read from the editor through a [`SettingsSource`] and frozen
//! into an immutable [`Settings`] value. A [`SettingsStore`] owns the single
//! live snapshot, builds it lazily on first access, and swaps it wholesale on
//! [`reload`](SettingsStore::reload).

use crate::core::{LoggerError, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Editor-side option names.
pub mod keys {
    pub const REFRESH_KEY: &str = "do_refresh_key";
    pub const UPDATE_TIME: &str = "do_update_time";
    pub const NEW_PROCESS_WINDOW_COMMAND: &str = "do_new_process_window_command";
    pub const AUTO_SHOW_PROCESS_WINDOW: &str = "do_auto_show_process_window";
    pub const CHECK_INTERVAL: &str = "do_check_interval";
}

/// Lowest accepted process check interval; smaller values are raised to it.
pub const MIN_CHECK_INTERVAL_MS: u64 = 500;

/// Supplier of raw option values, normally the host editor.
pub trait SettingsSource: Send + Sync {
    /// Raw value for `key`, or `None` if the editor does not define it.
    fn fetch(&self, key: &str) -> Option<Value>;
}

impl SettingsSource for HashMap<String, Value> {
    fn fetch(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl SettingsSource for Map<String, Value> {
    fn fetch(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

/// Adapts a lookup closure into a [`SettingsSource`].
pub struct FnSource<F>(pub F);

impl<F> SettingsSource for FnSource<F>
where
    F: Fn(&str) -> Option<Value> + Send + Sync,
{
    fn fetch(&self, key: &str) -> Option<Value> {
        (self.0)(key)
    }
}

/// Resolved plugin options. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    refresh_key: String,
    update_time_ms: i64,
    new_process_window_command: String,
    auto_show_process_window: bool,
    #[serde(deserialize_with = "deserialize_check_interval")]
    check_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_key: "<C-L>".to_string(),
            update_time_ms: 500,
            new_process_window_command: "new".to_string(),
            auto_show_process_window: true,
            check_interval_ms: MIN_CHECK_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Read every recognized option from `source`.
    ///
    /// Missing options keep their defaults. Present options must coerce to
    /// the expected type.
    pub fn from_source(source: &dyn SettingsSource) -> Result<Self> {
        let mut settings = Settings::default();

        if let Some(value) = source.fetch(keys::REFRESH_KEY) {
            settings.refresh_key = coerce_string(keys::REFRESH_KEY, value)?;
        }
        if let Some(value) = source.fetch(keys::UPDATE_TIME) {
            settings.update_time_ms = coerce_int(keys::UPDATE_TIME, value)?;
        }
        if let Some(value) = source.fetch(keys::NEW_PROCESS_WINDOW_COMMAND) {
            settings.new_process_window_command =
                coerce_string(keys::NEW_PROCESS_WINDOW_COMMAND, value)?;
        }
        if let Some(value) = source.fetch(keys::AUTO_SHOW_PROCESS_WINDOW) {
            settings.auto_show_process_window =
                coerce_bool(keys::AUTO_SHOW_PROCESS_WINDOW, value)?;
        }
        if let Some(value) = source.fetch(keys::CHECK_INTERVAL) {
            let ms = coerce_int(keys::CHECK_INTERVAL, value)?;
            settings.check_interval_ms = clamp_check_interval(ms);
        }

        Ok(settings)
    }

    pub fn refresh_key(&self) -> &str {
        &self.refresh_key
    }

    /// Update interval as a duration; negative values read as zero.
    pub fn update_time(&self) -> Duration {
        Duration::from_millis(u64::try_from(self.update_time_ms).unwrap_or(0))
    }

    /// Update interval exactly as the editor supplied it.
    pub fn update_time_ms(&self) -> i64 {
        self.update_time_ms
    }

    pub fn new_process_window_command(&self) -> &str {
        &self.new_process_window_command
    }

    pub fn auto_show_process_window(&self) -> bool {
        self.auto_show_process_window
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }

    pub fn check_interval_ms(&self) -> u64 {
        self.check_interval_ms
    }
}

fn clamp_check_interval(ms: i64) -> u64 {
    u64::try_from(ms).map_or(MIN_CHECK_INTERVAL_MS, |ms| ms.max(MIN_CHECK_INTERVAL_MS))
}

fn deserialize_check_interval<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let ms = i64::deserialize(deserializer)?;
    Ok(clamp_check_interval(ms))
}

fn coerce_string(key: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(LoggerError::setting(key, format!("expected a string, got {}", other))),
    }
}

fn coerce_int(key: &str, value: Value) -> Result<i64> {
    match value {
        Value::Number(ref n) => n
            .as_i64()
            .ok_or_else(|| LoggerError::setting(key, format!("expected an integer, got {}", n))),
        Value::String(ref s) => s
            .trim()
            .parse()
            .map_err(|_| LoggerError::setting(key, format!("expected an integer, got '{}'", s))),
        other => Err(LoggerError::setting(key, format!("expected an integer, got {}", other))),
    }
}

fn coerce_bool(key: &str, value: Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(b),
        Value::String(ref s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(ref s) if s.eq_ignore_ascii_case("false") => Ok(false),
        other => coerce_int(key, other).map(|n| n != 0),
    }
}

/// Owner of the live [`Settings`] snapshot.
///
/// Readers get an `Arc<Settings>`; a reload publishes a new snapshot without
/// disturbing readers still holding the old one.
pub struct SettingsStore {
    source: Box<dyn SettingsSource>,
    current: RwLock<Option<Arc<Settings>>>,
}

impl SettingsStore {
    pub fn new(source: impl SettingsSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            current: RwLock::new(None),
        }
    }

    /// Build a store over a JSON object of option values.
    ///
    /// # Example
    ///
    /// ```
    /// use editor_plugin_log::SettingsStore;
    ///
    /// let store = SettingsStore::from_json(r#"{"do_check_interval": "100"}"#)?;
    /// assert_eq!(store.instance()?.check_interval_ms(), 500);
    /// # Ok::<(), editor_plugin_log::LoggerError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let map: Map<String, Value> = serde_json::from_str(json)?;
        Ok(Self::new(map))
    }

    /// Re-read every option and replace the current snapshot.
    ///
    /// On error the previous snapshot, if any, stays in place.
    pub fn reload(&self) -> Result<Arc<Settings>> {
        let settings = Arc::new(Settings::from_source(self.source.as_ref())?);
        *self.current.write() = Some(Arc::clone(&settings));
        Ok(settings)
    }

    /// Current snapshot, loading it on first use.
    pub fn instance(&self) -> Result<Arc<Settings>> {
        if let Some(settings) = self.current.read().as_ref() {
            return Ok(Arc::clone(settings));
        }

        let mut slot = self.current.write();
        if let Some(settings) = slot.as_ref() {
            return Ok(Arc::clone(settings));
        }
        let settings = Arc::new(Settings::from_source(self.source.as_ref())?);
        *slot = Some(Arc::clone(&settings));
        Ok(settings)
    }

    /// Current snapshot without triggering a load.
    pub fn current(&self) -> Option<Arc<Settings>> {
        self.current.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn source(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_reads_all_options() {
        let src = source(&[
            (keys::REFRESH_KEY, json!("<F5>")),
            (keys::UPDATE_TIME, json!("250")),
            (keys::NEW_PROCESS_WINDOW_COMMAND, json!("vnew")),
            (keys::AUTO_SHOW_PROCESS_WINDOW, json!("0")),
            (keys::CHECK_INTERVAL, json!(900)),
        ]);

        let settings = Settings::from_source(&src).unwrap();
        assert_eq!(settings.refresh_key(), "<F5>");
        assert_eq!(settings.update_time(), Duration::from_millis(250));
        assert_eq!(settings.new_process_window_command(), "vnew");
        assert!(!settings.auto_show_process_window());
        assert_eq!(settings.check_interval_ms(), 900);
    }

    #[test]
    fn test_check_interval_floor() {
        let low = source(&[(keys::CHECK_INTERVAL, json!(100))]);
        assert_eq!(Settings::from_source(&low).unwrap().check_interval_ms(), 500);

        let negative = source(&[(keys::CHECK_INTERVAL, json!("-20"))]);
        assert_eq!(Settings::from_source(&negative).unwrap().check_interval_ms(), 500);

        let exact = source(&[(keys::CHECK_INTERVAL, json!(500))]);
        assert_eq!(Settings::from_source(&exact).unwrap().check_interval_ms(), 500);
    }

    #[test]
    fn test_defaults_for_missing_options() {
        let settings = Settings::from_source(&HashMap::<String, Value>::new()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_negative_update_time_passes_through() {
        let src = source(&[(keys::UPDATE_TIME, json!("-5"))]);
        let settings = Settings::from_source(&src).unwrap();
        assert_eq!(settings.update_time_ms(), -5);
        assert_eq!(settings.update_time(), Duration::ZERO);

        let store = SettingsStore::new(source(&[(keys::UPDATE_TIME, json!(-1))]));
        assert_eq!(store.reload().unwrap().update_time_ms(), -1);
    }

    #[test]
    fn test_bool_coercion() {
        for (raw, expected) in [
            (json!(1), true),
            (json!("1"), true),
            (json!(0), false),
            (json!(true), true),
            (json!("false"), false),
        ] {
            let src = source(&[(keys::AUTO_SHOW_PROCESS_WINDOW, raw)]);
            assert_eq!(
                Settings::from_source(&src).unwrap().auto_show_process_window(),
                expected
            );
        }
    }

    #[test]
    fn test_invalid_values() {
        let src = source(&[(keys::UPDATE_TIME, json!("soon"))]);
        let err = Settings::from_source(&src).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidSetting { .. }));
        assert!(err.to_string().contains(keys::UPDATE_TIME));

        let src = source(&[(keys::REFRESH_KEY, json!([1, 2]))]);
        assert!(Settings::from_source(&src).is_err());
    }

    #[test]
    fn test_instance_loads_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let store = SettingsStore::new(FnSource(move |key: &str| -> Option<Value> {
            if key == keys::CHECK_INTERVAL {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            None
        }));

        assert!(store.current().is_none());
        let first = store.instance().unwrap();
        let second = store.instance().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let reloaded = store.reload().unwrap();
        assert!(!Arc::ptr_eq(&first, &reloaded));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_reload_keeps_previous() {
        use std::sync::atomic::AtomicBool;

        let broken = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&broken);
        let store = SettingsStore::new(FnSource(move |key: &str| -> Option<Value> {
            (key == keys::UPDATE_TIME).then(|| {
                if flag.load(Ordering::SeqCst) {
                    json!("soon")
                } else {
                    json!(300)
                }
            })
        }));

        let before = store.instance().unwrap();
        assert_eq!(before.update_time_ms(), 300);

        broken.store(true, Ordering::SeqCst);
        assert!(store.reload().is_err());

        let after = store.current().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(matches!(
            SettingsStore::from_json("[1, 2]"),
            Err(LoggerError::Json(_))
        ));
    }

    #[test]
    fn test_deserialize_clamps() {
        let settings: Settings =
            serde_json::from_str(r#"{"refresh_key": "<C-R>", "check_interval_ms": 120}"#).unwrap();
        assert_eq!(settings.refresh_key(), "<C-R>");
        assert_eq!(settings.check_interval_ms(), 500);
        assert_eq!(settings.update_time_ms(), 500);
    }
}
