//! Typed access and write-through mirrors

use crate::{KeyValueStore, Result, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Deserialize the value under `key`, falling back to `default`
///
/// Absent keys, backend failures and undecodable text all yield the
/// default. Only the last two are logged.
pub fn read_or_default<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    let text = match store.load(key) {
        Ok(Some(text)) => text,
        Ok(None) => return default,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored value, using default");
            return default;
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value is not valid, using default");
            default
        }
    }
}

/// Key that keeps the undecodable text found under `key`
#[must_use]
pub fn backup_key(key: &str) -> String {
    format!("{key}.unreadable")
}

/// Copy undecodable `text` aside; returns whether `key` may now be overwritten
fn preserve(store: &dyn KeyValueStore, key: &str, text: &str) -> bool {
    let backup = backup_key(key);
    match store.save(&backup, text) {
        Ok(()) => {
            tracing::warn!(key, backup = %backup, "backed up unreadable stored value");
            true
        }
        Err(e) => {
            tracing::error!(key, error = %e, "failed to back up unreadable stored value, writes are refused");
            false
        }
    }
}

/// Serialize `value` as JSON and store it under `key`
pub fn write_value<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let text = serde_json::to_string(value)?;
    store.save(key, &text)
}

/// In-memory mirror of one stored key
///
/// Every mutation is written to the store first and only committed to
/// memory once the write succeeded, so the two never disagree.
///
/// A stored value that fails to decode is copied to [`backup_key`] before
/// the mirror starts from its default. If that copy fails, or the key could
/// not be read at all, every write returns [`StoreError::Unreadable`].
pub struct Persisted<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    value: T,
    writable: bool,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Read `key` from `store`, or start from `default`
    pub fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let (value, writable) = match store.load(&key) {
            Ok(None) => (default, true),
            Ok(Some(text)) => match serde_json::from_str(&text) {
                Ok(value) => (value, true),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "stored value is not valid, using default");
                    (default, preserve(store.as_ref(), &key, &text))
                }
            },
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to read stored value, using default");
                (default, false)
            }
        };
        Self {
            store,
            key,
            value,
            writable,
        }
    }

    /// Current value
    #[inline]
    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Storage key
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether writes reach the store
    #[inline]
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Replace the value
    pub fn replace(&mut self, value: T) -> Result<()> {
        if !self.writable {
            return Err(StoreError::Unreadable(self.key.clone()));
        }
        write_value(self.store.as_ref(), &self.key, &value)?;
        self.value = value;
        Ok(())
    }

    /// Apply `f` to a copy of the value, then persist and commit it
    ///
    /// If the write fails the stored and in-memory values are unchanged.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Result<R>
    where
        T: Clone,
    {
        let mut next = self.value.clone();
        let out = f(&mut next);
        self.replace(next)?;
        Ok(out)
    }
}

impl<T: fmt::Debug> fmt::Debug for Persisted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persisted")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
