//! Value store client: the narrow seam to the external key-value store.
//!
//! The wire protocol is entirely the `redis` client's business; this module
//! owns the read-with-fallback semantics the widget depends on. `fetch`
//! performs exactly one blocking read and recovers every read failure into
//! the `"nil"` sentinel so a flaky store never kills the refresh loop.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, warn};
use redis::Commands;
use thiserror::Error;

/// Literal substituted for a value whose read missed or failed.
pub const FALLBACK_VALUE: &str = "nil";

const READ_TIMEOUT: Duration = Duration::from_millis(800);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("store read failed: {0}")]
    Read(String),
}

/// One blocking get-by-key against the external store. `Ok(None)` is a miss.
pub trait ValueStore: Send {
    fn get(&mut self, key: &str) -> Result<Option<String>, StoreError>;
}

/// A store handle shared between widgets; one connection per process.
pub type SharedStore = Arc<Mutex<dyn ValueStore>>;

/// Fetch a value for one slot.
///
/// Misses and read errors are recovered locally into [`FALLBACK_VALUE`];
/// one trailing newline is stripped from the raw value. The `Result` is
/// kept so a backend with a genuinely fatal error class aborts composition
/// upstream; the backends below never produce one for a plain read.
pub fn fetch(store: &mut dyn ValueStore, key: &str) -> Result<String, StoreError> {
    let mut value = match store.get(key) {
        Ok(Some(v)) => v,
        Ok(None) => {
            debug!("key {:?} missing, substituting {:?}", key, FALLBACK_VALUE);
            FALLBACK_VALUE.to_string()
        }
        Err(e) => {
            warn!("read of {:?} failed ({}), substituting {:?}", key, e, FALLBACK_VALUE);
            FALLBACK_VALUE.to_string()
        }
    };
    if value.ends_with('\n') {
        value.pop();
    }
    Ok(value)
}

/// Store backend over a long-lived blocking Redis connection.
pub struct RedisStore {
    conn: redis::Connection,
}

impl RedisStore {
    pub fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection()?;
        conn.set_read_timeout(Some(READ_TIMEOUT))?;
        conn.set_write_timeout(Some(READ_TIMEOUT))?;
        Ok(Self { conn })
    }
}

impl ValueStore for RedisStore {
    fn get(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.conn.get(key)?)
    }
}

/// In-process store backend, used in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    fail_reads: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    /// Make every subsequent read return an error (exercises the fallback path).
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }
}

impl ValueStore for MemoryStore {
    fn get(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Read("simulated read failure".to_string()));
        }
        Ok(self.values.get(key).cloned())
    }
}
