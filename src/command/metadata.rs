use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

static COMMAND_SEQ: AtomicU64 = AtomicU64::new(1);

/// Dispatch metadata carried alongside a command body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    pub id: String,
    pub created_at: SystemTime,
    /// Headers propagated to interceptors and outbox entries (correlation IDs, tenant, etc.).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

impl CommandMetadata {
    pub fn new() -> Self {
        Self::with_id(next_command_id())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: SystemTime::now(),
            headers: HashMap::new(),
        }
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|s| s.as_str())
    }

    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(key.into(), value.into());
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.header("correlation_id")
    }

    pub fn causation_id(&self) -> Option<&str> {
        self.header("causation_id")
    }
}

impl Default for CommandMetadata {
    fn default() -> Self {
        Self::new()
    }
}

fn next_command_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let seq = COMMAND_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("cmd-{}-{}", nanos, seq)
}
