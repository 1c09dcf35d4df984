use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::DataStore;

/// A suspended session: enough to rebuild a wizard at the same position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub session_id: Uuid,
    pub form: String,
    pub step_index: usize,
    pub saved_at: DateTime<Utc>,
    pub data: DataStore,
}

impl Snapshot {
    /// Snapshot for a new session id, stamped now.
    pub fn new(form: impl Into<String>, step_index: usize, data: DataStore) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            form: form.into(),
            step_index,
            saved_at: Utc::now(),
            data,
        }
    }
}
