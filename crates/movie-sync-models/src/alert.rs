use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Failure,
}

/// A single transient notification and the moment it is due to disappear.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlertState {
    pub message: String,
    pub kind: AlertKind,
    pub expires_at: DateTime<Utc>,
}
