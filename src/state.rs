use crate::hosts::HostnameSet;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncStatus {
    pub cycles: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_outcome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_cycle_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_write_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    pub consecutive_failures: u32,
    pub skipped_namespaces: Vec<String>,
    pub hosts: HostnameSet,
}

/// Status shared between the reconciler (sole writer) and the http router.
#[derive(Clone, Default)]
pub struct State {
    pub status: Arc<RwLock<SyncStatus>>,
}

impl State {
    pub async fn snapshot(&self) -> SyncStatus {
        self.status.read().await.clone()
    }
}
