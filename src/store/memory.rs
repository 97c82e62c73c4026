//! In-memory mission store (non-persistent).

use super::{Mission, MissionStore};
use crate::error::StoreError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryMissionStore {
    rows: Arc<RwLock<Vec<Mission>>>,
}

impl InMemoryMissionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MissionStore for InMemoryMissionStore {
    fn is_persistent(&self) -> bool {
        false
    }

    async fn insert_mission(&self, name: &str, time: i64) -> Result<i64, StoreError> {
        let mut rows = self.rows.write().await;
        // Ids are never reused: rows are never removed, so the last id is the max.
        let id = rows.last().map_or(1, |m| m.id + 1);
        rows.push(Mission {
            id,
            name: name.to_string(),
            time,
        });
        Ok(id)
    }

    async fn list_missions(&self) -> Result<Vec<Mission>, StoreError> {
        let mut missions = self.rows.read().await.clone();
        missions.sort_by(|a, b| b.time.cmp(&a.time).then(b.id.cmp(&a.id)));
        Ok(missions)
    }
}
