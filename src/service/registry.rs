//! 多對局管理
//!
//! 每個對局各自一把鎖，對局之間不共享可變狀態；
//! 同一對局的動作由鎖串行化。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::error::RulesError;

use super::config::SessionConfig;
use super::state::MatchSession;

pub type MatchId = u64;

#[derive(Default)]
pub struct MatchRegistry {
    sessions: DashMap<MatchId, Arc<Mutex<MatchSession>>>,
    next_id: AtomicU64,
}

impl MatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 發牌並登記新對局
    pub fn create(&self, config: SessionConfig) -> MatchId {
        self.insert(MatchSession::deal(config))
    }

    /// 登記既有的對局
    pub fn insert(&self, session: MatchSession) -> MatchId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.sessions.insert(id, Arc::new(Mutex::new(session)));
        info!(match_id = id, "match created");
        id
    }

    /// 在該對局的鎖內執行 `f`
    pub fn with_session<R>(
        &self,
        id: MatchId,
        f: impl FnOnce(&mut MatchSession) -> R,
    ) -> Result<R, RulesError> {
        // 先放開 map 的分片鎖，再鎖對局
        let session = self
            .sessions
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(RulesError::MatchNotFound(id))?;

        let mut guard = session.lock().map_err(|_| {
            warn!(match_id = id, "match lock poisoned");
            RulesError::LockPoisoned(id)
        })?;
        Ok(f(&mut guard))
    }

    pub fn remove(&self, id: MatchId) -> bool {
        let removed = self.sessions.remove(&id).is_some();
        debug!(match_id = id, removed, "match removed");
        removed
    }

    pub fn contains(&self, id: MatchId) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

// ============================================================================
// 單元測試
// ============================================================================
