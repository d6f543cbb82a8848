//! 對局設定
//!
//! 可由 JSON 載入，缺少的欄位使用預設值：
//!
//! ```json
//! { "level": "2", "seed": 7, "sprint_threshold": 6, "partner_takes_lead": true }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::game::constants::DEFAULT_SPRINT_THRESHOLD;
use crate::game::{Level, RulesContext};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 開局級牌（王會在反序列化時被拒絕）
    pub level: Level,
    /// 固定發牌種子；None 表示由系統亂數決定
    pub seed: Option<u64>,
    /// 手牌不多於此張數時，出牌建議才會用炸彈壓普通牌
    pub sprint_threshold: usize,
    /// 贏得一輪的玩家已出完時，由其隊友領出
    pub partner_takes_lead: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            level: Level::default(),
            seed: None,
            sprint_threshold: DEFAULT_SPRINT_THRESHOLD,
            partner_takes_lead: true,
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(s: &str) -> Result<Self, RulesError> {
        serde_json::from_str(s).map_err(|e| RulesError::Config(e.to_string()))
    }

    pub fn rules_context(&self) -> RulesContext {
        RulesContext::new(self.level)
    }
}

// ============================================================================
// 單元測試
// ============================================================================
