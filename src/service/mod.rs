//! 服務層模組
//!
//! 有狀態的對局協調：設定、出牌輪轉、出牌建議、多對局管理。
//! 規則計算一律交給 `game` 模組的純函數。

pub mod config;
pub mod registry;
pub mod state;
pub mod strategy;

pub use config::SessionConfig;
pub use registry::{MatchId, MatchRegistry};
pub use state::{partner, same_team, MatchSession, PassOutcome, PlayOutcome};
pub use strategy::{suggest_play, Suggestion};
