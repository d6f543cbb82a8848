//! 摜蛋規則引擎
//!
//! - `game`: 純規則（牌型判定、比較、出牌合法性、理牌）
//! - `service`: 對局狀態、出牌建議、多對局管理
//! - `error`: 錯誤型別

pub mod error;
pub mod game;
pub mod service;

pub use error::RulesError;
pub use game::{
    analyze, can_beat, classify, compare_same_type, decompose, valid_play, Card, Group, HandType,
    Level, Play, Rank, RulesContext, Suit,
};
pub use service::{MatchRegistry, MatchSession, SessionConfig, Suggestion};
