//! 規則引擎錯誤類型
//!
//! 純函數（牌型判定、比較、出牌驗證、理牌）不會回傳錯誤；
//! 只有邊界操作（設定級牌、解析、設定檔、對局動作）才會。

use thiserror::Error;

use crate::game::cards::Rank;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("invalid level rank: {0:?} (jokers cannot be the level)")]
    InvalidLevel(Rank),

    #[error("level number out of range: {0} (expected 2..=14)")]
    LevelOutOfRange(u8),

    #[error("parse card: {0}")]
    ParseCard(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("no such player: {0} (expected 0..4)")]
    InvalidPlayer(usize),

    #[error("player {player} acted out of turn (current turn: {turn})")]
    OutOfTurn { player: usize, turn: usize },

    #[error("player {0} does not hold the selected cards")]
    CardsNotInHand(usize),

    #[error("selected cards do not form a playable hand")]
    Unclassifiable,

    #[error("play does not beat the cards on the table")]
    DoesNotBeat,

    #[error("the trick leader cannot pass")]
    LeaderCannotPass,

    #[error("player {0} has already finished")]
    PlayerFinished(usize),

    #[error("hand is over")]
    HandOver,

    #[error("cannot change level while a trick is in progress")]
    TrickInProgress,

    #[error("match not found: {0}")]
    MatchNotFound(u64),

    #[error("match lock poisoned: {0}")]
    LockPoisoned(u64),
}
