//! 級牌與點數表
//!
//! - `Level`: 當前級牌（打幾），永遠不是王
//! - `RankTable`: 依級牌重新排列的點數值（大王 16 > 小王 15 > 級牌 14 > 其餘 13..2）
//! - `RulesContext`: 對局持有的規則上下文，以引用傳入各純函數
//!
//! 逢人配：紅心級牌即為萬能牌。

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::cards::{Card, Rank, Suit, RANK_COUNT};
use super::constants::{BIG_JOKER_VALUE, LEVEL_RANK_VALUE, SMALL_JOKER_VALUE, TOP_PLAIN_VALUE};
use crate::error::RulesError;

/// 非級牌的自然大小（由大到小）
const NATURAL_DESC: [Rank; 13] = [
    Rank::Ace,
    Rank::King,
    Rank::Queen,
    Rank::Jack,
    Rank::Ten,
    Rank::Nine,
    Rank::Eight,
    Rank::Seven,
    Rank::Six,
    Rank::Five,
    Rank::Four,
    Rank::Three,
    Rank::Two,
];

/// 級牌
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Rank", into = "Rank")]
pub struct Level(Rank);

impl Level {
    pub fn new(rank: Rank) -> Result<Self, RulesError> {
        if rank.is_joker() {
            Err(RulesError::InvalidLevel(rank))
        } else {
            Ok(Self(rank))
        }
    }

    /// 由比賽級數換算（2 → "2"，10 → "10"，11 → J，14 → A）
    pub fn from_number(n: u8) -> Result<Self, RulesError> {
        let rank = match n {
            2 => Rank::Two,
            3..=10 => Rank::PLAIN[(n - 3) as usize],
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            14 => Rank::Ace,
            _ => return Err(RulesError::LevelOutOfRange(n)),
        };
        Ok(Self(rank))
    }

    pub fn rank(self) -> Rank {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self(Rank::Two)
    }
}

impl TryFrom<Rank> for Level {
    type Error = RulesError;

    fn try_from(rank: Rank) -> Result<Self, Self::Error> {
        Level::new(rank)
    }
}

impl From<Level> for Rank {
    fn from(level: Level) -> Self {
        level.0
    }
}

/// 紅心級牌為萬能牌
pub fn is_wildcard(card: &Card, level: Level) -> bool {
    card.suit == Suit::Heart && card.rank == level.rank()
}

/// 點數值（每次都依級牌重新計算，不快取）
pub fn rank_value(rank: Rank, level: Level) -> u8 {
    match rank {
        Rank::BigJoker => BIG_JOKER_VALUE,
        Rank::SmallJoker => SMALL_JOKER_VALUE,
        r if r == level.rank() => LEVEL_RANK_VALUE,
        r => {
            let mut value = TOP_PLAIN_VALUE;
            for natural in NATURAL_DESC.iter().filter(|&&n| n != level.rank()) {
                if *natural == r {
                    break;
                }
                value -= 1;
            }
            value
        }
    }
}

/// 依級牌展開的點數值表
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankTable {
    values: [u8; RANK_COUNT],
}

impl RankTable {
    pub fn new(level: Level) -> Self {
        let mut values = [0u8; RANK_COUNT];
        for rank in Rank::ALL {
            values[rank.index()] = rank_value(rank, level);
        }
        Self { values }
    }

    pub fn value(&self, rank: Rank) -> u8 {
        self.values[rank.index()]
    }

    /// 由點數值反查點數
    pub fn rank_of(&self, value: u8) -> Option<Rank> {
        Rank::ALL.iter().copied().find(|&r| self.value(r) == value)
    }
}

/// 規則上下文：級牌 + 對應點數表
///
/// 由對局持有，以引用傳入牌型判定等純函數。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RulesContext {
    level: Level,
    table: RankTable,
}

impl RulesContext {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            table: RankTable::new(level),
        }
    }

    /// 以點數設定級牌；王會被拒絕且狀態不變
    pub fn with_rank(rank: Rank) -> Result<Self, RulesError> {
        Ok(Self::new(Level::new(rank)?))
    }

    pub fn set_level(&mut self, rank: Rank) -> Result<(), RulesError> {
        *self = Self::with_rank(rank)?;
        Ok(())
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn table(&self) -> &RankTable {
        &self.table
    }

    pub fn value(&self, rank: Rank) -> u8 {
        self.table.value(rank)
    }

    pub fn is_wildcard(&self, card: &Card) -> bool {
        is_wildcard(card, self.level)
    }

    /// 兩張牌的大小比較（點數值優先，其次花色，僅供穩定排序）
    pub fn cmp_cards(&self, a: &Card, b: &Card) -> Ordering {
        self.value(a.rank)
            .cmp(&self.value(b.rank))
            .then_with(|| a.suit.cmp(&b.suit))
    }

    /// 由大到小排序
    pub fn sort_desc(&self, cards: &mut [Card]) {
        cards.sort_by(|a, b| self.cmp_cards(b, a));
    }
}

impl Default for RulesContext {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

// ============================================================================
// 單元測試
// ============================================================================
