//! 牌型定義

use serde::{Deserialize, Serialize};

use super::cards::Card;
use super::constants::*;

/// 牌型
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandType {
    Single,
    Pair,
    Triplet,
    TripletWithPair,
    Straight,
    SteelPlate,   // 鋼板：兩個相連三張
    WoodenBoard,  // 木板：三個相連對子
    Bomb,         // 4~5 張同點
    BigBomb,      // 6 張以上同點
    StraightFlush,
    SuperBomb,    // 四王
}

impl HandType {
    /// 判定順序（由特殊到一般）
    pub const DETECTION_ORDER: [HandType; 11] = [
        HandType::SuperBomb,
        HandType::BigBomb,
        HandType::StraightFlush,
        HandType::Bomb,
        HandType::SteelPlate,
        HandType::WoodenBoard,
        HandType::TripletWithPair,
        HandType::Straight,
        HandType::Triplet,
        HandType::Pair,
        HandType::Single,
    ];

    /// 牌型等級（跨牌型比較炸彈時使用）
    pub fn base_rank(&self) -> u8 {
        match self {
            HandType::SuperBomb => TYPE_RANK_SUPER_BOMB,
            HandType::BigBomb => TYPE_RANK_BIG_BOMB,
            HandType::StraightFlush => TYPE_RANK_STRAIGHT_FLUSH,
            HandType::Bomb => TYPE_RANK_BOMB,
            HandType::SteelPlate => TYPE_RANK_STEEL_PLATE,
            HandType::WoodenBoard => TYPE_RANK_WOODEN_BOARD,
            HandType::TripletWithPair => TYPE_RANK_TRIPLET_WITH_PAIR,
            HandType::Straight => TYPE_RANK_STRAIGHT,
            HandType::Triplet => TYPE_RANK_TRIPLET,
            HandType::Pair => TYPE_RANK_PAIR,
            HandType::Single => TYPE_RANK_SINGLE,
        }
    }

    /// 牌型等級（考慮張數：超過 5 張的炸彈視為大炸彈）
    pub fn type_rank(&self, len: usize) -> u8 {
        match self {
            HandType::Bomb if len >= BIG_BOMB_MIN => TYPE_RANK_BIG_BOMB,
            other => other.base_rank(),
        }
    }

    /// 炸彈家族：可無視牌型壓牌
    pub fn is_bomb_family(&self) -> bool {
        matches!(
            self,
            HandType::Bomb | HandType::BigBomb | HandType::StraightFlush | HandType::SuperBomb
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            HandType::Single => "single",
            HandType::Pair => "pair",
            HandType::Triplet => "triplet",
            HandType::TripletWithPair => "triplet_with_pair",
            HandType::Straight => "straight",
            HandType::SteelPlate => "steel_plate",
            HandType::WoodenBoard => "wooden_board",
            HandType::Bomb => "bomb",
            HandType::BigBomb => "big_bomb",
            HandType::StraightFlush => "straight_flush",
            HandType::SuperBomb => "super_bomb",
        }
    }
}

/// 一次出牌
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub player_index: usize,
    pub cards: Vec<Card>,
    pub hand_type: HandType,
}

impl Play {
    pub fn new(player_index: usize, cards: Vec<Card>, hand_type: HandType) -> Self {
        Self {
            player_index,
            cards,
            hand_type,
        }
    }

    pub fn type_rank(&self) -> u8 {
        self.hand_type.type_rank(self.cards.len())
    }
}

// ============================================================================
// 單元測試
// ============================================================================
