//! 遊戲常量定義

// ============================================================================
// 遊戲規則常量
// ============================================================================

pub const PLAYER_COUNT: usize = 4;       // 四人兩隊
pub const DECK_COUNT: usize = 2;         // 兩副牌
pub const DECK_SIZE: usize = 54;         // 52 + 大小王
pub const SHOE_SIZE: usize = DECK_SIZE * DECK_COUNT; // 108
pub const HAND_SIZE: usize = 27;         // 每人 27 張
pub const STRAIGHT_LEN: usize = 5;       // 順子 / 同花順長度
pub const PLATE_LEN: usize = 6;          // 鋼板 / 木板長度
pub const BIG_BOMB_MIN: usize = 6;       // 6 張以上為大炸彈
pub const SUPER_BOMB_LEN: usize = 4;     // 四王

pub const DEFAULT_SPRINT_THRESHOLD: usize = 6; // 手牌 <= 6 張時才願意拆炸彈壓普通牌

// ============================================================================
// 點數值（rank value）常量
// ============================================================================

pub const BIG_JOKER_VALUE: u8 = 16;
pub const SMALL_JOKER_VALUE: u8 = 15;
pub const LEVEL_RANK_VALUE: u8 = 14;
pub const TOP_PLAIN_VALUE: u8 = 13;      // 非級牌中最大者（通常為 A）
pub const LOWEST_PLAIN_VALUE: u8 = 2;    // 非王中最小者

// ============================================================================
// 牌型等級（type rank）常量
// ============================================================================

pub const TYPE_RANK_SUPER_BOMB: u8 = 110;
pub const TYPE_RANK_BIG_BOMB: u8 = 100;
pub const TYPE_RANK_STRAIGHT_FLUSH: u8 = 90;
pub const TYPE_RANK_BOMB: u8 = 80;
pub const TYPE_RANK_STEEL_PLATE: u8 = 70;
pub const TYPE_RANK_WOODEN_BOARD: u8 = 60;
pub const TYPE_RANK_TRIPLET_WITH_PAIR: u8 = 50;
pub const TYPE_RANK_STRAIGHT: u8 = 40;
pub const TYPE_RANK_TRIPLET: u8 = 30;
pub const TYPE_RANK_PAIR: u8 = 20;
pub const TYPE_RANK_SINGLE: u8 = 10;
