//! 規則核心模組
//!
//! 摜蛋的純規則計算，不持有任何對局狀態：
//! - `constants`: 規則常量（人數、張數、牌型等級）
//! - `cards`: 花色、點數、卡牌與文字格式
//! - `decks`: 兩副牌的牌靴與發牌
//! - `level`: 級牌、點數表、萬能牌判定
//! - `hand_types`: 牌型與出牌定義
//! - `classifier`: 牌型判定
//! - `comparator`: 同牌型比較
//! - `validator`: 出牌合法性
//! - `decomposer`: 手牌分組
//!
//! 所有函數都以 `&RulesContext` 接收級牌，不快取點數順序。

pub mod constants;
pub mod cards;
pub mod decks;
pub mod level;
pub mod hand_types;
pub mod classifier;
pub mod comparator;
pub mod validator;
pub mod decomposer;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props;

pub use constants::*;
pub use cards::{
    card_index, format_cards, parse_cards, remove_cards, standard_deck, Card, Rank, Suit,
    RANK_COUNT,
};
pub use decks::{deal_hands, deal_hands_seeded, shoe, sort_by_power, Hands};
pub use level::{is_wildcard, rank_value, Level, RankTable, RulesContext};
pub use hand_types::{HandType, Play};
pub use classifier::{analyze, classify, HandAnalysis, Substitution};
pub use comparator::{compare_same_type, main_value};
pub use validator::{can_beat, valid_play};
pub use decomposer::{decompose, sort_groups, Group};
