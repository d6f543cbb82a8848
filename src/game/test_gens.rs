// Proptest generators for rules types.

use proptest::prelude::*;

use super::cards::{Card, Rank};
use super::decks::shoe;
use super::level::RulesContext;

/// 任一合法級牌下的規則上下文
pub fn rules_context() -> impl Strategy<Value = RulesContext> {
    prop::sample::select(Rank::PLAIN.to_vec())
        .prop_filter_map("level rank", |r| RulesContext::with_rank(r).ok())
}

/// 54 張中的任一張
pub fn card() -> impl Strategy<Value = Card> {
    (0usize..54).prop_filter_map("deck index", Card::from_index)
}

/// 牌靴的子集合（不超過兩副牌的供應量），順序打亂
pub fn shoe_subset(max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence(shoe(), 0..=max).prop_shuffle()
}

/// 任意多重集合（可能超出實際供應，用於測試不會 panic）
pub fn any_cards(max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card(), 0..=max)
}
