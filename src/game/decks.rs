//! 牌靴與發牌
//!
//! 兩副牌共 108 張，洗牌後發給四位玩家各 27 張。

use rand::prelude::*;
use rand::rngs::StdRng;

use super::cards::{standard_deck, Card};
use super::constants::{DECK_COUNT, HAND_SIZE, PLAYER_COUNT, SHOE_SIZE};
use super::level::RulesContext;

/// 四位玩家的手牌（索引即座位，0/2 與 1/3 為隊友）
pub type Hands = [Vec<Card>; PLAYER_COUNT];

/// 兩副牌組成的牌靴（未洗牌）
pub fn shoe() -> Vec<Card> {
    let mut cards = Vec::with_capacity(SHOE_SIZE);
    for _ in 0..DECK_COUNT {
        cards.extend(standard_deck());
    }
    cards
}

/// 洗牌並發出四手牌
pub fn deal_hands(rng: &mut StdRng) -> Hands {
    let mut cards = shoe();
    cards.shuffle(rng);

    let mut hands: Hands = Default::default();
    for (seat, chunk) in cards.chunks(HAND_SIZE).enumerate().take(PLAYER_COUNT) {
        hands[seat] = chunk.to_vec();
    }
    hands
}

/// 以固定種子發牌（可重現）
pub fn deal_hands_seeded(seed: u64) -> Hands {
    let mut rng = StdRng::seed_from_u64(seed);
    deal_hands(&mut rng)
}

/// 依當前級牌由大到小排列（點數值優先，其次花色）
pub fn sort_by_power(cards: &mut [Card], ctx: &RulesContext) {
    ctx.sort_desc(cards);
}

// ============================================================================
// 單元測試
// ============================================================================
