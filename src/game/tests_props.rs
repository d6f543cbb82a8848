//! 規則引擎的性質測試
//!
//! - 判定結果具決定性且與順序無關
//! - 任一級牌下整副牌靴恰有 2 張萬能牌
//! - 點數表為嚴格全序
//! - 分組不增減卡牌，且每組都可判定
//! - 領出時任何可判定的牌都合法
//! - 四王壓得過任何其他牌型
//! - 任意輸入都不會 panic

use proptest::prelude::*;

use super::cards::{Card, Rank};
use super::classifier::{analyze, classify};
use super::comparator::compare_same_type;
use super::decks::shoe;
use super::decomposer::decompose;
use super::hand_types::{HandType, Play};
use super::test_gens::{any_cards, rules_context, shoe_subset};
use super::validator::{can_beat, valid_play};

fn sorted(mut cards: Vec<Card>) -> Vec<Card> {
    cards.sort();
    cards
}

fn super_bomb() -> Vec<Card> {
    vec![Card::small_joker(), Card::small_joker(), Card::big_joker(), Card::big_joker()]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_classify_is_order_independent(ctx in rules_context(), cards in shoe_subset(8)) {
        let first = classify(&cards, &ctx);
        let mut reversed = cards.clone();
        reversed.reverse();
        prop_assert_eq!(first, classify(&cards, &ctx));
        prop_assert_eq!(first, classify(&reversed, &ctx));
    }

    #[test]
    fn prop_full_shoe_has_two_wildcards(ctx in rules_context()) {
        let wilds = shoe().iter().filter(|c| ctx.is_wildcard(c)).count();
        prop_assert_eq!(wilds, 2);
    }

    #[test]
    fn prop_rank_table_is_strict_total_order(ctx in rules_context()) {
        let mut values: Vec<u8> = Rank::ALL.iter().map(|&r| ctx.value(r)).collect();
        values.sort_unstable();
        values.dedup();
        prop_assert_eq!(values.len(), Rank::ALL.len());
        prop_assert_eq!(Rank::ALL.iter().filter(|&&r| ctx.value(r) == 14).count(), 1);
        prop_assert_eq!(Rank::ALL.iter().filter(|&&r| ctx.value(r) > 14).count(), 2);
    }

    #[test]
    fn prop_substitutions_point_at_wildcards(ctx in rules_context(), cards in shoe_subset(8)) {
        if let Some(analysis) = analyze(&cards, &ctx) {
            let wilds = cards.iter().filter(|c| ctx.is_wildcard(c)).count();
            prop_assert!(analysis.substitutions.len() <= wilds);
            for sub in &analysis.substitutions {
                prop_assert!(ctx.is_wildcard(&cards[sub.index]));
            }
        }
    }

    #[test]
    fn prop_decompose_conserves_cards(ctx in rules_context(), hand in shoe_subset(27)) {
        let groups = decompose(&hand, &ctx);
        let flat: Vec<Card> = groups.iter().flat_map(|g| g.cards.iter().copied()).collect();
        prop_assert_eq!(sorted(flat), sorted(hand));
        for group in &groups {
            prop_assert_eq!(classify(&group.cards, &ctx), Some(group.hand_type));
        }
    }

    #[test]
    fn prop_leader_may_play_any_classifiable(ctx in rules_context(), cards in shoe_subset(8)) {
        if let Some(hand_type) = classify(&cards, &ctx) {
            let play = Play::new(0, cards, hand_type);
            prop_assert!(valid_play(&play, None, &ctx));
        }
    }

    #[test]
    fn prop_super_bomb_beats_everything_else(ctx in rules_context(), cards in shoe_subset(8)) {
        if let Some(hand_type) = classify(&cards, &ctx) {
            if hand_type != HandType::SuperBomb {
                let last = Play::new(1, cards.clone(), hand_type);
                let jokers = Play::new(0, super_bomb(), HandType::SuperBomb);
                prop_assert!(valid_play(&jokers, Some(&last), &ctx));
                prop_assert!(!can_beat(&cards, &jokers.cards, &ctx));
            }
        }
    }

    #[test]
    fn prop_arbitrary_multisets_never_panic(
        ctx in rules_context(),
        a in any_cards(12),
        b in any_cards(12),
    ) {
        let _ = analyze(&a, &ctx);
        let _ = can_beat(&a, &b, &ctx);
        for hand_type in HandType::DETECTION_ORDER {
            let _ = compare_same_type(&a, &b, hand_type, &ctx);
        }
        let groups = decompose(&a, &ctx);
        prop_assert_eq!(groups.iter().map(|g| g.cards.len()).sum::<usize>(), a.len());
    }
}
