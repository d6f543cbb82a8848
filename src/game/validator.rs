//! 出牌合法性判定
//!
//! 只看桌面上的上一手牌，不保存任何狀態。

use std::cmp::Ordering;

use super::cards::Card;
use super::classifier::classify;
use super::comparator::compare_same_type;
use super::hand_types::{HandType, Play};
use super::level::RulesContext;

/// 已判定牌型的 `a` 是否壓得過已判定牌型的 `b`
fn beats(a: &[Card], a_type: HandType, b: &[Card], b_type: HandType, ctx: &RulesContext) -> bool {
    match (a_type.is_bomb_family(), b_type.is_bomb_family()) {
        (false, false) => {
            a_type == b_type && compare_same_type(a, b, a_type, ctx) == Ordering::Greater
        }
        (false, true) => false,
        (true, false) => true,
        (true, true) => {
            // 四王永遠合法，包括接四王
            if a_type == HandType::SuperBomb {
                return true;
            }
            if b_type == HandType::SuperBomb {
                return false;
            }
            if a_type == b_type {
                return compare_same_type(a, b, a_type, ctx) == Ordering::Greater;
            }
            a_type.type_rank(a.len()) > b_type.type_rank(b.len())
        }
    }
}

/// `candidate` 是否壓得過 `reference`（不考慮領出與自己接自己）
pub fn can_beat(candidate: &[Card], reference: &[Card], ctx: &RulesContext) -> bool {
    match (classify(candidate, ctx), classify(reference, ctx)) {
        (Some(a), Some(b)) => beats(candidate, a, reference, b, ctx),
        _ => false,
    }
}

/// 候選出牌對當前桌面是否合法
///
/// 候選的 `hand_type` 必須與實際判定結果一致；空牌或無法判定一律不合法。
/// 領出（無上一手）時任何可判定的牌都合法；上一手是自己時也視為合法。
pub fn valid_play(candidate: &Play, last_play: Option<&Play>, ctx: &RulesContext) -> bool {
    if classify(&candidate.cards, ctx) != Some(candidate.hand_type) {
        return false;
    }

    let last = match last_play {
        None => return true,
        Some(last) => last,
    };
    if last.player_index == candidate.player_index {
        return true;
    }

    beats(
        &candidate.cards,
        candidate.hand_type,
        &last.cards,
        last.hand_type,
        ctx,
    )
}

// ============================================================================
// 單元測試
// ============================================================================
