//! 同牌型比較
//!
//! 主值取自 `analyze`：三張/三帶二取三張點數、對子取對子點數、順子取最高張、
//! 鋼板取較大的三張、木板取最大的對子。主值以當前級牌下的點數值比較
//! （王 > 級牌 > 其他）。

use std::cmp::Ordering;

use super::cards::Card;
use super::classifier::analyze;
use super::hand_types::HandType;
use super::level::RulesContext;

/// 主值的點數值；不構成牌型時回傳 None
pub fn main_value(cards: &[Card], ctx: &RulesContext) -> Option<u8> {
    analyze(cards, ctx).map(|a| ctx.value(a.main_rank))
}

/// 比較兩手同牌型的牌
///
/// - 炸彈 / 大炸彈：張數多者勝，同張數才比主值
/// - 順子 / 同花順：長度不同視為無法比較，回傳 `Equal`
/// - 四王對四王：平手
/// - 任一方無法判定牌型：`Equal`（不構成勝出）
pub fn compare_same_type(
    a: &[Card],
    b: &[Card],
    hand_type: HandType,
    ctx: &RulesContext,
) -> Ordering {
    match hand_type {
        HandType::SuperBomb => return Ordering::Equal,
        HandType::Bomb | HandType::BigBomb if a.len() != b.len() => return a.len().cmp(&b.len()),
        HandType::Straight | HandType::StraightFlush if a.len() != b.len() => {
            return Ordering::Equal;
        }
        _ => {}
    }

    match (main_value(a, ctx), main_value(b, ctx)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    }
}

// ============================================================================
// 單元測試
// ============================================================================
