//! 出牌建議
//!
//! 貪婪策略，以理牌結果為基礎：
//! - 領出：出最小的非炸彈組；只剩炸彈時出最小的炸彈
//! - 跟牌：不壓隊友；由小到大找同牌型且壓得過的組，找不到時拆單張/對子/三張；
//!   炸彈只在對方出炸彈、或自己手牌夠少時才用
//!
//! 任何建議都保證通過 `valid_play`。

use serde::Serialize;
use tracing::debug;

use crate::game::{
    classify, decompose, main_value, valid_play, Card, Group, HandType, Play, Rank, RulesContext,
    RANK_COUNT,
};

use super::config::SessionConfig;
use super::state::same_team;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "cards", rename_all = "snake_case")]
pub enum Suggestion {
    Play(Vec<Card>),
    Pass,
}

/// 依手牌與桌面上一手建議動作
pub fn suggest_play(
    hand: &[Card],
    last_play: Option<&Play>,
    me: usize,
    ctx: &RulesContext,
    config: &SessionConfig,
) -> Suggestion {
    if hand.is_empty() {
        return Suggestion::Pass;
    }

    // 由強到弱排列
    let groups = decompose(hand, ctx);

    let last = match last_play {
        Some(last) if last.player_index != me => last,
        _ => return lead(&groups),
    };

    if same_team(last.player_index, me) {
        debug!(me, partner = last.player_index, "not beating partner");
        return Suggestion::Pass;
    }

    let beats = |cards: &[Card]| -> Option<Play> {
        let hand_type = classify(cards, ctx)?;
        let play = Play::new(me, cards.to_vec(), hand_type);
        valid_play(&play, Some(last), ctx).then_some(play)
    };

    // 同牌型，由小到大
    let same_type = groups
        .iter()
        .rev()
        .filter(|g| !g.is_bomb_family() && g.hand_type == last.hand_type)
        .find_map(|g| beats(&g.cards));
    if let Some(play) = same_type {
        return Suggestion::Play(play.cards);
    }

    if let Some(cards) = split_same_rank(hand, last, ctx) {
        if let Some(play) = beats(&cards) {
            return Suggestion::Play(play.cards);
        }
    }

    let may_bomb = last.hand_type.is_bomb_family() || hand.len() <= config.sprint_threshold;
    if may_bomb {
        let bomb = groups
            .iter()
            .rev()
            .filter(|g| g.is_bomb_family())
            .find_map(|g| beats(&g.cards));
        if let Some(play) = bomb {
            debug!(me, hand_type = play.hand_type.name(), "spending bomb");
            return Suggestion::Play(play.cards);
        }
    }

    Suggestion::Pass
}

fn lead(groups: &[Group]) -> Suggestion {
    let weakest = groups
        .iter()
        .rev()
        .find(|g| !g.is_bomb_family())
        .or_else(|| groups.last());
    match weakest {
        Some(group) => Suggestion::Play(group.cards.clone()),
        None => Suggestion::Pass,
    }
}

/// 單張 / 對子 / 三張：從手牌中拆出最小而壓得過的同點數牌（不動用萬能牌）
fn split_same_rank(hand: &[Card], last: &Play, ctx: &RulesContext) -> Option<Vec<Card>> {
    let size = match last.hand_type {
        HandType::Single => 1,
        HandType::Pair => 2,
        HandType::Triplet => 3,
        _ => return None,
    };
    let floor = main_value(&last.cards, ctx)?;

    let mut by_rank: [Vec<Card>; RANK_COUNT] = Default::default();
    for &card in hand.iter().filter(|c| !ctx.is_wildcard(c)) {
        by_rank[card.rank.index()].push(card);
    }

    let mut ranks: Vec<Rank> = Rank::ALL
        .iter()
        .copied()
        .filter(|&r| ctx.value(r) > floor && by_rank[r.index()].len() >= size)
        .collect();
    ranks.sort_by_key(|&r| ctx.value(r));
    let rank = ranks.first()?;
    Some(by_rank[rank.index()].iter().copied().take(size).collect())
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::parse_cards;

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    fn last(player: usize, s: &str, ctx: &RulesContext) -> Play {
        let c = cards(s);
        let t = classify(&c, ctx).unwrap();
        Play::new(player, c, t)
    }

    fn suggest(hand: &str, last_play: Option<&Play>, me: usize) -> Suggestion {
        let ctx = RulesContext::default();
        suggest_play(&cards(hand), last_play, me, &ctx, &SessionConfig::default())
    }

    #[test]
    fn test_lead_plays_weakest_non_bomb() {
        let s = suggest("3C 9D 9S 7C 7D 7S 7H", None, 0);
        assert_eq!(s, Suggestion::Play(cards("3C")));
    }

    #[test]
    fn test_lead_with_only_bombs_plays_weakest_bomb() {
        let s = suggest("9C 9D 9S 9H 4C 4D 4S 4H", None, 0);
        match s {
            Suggestion::Play(c) => assert!(c.iter().all(|c| c.rank == Rank::Four)),
            Suggestion::Pass => panic!("expected a play"),
        }
    }

    #[test]
    fn test_never_beats_partner() {
        let ctx = RulesContext::default();
        let l = last(2, "3C", &ctx);
        assert_eq!(suggest("AS KD", Some(&l), 0), Suggestion::Pass);
    }

    #[test]
    fn test_follow_with_smallest_beating_group() {
        let ctx = RulesContext::default();
        let l = last(1, "5C 5D", &ctx);
        let s = suggest("3C 3D 8C 8D KC KD 6S", Some(&l), 0);
        assert_eq!(s, Suggestion::Play(cards("8D 8C")));
    }

    #[test]
    fn test_follow_splits_pair_for_single() {
        let ctx = RulesContext::default();
        let l = last(1, "10C", &ctx);
        let s = suggest("3C 3D QC QD", Some(&l), 0);
        assert_eq!(s, Suggestion::Play(cards("QC")));
    }

    #[test]
    fn test_bomb_only_when_sprinting() {
        let ctx = RulesContext::default();
        let l = last(1, "AC", &ctx);
        let long = "5C 5D 5S 5H 3C 4D 6S 8C 9D JC";
        assert_eq!(suggest(long, Some(&l), 0), Suggestion::Pass);

        let short = suggest("5C 5D 5S 5H 3C", Some(&l), 0);
        assert_eq!(short, Suggestion::Play(cards("5S 5H 5D 5C")));
    }

    #[test]
    fn test_answers_bomb_with_weakest_beating_bomb() {
        let ctx = RulesContext::default();
        let l = last(1, "6C 6D 6S 6H", &ctx);
        let s = suggest("4C 4D 4S 4H 8C 8D 8S 8H 9C 9D 9S 9H 3C 3D 3S JD", Some(&l), 0);
        match s {
            Suggestion::Play(c) => assert!(c.iter().all(|c| c.rank == Rank::Eight)),
            Suggestion::Pass => panic!("expected a bomb"),
        }
    }

    #[test]
    fn test_suggestion_serializes_with_action_tag() {
        let json = serde_json::to_string(&Suggestion::Pass).unwrap();
        assert_eq!(json, r#"{"action":"pass"}"#);
    }
}
