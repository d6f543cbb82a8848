//! 手牌分組（理牌）
//!
//! 貪婪法：依固定優先順序逐一套用各牌型的萃取器，每種牌型反覆萃取直到沒有為止，
//! 最後剩下的牌以單張收尾。不保證組數最少（例如可能為了湊炸彈拆掉順子）。
//!
//! 每個萃取器都是獨立的純函數 `fn(&[Card], &RulesContext) -> Option<Vec<Card>>`，
//! 有多個候選時選用點數最大的那組。

use std::cmp::Ordering;

use serde::Serialize;
use tracing::trace;

use super::cards::{remove_cards, Card, Rank, Suit, RANK_COUNT};
use super::classifier::{analyze, is_straight_member};
use super::comparator::compare_same_type;
use super::constants::{
    BIG_BOMB_MIN, LEVEL_RANK_VALUE, LOWEST_PLAIN_VALUE, STRAIGHT_LEN, SUPER_BOMB_LEN,
    TOP_PLAIN_VALUE,
};
use super::hand_types::HandType;
use super::level::RulesContext;

/// 萃取器：從工作手牌中取出一組牌（不修改輸入）
pub type Extractor = fn(&[Card], &RulesContext) -> Option<Vec<Card>>;

/// 萃取優先順序
pub const EXTRACTORS: [(HandType, Extractor); 11] = [
    (HandType::SuperBomb, extract_super_bomb),
    (HandType::StraightFlush, extract_straight_flush),
    (HandType::Bomb, extract_bomb),
    (HandType::BigBomb, extract_big_bomb),
    (HandType::SteelPlate, extract_steel_plate),
    (HandType::WoodenBoard, extract_wooden_board),
    (HandType::TripletWithPair, extract_triplet_with_pair),
    (HandType::Straight, extract_straight),
    (HandType::Triplet, extract_triplet),
    (HandType::Pair, extract_pair),
    (HandType::Single, extract_single),
];

/// 分組結果中的一組牌
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Group {
    pub hand_type: HandType,
    /// 主值的點數值（僅供排序）
    #[serde(skip)]
    pub main_value: u8,
    pub cards: Vec<Card>,
}

impl Group {
    /// 判定牌型並建立分組；無法判定時回傳 None
    pub fn new(mut cards: Vec<Card>, ctx: &RulesContext) -> Option<Self> {
        let analysis = analyze(&cards, ctx)?;
        ctx.sort_desc(&mut cards);
        Some(Self {
            hand_type: analysis.hand_type,
            main_value: ctx.value(analysis.main_rank),
            cards,
        })
    }

    pub fn type_rank(&self) -> u8 {
        self.hand_type.type_rank(self.cards.len())
    }

    pub fn is_bomb_family(&self) -> bool {
        self.hand_type.is_bomb_family()
    }
}

/// 將整手牌分成若干組，每張牌恰好用一次
pub fn decompose(hand: &[Card], ctx: &RulesContext) -> Vec<Group> {
    let mut rest = hand.to_vec();
    let mut groups = Vec::new();

    for (hand_type, extract) in EXTRACTORS {
        while let Some(cards) = extract(&rest, ctx) {
            let left = match remove_cards(&rest, &cards) {
                Some(left) if !cards.is_empty() => left,
                _ => break,
            };
            rest = left;
            match Group::new(cards.clone(), ctx) {
                Some(group) => {
                    trace!(
                        expected = hand_type.name(),
                        got = group.hand_type.name(),
                        len = group.cards.len(),
                        "extracted group"
                    );
                    groups.push(group);
                }
                // 萃取器保證可判定；萬一不行就拆成單張
                None => groups.extend(cards.into_iter().filter_map(|c| Group::new(vec![c], ctx))),
            }
        }
    }

    sort_groups(&mut groups);
    groups
}

/// 依牌型等級、再依主值由大到小排列
pub fn sort_groups(groups: &mut [Group]) {
    groups.sort_by(|a, b| {
        b.type_rank()
            .cmp(&a.type_rank())
            .then_with(|| b.main_value.cmp(&a.main_value))
            .then_with(|| b.cards.len().cmp(&a.cards.len()))
    });
}

/// 與 `sort_groups` 相同的順序，但以 `compare_same_type` 比較同牌型（供外部驗證排序用）
pub fn group_order(a: &Group, b: &Group, ctx: &RulesContext) -> Ordering {
    b.type_rank().cmp(&a.type_rank()).then_with(|| {
        if a.hand_type == b.hand_type {
            compare_same_type(&b.cards, &a.cards, a.hand_type, ctx)
        } else {
            Ordering::Equal
        }
    })
}

// ============================================================================
// 工作手牌統計
// ============================================================================

/// 依點數分桶；`split_wilds` 為真時萬能牌另外放
struct Pool {
    by_rank: [Vec<Card>; RANK_COUNT],
    wilds: Vec<Card>,
}

impl Pool {
    fn new(hand: &[Card], ctx: &RulesContext, split_wilds: bool) -> Self {
        let mut by_rank: [Vec<Card>; RANK_COUNT] = Default::default();
        let mut wilds = Vec::new();
        for &card in hand {
            if split_wilds && ctx.is_wildcard(&card) {
                wilds.push(card);
            } else {
                by_rank[card.rank.index()].push(card);
            }
        }
        Self { by_rank, wilds }
    }

    fn count(&self, rank: Rank) -> usize {
        self.by_rank[rank.index()].len()
    }

    fn take(&self, rank: Rank, n: usize) -> impl Iterator<Item = Card> + '_ {
        self.by_rank[rank.index()].iter().copied().take(n)
    }
}

/// 所有點數，依點數值由大到小
fn ranks_desc(ctx: &RulesContext) -> Vec<Rank> {
    let mut ranks = Rank::ALL.to_vec();
    ranks.sort_by(|a, b| ctx.value(*b).cmp(&ctx.value(*a)));
    ranks
}

/// 順子最低可用的點數值
fn straight_floor(ctx: &RulesContext) -> u8 {
    Rank::PLAIN
        .iter()
        .filter(|&&r| is_straight_member(r, ctx))
        .map(|&r| ctx.value(r))
        .min()
        .unwrap_or(LOWEST_PLAIN_VALUE)
}

/// 由高到低的相連窗口：回傳每個窗口的點數（高 → 低）
fn windows(ctx: &RulesContext, width: u8, lowest: u8, highest: u8) -> Vec<Vec<Rank>> {
    if highest < lowest + width - 1 {
        return Vec::new();
    }
    (lowest + width - 1..=highest)
        .rev()
        .map(|top| {
            (top + 1 - width..=top)
                .rev()
                .filter_map(|v| ctx.table().rank_of(v))
                .collect()
        })
        .collect()
}

// ============================================================================
// 萃取器
// ============================================================================

pub fn extract_super_bomb(hand: &[Card], ctx: &RulesContext) -> Option<Vec<Card>> {
    let mut jokers: Vec<Card> = hand.iter().copied().filter(Card::is_joker).collect();
    if jokers.len() < SUPER_BOMB_LEN {
        return None;
    }
    ctx.sort_desc(&mut jokers);
    jokers.truncate(SUPER_BOMB_LEN);
    Some(jokers)
}

/// 同花順：各花色取最高的窗口，缺口用萬能牌補；同高時用較少萬能牌者
pub fn extract_straight_flush(hand: &[Card], ctx: &RulesContext) -> Option<Vec<Card>> {
    let pool = Pool::new(hand, ctx, true);
    let mut best: Option<(u8, usize, Vec<Card>)> = None;

    for suit in Suit::PLAIN {
        for window in windows(ctx, STRAIGHT_LEN as u8, straight_floor(ctx), TOP_PLAIN_VALUE) {
            let naturals: Vec<Card> = window
                .iter()
                .filter_map(|&r| pool.by_rank[r.index()].iter().copied().find(|c| c.suit == suit))
                .collect();
            let missing = STRAIGHT_LEN - naturals.len();
            if missing > pool.wilds.len() || naturals.is_empty() {
                continue;
            }

            let top = ctx.value(window[0]);
            let better = best
                .as_ref()
                .map_or(true, |(t, m, _)| top > *t || (top == *t && missing < *m));
            if better {
                let mut cards = naturals;
                cards.extend(pool.wilds.iter().copied().take(missing));
                best = Some((top, missing, cards));
            }
            break;
        }
    }
    best.map(|(_, _, cards)| cards)
}

/// 4~5 張炸彈：先找天然炸彈；否則用萬能牌補，能補到 5 張就不只補到 4 張
pub fn extract_bomb(hand: &[Card], ctx: &RulesContext) -> Option<Vec<Card>> {
    let pool = Pool::new(hand, ctx, true);
    let ranks = ranks_desc(ctx);

    if let Some(&rank) = ranks.iter().find(|&&r| (4..=5).contains(&pool.count(r))) {
        return Some(pool.take(rank, 5).collect());
    }

    for size in [5, 4] {
        let target = ranks.iter().find(|&&r| {
            let count = pool.count(r);
            count > 0 && count < size && count + pool.wilds.len() >= size
        });
        if let Some(&rank) = target {
            let missing = size - pool.count(rank);
            return Some(
                pool.take(rank, size)
                    .chain(pool.wilds.iter().copied().take(missing))
                    .collect(),
            );
        }
    }
    None
}

/// 6 張以上：天然的整組拿走；不足時用萬能牌補到 6 張
pub fn extract_big_bomb(hand: &[Card], ctx: &RulesContext) -> Option<Vec<Card>> {
    let pool = Pool::new(hand, ctx, true);
    let ranks = ranks_desc(ctx);

    if let Some(&rank) = ranks.iter().find(|&&r| pool.count(r) >= BIG_BOMB_MIN) {
        return Some(pool.by_rank[rank.index()].clone());
    }

    let target = ranks
        .iter()
        .find(|&&r| pool.count(r) > 0 && pool.count(r) + pool.wilds.len() >= BIG_BOMB_MIN)?;
    let missing = BIG_BOMB_MIN - pool.count(*target);
    Some(
        pool.take(*target, BIG_BOMB_MIN)
            .chain(pool.wilds.iter().copied().take(missing))
            .collect(),
    )
}

/// `width` 個相連點數各取 `size` 張（只用天然牌）
fn extract_consecutive(
    hand: &[Card],
    ctx: &RulesContext,
    width: u8,
    size: usize,
) -> Option<Vec<Card>> {
    let pool = Pool::new(hand, ctx, false);
    windows(ctx, width, LOWEST_PLAIN_VALUE, LEVEL_RANK_VALUE)
        .into_iter()
        .find(|window| window.iter().all(|&r| pool.count(r) >= size))
        .map(|window| window.iter().flat_map(|&r| pool.take(r, size)).collect())
}

pub fn extract_steel_plate(hand: &[Card], ctx: &RulesContext) -> Option<Vec<Card>> {
    extract_consecutive(hand, ctx, 2, 3)
}

pub fn extract_wooden_board(hand: &[Card], ctx: &RulesContext) -> Option<Vec<Card>> {
    extract_consecutive(hand, ctx, 3, 2)
}

/// 三帶二：最大的三張帶最小的對子（對子不影響比較）
pub fn extract_triplet_with_pair(hand: &[Card], ctx: &RulesContext) -> Option<Vec<Card>> {
    let pool = Pool::new(hand, ctx, false);
    let ranks = ranks_desc(ctx);

    let triple = *ranks.iter().find(|&&r| pool.count(r) >= 3)?;
    let pair = *ranks
        .iter()
        .rev()
        .find(|&&r| r != triple && pool.count(r) >= 2)?;
    Some(pool.take(triple, 3).chain(pool.take(pair, 2)).collect())
}

/// 順子：只用天然牌，取最高的窗口
pub fn extract_straight(hand: &[Card], ctx: &RulesContext) -> Option<Vec<Card>> {
    let pool = Pool::new(hand, ctx, true);
    windows(ctx, STRAIGHT_LEN as u8, straight_floor(ctx), TOP_PLAIN_VALUE)
        .into_iter()
        .find(|window| window.iter().all(|&r| pool.count(r) > 0))
        .map(|window| window.iter().flat_map(|&r| pool.take(r, 1)).collect())
}

fn extract_same_rank(hand: &[Card], ctx: &RulesContext, size: usize) -> Option<Vec<Card>> {
    let pool = Pool::new(hand, ctx, false);
    let rank = ranks_desc(ctx).into_iter().find(|&r| pool.count(r) >= size)?;
    Some(pool.take(rank, size).collect())
}

pub fn extract_triplet(hand: &[Card], ctx: &RulesContext) -> Option<Vec<Card>> {
    extract_same_rank(hand, ctx, 3)
}

pub fn extract_pair(hand: &[Card], ctx: &RulesContext) -> Option<Vec<Card>> {
    extract_same_rank(hand, ctx, 2)
}

pub fn extract_single(hand: &[Card], ctx: &RulesContext) -> Option<Vec<Card>> {
    hand.iter()
        .copied()
        .max_by(|a, b| ctx.cmp_cards(a, b))
        .map(|card| vec![card])
}

// ============================================================================
// 單元測試
// ============================================================================
