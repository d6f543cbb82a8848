//! 牌型判定
//!
//! 判定順序由特殊到一般（見 `HandType::DETECTION_ORDER`），回傳第一個符合的牌型。
//! 萬能牌（紅心級牌）可補足任何缺少的點數；補位結果以 `Substitution` 旁表回傳，
//! 不會改動輸入的卡牌。

use std::iter;

use super::cards::{Card, Rank, Suit, RANK_COUNT};
use super::constants::{
    LEVEL_RANK_VALUE, LOWEST_PLAIN_VALUE, PLATE_LEN, STRAIGHT_LEN, SUPER_BOMB_LEN, TOP_PLAIN_VALUE,
};
use super::hand_types::HandType;
use super::level::RulesContext;

/// 萬能牌補位：輸入中第 `index` 張牌被當作 `assumed`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Substitution {
    pub index: usize,
    pub assumed: Rank,
}

/// 牌型判定結果
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandAnalysis {
    pub hand_type: HandType,
    /// 同牌型比較時使用的主值點數
    pub main_rank: Rank,
    pub len: usize,
    pub substitutions: Vec<Substitution>,
}

impl HandAnalysis {
    pub fn type_rank(&self) -> u8 {
        self.hand_type.type_rank(self.len)
    }
}

/// 判定牌型；不構成任何牌型時回傳 None
pub fn classify(cards: &[Card], ctx: &RulesContext) -> Option<HandType> {
    analyze(cards, ctx).map(|a| a.hand_type)
}

/// 判定牌型並回傳主值與萬能牌補位
pub fn analyze(cards: &[Card], ctx: &RulesContext) -> Option<HandAnalysis> {
    if cards.is_empty() {
        return None;
    }

    let tally = Tally::new(cards, ctx);
    let (hand_type, reading) = HandType::DETECTION_ORDER
        .iter()
        .find_map(|&t| tally.read(t).map(|r| (t, r)))?;

    let substitutions = tally
        .wild_slots
        .iter()
        .zip(reading.fills)
        .map(|(&index, assumed)| Substitution { index, assumed })
        .collect();

    Some(HandAnalysis {
        hand_type,
        main_rank: reading.main,
        len: cards.len(),
        substitutions,
    })
}

/// 順子成員：3..A，排除 2 與級牌
pub(crate) fn is_straight_member(rank: Rank, ctx: &RulesContext) -> bool {
    !rank.is_joker() && rank != Rank::Two && rank != ctx.level().rank()
}

/// 單一牌型的解讀：主值 + 萬能牌依序補成的點數
struct Reading {
    main: Rank,
    fills: Vec<Rank>,
}

/// 手牌統計（萬能牌不計入 counts）
struct Tally<'a> {
    ctx: &'a RulesContext,
    len: usize,
    counts: [u8; RANK_COUNT],
    normal_suits: Vec<Suit>,
    wild_slots: Vec<usize>,
}

impl<'a> Tally<'a> {
    fn new(cards: &[Card], ctx: &'a RulesContext) -> Self {
        let mut counts = [0u8; RANK_COUNT];
        let mut normal_suits = Vec::new();
        let mut wild_slots = Vec::new();

        for (index, card) in cards.iter().enumerate() {
            if ctx.is_wildcard(card) {
                wild_slots.push(index);
            } else {
                counts[card.rank.index()] = counts[card.rank.index()].saturating_add(1);
                if !normal_suits.contains(&card.suit) {
                    normal_suits.push(card.suit);
                }
            }
        }

        Self {
            ctx,
            len: cards.len(),
            counts,
            normal_suits,
            wild_slots,
        }
    }

    fn read(&self, hand_type: HandType) -> Option<Reading> {
        match hand_type {
            HandType::SuperBomb => self.super_bomb(),
            HandType::BigBomb if self.len >= 6 => self.same_rank(),
            HandType::StraightFlush if self.normal_suits.len() <= 1 => self.straight(),
            HandType::Bomb if (4..=5).contains(&self.len) => self.same_rank(),
            HandType::SteelPlate => self.consecutive(2, 3),
            HandType::WoodenBoard => self.consecutive(3, 2),
            HandType::TripletWithPair => self.triplet_with_pair(),
            HandType::Straight => self.straight(),
            HandType::Triplet if self.len == 3 => self.same_rank(),
            HandType::Pair if self.len == 2 => self.same_rank(),
            HandType::Single if self.len == 1 => self.single(),
            _ => None,
        }
    }

    fn wilds(&self) -> usize {
        self.wild_slots.len()
    }

    fn count(&self, rank: Rank) -> u8 {
        self.counts[rank.index()]
    }

    fn value(&self, rank: Rank) -> u8 {
        self.ctx.value(rank)
    }

    fn rank_of(&self, value: u8) -> Option<Rank> {
        self.ctx.table().rank_of(value)
    }

    fn normal_ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        Rank::ALL.iter().copied().filter(move |&r| self.count(r) > 0)
    }

    fn is_straight_member(&self, rank: Rank) -> bool {
        is_straight_member(rank, self.ctx)
    }

    fn single(&self) -> Option<Reading> {
        let main = self
            .normal_ranks()
            .next()
            .unwrap_or_else(|| self.ctx.level().rank());
        Some(Reading { main, fills: Vec::new() })
    }

    fn super_bomb(&self) -> Option<Reading> {
        let jokers = self.count(Rank::SmallJoker) as usize + self.count(Rank::BigJoker) as usize;
        (self.len == SUPER_BOMB_LEN && jokers == SUPER_BOMB_LEN).then(|| Reading {
            main: Rank::BigJoker,
            fills: Vec::new(),
        })
    }

    /// 所有非萬能牌同點數；全為萬能牌時以級牌本身計
    fn same_rank(&self) -> Option<Reading> {
        let mut ranks = self.normal_ranks();
        match (ranks.next(), ranks.next()) {
            (None, _) => Some(Reading {
                main: self.ctx.level().rank(),
                fills: Vec::new(),
            }),
            (Some(rank), None) => Some(Reading {
                main: rank,
                fills: vec![rank; self.wilds()],
            }),
            _ => None,
        }
    }

    /// 5 張連續點數（依級牌下的點數值），缺口由萬能牌補；有多種窗口時取最高
    fn straight(&self) -> Option<Reading> {
        if self.len != STRAIGHT_LEN {
            return None;
        }

        let mut values = Vec::with_capacity(STRAIGHT_LEN);
        for rank in self.normal_ranks() {
            if self.count(rank) > 1 || !self.is_straight_member(rank) {
                return None;
            }
            values.push(self.value(rank));
        }

        let top = match (values.iter().min(), values.iter().max()) {
            (Some(&min), Some(&max)) => {
                if max - min >= STRAIGHT_LEN as u8 {
                    return None;
                }
                (min + STRAIGHT_LEN as u8 - 1).min(TOP_PLAIN_VALUE)
            }
            _ => TOP_PLAIN_VALUE,
        };

        let bottom = top + 1 - STRAIGHT_LEN as u8;
        let fills = (bottom..=top)
            .filter(|v| !values.contains(v))
            .filter_map(|v| self.rank_of(v))
            .collect();
        Some(Reading {
            main: self.rank_of(top)?,
            fills,
        })
    }

    /// `groups` 組相連、每組 `size` 張（鋼板 2x3、木板 3x2）；王不可入列
    fn consecutive(&self, groups: u8, size: u8) -> Option<Reading> {
        if self.len != PLATE_LEN || groups as usize * size as usize != PLATE_LEN {
            return None;
        }
        if self
            .normal_ranks()
            .any(|r| r.is_joker() || self.count(r) > size)
        {
            return None;
        }

        for top in (LOWEST_PLAIN_VALUE + groups - 1..=LEVEL_RANK_VALUE).rev() {
            let window: Vec<Rank> = (top + 1 - groups..=top)
                .filter_map(|v| self.rank_of(v))
                .collect();
            if !self.normal_ranks().all(|r| window.contains(&r)) {
                continue;
            }
            let fills = window
                .iter()
                .flat_map(|&r| iter::repeat(r).take((size - self.count(r)) as usize))
                .collect();
            return Some(Reading {
                main: self.rank_of(top)?,
                fills,
            });
        }
        None
    }

    /// 三帶二：一個點數補到 3 張、另一個點數補到 2 張；主值取較大的三張
    fn triplet_with_pair(&self) -> Option<Reading> {
        if self.len != STRAIGHT_LEN {
            return None;
        }
        let ranks: Vec<Rank> = self.normal_ranks().collect();
        if ranks.len() != 2 {
            return None;
        }

        let mut best: Option<Reading> = None;
        for (triple, pair) in [(ranks[0], ranks[1]), (ranks[1], ranks[0])] {
            let triple_fill = 3 - self.count(triple).min(3);
            let pair_fill = 2 - self.count(pair).min(2);
            if self.count(triple) > 3 || self.count(pair) > 2 {
                continue;
            }
            let better = best
                .as_ref()
                .map_or(true, |b| self.value(triple) > self.value(b.main));
            if better {
                let fills = iter::repeat(triple)
                    .take(triple_fill as usize)
                    .chain(iter::repeat(pair).take(pair_fill as usize))
                    .collect();
                best = Some(Reading { main: triple, fills });
            }
        }
        best
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::parse_cards;

    fn ctx(level: Rank) -> RulesContext {
        RulesContext::with_rank(level).unwrap()
    }

    fn kind(s: &str, level: Rank) -> Option<HandType> {
        classify(&parse_cards(s).unwrap(), &ctx(level))
    }

    #[test]
    fn test_empty_is_unclassifiable() {
        assert_eq!(classify(&[], &RulesContext::default()), None);
    }

    #[test]
    fn test_single_pair_triplet() {
        assert_eq!(kind("7S", Rank::Two), Some(HandType::Single));
        assert_eq!(kind("7S 7D", Rank::Two), Some(HandType::Pair));
        assert_eq!(kind("7S 8D", Rank::Two), None);
        assert_eq!(kind("7S 7D 7C", Rank::Two), Some(HandType::Triplet));
        assert_eq!(kind("7S 7D 8C", Rank::Two), None);
    }

    #[test]
    fn test_wildcard_completes_pair_and_triplet() {
        // 2H 是級牌 2 下的萬能牌
        assert_eq!(kind("7S 2H", Rank::Two), Some(HandType::Pair));
        assert_eq!(kind("7S 7C 2H", Rank::Two), Some(HandType::Triplet));
        assert_eq!(kind("2H 2H", Rank::Two), Some(HandType::Pair));
        assert_eq!(kind("2H 2H 2H", Rank::Two), Some(HandType::Triplet));
        // 級牌換成 5 後 2H 只是普通的 2
        assert_eq!(kind("7S 2H", Rank::Five), None);
    }

    #[test]
    fn test_mixed_ranks_are_not_a_type() {
        assert_eq!(kind("3C 3D 3S 4C 4D 5C", Rank::Two), None);
        assert_eq!(kind("3C 3D 3S 4C", Rank::Two), None);
    }

    #[test]
    fn test_triplet_with_pair() {
        assert_eq!(kind("3C 3D 3S 4C 4D", Rank::Two), Some(HandType::TripletWithPair));
        assert_eq!(kind("3C 3D 2H 4C 4D", Rank::Two), Some(HandType::TripletWithPair));
        assert_eq!(kind("3C 3D 3S 4C 5D", Rank::Two), None);
        assert_eq!(kind("SJ SJ 9C 9D 9S", Rank::Two), Some(HandType::TripletWithPair));
    }

    #[test]
    fn test_triplet_with_pair_reports_higher_triple() {
        let cards = parse_cards("5C 5D 8C 8D 2H").unwrap();
        let a = analyze(&cards, &ctx(Rank::Two)).unwrap();
        assert_eq!(a.hand_type, HandType::TripletWithPair);
        assert_eq!(a.main_rank, Rank::Eight);
        assert_eq!(a.substitutions, vec![Substitution { index: 4, assumed: Rank::Eight }]);
    }

    #[test]
    fn test_straight_main_value_is_highest() {
        let cards = parse_cards("3C 4D 5S 6C 7D").unwrap();
        let a = analyze(&cards, &ctx(Rank::Two)).unwrap();
        assert_eq!(a.hand_type, HandType::Straight);
        assert_eq!(a.main_rank, Rank::Seven);
        assert!(a.substitutions.is_empty());
    }

    #[test]
    fn test_straight_excludes_two_and_level() {
        // 2 永遠不作為順子的自然成員（包含 A2345）
        assert_eq!(kind("AC 2D 3S 4C 5D", Rank::Nine), None);
        // 級牌本身不能入順
        assert_eq!(kind("8C 9D 10S JC QD", Rank::Ten), None);
        // 級牌被跳過：級牌 7 下 4-5-6-8-9 為連續點數值
        assert_eq!(kind("4C 5D 6S 8C 9D", Rank::Seven), Some(HandType::Straight));
        assert_eq!(kind("10C JD QS KC AD", Rank::Two), Some(HandType::Straight));
        assert_eq!(kind("JD QS KC AD 2C", Rank::Three), None);
    }

    #[test]
    fn test_straight_rejects_duplicates_and_jokers() {
        assert_eq!(kind("3C 3D 5S 6C 7D", Rank::Two), None);
        assert_eq!(kind("3C 4D 5S 6C SJ", Rank::Two), None);
    }

    #[test]
    fn test_wildcard_fills_straight_gap_picking_highest_window() {
        let cards = parse_cards("5C 6D 2H 2H 7S").unwrap();
        let a = analyze(&cards, &ctx(Rank::Two)).unwrap();
        assert_eq!(a.hand_type, HandType::Straight);
        assert_eq!(a.main_rank, Rank::Nine);
        let assumed: Vec<Rank> = a.substitutions.iter().map(|s| s.assumed).collect();
        assert_eq!(assumed, vec![Rank::Eight, Rank::Nine]);
        assert_eq!(a.substitutions[0].index, 2);

        let gap = parse_cards("5C 6D 2H 8C 9S").unwrap();
        let a = analyze(&gap, &ctx(Rank::Two)).unwrap();
        assert_eq!(a.main_rank, Rank::Nine);
        assert_eq!(a.substitutions[0].assumed, Rank::Seven);
    }

    #[test]
    fn test_straight_flush() {
        assert_eq!(kind("3S 4S 5S 6S 7S", Rank::Two), Some(HandType::StraightFlush));
        assert_eq!(kind("3S 4S 5S 6S 2H", Rank::Two), Some(HandType::StraightFlush));
        assert_eq!(kind("3S 4S 5S 6S 7D", Rank::Two), Some(HandType::Straight));
    }

    #[test]
    fn test_bombs() {
        assert_eq!(kind("5C 5D 5S 5H", Rank::Two), Some(HandType::Bomb));
        assert_eq!(kind("5C 5D 5S 2H", Rank::Two), Some(HandType::Bomb));
        assert_eq!(kind("5C 5D 5S 5H 5C", Rank::Two), Some(HandType::Bomb));
        assert_eq!(kind("5C 5D 5S 5H 5C 2H", Rank::Two), Some(HandType::BigBomb));
        assert_eq!(
            kind("5C 5D 5S 5H 5C 5D 5S 5H", Rank::Two),
            Some(HandType::BigBomb)
        );
        assert_eq!(kind("5C 5D 5S 6H", Rank::Two), None);
    }

    #[test]
    fn test_bomb_substitutions() {
        let cards = parse_cards("2H 9C 9D 9S").unwrap();
        let a = analyze(&cards, &ctx(Rank::Two)).unwrap();
        assert_eq!(a.hand_type, HandType::Bomb);
        assert_eq!(a.main_rank, Rank::Nine);
        assert_eq!(a.substitutions, vec![Substitution { index: 0, assumed: Rank::Nine }]);
    }

    #[test]
    fn test_super_bomb_regardless_of_level() {
        for level in Rank::PLAIN {
            assert_eq!(kind("SJ SJ BJ BJ", level), Some(HandType::SuperBomb));
        }
        assert_eq!(kind("SJ BJ BJ", Rank::Two), None);
    }

    #[test]
    fn test_steel_plate() {
        assert_eq!(kind("3C 3D 3S 4C 4D 4S", Rank::Two), Some(HandType::SteelPlate));
        assert_eq!(kind("3C 3D 3S 4C 4D 2H", Rank::Two), Some(HandType::SteelPlate));
        assert_eq!(kind("3C 3D 3S 5C 5D 5S", Rank::Two), None);
        // 級牌 7 下 6 與 8 相鄰
        assert_eq!(kind("6C 6D 6S 8C 8D 8S", Rank::Seven), Some(HandType::SteelPlate));
    }

    #[test]
    fn test_steel_plate_main_is_higher_triplet() {
        let cards = parse_cards("QC QD QS KC KD KS").unwrap();
        let a = analyze(&cards, &ctx(Rank::Two)).unwrap();
        assert_eq!(a.main_rank, Rank::King);
    }

    #[test]
    fn test_wooden_board() {
        assert_eq!(kind("3C 3D 4C 4D 5C 5D", Rank::Two), Some(HandType::WoodenBoard));
        assert_eq!(kind("3C 3D 4C 2H 5C 5D", Rank::Two), Some(HandType::WoodenBoard));
        assert_eq!(kind("3C 3D 4C 4D 6C 6D", Rank::Two), None);
        let cards = parse_cards("5C 5D 6C 2H 7C 7D").unwrap();
        let a = analyze(&cards, &ctx(Rank::Two)).unwrap();
        assert_eq!(a.hand_type, HandType::WoodenBoard);
        assert_eq!(a.main_rank, Rank::Seven);
        assert_eq!(a.substitutions, vec![Substitution { index: 3, assumed: Rank::Six }]);
    }

    #[test]
    fn test_two_wildcards_with_two_pairs_read_as_steel_plate() {
        let cards = parse_cards("5C 5D 6C 6D 2H 2H").unwrap();
        let a = analyze(&cards, &ctx(Rank::Two)).unwrap();
        assert_eq!(a.hand_type, HandType::SteelPlate);
        assert_eq!(a.main_rank, Rank::Six);
    }

    #[test]
    fn test_detection_order_prefers_special() {
        // 4 王也符合「同點」以外的形狀，必須回報四王
        assert_eq!(kind("BJ SJ BJ SJ", Rank::Two), Some(HandType::SuperBomb));
        // 同點 5 張優先於三帶二
        assert_eq!(kind("5C 5D 5S 2H 2H", Rank::Two), Some(HandType::Bomb));
    }

    #[test]
    fn test_wildcard_fills_joker_ranks() {
        assert_eq!(kind("SJ SJ", Rank::Two), Some(HandType::Pair));
        assert_eq!(kind("SJ 2H", Rank::Two), Some(HandType::Pair));
        assert_eq!(kind("BJ BJ 2H", Rank::Two), Some(HandType::Triplet));
        assert_eq!(kind("SJ SJ 2H 2H", Rank::Two), Some(HandType::Bomb));
        assert_eq!(kind("SJ 2H 9C 9D 9S", Rank::Two), Some(HandType::TripletWithPair));
        assert_eq!(kind("SJ SJ 9C 9D 2H", Rank::Two), Some(HandType::TripletWithPair));

        let cards = parse_cards("SJ 2H").unwrap();
        let a = analyze(&cards, &ctx(Rank::Two)).unwrap();
        assert_eq!(a.main_rank, Rank::SmallJoker);
        assert_eq!(a.substitutions, vec![Substitution { index: 1, assumed: Rank::SmallJoker }]);

        // 四王仍須全為天然王
        assert_eq!(kind("SJ SJ BJ 2H", Rank::Two), None);
    }

    #[test]
    fn test_single_wildcard_is_level_rank() {
        let cards = parse_cards("2H").unwrap();
        let a = analyze(&cards, &ctx(Rank::Two)).unwrap();
        assert_eq!(a.hand_type, HandType::Single);
        assert_eq!(a.main_rank, Rank::Two);
    }

    #[test]
    fn test_excess_wildcards_do_not_panic() {
        let cards = parse_cards("2H 2H 2H 2H 2H 2H 2H").unwrap();
        assert_eq!(kind("2H 2H 2H 2H 2H 2H 2H", Rank::Two), Some(HandType::BigBomb));
        let a = analyze(&cards, &ctx(Rank::Two)).unwrap();
        assert_eq!(a.main_rank, Rank::Two);
        assert_eq!(kind("2H 2H 2H 2H 2H", Rank::Two), Some(HandType::StraightFlush));
    }
}
