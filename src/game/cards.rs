//! 卡牌定義：花色、點數、卡牌
//!
//! 兩副牌同時使用，同花色同點數的兩張牌以值相等視為同一張（不追蹤實體身分）。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// 花色
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    #[serde(rename = "C")]
    Club,
    #[serde(rename = "D")]
    Diamond,
    #[serde(rename = "H")]
    Heart,
    #[serde(rename = "S")]
    Spade,
    #[serde(rename = "J")]
    Joker,
}

impl Suit {
    /// 四種一般花色（不含王）
    pub const PLAIN: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    pub fn to_char(self) -> char {
        match self {
            Suit::Club => 'C',
            Suit::Diamond => 'D',
            Suit::Heart => 'H',
            Suit::Spade => 'S',
            Suit::Joker => 'J',
        }
    }

    fn from_char(c: char) -> Option<Suit> {
        match c {
            'C' => Some(Suit::Club),
            'D' => Some(Suit::Diamond),
            'H' => Some(Suit::Heart),
            'S' => Some(Suit::Spade),
            _ => None,
        }
    }
}

/// 點數（自然順序：3 最小，2 在 A 之上，王最大）
///
/// 實際比較大小請用 `RankTable`，因為級牌會浮到頂端。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "SJ")]
    SmallJoker,
    #[serde(rename = "BJ")]
    BigJoker,
}

pub const RANK_COUNT: usize = 15;

impl Rank {
    pub const ALL: [Rank; RANK_COUNT] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
        Rank::SmallJoker,
        Rank::BigJoker,
    ];

    /// 13 個一般點數（可作為級牌）
    pub const PLAIN: [Rank; 13] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
    ];

    /// 在 `Rank::ALL` 中的索引（用於計數陣列）
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_joker(self) -> bool {
        matches!(self, Rank::SmallJoker | Rank::BigJoker)
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::SmallJoker => "SJ",
            Rank::BigJoker => "BJ",
        }
    }

    fn from_label(s: &str) -> Option<Rank> {
        Rank::ALL.iter().copied().find(|r| r.label() == s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub fn small_joker() -> Self {
        Self::new(Rank::SmallJoker, Suit::Joker)
    }

    pub fn big_joker() -> Self {
        Self::new(Rank::BigJoker, Suit::Joker)
    }

    pub fn is_joker(&self) -> bool {
        self.suit == Suit::Joker
    }

    /// 從 54 張牌組索引還原卡牌（超出範圍回傳 None）
    pub fn from_index(index: usize) -> Option<Card> {
        match index {
            0..=51 => Some(Card::new(Rank::PLAIN[index % 13], Suit::PLAIN[index / 13])),
            52 => Some(Card::small_joker()),
            53 => Some(Card::big_joker()),
            _ => None,
        }
    }
}

/// 文字格式：點數 + 花色，例如 `10S`、`2H`、`AD`；王為 `SJ` / `BJ`
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_joker() {
            write!(f, "{}", self.rank.label())
        } else {
            write!(f, "{}{}", self.rank.label(), self.suit.to_char())
        }
    }
}

impl FromStr for Card {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SJ" => return Ok(Card::small_joker()),
            "BJ" => return Ok(Card::big_joker()),
            _ => {}
        }
        let err = || RulesError::ParseCard(s.to_string());
        let suit_ch = s.chars().last().ok_or_else(err)?;
        let suit = Suit::from_char(suit_ch).ok_or_else(err)?;
        let rank = Rank::from_label(&s[..s.len() - suit_ch.len_utf8()]).ok_or_else(err)?;
        if rank.is_joker() {
            return Err(err());
        }
        Ok(Card::new(rank, suit))
    }
}

/// 解析以空白分隔的卡牌字串，例如 `"3C 4D 5S SJ"`
pub fn parse_cards(s: &str) -> Result<Vec<Card>, RulesError> {
    s.split_whitespace().map(str::parse).collect()
}

/// 以空白串接卡牌文字（日誌用）
pub fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(Card::to_string).collect::<Vec<_>>().join(" ")
}

/// 創建單副 54 張牌組
pub fn standard_deck() -> Vec<Card> {
    (0..54).filter_map(Card::from_index).collect()
}

/// 獲取卡片在 54 張牌組中的索引
pub fn card_index(card: Card) -> usize {
    match card.rank {
        Rank::SmallJoker => 52,
        Rank::BigJoker => 53,
        rank => (card.suit as usize * 13) + rank.index(),
    }
}

/// 以多重集合語意從 `hand` 移除 `cards`；任一張不在手上時回傳 None
pub fn remove_cards(hand: &[Card], cards: &[Card]) -> Option<Vec<Card>> {
    let mut rest = hand.to_vec();
    for card in cards {
        let pos = rest.iter().position(|c| c == card)?;
        rest.swap_remove(pos);
    }
    Some(rest)
}

// ============================================================================
// 單元測試
// ============================================================================
