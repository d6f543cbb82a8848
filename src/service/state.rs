//! 對局狀態管理
//!
//! 一局（一手牌）內的出牌輪轉：誰該出牌、桌面上的上一手、連續過牌數、
//! 出完的順序。所有變更都經由 `play` / `pass` 依序進行。

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::RulesError;
use crate::game::{
    classify, deal_hands, deal_hands_seeded, format_cards, remove_cards, valid_play, Card, Hands,
    HandType, Play, Rank, RulesContext, PLAYER_COUNT,
};

use super::config::SessionConfig;

/// 隊友座位（0/2、1/3 同隊）
pub fn partner(player: usize) -> usize {
    (player + 2) % PLAYER_COUNT
}

pub fn same_team(a: usize, b: usize) -> bool {
    a % 2 == b % 2
}

/// 出牌結果
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayOutcome {
    pub hand_type: HandType,
    /// 出牌者是否因此出完
    pub finished: bool,
    pub hand_over: bool,
    /// 下一位該行動的玩家（局已結束時為 None）
    pub next_turn: Option<usize>,
}

/// 過牌結果
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PassOutcome {
    /// 其餘玩家都過牌，本輪結束
    pub trick_cleared: bool,
    pub next_turn: usize,
}

/// 單局對局狀態
#[derive(Clone, Debug)]
pub struct MatchSession {
    config: SessionConfig,
    ctx: RulesContext,
    hands: Hands,
    turn: usize,
    last_play: Option<Play>,
    pass_count: usize,
    trick: Vec<Play>,
    finish_order: Vec<usize>,
    hand_over: bool,
}

impl MatchSession {
    /// 以指定手牌開局，座位 0 先出
    pub fn new(config: SessionConfig, hands: Hands) -> Self {
        let ctx = config.rules_context();
        Self {
            config,
            ctx,
            hands,
            turn: 0,
            last_play: None,
            pass_count: 0,
            trick: Vec::new(),
            finish_order: Vec::new(),
            hand_over: false,
        }
    }

    /// 洗牌發牌後開局（有種子時可重現）
    pub fn deal(config: SessionConfig) -> Self {
        let hands = match config.seed {
            Some(seed) => deal_hands_seeded(seed),
            None => deal_hands(&mut StdRng::from_entropy()),
        };
        info!(level = config.level.rank().label(), seed = ?config.seed, "dealt new hand");
        Self::new(config, hands)
    }

    /// 保留級牌與設定，換一手新牌
    pub fn start_hand(&mut self, hands: Hands, leader: usize) -> Result<(), RulesError> {
        check_player(leader)?;
        self.hands = hands;
        self.turn = leader;
        self.last_play = None;
        self.pass_count = 0;
        self.trick.clear();
        self.finish_order.clear();
        self.hand_over = false;
        info!(leader, level = self.ctx.level().rank().label(), "hand started");
        Ok(())
    }

    // ========================================================================
    // 查詢
    // ========================================================================

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn rules(&self) -> &RulesContext {
        &self.ctx
    }

    pub fn hand(&self, player: usize) -> Result<&[Card], RulesError> {
        check_player(player)?;
        Ok(&self.hands[player])
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn last_play(&self) -> Option<&Play> {
        self.last_play.as_ref()
    }

    pub fn pass_count(&self) -> usize {
        self.pass_count
    }

    /// 本輪已出的牌（依出牌順序）
    pub fn trick(&self) -> &[Play] {
        &self.trick
    }

    /// 出完的順序；局結束後包含全部四位玩家
    pub fn finish_order(&self) -> &[usize] {
        &self.finish_order
    }

    pub fn is_hand_over(&self) -> bool {
        self.hand_over
    }

    pub fn is_finished(&self, player: usize) -> bool {
        self.finish_order.contains(&player)
    }

    // ========================================================================
    // 動作
    // ========================================================================

    /// 出牌：檢查輪次、持牌、牌型與是否壓得過桌面
    pub fn play(&mut self, player: usize, cards: &[Card]) -> Result<PlayOutcome, RulesError> {
        self.check_actor(player)?;

        let rest = remove_cards(&self.hands[player], cards)
            .ok_or(RulesError::CardsNotInHand(player))?;
        let hand_type = classify(cards, &self.ctx).ok_or(RulesError::Unclassifiable)?;
        let play = Play::new(player, cards.to_vec(), hand_type);
        if !valid_play(&play, self.last_play.as_ref(), &self.ctx) {
            debug!(player, cards = %format_cards(cards), "play rejected: does not beat table");
            return Err(RulesError::DoesNotBeat);
        }

        debug!(player, hand_type = hand_type.name(), cards = %format_cards(cards), "play accepted");
        self.hands[player] = rest;
        self.last_play = Some(play.clone());
        self.trick.push(play);
        self.pass_count = 0;

        let finished = self.hands[player].is_empty();
        if finished {
            self.finish_order.push(player);
            info!(player, place = self.finish_order.len(), "player finished");
            self.update_hand_over();
        }

        let next_turn = if self.hand_over {
            None
        } else {
            self.turn = self.next_active(player);
            Some(self.turn)
        };

        Ok(PlayOutcome {
            hand_type,
            finished,
            hand_over: self.hand_over,
            next_turn,
        })
    }

    /// 過牌：領出者不能過；其餘玩家都過牌時本輪結束並決定下一位領出者
    pub fn pass(&mut self, player: usize) -> Result<PassOutcome, RulesError> {
        self.check_actor(player)?;
        let last_player = match &self.last_play {
            Some(last) => last.player_index,
            None => return Err(RulesError::LeaderCannotPass),
        };

        self.pass_count += 1;
        debug!(player, passes = self.pass_count, "pass");

        // 出牌者已出完時，剩下的每一位都要表態
        let responders = if self.is_finished(last_player) {
            self.active_count()
        } else {
            self.active_count().saturating_sub(1)
        };

        if self.pass_count >= responders {
            let leader = self.trick_winner_lead(last_player);
            self.clear_trick(leader);
            return Ok(PassOutcome {
                trick_cleared: true,
                next_turn: leader,
            });
        }

        self.turn = self.next_active(player);
        Ok(PassOutcome {
            trick_cleared: false,
            next_turn: self.turn,
        })
    }

    /// 更換級牌（供下一手使用）；本輪進行中時拒絕
    pub fn set_level(&mut self, rank: Rank) -> Result<(), RulesError> {
        if self.last_play.is_some() {
            return Err(RulesError::TrickInProgress);
        }
        self.ctx.set_level(rank)?;
        self.config.level = self.ctx.level();
        info!(level = rank.label(), "level changed");
        Ok(())
    }

    // ========================================================================
    // 內部
    // ========================================================================

    fn check_actor(&self, player: usize) -> Result<(), RulesError> {
        check_player(player)?;
        if self.hand_over {
            return Err(RulesError::HandOver);
        }
        if self.is_finished(player) {
            return Err(RulesError::PlayerFinished(player));
        }
        if player != self.turn {
            debug!(player, turn = self.turn, "out of turn");
            return Err(RulesError::OutOfTurn {
                player,
                turn: self.turn,
            });
        }
        Ok(())
    }

    fn active_count(&self) -> usize {
        PLAYER_COUNT - self.finish_order.len()
    }

    /// `from` 之後第一位還沒出完的玩家
    fn next_active(&self, from: usize) -> usize {
        (1..=PLAYER_COUNT)
            .map(|step| (from + step) % PLAYER_COUNT)
            .find(|&p| !self.is_finished(p))
            .unwrap_or(from)
    }

    /// 本輪贏家領出；贏家已出完時由隊友接風（設定關閉時由下家領出）
    fn trick_winner_lead(&self, winner: usize) -> usize {
        if !self.is_finished(winner) {
            return winner;
        }
        let mate = partner(winner);
        if self.config.partner_takes_lead && !self.is_finished(mate) {
            mate
        } else {
            self.next_active(winner)
        }
    }

    fn clear_trick(&mut self, leader: usize) {
        debug!(leader, plays = self.trick.len(), "trick cleared");
        self.last_play = None;
        self.pass_count = 0;
        self.trick.clear();
        self.turn = leader;
    }

    /// 三人出完，或同一隊兩人都出完時結束，並補齊剩下玩家的名次
    fn update_hand_over(&mut self) {
        let team_done =
            (0..2).any(|team| self.is_finished(team) && self.is_finished(partner(team)));
        if self.finish_order.len() < PLAYER_COUNT - 1 && !team_done {
            return;
        }

        let mut rest: Vec<usize> = (0..PLAYER_COUNT).filter(|&p| !self.is_finished(p)).collect();
        rest.sort_by_key(|&p| (self.hands[p].len(), p));
        self.finish_order.extend(rest);
        self.hand_over = true;
        info!(order = ?self.finish_order, "hand over");
    }
}

fn check_player(player: usize) -> Result<(), RulesError> {
    if player < PLAYER_COUNT {
        Ok(())
    } else {
        Err(RulesError::InvalidPlayer(player))
    }
}

// ============================================================================
// 單元測試
// ============================================================================
