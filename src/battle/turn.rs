use crate::battle::commands::PlayerTarget;
use crate::battle::state::BattleState;
use crate::battle::stats::effective_speed;
use log::debug;
use schema::MoveData;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Priority bracket of a voluntary switch.
pub const SWITCH_PRIORITY: i8 = 6;
/// Priority bracket of a forced switch or running away.
pub const FORCED_PRIORITY: i8 = 7;

/// Where an attack came from. Only chosen attacks spend PP and pass through
/// every gate; the other origins are created by the engine itself.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOrigin {
    Chosen,
    /// Second half of a two-turn move.
    ChargeRelease,
    /// One hit injected by a multi-hit move.
    MultiHitInstance,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Action {
    Attack {
        attack: MoveData,
        origin: AttackOrigin,
    },
    SwitchTo {
        team_index: usize,
    },
    /// Replacement for a fainted creature.
    ForceSwitch {
        team_index: usize,
    },
    Recharge,
    Run,
}

/// A pending action for one side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Turn {
    pub player: PlayerTarget,
    pub action: Action,
}

impl Turn {
    pub fn attack(player: PlayerTarget, attack: MoveData) -> Self {
        Self {
            player,
            action: Action::Attack {
                attack,
                origin: AttackOrigin::Chosen,
            },
        }
    }

    pub fn switch_to(player: PlayerTarget, team_index: usize) -> Self {
        Self {
            player,
            action: Action::SwitchTo { team_index },
        }
    }

    pub fn force_switch(player: PlayerTarget, team_index: usize) -> Self {
        Self {
            player,
            action: Action::ForceSwitch { team_index },
        }
    }

    pub fn recharge(player: PlayerTarget) -> Self {
        Self {
            player,
            action: Action::Recharge,
        }
    }

    pub fn run(player: PlayerTarget) -> Self {
        Self {
            player,
            action: Action::Run,
        }
    }

    pub fn priority(&self) -> i8 {
        match &self.action {
            Action::Attack { attack, .. } => attack.priority,
            Action::SwitchTo { .. } => SWITCH_PRIORITY,
            Action::ForceSwitch { .. } | Action::Run => FORCED_PRIORITY,
            Action::Recharge => 0,
        }
    }

    /// Tiebreak value: the acting side's current active creature's effective
    /// speed for attacks, zero for everything else.
    pub fn speed(&self, battle_state: &BattleState) -> u16 {
        match &self.action {
            Action::Attack { .. } => battle_state
                .active(self.player)
                .map(effective_speed)
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// Hits injected by a multi-hit move rather than submitted by a side.
    pub fn is_sub_turn(&self) -> bool {
        matches!(
            self.action,
            Action::Attack {
                origin: AttackOrigin::MultiHitInstance,
                ..
            }
        )
    }

    fn is_replaceable(&self) -> bool {
        match &self.action {
            Action::Attack { origin, .. } => *origin != AttackOrigin::MultiHitInstance,
            Action::SwitchTo { .. } => true,
            _ => false,
        }
    }

    fn resolves_immediately(&self) -> bool {
        matches!(self.action, Action::Run | Action::ForceSwitch { .. })
    }
}

/// Pending turns for the current round, in submission order until sorted.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TurnQueue {
    turns: VecDeque<Turn>,
}

impl TurnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a turn. An attack or switch replaces the side's oldest pending
    /// attack or switch once the side already holds `actions_per_side` of
    /// them; every other action appends.
    pub fn submit(&mut self, turn: Turn, actions_per_side: usize) {
        if turn.is_replaceable() {
            let pending: Vec<usize> = self
                .turns
                .iter()
                .enumerate()
                .filter(|(_, queued)| queued.player == turn.player && queued.is_replaceable())
                .map(|(position, _)| position)
                .collect();
            if pending.len() >= actions_per_side.max(1) {
                if let Some(slot) = pending.first().and_then(|&p| self.turns.get_mut(p)) {
                    debug!("{:?} replaced its pending action", turn.player);
                    *slot = turn;
                    return;
                }
            }
        }
        self.turns.push_back(turn);
    }

    /// True once a full round is queued, or as soon as a run or forced
    /// switch is waiting.
    pub fn should_resolve(&self, turns_per_round: usize) -> bool {
        self.turns.len() >= turns_per_round || self.turns.iter().any(Turn::resolves_immediately)
    }

    /// Orders the queue by priority, then speed, both descending. Equal
    /// pairs keep their submission order.
    pub fn sort_by_priority(&mut self, battle_state: &BattleState) {
        let mut keyed: Vec<(i8, u16, Turn)> = self
            .turns
            .drain(..)
            .map(|turn| (turn.priority(), turn.speed(battle_state), turn))
            .collect();

        keyed.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));

        for (priority, speed, turn) in &keyed {
            debug!(
                "Turn order: {:?} {:?} (priority {}, speed {})",
                turn.player, turn.action, priority, speed
            );
        }
        self.turns = keyed.into_iter().map(|(_, _, turn)| turn).collect();
    }

    pub fn pop_front(&mut self) -> Option<Turn> {
        self.turns.pop_front()
    }

    /// Inserts `turns` ahead of everything queued, keeping their order.
    pub fn push_front_all(&mut self, turns: Vec<Turn>) {
        for turn in turns.into_iter().rev() {
            self.turns.push_front(turn);
        }
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
