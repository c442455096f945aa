use crate::battle::calculators::{
    apply_pre_damage_ability_hooks, calculate_damage, confusion_self_hit,
};
use crate::battle::commands::{execute_command_batch, BattleCommand, PlayerTarget};
use crate::battle::conditions::{VolatileKind, VolatileStatus};
use crate::battle::move_effects::{dispatch_bonus_effect, EffectContext};
use crate::battle::observer::BattleObserver;
use crate::battle::rng::BattleRng;
use crate::battle::state::{ActionFailureReason, BattleEvent, BattleState, EventBus, GameState};
use crate::battle::stats::effective_accuracy;
use crate::battle::turn::{Action, AttackOrigin, Turn, TurnQueue};
use crate::config::BattleConfig;
use crate::errors::{ActionError, BattleResult, BattleStateError, TeamError};
use crate::player::BattlePlayer;
use crate::pokemon::{StatusCondition, MAX_TOXIC_COUNTER};
use log::{debug, info, warn};
use schema::{BonusEffect, EffectTarget, MoveData, StatType, Terrain, Weather};

/// Chance in percent that a frozen Pokemon thaws when it tries to move.
const THAW_CHANCE: i32 = 20;

/// Owns one battle: both sides, the field, the pending turns and the RNG.
///
/// The only way to move a battle forward is [`BattleEngine::submit_turn`].
/// Once every side has a turn queued (or someone runs, or a fainted Pokemon
/// is replaced) the round resolves synchronously and its narrated events
/// are returned and pushed to the observer.
pub struct BattleEngine {
    state: BattleState,
    queue: TurnQueue,
    turn_history: Vec<Turn>,
    rng: BattleRng,
    config: BattleConfig,
    observer: Option<Box<dyn BattleObserver>>,
}

impl BattleEngine {
    pub fn new(player1: BattlePlayer, player2: BattlePlayer, rng: BattleRng) -> Self {
        Self {
            state: BattleState::new(player1, player2),
            queue: TurnQueue::new(),
            turn_history: Vec::new(),
            rng,
            config: BattleConfig::default(),
            observer: None,
        }
    }

    /// Like [`BattleEngine::new`], checking both teams against the config's limits.
    pub fn with_config(
        player1: BattlePlayer,
        player2: BattlePlayer,
        rng: BattleRng,
        config: BattleConfig,
    ) -> BattleResult<Self> {
        for player in [&player1, &player2] {
            if player.team.len() > config.max_team_size {
                return Err(TeamError::TeamTooLarge {
                    size: player.team.len(),
                    max: config.max_team_size,
                }
                .into());
            }
            if let Some(pokemon) = player.team.iter().find(|p| p.moves.len() > config.max_moves) {
                return Err(TeamError::TooManyMoves {
                    count: pokemon.moves.len(),
                    max: config.max_moves,
                }
                .into());
            }
        }
        let mut engine = Self::new(player1, player2, rng);
        engine.config = config;
        Ok(engine)
    }

    pub fn set_observer(&mut self, observer: Box<dyn BattleObserver>) {
        self.observer = Some(observer);
    }

    /// Deep copy for look-ahead search. The copy continues the same random
    /// stream independently and reports to no observer.
    pub fn fork(&self) -> Self {
        Self {
            state: self.state.clone(),
            queue: self.queue.clone(),
            turn_history: self.turn_history.clone(),
            rng: self.rng.fork(),
            config: self.config.clone(),
            observer: None,
        }
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut BattleState {
        &mut self.state
    }

    pub fn game_state(&self) -> GameState {
        self.state.game_state
    }

    pub fn winner(&self) -> Option<PlayerTarget> {
        self.state.winner()
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn rng(&self) -> &BattleRng {
        &self.rng
    }

    pub fn pending_turns(&self) -> &TurnQueue {
        &self.queue
    }

    /// Every top-level turn executed so far, in execution order.
    pub fn turn_history(&self) -> &[Turn] {
        &self.turn_history
    }

    /// Sets the weather for the configured duration. Meant for test setup.
    pub fn set_weather(&mut self, weather: Weather) -> BattleResult<()> {
        let turns = self.config.weather_duration;
        self.execute_commands(
            vec![BattleCommand::SetWeather { weather, turns }],
            &mut EventBus::new(),
        )
    }

    /// Sets the terrain for the configured duration. Meant for test setup.
    pub fn set_terrain(&mut self, terrain: Terrain) -> BattleResult<()> {
        let turns = self.config.terrain_duration;
        self.execute_commands(
            vec![BattleCommand::SetTerrain { terrain, turns }],
            &mut EventBus::new(),
        )
    }

    /// Builds an attack turn from the active Pokemon's move slot.
    pub fn move_turn(&self, player: PlayerTarget, move_index: usize) -> BattleResult<Turn> {
        let pokemon = self.state.active(player)?;
        let instance = pokemon
            .moves
            .get(move_index)
            .ok_or(ActionError::InvalidMoveIndex(move_index))?;
        if instance.pp == 0 {
            return Err(ActionError::NoPpRemaining(instance.name().to_string()).into());
        }
        Ok(Turn::attack(player, instance.data.clone()))
    }

    /// The turn a side is locked into this round, if any: recharging after a
    /// move like Hyper Beam, or releasing a charged move.
    pub fn forced_action(&self, player: PlayerTarget) -> Option<Turn> {
        let pokemon = self.state.active(player).ok()?;
        if pokemon.volatile_status.contains_kind(VolatileKind::MustRecharge) {
            return Some(Turn::recharge(player));
        }
        match pokemon.volatile_status.get(VolatileKind::PreparingTo) {
            Some(VolatileStatus::PreparingTo { attack }) => Some(Turn {
                player,
                action: Action::Attack {
                    attack: attack.clone(),
                    origin: AttackOrigin::ChargeRelease,
                },
            }),
            _ => None,
        }
    }

    /// Every turn the side could legally submit right now.
    pub fn valid_turns(&self, player: PlayerTarget) -> Vec<Turn> {
        let game_state = self.state.game_state;
        if game_state.is_completed() {
            return Vec::new();
        }
        let side = self.state.player(player);
        if game_state.is_awaiting_replacement() {
            if !game_state.awaits_replacement_from(player) {
                return Vec::new();
            }
            return side
                .switch_options()
                .into_iter()
                .map(|index| Turn::force_switch(player, index))
                .collect();
        }
        if let Some(forced) = self.forced_action(player) {
            return vec![forced];
        }

        let mut turns: Vec<Turn> = (0..side.active_pokemon().map_or(0, |p| p.moves.len()))
            .filter_map(|index| self.move_turn(player, index).ok())
            .collect();
        turns.extend(
            side.switch_options()
                .into_iter()
                .map(|index| Turn::switch_to(player, index)),
        );
        turns.push(Turn::run(player));
        turns
    }

    /// Queues a side's turn and, once the round is ready, resolves it.
    ///
    /// Returns the events of the resolution, or an empty bus when the engine
    /// is still waiting for the other side.
    pub fn submit_turn(&mut self, turn: Turn) -> BattleResult<EventBus> {
        if self.state.game_state.is_completed() {
            return Err(BattleStateError::BattleCompleted.into());
        }
        let turn = self.validate_turn(turn)?;
        let turn = self.apply_forced_action(turn);
        debug!("{:?} submitted {:?}", turn.player, turn.action);
        self.queue.submit(turn, self.config.actions_per_side());

        if !self.queue.should_resolve(self.config.turns_per_round()) {
            return Ok(EventBus::new());
        }
        self.resolve()
    }

    // --- Private Helper Functions ---

    fn validate_turn(&self, turn: Turn) -> BattleResult<Turn> {
        let game_state = self.state.game_state;
        let player = self.state.player(turn.player);

        if game_state.is_awaiting_replacement() {
            if !game_state.awaits_replacement_from(turn.player) {
                return Err(ActionError::ReplacementRequired.into());
            }
            return match turn.action {
                Action::SwitchTo { team_index } | Action::ForceSwitch { team_index } => {
                    player.validate_switch(team_index)?;
                    Ok(Turn::force_switch(turn.player, team_index))
                }
                Action::Run => Ok(turn),
                _ => Err(ActionError::ReplacementRequired.into()),
            };
        }

        match &turn.action {
            Action::ForceSwitch { .. } => Err(ActionError::NotAwaitingSwitch.into()),
            Action::Recharge => match self.forced_action(turn.player) {
                Some(Turn {
                    action: Action::Recharge,
                    ..
                }) => Ok(turn),
                _ => Err(ActionError::NotRecharging.into()),
            },
            Action::SwitchTo { team_index } => {
                player.validate_switch(*team_index)?;
                Ok(turn)
            }
            _ => Ok(turn),
        }
    }

    fn apply_forced_action(&self, turn: Turn) -> Turn {
        if !matches!(turn.action, Action::Attack { .. } | Action::SwitchTo { .. }) {
            return turn;
        }
        match self.forced_action(turn.player) {
            Some(forced) => {
                debug!("{:?} is locked into {:?}", turn.player, forced.action);
                forced
            }
            None => turn,
        }
    }

    fn execute_commands(
        &mut self,
        commands: Vec<BattleCommand>,
        bus: &mut EventBus,
    ) -> BattleResult<()> {
        execute_command_batch(commands, &mut self.state, bus, &mut self.queue)
    }

    fn resolve(&mut self) -> BattleResult<EventBus> {
        if let Some(observer) = self.observer.as_mut() {
            observer.disable_input();
        }

        let mut bus = EventBus::new();
        bus.push(BattleEvent::ClearLog);
        if self.state.game_state.is_awaiting_replacement() {
            self.resolve_replacement_phase(&mut bus)?;
        } else {
            self.resolve_round(&mut bus)?;
        }

        if let Some(observer) = self.observer.as_mut() {
            observer.receive_events(&bus);
            if !self.state.game_state.is_completed() {
                observer.enable_input();
            }
        }
        Ok(bus)
    }

    fn resolve_round(&mut self, bus: &mut EventBus) -> BattleResult<()> {
        bus.push(BattleEvent::RoundStarted {
            round: self.state.round,
        });
        self.queue.sort_by_priority(&self.state);

        while let Some(turn) = self.queue.pop_front() {
            if !turn.is_sub_turn() {
                self.turn_history.push(turn.clone());
            }
            self.execute_turn(turn, bus)?;

            if self.state.game_state.is_completed() {
                self.queue.clear();
                return Ok(());
            }
        }

        self.execute_end_of_round(bus)
    }

    /// Sends in replacements for fainted Pokemon. This is not a round: there
    /// is no end-of-round sweep and the round counter does not move.
    fn resolve_replacement_phase(&mut self, bus: &mut EventBus) -> BattleResult<()> {
        self.queue.sort_by_priority(&self.state);
        while let Some(turn) = self.queue.pop_front() {
            match turn.action {
                Action::ForceSwitch { .. } | Action::Run => {
                    self.turn_history.push(turn.clone());
                    self.execute_turn(turn, bus)?;
                }
                _ => warn!("Dropping {:?} queued during a replacement phase", turn),
            }
            if self.state.game_state.is_completed() {
                self.queue.clear();
                return Ok(());
            }
        }
        self.update_replacement_state(bus);
        Ok(())
    }

    fn execute_turn(&mut self, turn: Turn, bus: &mut EventBus) -> BattleResult<()> {
        let player = turn.player;
        match turn.action {
            Action::Run => {
                self.execute_run(player, bus);
                Ok(())
            }
            Action::SwitchTo { team_index } | Action::ForceSwitch { team_index } => {
                if let Err(error) = self.state.player(player).validate_switch(team_index) {
                    warn!("{:?} could not switch: {}", player, error);
                    return Ok(());
                }
                self.execute_commands(
                    vec![BattleCommand::SwitchPokemon {
                        target: player,
                        team_index,
                    }],
                    bus,
                )
            }
            Action::Recharge => self.execute_recharge(player, bus),
            Action::Attack { attack, origin } => self.execute_attack(player, attack, origin, bus),
        }
    }

    fn execute_run(&mut self, player: PlayerTarget, bus: &mut EventBus) {
        let winner = player.opponent();
        self.state.game_state = match winner {
            PlayerTarget::Player1 => GameState::Player1Win,
            PlayerTarget::Player2 => GameState::Player2Win,
        };
        info!(
            "{} ran away; {} wins",
            self.state.player(player).player_name,
            self.state.player(winner).player_name
        );
        bus.push(BattleEvent::PlayerRan {
            player_index: player.to_index(),
        });
        bus.push(BattleEvent::BattleEnded {
            winner: winner.to_index(),
        });
    }

    fn execute_recharge(&mut self, player: PlayerTarget, bus: &mut EventBus) -> BattleResult<()> {
        let pokemon = self.state.active(player)?;
        if pokemon.is_fainted()
            || !pokemon
                .volatile_status
                .contains_kind(VolatileKind::MustRecharge)
        {
            return Ok(());
        }
        let name = pokemon.display_name().to_string();
        self.execute_commands(
            vec![
                BattleCommand::RemoveVolatile {
                    target: player,
                    kind: VolatileKind::MustRecharge,
                },
                BattleCommand::EmitEvent(BattleEvent::ActionFailed {
                    pokemon: name,
                    reason: ActionFailureReason::MustRecharge,
                }),
            ],
            bus,
        )
    }

    fn fail_action(
        &mut self,
        pokemon: &str,
        reason: ActionFailureReason,
        bus: &mut EventBus,
    ) -> BattleResult<()> {
        debug!("{} cannot act: {:?}", pokemon, reason);
        self.execute_commands(
            vec![BattleCommand::EmitEvent(BattleEvent::ActionFailed {
                pokemon: pokemon.to_string(),
                reason,
            })],
            bus,
        )
    }

    /// Confusion, sleep, freeze and paralysis, in that order. Returns false
    /// when the Pokemon loses its action.
    fn passes_status_gates(&mut self, player: PlayerTarget, bus: &mut EventBus) -> BattleResult<bool> {
        let pokemon = self.state.active(player)?;
        let name = pokemon.display_name().to_string();

        let confused_turns = match pokemon.volatile_status.get(VolatileKind::Confused) {
            Some(VolatileStatus::Confused { turns_remaining }) => Some(*turns_remaining),
            _ => None,
        };

        // Confusion
        if let Some(turns_remaining) = confused_turns {
            if turns_remaining == 0 {
                self.execute_commands(
                    vec![BattleCommand::RemoveVolatile {
                        target: player,
                        kind: VolatileKind::Confused,
                    }],
                    bus,
                )?;
            } else {
                bus.push(BattleEvent::PokemonConfused {
                    pokemon: name.clone(),
                });
                if self.rng.d3() == 1 {
                    let pokemon = self.state.active(player)?;
                    let outcome = calculate_damage(
                        pokemon,
                        pokemon,
                        &confusion_self_hit(),
                        self.state.weather,
                        &mut self.rng,
                    );
                    self.fail_action(&name, ActionFailureReason::HurtItselfInConfusion, bus)?;
                    self.execute_commands(
                        vec![BattleCommand::DealDamage {
                            target: player,
                            amount: outcome.damage,
                        }],
                        bus,
                    )?;
                    return Ok(false);
                }
            }
        }

        // Sleep, then freeze, then paralysis
        let status = self.state.active(player)?.status();
        match status {
            StatusCondition::Asleep { turns_remaining: 0 } => {
                self.execute_commands(
                    vec![BattleCommand::SetPokemonStatus {
                        target: player,
                        status: StatusCondition::Healthy,
                    }],
                    bus,
                )?;
            }
            StatusCondition::Asleep { .. } => {
                self.fail_action(&name, ActionFailureReason::IsAsleep, bus)?;
                return Ok(false);
            }
            StatusCondition::Frozen => {
                if self.rng.percent_chance(THAW_CHANCE) {
                    self.execute_commands(
                        vec![BattleCommand::SetPokemonStatus {
                            target: player,
                            status: StatusCondition::Healthy,
                        }],
                        bus,
                    )?;
                } else {
                    self.fail_action(&name, ActionFailureReason::IsFrozen, bus)?;
                    return Ok(false);
                }
            }
            StatusCondition::Paralysed => {
                if self.rng.d3() == 1 {
                    self.fail_action(&name, ActionFailureReason::IsParalysed, bus)?;
                    return Ok(false);
                }
            }
            _ => {}
        }
        Ok(true)
    }

    fn execute_attack(
        &mut self,
        attacker_side: PlayerTarget,
        attack: MoveData,
        origin: AttackOrigin,
        bus: &mut EventBus,
    ) -> BattleResult<()> {
        let defender_side = attacker_side.opponent();
        let sub_turn = origin == AttackOrigin::MultiHitInstance;

        // 1. The acting Pokemon is whoever is active now, not at submission.
        let attacker = self.state.active(attacker_side)?;
        if attacker.is_fainted() {
            debug!("{} fainted before it could act", attacker.display_name());
            return Ok(());
        }
        let attacker_name = attacker.display_name().to_string();

        // 2. Flinching costs the whole action.
        if !sub_turn && attacker.volatile_status.contains_kind(VolatileKind::Flinch) {
            self.execute_commands(
                vec![BattleCommand::RemoveVolatile {
                    target: attacker_side,
                    kind: VolatileKind::Flinch,
                }],
                bus,
            )?;
            return self.fail_action(&attacker_name, ActionFailureReason::IsFlinching, bus);
        }

        // 3. A charged move is being released (or abandoned).
        if attacker.volatile_status.contains_kind(VolatileKind::PreparingTo) {
            self.execute_commands(
                vec![BattleCommand::RemoveVolatile {
                    target: attacker_side,
                    kind: VolatileKind::PreparingTo,
                }],
                bus,
            )?;
        }

        // 4. Status gates. Injected hits already passed them.
        if !sub_turn && !self.passes_status_gates(attacker_side, bus)? {
            return Ok(());
        }

        let mut commands = Vec::new();
        if origin == AttackOrigin::Chosen {
            commands.push(BattleCommand::SpendPp {
                target: attacker_side,
                move_name: attack.name.clone(),
            });
        }
        if !sub_turn {
            commands.push(BattleCommand::EmitEvent(BattleEvent::MoveUsed {
                player_index: attacker_side.to_index(),
                pokemon: attacker_name.clone(),
                move_name: attack.name.clone(),
            }));
        }
        self.execute_commands(commands, bus)?;

        // 5. Target checks: fainted defender, then protection.
        let aims_at_defender =
            attack.is_damaging() || attack.effect_target == Some(EffectTarget::Defender);
        if aims_at_defender {
            let defender = self.state.active(defender_side)?;
            if defender.is_fainted() {
                if sub_turn {
                    return Ok(());
                }
                return self.fail_action(&attacker_name, ActionFailureReason::NoTarget, bus);
            }
            if !sub_turn
                && !attack.breaks_protect
                && defender.volatile_status.contains_kind(VolatileKind::Protected)
            {
                let defender_name = defender.display_name().to_string();
                bus.push(BattleEvent::MoveBlockedByProtect {
                    defender: defender_name,
                });
                return Ok(());
            }
        }

        // 6. Accuracy
        if !sub_turn {
            if let Some(accuracy) = attack.accuracy {
                let stage = self.state.active(attacker_side)?.stat_stage(StatType::Accuracy);
                let chance = effective_accuracy(accuracy, stage);
                if !self.rng.percent_chance(chance as i32) {
                    bus.push(BattleEvent::MoveMissed {
                        attacker: attacker_name,
                        move_name: attack.name.clone(),
                    });
                    return Ok(());
                }
            }
        }

        // 7. Two-turn moves either charge now or fire with the effect stripped.
        let attack = match &attack.bonus_effect {
            Some(BonusEffect::Charge { condition }) => {
                if origin == AttackOrigin::Chosen && !condition.is_met(self.state.weather) {
                    return self.execute_commands(
                        vec![
                            BattleCommand::AddVolatile {
                                target: attacker_side,
                                status: VolatileStatus::PreparingTo {
                                    attack: attack.clone(),
                                },
                            },
                            BattleCommand::EmitEvent(BattleEvent::ChargingMove {
                                pokemon: attacker_name,
                                move_name: attack.name.clone(),
                            }),
                        ],
                        bus,
                    );
                }
                attack.without_bonus_effect()
            }
            _ => attack,
        };

        // 8. Damage. A multi-hit trigger deals none itself.
        let mut damage_dealt = 0;
        let mut blocked = false;
        if attack.is_damaging() && !attack.is_multi_hit() {
            let weather = self.state.weather;
            if weather.blocks(attack.move_type) {
                bus.push(BattleEvent::AttackBlockedByWeather {
                    weather,
                    move_type: attack.move_type,
                });
                blocked = true;
            } else {
                let hooks = apply_pre_damage_ability_hooks(
                    self.state.active(attacker_side)?,
                    attacker_side,
                    &attack,
                );
                self.execute_commands(hooks, bus)?;

                let attacker = self.state.active(attacker_side)?;
                let defender = self.state.active(defender_side)?;
                let outcome = calculate_damage(attacker, defender, &attack, weather, &mut self.rng);
                if outcome.is_blocked() {
                    blocked = true;
                    bus.push(BattleEvent::AttackTypeEffectiveness {
                        effectiveness: outcome.effectiveness,
                    });
                } else {
                    damage_dealt = outcome.damage.min(defender.current_hp());
                    self.execute_commands(
                        vec![
                            BattleCommand::DealDamage {
                                target: defender_side,
                                amount: outcome.damage,
                            },
                            BattleCommand::EmitEvent(BattleEvent::AttackTypeEffectiveness {
                                effectiveness: outcome.effectiveness,
                            }),
                        ],
                        bus,
                    )?;
                }
            }
        }

        // 9. Bonus effect
        if blocked {
            return Ok(());
        }
        let Some(effect) = attack.bonus_effect.clone() else {
            return Ok(());
        };
        let target = attack.effect_target.map(|target| match target {
            EffectTarget::Attacker => attacker_side,
            EffectTarget::Defender => defender_side,
        });
        let context = EffectContext::new(attacker_side, attack, damage_dealt);
        let commands = dispatch_bonus_effect(
            &effect,
            target,
            &context,
            &self.state,
            &mut self.rng,
            &self.config,
        );
        self.execute_commands(commands, bus)
    }

    fn execute_end_of_round(&mut self, bus: &mut EventBus) -> BattleResult<()> {
        for side in PlayerTarget::both() {
            self.apply_status_damage(side, bus)?;

            let pokemon = self.state.active_mut(side)?;
            if pokemon.is_fainted() {
                continue;
            }
            if let StatusCondition::Asleep { turns_remaining } = pokemon.status() {
                if turns_remaining > 0 {
                    pokemon.set_status(StatusCondition::Asleep {
                        turns_remaining: turns_remaining - 1,
                    });
                }
            }
            pokemon.volatile_status.remove_kind(VolatileKind::Protected);
            pokemon.volatile_status.remove_kind(VolatileKind::Flinch);
            pokemon.volatile_status.turn();
        }

        self.tick_field(bus)?;
        self.check_win_conditions(bus);

        bus.push(BattleEvent::RoundEnded {
            round: self.state.round,
        });
        self.state.round += 1;
        Ok(())
    }

    fn apply_status_damage(&mut self, side: PlayerTarget, bus: &mut EventBus) -> BattleResult<()> {
        let pokemon = self.state.active_mut(side)?;
        if pokemon.is_fainted() {
            return Ok(());
        }
        let max_hp = u32::from(pokemon.max_hp());
        let status = pokemon.status();
        let damage = match status {
            StatusCondition::Poisoned => max_hp.div_ceil(16),
            StatusCondition::BadlyPoisoned { counter } => (max_hp * u32::from(counter)).div_ceil(16),
            _ => return Ok(()),
        };
        let damage = damage.min(u32::from(u16::MAX)) as u16;

        let did_faint = pokemon.take_damage(damage);
        let name = pokemon.display_name().to_string();
        bus.push(BattleEvent::StatusDamage {
            target: name.clone(),
            status,
            damage,
            remaining_hp: pokemon.current_hp(),
        });
        if did_faint {
            bus.push(BattleEvent::PokemonFainted {
                player_index: side.to_index(),
                pokemon: name,
            });
        } else if let StatusCondition::BadlyPoisoned { counter } = status {
            pokemon.set_status(StatusCondition::BadlyPoisoned {
                counter: (counter + 1).min(MAX_TOXIC_COUNTER),
            });
        }
        Ok(())
    }

    /// Weather and terrain age once per full round.
    fn tick_field(&mut self, bus: &mut EventBus) -> BattleResult<()> {
        let mut commands = Vec::new();
        if self.state.weather != Weather::None {
            self.state.weather_turns_remaining = self.state.weather_turns_remaining.saturating_sub(1);
            if self.state.weather_turns_remaining == 0 {
                commands.push(BattleCommand::SetWeather {
                    weather: Weather::None,
                    turns: 0,
                });
            }
        }
        if self.state.terrain != Terrain::None {
            self.state.terrain_turns_remaining = self.state.terrain_turns_remaining.saturating_sub(1);
            if self.state.terrain_turns_remaining == 0 {
                commands.push(BattleCommand::SetTerrain {
                    terrain: Terrain::None,
                    turns: 0,
                });
            }
        }
        self.execute_commands(commands, bus)
    }

    /// Declares a winner if a side is out of usable Pokemon, otherwise asks
    /// sides with a fainted active Pokemon for a replacement. Player one is
    /// checked first, so a double wipe goes to player two.
    fn check_win_conditions(&mut self, bus: &mut EventBus) {
        let loser = PlayerTarget::both()
            .into_iter()
            .find(|side| self.state.player(*side).all_fainted());

        let Some(loser) = loser else {
            self.update_replacement_state(bus);
            return;
        };
        let winner = loser.opponent();
        self.state.game_state = match winner {
            PlayerTarget::Player1 => GameState::Player1Win,
            PlayerTarget::Player2 => GameState::Player2Win,
        };
        info!(
            "{} wins the battle in round {}",
            self.state.player(winner).player_name,
            self.state.round
        );
        bus.push(BattleEvent::PlayerDefeated {
            player_index: loser.to_index(),
        });
        bus.push(BattleEvent::BattleEnded {
            winner: winner.to_index(),
        });
    }

    fn update_replacement_state(&mut self, bus: &mut EventBus) {
        let needs_replacement = |side: PlayerTarget| {
            let player = self.state.player(side);
            player.active_pokemon().is_some_and(|p| p.is_fainted()) && player.has_non_fainted_reserve()
        };
        let player1 = needs_replacement(PlayerTarget::Player1);
        let player2 = needs_replacement(PlayerTarget::Player2);
        let next_state = GameState::from_pending_replacements(player1, player2);

        if next_state != self.state.game_state {
            debug!("Game state {:?} -> {:?}", self.state.game_state, next_state);
        }
        for (side, pending) in [(PlayerTarget::Player1, player1), (PlayerTarget::Player2, player2)] {
            if pending && !self.state.game_state.awaits_replacement_from(side) {
                bus.push(BattleEvent::ReplacementNeeded {
                    player_index: side.to_index(),
                });
            }
        }
        self.state.game_state = next_state;
    }
}
