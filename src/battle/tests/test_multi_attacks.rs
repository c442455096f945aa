#[cfg(test)]
mod tests {
    use crate::battle::commands::PlayerTarget;
    use crate::battle::conditions::VolatileKind;
    use crate::battle::rng::BattleRng;
    use crate::battle::state::{ActionFailureReason, BattleEvent, GameState};
    use crate::battle::tests::common::{
        assert_ok, count_events, create_test_battle, damage_taken, move_users, play_first_moves,
        play_round, use_move, TestPokemonBuilder,
    };
    use crate::battle::turn::{Action, AttackOrigin, Turn};
    use crate::pokemon::PokemonInst;
    use pretty_assertions::assert_eq;
    use schema::Weather;

    fn bulbasaur_with(moves: &[&str]) -> PokemonInst {
        TestPokemonBuilder::new("Bulbasaur", 50)
            .with_moves(moves)
            .build()
    }

    fn idle_pikachu() -> PokemonInst {
        TestPokemonBuilder::new("Pikachu", 50)
            .with_moves(&["Swords Dance"])
            .build()
    }

    #[test]
    fn test_multi_hit_resolves_as_one_action() {
        // Each Bullet Seed hit on an untrained Pikachu deals 22 at a full roll.
        let mut engine = create_test_battle(
            bulbasaur_with(&["Bullet Seed"]),
            idle_pikachu(),
            BattleRng::scripted(vec![3, 100, 100, 100]),
        );
        assert_ok(engine.set_weather(Weather::Rain));

        let bus = play_first_moves(&mut engine);

        assert!(bus.events().contains(&BattleEvent::MultiHitRolled {
            move_name: "Bullet Seed".to_string(),
            hits: 3,
        }));
        let hits_on_pikachu = count_events(&bus, |e| {
            matches!(e, BattleEvent::DamageDealt { target, .. } if target == "Pikachu")
        });
        assert_eq!(hits_on_pikachu, 3);
        assert_eq!(damage_taken(&bus, "Pikachu"), 66);
        assert_eq!(move_users(&bus), vec!["Pikachu", "Bulbasaur"]);

        let bulbasaur = assert_ok(engine.state().active(PlayerTarget::Player1));
        assert_eq!(bulbasaur.moves[0].pp, 29);
        assert_eq!(engine.turn_history().len(), 2);
        // The injected hits are not rounds of their own.
        assert_eq!(engine.state().weather_turns_remaining, 4);
        assert_eq!(engine.state().round, 2);
    }

    #[test]
    fn test_multi_hit_stops_when_the_target_faints() {
        let mut pikachu = idle_pikachu();
        pikachu.set_hp(1);
        let mut engine = create_test_battle(
            bulbasaur_with(&["Bullet Seed"]),
            pikachu,
            BattleRng::scripted(vec![5, 100]),
        );

        let bus = play_first_moves(&mut engine);

        assert_eq!(
            count_events(&bus, |e| matches!(e, BattleEvent::DamageDealt { .. })),
            1
        );
        assert_eq!(
            count_events(&bus, |e| matches!(e, BattleEvent::ActionFailed { .. })),
            0
        );
        assert_eq!(engine.game_state(), GameState::Player1Win);
    }

    #[test]
    fn test_charge_move_waits_a_round_without_sun() {
        let mut engine = create_test_battle(
            bulbasaur_with(&["Solar Beam", "Tackle"]),
            idle_pikachu(),
            BattleRng::scripted(vec![100]),
        );

        let bus = play_first_moves(&mut engine);

        assert!(bus.events().contains(&BattleEvent::ChargingMove {
            pokemon: "Bulbasaur".to_string(),
            move_name: "Solar Beam".to_string(),
        }));
        assert_eq!(damage_taken(&bus, "Pikachu"), 0);
        let bulbasaur = assert_ok(engine.state().active(PlayerTarget::Player1));
        assert!(bulbasaur
            .volatile_status
            .contains_kind(VolatileKind::PreparingTo));
        assert_eq!(bulbasaur.moves[0].pp, 9);

        let forced = engine.valid_turns(PlayerTarget::Player1);
        assert_eq!(forced.len(), 1);
        assert!(matches!(
            &forced[0].action,
            Action::Attack { attack, origin: AttackOrigin::ChargeRelease } if attack.name == "Solar Beam"
        ));

        // Whatever the player picks, the charged move is released.
        let tackle = use_move(&engine, PlayerTarget::Player1, 1);
        let idle = use_move(&engine, PlayerTarget::Player2, 0);
        let bus = play_round(&mut engine, tackle, idle);

        assert!(bus.events().contains(&BattleEvent::MoveUsed {
            player_index: 0,
            pokemon: "Bulbasaur".to_string(),
            move_name: "Solar Beam".to_string(),
        }));
        assert!(damage_taken(&bus, "Pikachu") > 0);
        let bulbasaur = assert_ok(engine.state().active(PlayerTarget::Player1));
        assert!(!bulbasaur
            .volatile_status
            .contains_kind(VolatileKind::PreparingTo));
        assert_eq!(bulbasaur.moves[0].pp, 9);
        assert_eq!(bulbasaur.moves[1].pp, 35);
    }

    #[test]
    fn test_charge_move_fires_at_once_in_sun() {
        let mut engine = create_test_battle(
            bulbasaur_with(&["Solar Beam"]),
            idle_pikachu(),
            BattleRng::scripted(vec![100]),
        );
        assert_ok(engine.set_weather(Weather::HarshSunlight));

        let bus = play_first_moves(&mut engine);

        assert_eq!(
            count_events(&bus, |e| matches!(e, BattleEvent::ChargingMove { .. })),
            0
        );
        assert!(damage_taken(&bus, "Pikachu") > 0);
        let bulbasaur = assert_ok(engine.state().active(PlayerTarget::Player1));
        assert!(bulbasaur.volatile_status.is_empty());
    }

    #[test]
    fn test_hyper_beam_costs_the_next_round() {
        let mut engine = create_test_battle(
            TestPokemonBuilder::new("Pikachu", 50)
                .with_moves(&["Hyper Beam", "Tackle"])
                .build(),
            TestPokemonBuilder::new("Geodude", 50)
                .with_moves(&["Swords Dance"])
                .build(),
            BattleRng::scripted(vec![1, 100, 100]),
        );

        let bus = play_first_moves(&mut engine);
        assert_eq!(damage_taken(&bus, "Geodude"), 52);
        assert_eq!(
            engine.valid_turns(PlayerTarget::Player1),
            vec![Turn::recharge(PlayerTarget::Player1)]
        );

        let tackle = use_move(&engine, PlayerTarget::Player1, 1);
        let idle = use_move(&engine, PlayerTarget::Player2, 0);
        let bus = play_round(&mut engine, tackle, idle);

        assert!(bus.events().contains(&BattleEvent::ActionFailed {
            pokemon: "Pikachu".to_string(),
            reason: ActionFailureReason::MustRecharge,
        }));
        assert_eq!(move_users(&bus), vec!["Geodude"]);
        let pikachu = assert_ok(engine.state().active(PlayerTarget::Player1));
        assert!(!pikachu.volatile_status.contains_kind(VolatileKind::MustRecharge));
        assert_eq!(pikachu.moves[0].pp, 4);
        assert_eq!(pikachu.moves[1].pp, 35);

        let tackle = use_move(&engine, PlayerTarget::Player1, 1);
        let idle = use_move(&engine, PlayerTarget::Player2, 0);
        let bus = play_round(&mut engine, tackle, idle);
        assert_eq!(move_users(&bus), vec!["Pikachu", "Geodude"]);
    }
}
