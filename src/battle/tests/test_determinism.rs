#[cfg(test)]
mod tests {
    use crate::battle::commands::PlayerTarget;
    use crate::battle::engine::BattleEngine;
    use crate::battle::rng::BattleRng;
    use crate::battle::state::BattleEvent;
    use crate::battle::tests::common::{
        create_team_battle, create_test_battle, find_seed, play_first_moves,
        TestPokemonBuilder,
    };
    use crate::pokemon::StatusCondition;
    use pretty_assertions::assert_eq;

    fn seeded_battle(seed: &str) -> BattleEngine {
        create_team_battle(
            vec![
                TestPokemonBuilder::new("Squirtle", 50)
                    .with_moves(&["Tackle", "Water Gun"])
                    .build(),
                TestPokemonBuilder::new("Pikachu", 50)
                    .with_moves(&["Thunderbolt"])
                    .build(),
            ],
            vec![
                TestPokemonBuilder::new("Bulbasaur", 50)
                    .with_moves(&["Sludge Bomb", "Tackle"])
                    .build(),
                TestPokemonBuilder::new("Pidgey", 50)
                    .with_moves(&["Tackle"])
                    .build(),
            ],
            BattleRng::from_seed_str(seed),
        )
    }

    /// Plays first moves (or a forced replacement) until the battle ends or
    /// `rounds` resolutions have happened, returning each round's log as JSON.
    fn play_out(engine: &mut BattleEngine, rounds: usize) -> Vec<String> {
        let mut logs = Vec::new();
        for _ in 0..rounds {
            if engine.game_state().is_completed() {
                break;
            }
            let bus = if engine.game_state().is_awaiting_replacement() {
                let side = if engine.game_state().awaits_replacement_from(PlayerTarget::Player1) {
                    PlayerTarget::Player1
                } else {
                    PlayerTarget::Player2
                };
                let replacement = engine.valid_turns(side).remove(0);
                engine
                    .submit_turn(replacement)
                    .expect("replacement should be accepted")
            } else {
                play_first_moves(engine)
            };
            logs.push(bus.to_json().expect("events should serialize"));
        }
        logs
    }

    #[test]
    fn test_same_seed_same_battle() {
        let mut first = seeded_battle("replay");
        let mut second = seeded_battle("replay");

        assert_eq!(play_out(&mut first, 12), play_out(&mut second, 12));
        assert_eq!(first.state(), second.state());
        assert_eq!(first.rng().draws(), second.rng().draws());
    }

    #[test]
    fn test_fork_replays_the_same_future() {
        let mut original = seeded_battle("look-ahead");
        play_out(&mut original, 1);
        let draws_before = original.rng().draws();

        let mut fork = original.fork();
        let fork_logs = play_out(&mut fork, 6);
        assert_eq!(original.rng().draws(), draws_before);

        let original_logs = play_out(&mut original, 6);
        assert_eq!(fork_logs, original_logs);
        assert_eq!(fork.state(), original.state());
    }

    #[test]
    fn test_log_reads_as_a_battle() {
        let mut engine = seeded_battle("narration");
        let bus = play_first_moves(&mut engine);

        let lines = bus.formatted_lines(engine.state());

        assert_eq!(lines.first().map(String::as_str), Some("=== Turn 1 ==="));
        assert!(lines.contains(&"Red's Squirtle used Tackle!".to_string()));
        assert!(lines.contains(&"Blue's Bulbasaur used Sludge Bomb!".to_string()));
    }

    fn thunderbolt_paralyses(seed: u64) -> bool {
        let mut engine = create_test_battle(
            TestPokemonBuilder::new("Pikachu", 50)
                .with_moves(&["Thunderbolt"])
                .build(),
            TestPokemonBuilder::new("Squirtle", 50)
                .with_moves(&["Growl"])
                .build(),
            BattleRng::from_seed_u64(seed),
        );
        let bus = play_first_moves(&mut engine);
        bus.events().iter().any(|e| {
            matches!(
                e,
                BattleEvent::StatusApplied {
                    status: StatusCondition::Paralysed,
                    ..
                }
            )
        })
    }

    #[test]
    fn test_secondary_effects_follow_the_seed() {
        let lucky = find_seed(200, thunderbolt_paralyses).expect("some seed paralyses");
        let unlucky =
            find_seed(200, |seed| !thunderbolt_paralyses(seed)).expect("some seed does not");

        assert!(thunderbolt_paralyses(lucky));
        assert!(!thunderbolt_paralyses(unlucky));
    }
}
