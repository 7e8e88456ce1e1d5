use canvas_blaster::entities::FrameInput;
use canvas_blaster::{GameConfig, GameState, InputState};

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn directions() -> impl Strategy<Value = Vec<(bool, bool, bool, bool)>> {
    prop::collection::vec(
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
        1..300,
    )
}

proptest! {
    #[test]
    fn player_never_leaves_the_canvas(moves in directions(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = GameState::new(GameConfig::default(), &mut rng);

        for (i, (left, right, up, down)) in moves.into_iter().enumerate() {
            let input = FrameInput { left, right, up, down, fire: false };
            state.advance_frame(&input, i as u64 * 16, &mut rng);

            prop_assert!(state.player.x >= 0.0 && state.player.x <= 770.0);
            prop_assert!(state.player.y >= 0.0 && state.player.y <= 570.0);
        }
    }

    #[test]
    fn enemies_are_only_removed_by_bullets(moves in directions(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = GameState::new(GameConfig::default(), &mut rng);

        for (i, (left, right, up, down)) in moves.into_iter().enumerate() {
            let before = state.enemies.len();
            let input = FrameInput { left, right, up, down, fire: false };
            state.advance_frame(&input, i as u64 * 16, &mut rng);

            prop_assert!(state.enemies.len() >= before);
            for enemy in &state.enemies {
                prop_assert!(enemy.x >= 0.0 && enemy.x <= 770.0);
            }
        }
    }

    #[test]
    fn held_fire_yields_one_shot_per_press(presses in 1usize..10, hold in 1usize..20) {
        let mut input = InputState::new();
        let mut shots = 0;

        for _ in 0..presses {
            input.key_down(" ");
            for _ in 0..hold {
                input.key_down(" ");
                if input.frame_input().fire {
                    shots += 1;
                }
            }
            input.key_up(" ");
        }

        prop_assert_eq!(shots, presses);
    }
}
