use canvas_blaster::entities::*;
use canvas_blaster::GameConfig;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn entity_clone_and_eq() {
    assert_eq!(FoeKind::Grunt, FoeKind::Grunt);
    assert_ne!(FoeKind::Grunt, FoeKind::Boss);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);

    let bullet = Bullet { x: 1.0, y: 2.0 };
    assert_eq!(bullet.clone(), bullet);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState::new(GameConfig::default(), &mut StdRng::seed_from_u64(1));
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.enemies.clear();

    assert_eq!(original.player.x, 385.0);
    assert_eq!(original.score, 0);
    assert_eq!(original.enemies.len(), 1);
}

#[test]
fn snapshot_mirrors_state() {
    let mut state = GameState::new(GameConfig::default(), &mut StdRng::seed_from_u64(1));
    state.score = 30;
    state.player.health = 2;
    state.bullets.push(Bullet { x: 10.0, y: 20.0 });

    let snap = state.snapshot();
    assert_eq!(snap.score, 30);
    assert_eq!(snap.health, 2);
    assert_eq!(snap.difficulty, 1);
    assert_eq!(snap.bullets.len(), 1);
    assert_eq!(snap.enemies.len(), 1);
    assert!(snap.bosses.is_empty());
    assert_eq!(snap.canvas_width, 800.0);
    assert_eq!(snap.bullet_height, 10.0);
    assert!(!snap.game_over);
}

#[test]
fn default_frame_input_is_idle() {
    let input = FrameInput::default();
    assert!(!input.left && !input.right && !input.up && !input.down && !input.fire);
}
