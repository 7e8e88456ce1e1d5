//! All game entity types — pure data, no logic.
use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Tag shared by everything that falls toward the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoeKind {
    /// Regular enemy: wraps to the top at a new x when it leaves the canvas.
    Grunt,
    /// Boss: wraps to the top at the same x, removed only when out of health.
    Boss,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
}

// ── Player & foes ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Foe {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Downward movement per frame.
    pub speed: f32,
    /// Hits left. Grunts die on the first hit regardless; bosses may
    /// briefly sit at or below zero until their next update.
    pub health: i32,
    pub kind: FoeKind,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Per-frame input: held directions plus a one-shot fire edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire was pressed since the previous frame.
    pub fire: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state, advanced in place once per frame.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Foe>,
    pub bosses: Vec<Foe>,
    pub score: u32,
    pub enemies_defeated: u32,
    pub difficulty: u32,
    /// Global speed term added to every newly spawned enemy.
    pub enemy_speed: f32,
    pub spawn_interval_ms: u64,
    /// Next score multiple that raises the difficulty.
    pub difficulty_points: u32,
    pub boss_active: bool,
    /// Time of the last timed spawn; `None` makes the first frame spawn.
    pub last_spawn_ms: Option<u64>,
    /// Score at which difficulty last increased (`OncePerScore` policy only).
    pub last_difficulty_score: Option<u32>,
    pub status: GameStatus,
    pub frame: u64,
}

// ── Render boundary ───────────────────────────────────────────────────────────

/// Read-only view handed to a renderer after each frame.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub player: &'a Player,
    pub bullets: &'a [Bullet],
    pub enemies: &'a [Foe],
    pub bosses: &'a [Foe],
    pub score: u32,
    pub health: u32,
    pub difficulty: u32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub game_over: bool,
}
