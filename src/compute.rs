//! Game-logic functions.
//!
//! `GameState::advance_frame` runs one simulation step in place.  All
//! randomness comes through an injected RNG so callers control determinism
//! (tests use a seeded `StdRng`).
use rand::Rng;

use crate::config::{DifficultyPolicy, GameConfig};
use crate::entities::{
    Bullet, Foe, FoeKind, FrameInput, GameState, GameStatus, Player, Snapshot,
};

// ── Collision geometry ───────────────────────────────────────────────────────

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

fn player_box(p: &Player) -> Aabb {
    Aabb::new(p.x, p.y, p.width, p.height)
}

fn foe_box(f: &Foe) -> Aabb {
    Aabb::new(f.x, f.y, f.width, f.height)
}

fn random_x(rng: &mut impl Rng, canvas_width: f32, width: f32) -> f32 {
    rng.gen::<f32>() * (canvas_width - width)
}

// ── Constructors ─────────────────────────────────────────────────────────────

impl GameState {
    /// Build the opening state: player near the bottom centre and one enemy
    /// already on its way down.
    pub fn new(config: GameConfig, rng: &mut impl Rng) -> Self {
        let player = Player {
            x: config.canvas_width / 2.0 - config.player_width / 2.0,
            y: config.canvas_height - 2.0 * config.player_height,
            width: config.player_width,
            height: config.player_height,
            speed: config.player_speed,
            health: config.player_health,
        };
        let mut state = GameState {
            player,
            bullets: Vec::new(),
            enemies: Vec::new(),
            bosses: Vec::new(),
            score: 0,
            enemies_defeated: 0,
            difficulty: 1,
            enemy_speed: config.enemy_base_speed,
            spawn_interval_ms: config.spawn_interval_ms,
            difficulty_points: config.difficulty_points,
            boss_active: false,
            last_spawn_ms: None,
            last_difficulty_score: None,
            status: GameStatus::Playing,
            frame: 0,
            config,
        };
        spawn_enemy(&mut state, rng);
        state
    }

    // ── Per-frame step ───────────────────────────────────────────────────────

    /// Advance the simulation by exactly one frame.
    ///
    /// Once the game is over this is a no-op that keeps returning the final
    /// snapshot; restarting is up to the host.
    pub fn advance_frame(
        &mut self,
        input: &FrameInput,
        now_ms: u64,
        rng: &mut impl Rng,
    ) -> Snapshot<'_> {
        if self.status == GameStatus::GameOver {
            return self.snapshot();
        }
        self.frame += 1;

        if input.fire {
            self.fire();
        }
        move_player(self, input);
        advance_bullets(self);
        advance_enemies(self, rng);
        check_difficulty(self);
        update_bosses(self, rng);
        spawn_on_timer(self, now_ms, rng);
        resolve_bullet_hits(self);
        resolve_player_contacts(self);

        self.snapshot()
    }

    /// Launch one bullet from the player's horizontal centre.
    pub fn fire(&mut self) {
        let p = &self.player;
        self.bullets.push(Bullet {
            x: p.x + p.width / 2.0 - self.config.bullet_width / 2.0,
            y: p.y,
        });
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            player: &self.player,
            bullets: &self.bullets,
            enemies: &self.enemies,
            bosses: &self.bosses,
            score: self.score,
            health: self.player.health,
            difficulty: self.difficulty,
            canvas_width: self.config.canvas_width,
            canvas_height: self.config.canvas_height,
            bullet_width: self.config.bullet_width,
            bullet_height: self.config.bullet_height,
            game_over: self.is_over(),
        }
    }
}

// ── 1. Player ────────────────────────────────────────────────────────────────

/// Each held direction moves at full speed; diagonals are not normalised.
fn move_player(state: &mut GameState, input: &FrameInput) {
    let GameState { player, config, .. } = state;

    if input.left {
        player.x -= player.speed;
    }
    if input.right {
        player.x += player.speed;
    }
    if input.up {
        player.y -= player.speed;
    }
    if input.down {
        player.y += player.speed;
    }
    player.x = player.x.clamp(0.0, config.canvas_width - player.width);
    player.y = player.y.clamp(0.0, config.canvas_height - player.height);
}

// ── 2. Bullets ───────────────────────────────────────────────────────────────

fn advance_bullets(state: &mut GameState) {
    let speed = state.config.bullet_speed;
    for bullet in &mut state.bullets {
        bullet.y -= speed;
    }
    state.bullets.retain(|b| b.y >= 0.0);
}

// ── 3. Foes ──────────────────────────────────────────────────────────────────

/// Move a foe down by its speed and wrap it to the top once it has left the
/// bottom edge.  Foes are never removed for going off-screen.
pub fn advance_foe(foe: &mut Foe, config: &GameConfig, rng: &mut impl Rng) {
    foe.y += foe.speed;
    if foe.y <= config.canvas_height {
        return;
    }
    match foe.kind {
        FoeKind::Grunt => {
            foe.y = config.enemy_wrap_y;
            foe.x = random_x(rng, config.canvas_width, foe.width);
            log::debug!("Enemy wrapped to x={:.1}", foe.x);
        }
        FoeKind::Boss => {
            foe.y = config.boss_spawn_y;
        }
    }
}

fn advance_enemies(state: &mut GameState, rng: &mut impl Rng) {
    for enemy in &mut state.enemies {
        advance_foe(enemy, &state.config, rng);
    }
}

// ── 4. Difficulty ────────────────────────────────────────────────────────────

/// Raise the difficulty whenever the score sits on a non-zero multiple of the
/// current threshold.  Evaluated every frame; see `DifficultyPolicy`.
fn check_difficulty(state: &mut GameState) {
    if state.score == 0 || state.score % state.difficulty_points != 0 {
        return;
    }
    if state.config.difficulty_policy == DifficultyPolicy::OncePerScore
        && state.last_difficulty_score == Some(state.score)
    {
        return;
    }

    let c = &state.config;
    state.difficulty += 1;
    state.spawn_interval_ms = state
        .spawn_interval_ms
        .saturating_sub(c.spawn_interval_step_ms)
        .max(c.min_spawn_interval_ms);
    state.enemy_speed += c.enemy_speed_step;
    state.difficulty_points += c.difficulty_points_step;
    state.last_difficulty_score = Some(state.score);

    log::info!(
        "Difficulty {} at score {} (spawn every {} ms, next at {})",
        state.difficulty,
        state.score,
        state.spawn_interval_ms,
        state.difficulty_points
    );
}

// ── 5. Bosses ────────────────────────────────────────────────────────────────

fn update_bosses(state: &mut GameState, rng: &mut impl Rng) {
    let c = &state.config;

    if state.enemies_defeated != 0
        && state.enemies_defeated % c.boss_kill_interval == 0
        && !state.boss_active
    {
        let health = c.boss_base_health + c.boss_health_per_difficulty * state.difficulty as i32;
        state.bosses.push(Foe {
            x: c.canvas_width / 2.0 - c.boss_size / 2.0,
            y: c.boss_spawn_y,
            width: c.boss_size,
            height: c.boss_size,
            speed: c.boss_speed,
            health,
            kind: FoeKind::Boss,
        });
        state.boss_active = true;
        log::info!(
            "Boss spawned after {} kills with {} health",
            state.enemies_defeated,
            health
        );
    }

    for boss in &mut state.bosses {
        advance_foe(boss, &state.config, rng);
    }

    // Lethal hits land during collision resolution; the boss is only
    // cleared here, on its next update.
    let before = state.bosses.len();
    state.bosses.retain(|b| b.health > 0);
    for _ in state.bosses.len()..before {
        state.boss_active = false;
        state.score += c.boss_points;
        state.enemy_speed += c.enemy_speed_step;
        state.spawn_interval_ms = state
            .spawn_interval_ms
            .saturating_sub(c.boss_interval_step_ms);
        log::info!("Boss defeated, score {}", state.score);
    }
}

// ── 6. Spawning ──────────────────────────────────────────────────────────────

pub fn spawn_enemy(state: &mut GameState, rng: &mut impl Rng) {
    let c = &state.config;
    let x = random_x(rng, c.canvas_width, c.enemy_size);
    let speed = state.enemy_speed + rng.gen::<f32>() * state.difficulty as f32;
    state.enemies.push(Foe {
        x,
        y: c.enemy_spawn_y,
        width: c.enemy_size,
        height: c.enemy_size,
        speed,
        health: 1,
        kind: FoeKind::Grunt,
    });
    log::debug!("Enemy spawned at x={:.1} speed={:.2}", x, speed);
}

fn spawn_on_timer(state: &mut GameState, now_ms: u64, rng: &mut impl Rng) {
    let due = match state.last_spawn_ms {
        Some(last) => now_ms.saturating_sub(last) > state.spawn_interval_ms,
        None => true,
    };
    if due {
        spawn_enemy(state, rng);
        state.last_spawn_ms = Some(now_ms);
    }
}

// ── 7/8. Collision: bullets ↔ enemies, bullets ↔ bosses ──────────────────────

/// Every bullet is tested against every foe with no early exit, so one bullet
/// may take out several overlapping enemies and chip a boss in the same frame.
fn resolve_bullet_hits(state: &mut GameState) {
    let c = &state.config;
    let mut spent = vec![false; state.bullets.len()];
    let mut destroyed = vec![false; state.enemies.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let shot = Aabb::new(bullet.x, bullet.y, c.bullet_width, c.bullet_height);

        for (ei, enemy) in state.enemies.iter().enumerate() {
            if !destroyed[ei] && shot.overlaps(&foe_box(enemy)) {
                destroyed[ei] = true;
                spent[bi] = true;
                state.score += c.points_per_enemy;
                state.enemies_defeated += 1;
            }
        }

        for boss in state.bosses.iter_mut() {
            if shot.overlaps(&foe_box(boss)) {
                boss.health -= 1;
                spent[bi] = true;
            }
        }
    }

    state.enemies = std::mem::take(&mut state.enemies)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !destroyed[*i])
        .map(|(_, e)| e)
        .collect();

    state.bullets = std::mem::take(&mut state.bullets)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !spent[*i])
        .map(|(_, b)| b)
        .collect();
}

// ── 9. Collision: enemies ↔ player ───────────────────────────────────────────

/// A ramming enemy costs one health and is sent back to the top, not removed.
fn resolve_player_contacts(state: &mut GameState) {
    let hitbox = player_box(&state.player);

    for enemy in &mut state.enemies {
        if !hitbox.overlaps(&foe_box(enemy)) {
            continue;
        }
        state.player.health = state.player.health.saturating_sub(1);
        enemy.y = state.config.enemy_wrap_y;
        log::debug!("Player hit, health {}", state.player.health);

        if state.player.health == 0 && state.status == GameStatus::Playing {
            state.status = GameStatus::GameOver;
            log::info!("Game over with score {}", state.score);
        }
    }
}
