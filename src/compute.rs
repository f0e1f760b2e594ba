/// Game rules.
///
/// The public entry points take an immutable reference to the current
/// `GameState` (and, where needed, the key state and an RNG handle) and
/// return a brand-new `GameState`.  The per-collection helpers below work in
/// place on the copy being built.  Side effects are limited to the injected RNG.

use rand::Rng;
use tracing::{debug, trace};

use crate::entities::{
    GameState, GameStatus, Outcome, Projectile, Rect, Ship, ATTACK_PROBABILITY, CHASE_SPEED,
    ENEMY_SHOT_DAMAGE, ENEMY_SHOT_VELOCITY, ENEMY_SPAWN_INSET, PLAYER_SHOT_DAMAGE,
    PLAYER_SHOT_VELOCITY, PLAYER_SPAWN_X,
};
use crate::input::{Key, KeyState};

/// Switches that deviate from the classic rules.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleOptions {
    /// Drop projectiles that have left the surface entirely.  Off by default:
    /// classic play keeps every shot alive forever.
    pub cull_offscreen: bool,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for the given surface dimensions.
pub fn init_state(width: i32, height: i32) -> GameState {
    GameState {
        player: Ship::player(PLAYER_SPAWN_X, height / 2),
        enemy: Ship::enemy(width - ENEMY_SPAWN_INSET, height / 2),
        player_projectiles: Vec::new(),
        enemy_projectiles: Vec::new(),
        status: GameStatus::Running,
        outcome: None,
        frame: 0,
        width,
        height,
    }
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// Translate a key-bound ship by its speed for every held direction key.
/// No clamping: the player may leave the surface.
pub fn move_player(ship: &mut Ship, keys: &KeyState) {
    let Some(controls) = ship.controls.clone() else {
        return;
    };
    if keys.is_down(Key::Char(controls.up)) {
        ship.y -= ship.speed;
    }
    if keys.is_down(Key::Char(controls.down)) {
        ship.y += ship.speed;
    }
    if keys.is_down(Key::Char(controls.left)) {
        ship.x -= ship.speed;
    }
    if keys.is_down(Key::Char(controls.right)) {
        ship.x += ship.speed;
    }
}

/// Keep a ship fully inside a `width` × `height` surface.
pub fn clamp_to_surface(ship: &mut Ship, width: i32, height: i32) {
    ship.x = ship.x.min(width - ship.width).max(0);
    ship.y = ship.y.min(height - ship.height).max(0);
}

fn step_toward(from: i32, to: i32) -> i32 {
    if from < to {
        from + CHASE_SPEED
    } else if from > to {
        from - CHASE_SPEED
    } else {
        from
    }
}

/// One frame of enemy behaviour: chase the player along a randomly chosen
/// axis, clamp to the surface, and maybe fire.  Returns `true` if a shot was
/// spawned into `state.enemy_projectiles`.
pub fn enemy_ai(state: &mut GameState, rng: &mut impl Rng) -> bool {
    let attack_roll: f64 = rng.gen();

    if rng.gen::<f64>() < 0.5 {
        state.enemy.x = step_toward(state.enemy.x, state.player.x);
    } else {
        state.enemy.y = step_toward(state.enemy.y, state.player.y);
    }

    clamp_to_surface(&mut state.enemy, state.width, state.height);

    if attack_roll < ATTACK_PROBABILITY {
        let shot = spawn_enemy_projectile(&state.enemy);
        trace!(x = shot.x, y = shot.y, "enemy fired");
        state.enemy_projectiles.push(shot);
        true
    } else {
        false
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// A player shot leaves from the right-centre edge of the ship.
pub fn spawn_player_projectile(ship: &Ship) -> Projectile {
    Projectile::new(
        ship.x + ship.width,
        ship.y + ship.height / 2,
        PLAYER_SHOT_VELOCITY,
        PLAYER_SHOT_DAMAGE,
    )
}

/// An enemy shot leaves from the left-centre edge of the ship.
pub fn spawn_enemy_projectile(ship: &Ship) -> Projectile {
    Projectile::new(
        ship.x,
        ship.y + ship.height / 2,
        ENEMY_SHOT_VELOCITY,
        ENEMY_SHOT_DAMAGE,
    )
}

/// Fire a shot from the player.  No cap on shots in flight.
pub fn player_shoot(state: &GameState) -> GameState {
    let mut player_projectiles = state.player_projectiles.clone();
    player_projectiles.push(spawn_player_projectile(&state.player));
    GameState {
        player_projectiles,
        ..state.clone()
    }
}

pub fn advance_projectiles(projectiles: &mut [Projectile]) {
    for p in projectiles.iter_mut() {
        p.update();
    }
}

/// Remove projectiles lying entirely outside the surface.
pub fn cull_offscreen(projectiles: &mut Vec<Projectile>, width: i32, height: i32) {
    let surface = Rect::new(0, 0, width, height);
    projectiles.retain(|p| overlaps(&p.rect(), &surface));
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Strict AABB overlap: rectangles that merely share an edge do not touch.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Apply every projectile that overlaps `target` and remove it from the
/// sequence.  Returns the number of hits.
pub fn resolve_hits(projectiles: &mut Vec<Projectile>, target: &mut Ship) -> u32 {
    let target_rect = target.rect();
    let mut hits = 0;
    let mut i = 0;
    while i < projectiles.len() {
        if overlaps(&projectiles[i].rect(), &target_rect) {
            let shot = projectiles.remove(i);
            target.health -= shot.damage();
            hits += 1;
            // `i` now indexes the element that followed the removed one.
        } else {
            i += 1;
        }
    }
    hits
}

// ── End condition ────────────────────────────────────────────────────────────

/// Player loss is checked first, so a double knockout counts as a loss.
/// Health only ever falls, so it never exceeds `max_health`.
pub fn check_outcome(state: &GameState) -> Option<Outcome> {
    debug_assert!(state.player.health <= state.player.max_health);
    debug_assert!(state.enemy.health <= state.enemy.max_health);
    if state.player.is_destroyed() {
        Some(Outcome::PlayerLost)
    } else if state.enemy.is_destroyed() {
        Some(Outcome::PlayerWon)
    } else {
        None
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
/// A state that is already `Over` is returned unchanged.
pub fn tick(
    state: &GameState,
    keys: &KeyState,
    rng: &mut impl Rng,
    options: &RuleOptions,
) -> GameState {
    if state.status == GameStatus::Over {
        return state.clone();
    }

    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Ships ─────────────────────────────────────────────────────────────
    move_player(&mut next.player, keys);
    enemy_ai(&mut next, rng);

    // ── 2. Player shots → enemy ──────────────────────────────────────────────
    advance_projectiles(&mut next.player_projectiles);
    let hits = resolve_hits(&mut next.player_projectiles, &mut next.enemy);
    if hits > 0 {
        debug!(hits, enemy_health = next.enemy.health, "enemy hit");
    }

    // ── 3. Enemy shots → player ──────────────────────────────────────────────
    advance_projectiles(&mut next.enemy_projectiles);
    let hits = resolve_hits(&mut next.enemy_projectiles, &mut next.player);
    if hits > 0 {
        debug!(hits, player_health = next.player.health, "player hit");
    }

    if options.cull_offscreen {
        cull_offscreen(&mut next.player_projectiles, next.width, next.height);
        cull_offscreen(&mut next.enemy_projectiles, next.width, next.height);
    }

    // ── 4. End check ─────────────────────────────────────────────────────────
    if let Some(outcome) = check_outcome(&next) {
        next.status = GameStatus::Over;
        next.outcome = Some(outcome);
    }

    next
}
