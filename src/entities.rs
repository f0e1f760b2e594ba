/// All game entity types — pure data, no game rules.

// ── Tuning constants ──────────────────────────────────────────────────────────

pub const SHIP_WIDTH: i32 = 50;
pub const SHIP_HEIGHT: i32 = 50;
pub const SHIP_SPEED: i32 = 5;

pub const PLAYER_HEALTH: i32 = 100;
pub const ENEMY_HEALTH: i32 = 500;

/// Player spawns this far from the left edge.
pub const PLAYER_SPAWN_X: i32 = 100;
/// Enemy spawns this far from the right edge.
pub const ENEMY_SPAWN_INSET: i32 = 150;

/// Per-frame pursuit step of the AI ship.
pub const CHASE_SPEED: i32 = 3;
/// Per-frame probability that the AI ship fires.
pub const ATTACK_PROBABILITY: f64 = 0.05;

pub const PROJECTILE_WIDTH: i32 = 10;
pub const PROJECTILE_HEIGHT: i32 = 5;

pub const PLAYER_SHOT_VELOCITY: (i32, i32) = (7, 0);
pub const PLAYER_SHOT_DAMAGE: i32 = 10;
pub const ENEMY_SHOT_VELOCITY: (i32, i32) = (-10, 0);
pub const ENEMY_SHOT_DAMAGE: i32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    Blue,
    Red,
    Green,
    Black,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Running,
    Over,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    PlayerWon,
    PlayerLost,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::PlayerWon => "You Win!",
            Outcome::PlayerLost => "Game Over! You Lost!",
        }
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle, `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

// ── Ships ─────────────────────────────────────────────────────────────────────

/// Key bindings for the four movement directions.
#[derive(Clone, Debug, PartialEq)]
pub struct Controls {
    pub up: char,
    pub down: char,
    pub left: char,
    pub right: char,
}

impl Controls {
    pub fn wasd() -> Self {
        Controls { up: 'w', down: 's', left: 'a', right: 'd' }
    }
}

#[derive(Clone, Debug)]
pub struct Ship {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub color: Paint,
    pub speed: i32,
    /// May drop below zero within a frame; the end check catches it.
    pub health: i32,
    pub max_health: i32,
    /// Only the human-controlled ship has bindings.
    pub controls: Option<Controls>,
}

impl Ship {
    pub fn player(x: i32, y: i32) -> Self {
        Ship {
            x,
            y,
            width: SHIP_WIDTH,
            height: SHIP_HEIGHT,
            color: Paint::Blue,
            speed: SHIP_SPEED,
            health: PLAYER_HEALTH,
            max_health: PLAYER_HEALTH,
            controls: Some(Controls::wasd()),
        }
    }

    pub fn enemy(x: i32, y: i32) -> Self {
        Ship {
            x,
            y,
            width: SHIP_WIDTH,
            height: SHIP_HEIGHT,
            color: Paint::Red,
            speed: SHIP_SPEED,
            health: ENEMY_HEALTH,
            max_health: ENEMY_HEALTH,
            controls: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A single shot. Velocity and damage are fixed at spawn time, so they are
/// only reachable through accessors.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    velocity_x: i32,
    velocity_y: i32,
    damage: i32,
}

impl Projectile {
    pub fn new(x: i32, y: i32, velocity: (i32, i32), damage: i32) -> Self {
        Projectile {
            x,
            y,
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
            velocity_x: velocity.0,
            velocity_y: velocity.1,
            damage,
        }
    }

    pub fn velocity(&self) -> (i32, i32) {
        (self.velocity_x, self.velocity_y)
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Move one frame along the velocity vector.
    pub fn update(&mut self) {
        self.x += self.velocity_x;
        self.y += self.velocity_y;
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so the per-frame rules can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Ship,
    pub enemy: Ship,
    /// Shots fired by the player, travelling toward the enemy.
    pub player_projectiles: Vec<Projectile>,
    /// Shots fired by the enemy, travelling toward the player.
    pub enemy_projectiles: Vec<Projectile>,
    pub status: GameStatus,
    /// Set when the round ends.
    pub outcome: Option<Outcome>,
    pub frame: u64,
    pub width: i32,
    pub height: i32,
}
