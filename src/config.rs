//! Gameplay tuning.
//!
//! Every number the frame loop depends on lives here so tests can shrink or
//! bend the rules without touching the loop itself.

/// Gameplay constants for one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Playfield size in pixels
    pub width: u32,
    pub height: u32,
    /// Target frame rate of the loop
    pub fps: u32,

    // === Player ===
    pub player_start: (i32, i32),
    pub player_health: u32,
    /// Pixels moved per frame while a direction key is held
    pub player_speed: i32,
    pub lives: u32,

    // === Lasers ===
    /// Pixels a laser travels per frame
    pub laser_speed: i32,
    /// Health removed by a laser hit or a ship ramming the player
    pub hit_damage: u32,

    // === Enemies ===
    /// Wave size before the first wave; each wave adds `wave_growth`
    pub initial_wave_size: u32,
    pub wave_growth: u32,
    pub enemy_health: u32,
    /// Pixels an enemy descends per frame
    pub enemy_speed: i32,
    /// An enemy tries to fire with probability 1 / `enemy_fire_odds` each frame.
    /// Must be at least 1; a value of 1 never fires.
    pub enemy_fire_odds: u32,
    /// Spawn ranges, half-open; each must be non-empty
    pub spawn_x: (i32, i32),
    pub spawn_y: (i32, i32),

    /// Seconds the "lost" overlay stays up before the game ends
    pub loss_hold_secs: u32,
}

impl GameConfig {
    /// Frames spent in the lost state before the game ends
    pub fn loss_hold_frames(&self) -> u32 {
        self.fps * self.loss_hold_secs
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let width = 600;
        let height = 600;

        Self {
            width,
            height,
            fps: 60,

            player_start: (275, 500),
            player_health: 100,
            player_speed: 5,
            lives: 3,

            laser_speed: 6,
            hit_damage: 10,

            initial_wave_size: 5,
            wave_growth: 3,
            enemy_health: 100,
            enemy_speed: 1,
            enemy_fire_odds: 120,
            spawn_x: (100, width as i32 - 100),
            spawn_y: (-1500, -100),

            loss_hold_secs: 3,
        }
    }
}
