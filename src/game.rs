//! The frame-stepped game: waves, movement, lasers, collisions and the
//! lose condition. Rendering and input live elsewhere; this module only
//! advances state one frame at a time.

use rand::Rng;
use std::rc::Rc;

use crate::assets::Assets;
use crate::config::GameConfig;
use crate::entities::{Enemy, EnemyColor, EnemyFate, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    /// Lost; gameplay is frozen while the overlay is shown
    LostSettling,
    Ended,
}

/// Held controls sampled once per frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Notable things that happened during one frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub player_fired: bool,
    pub enemies_destroyed: usize,
    /// Size of the wave spawned this frame, if any
    pub wave_spawned: Option<u32>,
    pub lost: bool,
}

pub struct Game {
    config: GameConfig,
    assets: Rc<Assets>,
    state: GameState,
    level: u32,
    lives: u32,
    wave_size: u32,
    player: Player,
    enemies: Vec<Enemy>,
    /// Frames spent in [`GameState::LostSettling`]
    loss_frames: u32,
}

impl Game {
    pub fn new(assets: Rc<Assets>, config: GameConfig) -> Self {
        debug_assert!(config.spawn_x.0 < config.spawn_x.1, "empty spawn_x range");
        debug_assert!(config.spawn_y.0 < config.spawn_y.1, "empty spawn_y range");
        debug_assert!(config.enemy_fire_odds > 0, "enemy_fire_odds must be positive");

        let (x, y) = config.player_start;
        let player = Player::new(x, y, config.player_health, assets.player.clone());

        Self {
            state: GameState::Playing,
            level: 0,
            lives: config.lives,
            wave_size: config.initial_wave_size,
            player,
            enemies: Vec::new(),
            loss_frames: 0,
            assets,
            config,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_lost(&self) -> bool {
        self.state != GameState::Playing
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn wave_size(&self) -> u32 {
        self.wave_size
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Direct access to the player, e.g. to apply damage from outside a frame
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Overrides the remaining lives
    pub fn set_lives(&mut self, lives: u32) {
        self.lives = lives;
    }

    /// Places a single enemy, outside of the regular wave spawning
    pub fn spawn_enemy_at(&mut self, x: i32, y: i32, color: EnemyColor) {
        let look = self.assets.enemy_look(color).clone();
        self.enemies
            .push(Enemy::new(x, y, color, self.config.enemy_health, look));
    }

    /// Advance one frame
    pub fn step<R: Rng>(&mut self, input: &FrameInput, rng: &mut R) -> FrameReport {
        let mut report = FrameReport::default();

        match self.state {
            GameState::Playing => {
                if self.enemies.is_empty() {
                    self.spawn_wave(rng);
                    report.wave_spawned = Some(self.wave_size);
                }

                report.player_fired = self.apply_input(input);
                self.update_enemies(rng);

                let height = self.config.height as i32;
                report.enemies_destroyed =
                    self.player
                        .advance_lasers(self.config.laser_speed, height, &mut self.enemies);

                if self.lives == 0 || !self.player.is_alive() {
                    log::info!(
                        "Game lost at level {} (lives {}, health {})",
                        self.level,
                        self.lives,
                        self.player.health()
                    );
                    self.state = GameState::LostSettling;
                    self.loss_frames = 0;
                    report.lost = true;
                }
            }
            GameState::LostSettling => {
                self.loss_frames += 1;
                if self.loss_frames >= self.config.loss_hold_frames() {
                    log::info!("Game over after reaching level {}", self.level);
                    self.state = GameState::Ended;
                }
            }
            GameState::Ended => {}
        }

        report
    }

    fn spawn_wave<R: Rng>(&mut self, rng: &mut R) {
        self.level += 1;
        self.wave_size += self.config.wave_growth;

        let (min_x, max_x) = self.config.spawn_x;
        let (min_y, max_y) = self.config.spawn_y;

        for _ in 0..self.wave_size {
            let x = rng.random_range(min_x..max_x);
            let y = rng.random_range(min_y..max_y);
            let color = EnemyColor::ALL[rng.random_range(0..EnemyColor::ALL.len())];
            self.spawn_enemy_at(x, y, color);
        }

        log::info!("Level {}: spawned {} enemies", self.level, self.wave_size);
    }

    /// Returns whether the player fired
    fn apply_input(&mut self, input: &FrameInput) -> bool {
        let speed = self.config.player_speed;
        let (width, height) = (self.config.width, self.config.height);

        if input.left {
            self.player.move_within(-speed, 0, width, height);
        }
        if input.right {
            self.player.move_within(speed, 0, width, height);
        }
        if input.up {
            self.player.move_within(0, -speed, width, height);
        }
        if input.down {
            self.player.move_within(0, speed, width, height);
        }

        input.fire && self.player.shoot()
    }

    fn update_enemies<R: Rng>(&mut self, rng: &mut R) {
        let Self {
            config,
            player,
            enemies,
            lives,
            ..
        } = self;
        let height = config.height as i32;

        enemies.retain_mut(|enemy| {
            enemy.descend(config.enemy_speed);
            enemy.advance_lasers(config.laser_speed, height, player, config.hit_damage);

            if rng.random_range(0..config.enemy_fire_odds) == 1 {
                enemy.shoot();
            }

            match enemy.check_fate(player, height) {
                EnemyFate::Alive => true,
                EnemyFate::Rammed => {
                    player.take_damage(config.hit_damage);
                    false
                }
                EnemyFate::Escaped => {
                    *lives = lives.saturating_sub(1);
                    false
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ShipLook, Sprite};
    use image::{Rgba, RgbaImage};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn solid(w: u32, h: u32) -> Rc<Sprite> {
        Rc::new(Sprite::from_image(RgbaImage::from_pixel(
            w,
            h,
            Rgba([255, 255, 255, 255]),
        )))
    }

    fn look(w: u32, h: u32) -> ShipLook {
        ShipLook {
            ship: solid(w, h),
            laser: solid(4, 10),
        }
    }

    fn assets() -> Rc<Assets> {
        Rc::new(Assets {
            player: look(50, 40),
            red: look(30, 25),
            green: look(30, 25),
            blue: look(30, 25),
            background: RgbaImage::new(1, 1),
        })
    }

    fn game() -> Game {
        Game::new(assets(), GameConfig::default())
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_new_game() {
        let game = game();
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.level(), 0);
        assert_eq!(game.lives(), 3);
        assert_eq!(game.wave_size(), 5);
        assert_eq!((game.player().x(), game.player().y()), (275, 500));
        assert!(game.enemies().is_empty());
    }

    #[test]
    #[should_panic(expected = "enemy_fire_odds must be positive")]
    fn test_zero_fire_odds_rejected() {
        let config = GameConfig {
            enemy_fire_odds: 0,
            ..GameConfig::default()
        };
        Game::new(assets(), config);
    }

    #[test]
    #[should_panic(expected = "empty spawn_x range")]
    fn test_empty_spawn_range_rejected() {
        let config = GameConfig {
            spawn_x: (300, 300),
            ..GameConfig::default()
        };
        Game::new(assets(), config);
    }

    #[test]
    fn test_first_frame_spawns_first_wave() {
        let mut game = game();
        let report = game.step(&FrameInput::default(), &mut rng());

        assert_eq!(report.wave_spawned, Some(8));
        assert_eq!(game.level(), 1);
        assert_eq!(game.enemies().len(), 8);
    }

    #[test]
    fn test_wave_spawn_ranges() {
        let mut game = game();
        let mut rng = rng();
        game.step(&FrameInput::default(), &mut rng);

        for enemy in game.enemies() {
            // Already moved down once
            assert!((100..500).contains(&enemy.x()));
            assert!((-1499..-99).contains(&enemy.y()));
        }
    }

    #[test]
    fn test_no_spawn_while_enemies_remain() {
        let mut game = game();
        let mut rng = rng();
        game.step(&FrameInput::default(), &mut rng);
        let report = game.step(&FrameInput::default(), &mut rng);

        assert_eq!(report.wave_spawned, None);
        assert_eq!(game.level(), 1);
    }

    #[test]
    fn test_input_moves_player() {
        let mut game = game();
        let mut rng = rng();
        let input = FrameInput {
            left: true,
            up: true,
            ..FrameInput::default()
        };
        game.step(&input, &mut rng);
        assert_eq!((game.player().x(), game.player().y()), (270, 495));
    }

    #[test]
    fn test_fire_reports_shot_once_per_cooldown() {
        let mut game = game();
        let mut rng = rng();
        let input = FrameInput {
            fire: true,
            ..FrameInput::default()
        };

        assert!(game.step(&input, &mut rng).player_fired);
        assert!(!game.step(&input, &mut rng).player_fired);
    }

    #[test]
    fn test_enemy_ramming_player() {
        let mut game = game();
        game.spawn_enemy_at(280, 505, EnemyColor::Red);

        let report = game.step(&FrameInput::default(), &mut rng());

        assert_eq!(report.wave_spawned, None);
        assert_eq!(game.player().health(), 90);
        assert!(game.enemies().is_empty());
        assert_eq!(game.lives(), 3);
    }

    #[test]
    fn test_escaped_enemy_costs_a_life() {
        let mut game = game();
        game.spawn_enemy_at(0, 576, EnemyColor::Blue);

        game.step(&FrameInput::default(), &mut rng());

        assert_eq!(game.lives(), 2);
        assert!(game.enemies().is_empty());
    }

    #[test]
    fn test_loss_when_out_of_lives() {
        let mut game = game();
        let mut rng = rng();
        game.set_lives(0);

        let report = game.step(&FrameInput::default(), &mut rng);
        assert!(report.lost);
        assert!(game.is_lost());
        assert_eq!(game.state(), GameState::LostSettling);
    }

    #[test]
    fn test_loss_when_health_depleted() {
        let mut game = game();
        game.player_mut().take_damage(100);

        game.step(&FrameInput::default(), &mut rng());
        assert_eq!(game.state(), GameState::LostSettling);
    }

    #[test]
    fn test_lost_game_freezes() {
        let mut game = game();
        let mut rng = rng();
        game.set_lives(0);
        game.step(&FrameInput::default(), &mut rng);

        let positions: Vec<i32> = game.enemies().iter().map(|e| e.y()).collect();
        let input = FrameInput {
            right: true,
            fire: true,
            ..FrameInput::default()
        };
        let report = game.step(&input, &mut rng);

        assert!(!report.player_fired);
        assert_eq!(game.player().x(), 275);
        let after: Vec<i32> = game.enemies().iter().map(|e| e.y()).collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn test_lost_settles_for_three_seconds() {
        let mut game = game();
        let mut rng = rng();
        game.set_lives(0);
        game.step(&FrameInput::default(), &mut rng);

        let hold = game.config().loss_hold_frames();
        for _ in 0..hold - 1 {
            game.step(&FrameInput::default(), &mut rng);
            assert_eq!(game.state(), GameState::LostSettling);
        }
        game.step(&FrameInput::default(), &mut rng);
        assert_eq!(game.state(), GameState::Ended);

        game.step(&FrameInput::default(), &mut rng);
        assert_eq!(game.state(), GameState::Ended);
    }
}
