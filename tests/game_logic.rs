/// Integration tests for game logic
///
/// These tests drive whole frames through `Game::step` and check how the
/// player, enemies and lasers interact: ramming, escapes, waves and losing.
use std::rc::Rc;

use guardia_shooter::{
    Assets, Body, EnemyColor, FrameInput, Game, GameConfig, GameState, Mask, ShipLook, Sprite,
};
use image::{Rgba, RgbaImage};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Fully opaque rectangle sprite
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

fn test_assets() -> Rc<Assets> {
    Rc::new(Assets {
        player: look(50, 40),
        red: look(30, 25),
        green: look(30, 25),
        blue: look(30, 25),
        background: RgbaImage::new(600, 600),
    })
}

/// Enemies that never fire, so frames play out the same every run
fn quiet_config() -> GameConfig {
    GameConfig {
        enemy_fire_odds: 1,
        ..GameConfig::default()
    }
}

fn idle() -> FrameInput {
    FrameInput::default()
}

#[test]
fn test_enemy_ramming_player_costs_health_and_removes_enemy() {
    let mut game = Game::new(test_assets(), GameConfig::default());
    let mut rng = StdRng::seed_from_u64(42);

    // Same position as the player's ship
    game.spawn_enemy_at(275, 500, EnemyColor::Red);
    let report = game.step(&idle(), &mut rng);

    assert_eq!(game.player().health(), 90);
    assert!(game.enemies().is_empty());
    assert_eq!(game.lives(), 3);
    assert_eq!(report.wave_spawned, None);
}

#[test]
fn test_player_cooldown_limits_fire_rate() {
    let mut game = Game::new(test_assets(), quiet_config());
    let mut rng = StdRng::seed_from_u64(42);
    let fire = FrameInput {
        fire: true,
        ..FrameInput::default()
    };

    let shots: Vec<usize> = (0..31)
        .filter(|_| game.step(&fire, &mut rng).player_fired)
        .collect();

    assert_eq!(shots, vec![0, 30]);
    assert_eq!(game.player().ship.lasers.len(), 2);
}

#[test]
fn test_player_laser_destroys_enemy() {
    let mut game = Game::new(test_assets(), quiet_config());
    let mut rng = StdRng::seed_from_u64(42);

    // Directly above the player's gun
    game.spawn_enemy_at(265, 400, EnemyColor::Blue);
    let fire = FrameInput {
        fire: true,
        ..FrameInput::default()
    };
    assert!(game.step(&fire, &mut rng).player_fired);

    let mut destroyed_at = None;
    for frame in 1..20 {
        if game.step(&idle(), &mut rng).enemies_destroyed == 1 {
            destroyed_at = Some(frame);
            break;
        }
    }

    assert!(destroyed_at.is_some());
    assert!(game.enemies().is_empty());
    assert!(game.player().ship.lasers.is_empty());
    assert_eq!(game.player().health(), 100);
}

#[test]
fn test_enemy_fires_and_hits_player() {
    let config = GameConfig {
        enemy_fire_odds: 2,
        ..GameConfig::default()
    };
    let mut game = Game::new(test_assets(), config);
    let mut rng = StdRng::seed_from_u64(42);

    // Shots leave 20px left of the hull, straight down onto the player
    game.spawn_enemy_at(295, 300, EnemyColor::Red);

    let mut saw_laser = false;
    for _ in 0..120 {
        game.step(&idle(), &mut rng);
        saw_laser |= !game.enemies()[0].ship.lasers.is_empty();

        let health = game.player().health();
        assert_eq!(health % 10, 0);
    }

    assert!(saw_laser);
    assert!(game.player().health() < 100);
    assert!(game.player().is_alive());
    assert_eq!(game.enemies().len(), 1);
    assert_eq!(game.state(), GameState::Playing);
}

#[test]
fn test_escape_with_last_life_loses_game() {
    let mut game = Game::new(test_assets(), quiet_config());
    let mut rng = StdRng::seed_from_u64(42);
    game.set_lives(1);

    // Bottom edge crosses the playfield edge on the next descent, away from the player
    game.spawn_enemy_at(100, 575, EnemyColor::Green);
    let report = game.step(&idle(), &mut rng);

    assert!(report.lost);
    assert_eq!(game.lives(), 0);
    assert_eq!(game.state(), GameState::LostSettling);
}

#[test]
fn test_lost_game_ends_after_exactly_three_seconds() {
    let mut game = Game::new(test_assets(), quiet_config());
    let mut rng = StdRng::seed_from_u64(42);
    game.set_lives(0);
    game.step(&idle(), &mut rng);
    assert!(game.is_lost());

    let hold = game.config().loss_hold_frames();
    assert_eq!(hold, 180);

    for _ in 0..hold - 1 {
        game.step(&idle(), &mut rng);
        assert_eq!(game.state(), GameState::LostSettling);
    }
    game.step(&idle(), &mut rng);
    assert_eq!(game.state(), GameState::Ended);
}

#[test]
fn test_depleted_health_loses_game() {
    let mut game = Game::new(test_assets(), quiet_config());
    let mut rng = StdRng::seed_from_u64(42);

    game.player_mut().take_damage(100);
    let report = game.step(&idle(), &mut rng);

    assert!(report.lost);
    assert_eq!(game.lives(), 3);
    assert!(game.is_lost());
}

#[test]
fn test_cleared_wave_grows_next_wave() {
    let config = GameConfig {
        enemy_speed: 50,
        ..quiet_config()
    };
    let mut game = Game::new(test_assets(), config);
    let mut rng = StdRng::seed_from_u64(7);
    game.set_lives(100);

    assert_eq!(game.step(&idle(), &mut rng).wave_spawned, Some(8));
    assert_eq!(game.level(), 1);

    // Every enemy either rams the player or escapes past the bottom
    let mut next_wave = None;
    for _ in 0..200 {
        if let Some(size) = game.step(&idle(), &mut rng).wave_spawned {
            next_wave = Some(size);
            break;
        }
    }

    assert_eq!(next_wave, Some(11));
    assert_eq!(game.level(), 2);
    assert_eq!(game.enemies().len(), 11);
    assert!(game.player().is_alive());
}

#[test]
fn test_mask_overlap_is_symmetric() {
    let ring = Mask::from_rows(&["###", "#.#", "###"]);
    let dot = Mask::from_rows(&["#"]);

    // The hollow centre of the ring is not a hit
    assert_eq!(ring.overlap(&dot, (1, 1)), None);
    assert_eq!(dot.overlap(&ring, (-1, -1)), None);

    assert_eq!(ring.overlap(&dot, (2, 1)), Some((2, 1)));
    assert_eq!(dot.overlap(&ring, (-2, -1)), Some((0, 0)));
}

#[test]
fn test_enemy_and_player_collide_through_body() {
    let mut game = Game::new(test_assets(), quiet_config());
    game.spawn_enemy_at(300, 520, EnemyColor::Red);

    let enemy = &game.enemies()[0];
    assert!(enemy.collides_with(game.player()));
    assert!(game.player().collides_with(enemy));

    game.spawn_enemy_at(0, 0, EnemyColor::Red);
    let far = &game.enemies()[1];
    assert!(!far.collides_with(game.player()));
}
