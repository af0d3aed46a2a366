// Library exports for the binary and for testing
pub use app::App;
pub use assets::{Assets, ShipLook, Sprite};
pub use audio::AudioManager;
pub use config::GameConfig;
pub use entities::{
    Body, COOLDOWN, Enemy, EnemyColor, EnemyFate, Player, Projectile, ProjectileOwner, Ship,
};
pub use game::{FrameInput, FrameReport, Game, GameState};
pub use mask::Mask;

pub mod app;
pub mod assets;
pub mod audio;
pub mod clock;
pub mod config;
pub mod entities;
pub mod game;
pub mod input;
pub mod mask;
pub mod renderer;
