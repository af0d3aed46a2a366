mod body;
mod enemy;
mod player;
mod projectile;
mod ship;

// Re-export all public types
pub use body::Body;
pub use enemy::{Enemy, EnemyColor, EnemyFate};
pub use player::Player;
pub use projectile::{Projectile, ProjectileOwner};
pub use ship::{COOLDOWN, Ship};
