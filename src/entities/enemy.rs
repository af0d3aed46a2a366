use super::body::Body;
use super::player::Player;
use super::projectile::ProjectileOwner;
use super::ship::Ship;
use crate::assets::ShipLook;
use crate::mask::Mask;

/// Enemy lasers are wider than enemy ships; this centers them on the hull
const SHOT_OFFSET_X: i32 = -20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyColor {
    Red,
    Green,
    Blue,
}

impl EnemyColor {
    pub const ALL: [EnemyColor; 3] = [EnemyColor::Red, EnemyColor::Green, EnemyColor::Blue];
}

/// What happened to an enemy this frame, besides its lasers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyFate {
    /// Still on its way down
    Alive,
    /// Flew into the player
    Rammed,
    /// Slipped past the bottom of the playfield
    Escaped,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub ship: Ship,
    pub color: EnemyColor,
}

impl Enemy {
    pub fn new(x: i32, y: i32, color: EnemyColor, health: u32, look: ShipLook) -> Self {
        Self {
            ship: Ship::new(x, y, health, look, ProjectileOwner::Enemy),
            color,
        }
    }

    pub fn x(&self) -> i32 {
        self.ship.x
    }

    pub fn y(&self) -> i32 {
        self.ship.y
    }

    pub fn descend(&mut self, speed: i32) {
        self.ship.move_by(0, speed);
    }

    pub fn shoot(&mut self) -> bool {
        self.ship.shoot_from(SHOT_OFFSET_X)
    }

    /// Moves this enemy's lasers downward; each one that overlaps the player
    /// costs the player `damage` health.
    pub fn advance_lasers(&mut self, speed: i32, max_y: i32, player: &mut Player, damage: u32) {
        self.ship.advance_lasers(speed, max_y, |laser| {
            if laser.collides_with(&*player) {
                player.take_damage(damage);
                true
            } else {
                false
            }
        });
    }

    /// Body contact with the player wins over escaping past the bottom edge
    pub fn check_fate(&self, player: &Player, max_y: i32) -> EnemyFate {
        if self.collides_with(player) {
            EnemyFate::Rammed
        } else if self.ship.y + self.ship.height() as i32 > max_y {
            EnemyFate::Escaped
        } else {
            EnemyFate::Alive
        }
    }
}

impl Body for Enemy {
    fn position(&self) -> (i32, i32) {
        self.ship.position()
    }

    fn mask(&self) -> &Mask {
        self.ship.mask()
    }
}
