use super::body::Body;
use super::enemy::Enemy;
use super::projectile::ProjectileOwner;
use super::ship::Ship;
use crate::assets::ShipLook;
use crate::mask::Mask;

#[derive(Debug, Clone)]
pub struct Player {
    pub ship: Ship,
    pub max_health: u32,
}

impl Player {
    pub fn new(x: i32, y: i32, health: u32, look: ShipLook) -> Self {
        Self {
            ship: Ship::new(x, y, health, look, ProjectileOwner::Player),
            max_health: health,
        }
    }

    pub fn x(&self) -> i32 {
        self.ship.x
    }

    pub fn y(&self) -> i32 {
        self.ship.y
    }

    pub fn health(&self) -> u32 {
        self.ship.health
    }

    /// Moves by `(dx, dy)` only if the whole ship stays inside `width` x `height`.
    /// Moving left or up never reaches the 0 edge itself.
    pub fn move_within(&mut self, dx: i32, dy: i32, width: u32, height: u32) {
        let new_x = self.ship.x + dx;
        let new_y = self.ship.y + dy;
        let fits_x = axis_fits(dx, new_x, self.ship.width(), width);
        let fits_y = axis_fits(dy, new_y, self.ship.height(), height);

        if fits_x && fits_y {
            self.ship.move_by(dx, dy);
        }
    }

    pub fn shoot(&mut self) -> bool {
        self.ship.shoot()
    }

    pub fn take_damage(&mut self, damage: u32) {
        self.ship.health = self.ship.health.saturating_sub(damage).min(self.max_health);
    }

    pub fn is_alive(&self) -> bool {
        self.ship.health > 0
    }

    /// Fraction of health left, for the health bar
    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.ship.health as f32 / self.max_health as f32
    }

    /// Moves the player's lasers upward; each laser destroys the first enemy
    /// it overlaps. Returns how many enemies were destroyed.
    pub fn advance_lasers(&mut self, speed: i32, max_y: i32, enemies: &mut Vec<Enemy>) -> usize {
        let mut destroyed = 0;
        self.ship.advance_lasers(speed, max_y, |laser| {
            match enemies.iter().position(|enemy| laser.collides_with(enemy)) {
                Some(idx) => {
                    enemies.remove(idx);
                    destroyed += 1;
                    true
                }
                None => false,
            }
        });
        destroyed
    }
}

fn axis_fits(delta: i32, new_pos: i32, size: u32, limit: u32) -> bool {
    match delta.signum() {
        -1 => new_pos > 0,
        1 => new_pos + size as i32 <= limit as i32,
        _ => true,
    }
}

impl Body for Player {
    fn position(&self) -> (i32, i32) {
        self.ship.position()
    }

    fn mask(&self) -> &Mask {
        self.ship.mask()
    }
}
