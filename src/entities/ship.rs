use super::body::Body;
use super::projectile::{Projectile, ProjectileOwner};
use crate::assets::ShipLook;
use crate::mask::Mask;

/// Frames between two shots of the same ship
pub const COOLDOWN: u32 = 30;

/// State shared by the player and every enemy: position, health, sprites,
/// the lasers in flight and the fire cooldown.
#[derive(Debug, Clone)]
pub struct Ship {
    pub x: i32,
    pub y: i32,
    pub health: u32,
    pub look: ShipLook,
    pub lasers: Vec<Projectile>,
    /// 0 when ready to fire, otherwise counts up to [`COOLDOWN`]
    pub cooldown: u32,
    owner: ProjectileOwner,
}

impl Ship {
    pub fn new(x: i32, y: i32, health: u32, look: ShipLook, owner: ProjectileOwner) -> Self {
        Self {
            x,
            y,
            health,
            look,
            lasers: Vec::new(),
            cooldown: 0,
            owner,
        }
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn can_fire(&self) -> bool {
        self.cooldown == 0
    }

    /// Fires a laser from `(x + offset_x, y)` if the cooldown allows.
    /// Returns whether a laser was created.
    pub fn shoot_from(&mut self, offset_x: i32) -> bool {
        if !self.can_fire() {
            return false;
        }

        self.lasers.push(Projectile::new(
            self.x + offset_x,
            self.y,
            self.owner,
            self.look.laser.clone(),
        ));
        self.cooldown = 1;
        true
    }

    pub fn shoot(&mut self) -> bool {
        self.shoot_from(0)
    }

    pub fn tick_cooldown(&mut self) {
        if self.cooldown >= COOLDOWN {
            self.cooldown = 0;
        } else if self.cooldown > 0 {
            self.cooldown += 1;
        }
    }

    /// Ticks the cooldown, then moves every laser one frame.
    ///
    /// Lasers leaving the playfield are dropped. For the rest `on_hit` decides
    /// whether the laser struck something; a laser that hit is dropped too.
    pub fn advance_lasers(
        &mut self,
        speed: i32,
        max_y: i32,
        mut on_hit: impl FnMut(&Projectile) -> bool,
    ) {
        self.tick_cooldown();
        self.lasers
            .retain_mut(|laser| !laser.advance(speed, max_y) && !on_hit(laser));
    }

    pub fn width(&self) -> u32 {
        self.look.ship.width()
    }

    pub fn height(&self) -> u32 {
        self.look.ship.height()
    }
}

impl Body for Ship {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn mask(&self) -> &Mask {
        self.look.ship.mask()
    }
}
