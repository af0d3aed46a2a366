use std::rc::Rc;

use super::body::Body;
use crate::assets::Sprite;
use crate::mask::Mask;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// A laser bolt travelling vertically across the playfield
#[derive(Debug, Clone)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
    pub owner: ProjectileOwner,
    pub sprite: Rc<Sprite>,
}

impl Projectile {
    pub fn new(x: i32, y: i32, owner: ProjectileOwner, sprite: Rc<Sprite>) -> Self {
        Self {
            x,
            y,
            owner,
            sprite,
        }
    }

    /// Moves `speed` pixels: up for player lasers, down for enemy lasers
    pub fn update(&mut self, speed: i32) {
        match self.owner {
            ProjectileOwner::Player => self.y -= speed,
            ProjectileOwner::Enemy => self.y += speed,
        }
    }

    pub fn is_out_of_bounds(&self, max_y: i32) -> bool {
        self.y < 0 || self.y > max_y
    }

    /// Moves one frame and reports whether the laser left the playfield.
    ///
    /// A laser that was already outside before moving is reported too, so a
    /// bolt fired from above the screen never drifts back into view.
    pub fn advance(&mut self, speed: i32, max_y: i32) -> bool {
        let was_out = self.is_out_of_bounds(max_y);
        self.update(speed);
        was_out || self.is_out_of_bounds(max_y)
    }
}

impl Body for Projectile {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn mask(&self) -> &Mask {
        self.sprite.mask()
    }
}
