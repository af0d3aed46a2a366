use color_eyre::{Result, eyre::WrapErr};
use image::{RgbaImage, imageops::FilterType};
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::entities::EnemyColor;
use crate::mask::Mask;

/// An image together with the collision mask derived from it
pub struct Sprite {
    image: RgbaImage,
    mask: Mask,
}

impl Sprite {
    pub fn from_image(image: RgbaImage) -> Self {
        let mask = Mask::from_image(&image);
        Self { image, mask }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .wrap_err_with(|| format!("failed to load sprite {}", path.display()))?
            .to_rgba8();
        Ok(Self::from_image(image))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

impl fmt::Debug for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// The ship sprite and the laser sprite it fires
#[derive(Debug, Clone)]
pub struct ShipLook {
    pub ship: Rc<Sprite>,
    pub laser: Rc<Sprite>,
}

impl ShipLook {
    fn load(dir: &Path, ship: &str, laser: &str) -> Result<Self> {
        Ok(Self {
            ship: Rc::new(Sprite::load(&dir.join(ship))?),
            laser: Rc::new(Sprite::load(&dir.join(laser))?),
        })
    }
}

/// Every image the game draws, loaded once at startup
#[derive(Debug)]
pub struct Assets {
    pub player: ShipLook,
    pub red: ShipLook,
    pub green: ShipLook,
    pub blue: ShipLook,
    /// Already scaled to the playfield size
    pub background: RgbaImage,
}

impl Assets {
    /// Loads sprites from `<root>/assets` and the background from `<root>/assets2`
    pub fn load(root: &Path, width: u32, height: u32) -> Result<Self> {
        let sprites = root.join("assets");
        let backgrounds = root.join("assets2");

        let player = ShipLook::load(&sprites, "pixel_ship_yellow.png", "pixel_laser_yellow.png")?;
        let red = ShipLook::load(&sprites, "pixel_ship_red_small.png", "pixel_laser_red.png")?;
        let green =
            ShipLook::load(&sprites, "pixel_ship_green_small.png", "pixel_laser_green.png")?;
        let blue = ShipLook::load(&sprites, "pixel_ship_blue_small.png", "pixel_laser_blue.png")?;

        let background_path = backgrounds.join("pixel_bg_moon.png");
        let background = image::open(&background_path)
            .wrap_err_with(|| format!("failed to load background {}", background_path.display()))?
            .to_rgba8();
        let background = image::imageops::resize(&background, width, height, FilterType::Nearest);

        log::info!("Loaded assets from {}", root.display());

        Ok(Self {
            player,
            red,
            green,
            blue,
            background,
        })
    }

    pub fn enemy_look(&self, color: EnemyColor) -> &ShipLook {
        match color {
            EnemyColor::Red => &self.red,
            EnemyColor::Green => &self.green,
            EnemyColor::Blue => &self.blue,
        }
    }

    pub fn sound_path(root: &Path) -> PathBuf {
        root.join("assets").join("sounds").join("laser.wav")
    }
}
