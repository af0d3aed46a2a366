use image::{Rgba, RgbaImage, imageops};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::assets::Sprite;
use crate::entities::{Enemy, Player, Ship};
use crate::game::GameState;

const HUD_COLOR: Color = Color::Rgb(50, 255, 50);
const LOST_COLOR: Color = Color::Rgb(255, 50, 50);
const HEALTH_BACK: Rgba<u8> = Rgba([255, 0, 0, 255]);
const HEALTH_FRONT: Rgba<u8> = Rgba([0, 255, 0, 255]);

/// Health bar geometry, in playfield pixels
const HEALTH_BAR_GAP: i32 = 10;
const HEALTH_BAR_HEIGHT: i32 = 10;

/// Pixel row of the level and lives labels
const HUD_Y: u32 = 10;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub state: GameState,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub level: u32,
    pub lives: u32,
    pub background: &'a RgbaImage,
}

/// Composes the playfield into an RGBA canvas and presents it in the
/// terminal as half-block cells, two vertical pixels per cell.
pub struct GameRenderer {
    canvas: RgbaImage,
}

impl GameRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: RgbaImage::new(width, height),
        }
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Renders the title screen
    pub fn render_menu(&mut self, frame: &mut Frame, background: &RgbaImage) {
        imageops::replace(&mut self.canvas, background, 0, 0);

        let field = self.present(frame);
        self.draw_label(
            frame.buffer_mut(),
            field,
            350,
            Line::from("Click to begin...").centered(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

        Self::draw_hint(frame, "[Click/Enter: Start] [Q: Quit]");
    }

    /// Renders the playfield, the HUD and the lost overlay
    pub fn render_game(&mut self, frame: &mut Frame, view: &RenderView) {
        self.compose(view);
        let field = self.present(frame);
        let buffer = frame.buffer_mut();

        let hud = Style::default().fg(HUD_COLOR).add_modifier(Modifier::BOLD);
        self.draw_label(
            buffer,
            field,
            HUD_Y,
            Line::from(format!(" Level: {}", view.level)).left_aligned(),
            hud,
        );
        self.draw_label(
            buffer,
            field,
            HUD_Y,
            Line::from(format!("Lives: {} ", view.lives)).right_aligned(),
            hud,
        );
        // Ships fly over the HUD
        if let Some(row) = self.cell_row(field, HUD_Y) {
            self.reveal_sprites(buffer, field, row, view.background);
        }

        if view.state != GameState::Playing {
            self.draw_label(
                buffer,
                field,
                250,
                Line::from("You Lost!!").centered(),
                Style::default().fg(LOST_COLOR).add_modifier(Modifier::BOLD),
            );
        }

        Self::draw_hint(frame, "[WASD/Arrows: Move] [Space: Fire] [Q: Quit]");
    }

    /// Draws one frame of the scene into the canvas
    pub fn compose(&mut self, view: &RenderView) {
        imageops::replace(&mut self.canvas, view.background, 0, 0);

        for enemy in view.enemies {
            self.draw_ship(&enemy.ship);
        }

        self.draw_ship(&view.player.ship);
        self.draw_health_bar(view.player);
    }

    fn draw_ship(&mut self, ship: &Ship) {
        self.draw_sprite(&ship.look.ship, ship.x, ship.y);
        for laser in &ship.lasers {
            self.draw_sprite(&laser.sprite, laser.x, laser.y);
        }
    }

    fn draw_sprite(&mut self, sprite: &Sprite, x: i32, y: i32) {
        imageops::overlay(&mut self.canvas, sprite.image(), i64::from(x), i64::from(y));
    }

    fn draw_health_bar(&mut self, player: &Player) {
        let ship = &player.ship;
        let width = ship.width() as i32;
        let y = ship.y + ship.height() as i32 + HEALTH_BAR_GAP;
        let filled = (width as f32 * player.health_ratio()).round() as i32;

        self.fill_rect(ship.x, y, width, HEALTH_BAR_HEIGHT, HEALTH_BACK);
        self.fill_rect(ship.x, y, filled, HEALTH_BAR_HEIGHT, HEALTH_FRONT);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgba<u8>) {
        let x_start = x.max(0);
        let y_start = y.max(0);
        let x_end = (x + width).min(self.canvas.width() as i32);
        let y_end = (y + height).min(self.canvas.height() as i32);

        for py in y_start..y_end {
            for px in x_start..x_end {
                self.canvas.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    /// Copies the canvas into the terminal; returns the cells it covers
    fn present(&self, frame: &mut Frame) -> Rect {
        let field = playfield_area(frame.area());
        let buffer = frame.buffer_mut();

        for cy in 0..field.height {
            for cx in 0..field.width {
                self.blit_cell(buffer, field, cx, cy);
            }
        }

        field
    }

    /// Canvas column and the two canvas rows shown by one cell
    fn cell_pixels(&self, field: Rect, cx: u16, cy: u16) -> (u32, u32, u32) {
        let (width, height) = self.canvas.dimensions();
        let rows = u32::from(field.height) * 2;

        let px = u32::from(cx) * width / u32::from(field.width);
        let top = (u32::from(cy) * 2) * height / rows;
        let bottom = (u32::from(cy) * 2 + 1) * height / rows;
        (px, top, bottom)
    }

    fn blit_cell(&self, buffer: &mut Buffer, field: Rect, cx: u16, cy: u16) {
        let (px, top, bottom) = self.cell_pixels(field, cx, cy);
        if let Some(cell) = buffer.cell_mut((field.x + cx, field.y + cy)) {
            cell.set_char('▀')
                .set_fg(to_color(self.canvas.get_pixel(px, top)))
                .set_bg(to_color(self.canvas.get_pixel(px, bottom)));
        }
    }

    /// Re-blits the cells of `row` where anything was drawn over the background
    fn reveal_sprites(&self, buffer: &mut Buffer, field: Rect, row: u16, background: &RgbaImage) {
        for cx in 0..field.width {
            let (px, top, bottom) = self.cell_pixels(field, cx, row);
            let covered = [top, bottom].into_iter().any(|py| {
                background.get_pixel_checked(px, py) != Some(self.canvas.get_pixel(px, py))
            });
            if covered {
                self.blit_cell(buffer, field, cx, row);
            }
        }
    }

    /// Cell row showing playfield pixel row `y`, if it is on screen
    fn cell_row(&self, field: Rect, y: u32) -> Option<u16> {
        let row = y * u32::from(field.height) / self.canvas.height().max(1);
        (field.width > 0 && row < u32::from(field.height)).then_some(row as u16)
    }

    /// Writes a line of text at playfield pixel row `y`
    fn draw_label(&self, buffer: &mut Buffer, field: Rect, y: u32, line: Line, style: Style) {
        let Some(row) = self.cell_row(field, y) else {
            return;
        };

        let area = Rect {
            x: field.x,
            y: field.y + row,
            width: field.width,
            height: 1,
        };
        let alignment = line.alignment.unwrap_or(Alignment::Left);
        Paragraph::new(line.style(style))
            .alignment(alignment)
            .render(area, buffer);
    }

    fn draw_hint(frame: &mut Frame, hint: &str) {
        let area = frame.area();
        if area.height == 0 {
            return;
        }

        let hint_area = Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Line::from(hint).style(Style::default().fg(Color::DarkGray)))
                .centered(),
            hint_area,
        );
    }
}

/// Largest square (in pixels) that fits the terminal, leaving the bottom
/// row for the controls hint. Each cell is one pixel wide and two tall.
pub fn playfield_area(area: Rect) -> Rect {
    let rows = area.height.saturating_sub(1);
    let side = area.width.min(rows.saturating_mul(2));
    let width = side;
    let height = side / 2;

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (rows - height) / 2,
        width,
        height,
    }
}

fn to_color(pixel: &Rgba<u8>) -> Color {
    Color::Rgb(pixel.0[0], pixel.0[1], pixel.0[2])
}
