use color_eyre::Result;
use ratatui::{Terminal, backend::Backend};
use std::rc::Rc;

use crate::assets::Assets;
use crate::audio::AudioManager;
use crate::clock::FrameClock;
use crate::config::GameConfig;
use crate::game::{Game, GameState};
use crate::input::{InputAction, InputManager, Screen};
use crate::renderer::{GameRenderer, RenderView};

/// The application: a title menu and the game it launches
pub struct App {
    running: bool,
    config: GameConfig,
    assets: Rc<Assets>,
    /// The game in progress; `None` while the menu is shown
    game: Option<Game>,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
    clock: FrameClock,
}

impl App {
    pub fn new(
        config: GameConfig,
        assets: Rc<Assets>,
        audio_manager: AudioManager,
        release_events: bool,
    ) -> Self {
        Self {
            running: true,
            renderer: GameRenderer::new(config.width, config.height),
            clock: FrameClock::new(config.fps),
            input_manager: InputManager::new(release_events),
            game: None,
            config,
            assets,
            audio_manager,
        }
    }

    /// Run the application's main loop until the player quits.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut rng = rand::rng();

        while self.running {
            self.clock.tick();

            let screen = if self.game.is_some() {
                Screen::Game
            } else {
                Screen::Menu
            };
            self.input_manager.poll_events(screen)?;
            let actions = self.input_manager.actions().to_vec();
            self.process_actions(&actions);
            if !self.running {
                break;
            }

            match self.game.as_mut() {
                None => {
                    let background = &self.assets.background;
                    let renderer = &mut self.renderer;
                    terminal.draw(|frame| renderer.render_menu(frame, background))?;
                }
                Some(game) => {
                    let view = RenderView {
                        state: game.state(),
                        player: game.player(),
                        enemies: game.enemies(),
                        level: game.level(),
                        lives: game.lives(),
                        background: &self.assets.background,
                    };
                    let renderer = &mut self.renderer;
                    terminal.draw(|frame| renderer.render_game(frame, &view))?;

                    let report = game.step(&self.input_manager.held(), &mut rng);
                    if report.player_fired {
                        self.audio_manager.play_laser();
                    }

                    if game.state() == GameState::Ended {
                        log::info!("Returning to menu ({} fps)", self.clock.fps());
                        self.game = None;
                        self.input_manager.reset();
                    }
                }
            }

            self.input_manager.end_frame();
        }

        Ok(())
    }

    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Start => {
                    if self.game.is_none() {
                        log::info!("Starting new game");
                        self.game = Some(Game::new(self.assets.clone(), self.config.clone()));
                        self.input_manager.reset();
                    }
                }
            }
        }
    }
}
