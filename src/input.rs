use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use std::time::Duration;

use crate::game::FrameInput;

/// Without key-release events a press counts as held for this many frames.
/// Terminal key repeat refreshes it while the key stays down.
const REPEAT_HOLD_FRAMES: u8 = 6;

/// Marks a key held until its release event arrives
const HELD_UNTIL_RELEASE: u8 = u8::MAX;

/// Which screen the input is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Game,
}

/// Represents semantic actions triggered once by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Leave the menu and begin a game
    Start,
    Quit,
}

/// Frames each control stays held; zero means released
#[derive(Debug, Default)]
struct KeyState {
    up: u8,
    down: u8,
    left: u8,
    right: u8,
    fire: u8,
}

impl KeyState {
    fn slots_mut(&mut self) -> [&mut u8; 5] {
        [
            &mut self.up,
            &mut self.down,
            &mut self.left,
            &mut self.right,
            &mut self.fire,
        ]
    }
}

/// Manages input polling and folds raw key events into a per-frame snapshot
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// Whether the terminal reports key releases
    release_events: bool,
}

impl InputManager {
    pub fn new(release_events: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            release_events,
        }
    }

    /// Polls for all pending events without blocking.
    /// Should be called once per frame before reading actions or held keys.
    pub fn poll_events(&mut self, screen: Screen) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            self.handle_event(&event, screen);
        }

        Ok(())
    }

    pub fn handle_event(&mut self, event: &Event, screen: Screen) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event, screen),
            Event::Mouse(mouse_event) => {
                if screen == Screen::Menu && matches!(mouse_event.kind, MouseEventKind::Down(_)) {
                    self.oneshot_actions.push(InputAction::Start);
                }
            }
            _ => {}
        }
    }

    fn handle_key_event(&mut self, key_event: &KeyEvent, screen: Screen) {
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.handle_key_press(key_event, screen),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
        }
    }

    fn handle_key_press(&mut self, key_event: &KeyEvent, screen: Screen) {
        // Quit works on every screen
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match screen {
            Screen::Menu => {
                if matches!(key_event.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.oneshot_actions.push(InputAction::Start);
                }
            }
            Screen::Game => {
                let hold = if self.release_events {
                    HELD_UNTIL_RELEASE
                } else {
                    REPEAT_HOLD_FRAMES
                };
                let keys = &mut self.key_state;

                match key_event.code {
                    KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                        keys.up = hold;
                        keys.down = 0;
                    }
                    KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                        keys.down = hold;
                        keys.up = 0;
                    }
                    KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                        keys.left = hold;
                        keys.right = 0;
                    }
                    KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                        keys.right = hold;
                        keys.left = 0;
                    }
                    KeyCode::Char(' ') => keys.fire = hold,
                    _ => {}
                }
            }
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        let keys = &mut self.key_state;
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => keys.up = 0,
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => keys.down = 0,
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => keys.left = 0,
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => keys.right = 0,
            KeyCode::Char(' ') => keys.fire = 0,
            _ => {}
        }
    }

    /// One-shot actions collected by the last poll
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    /// Snapshot of the controls held this frame
    pub fn held(&self) -> FrameInput {
        FrameInput {
            up: self.key_state.up > 0,
            down: self.key_state.down > 0,
            left: self.key_state.left > 0,
            right: self.key_state.right > 0,
            fire: self.key_state.fire > 0,
        }
    }

    /// Ages held keys by one frame when releases are not reported
    pub fn end_frame(&mut self) {
        if self.release_events {
            return;
        }
        for slot in self.key_state.slots_mut() {
            *slot = slot.saturating_sub(1);
        }
    }

    /// Forgets all held keys, e.g. when switching screens
    pub fn reset(&mut self) {
        self.key_state = KeyState::default();
        self.oneshot_actions.clear();
    }
}
