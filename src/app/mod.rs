mod renderer;

use std::io::{Stdout, Write};

use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEventKind},
    queue,
    terminal::{self, ClearType},
};

use crate::{
    app::renderer::Renderer,
    export::{DATAPACK_FILE_NAME, block_or_default, write_datapack},
    maze::{Coord, Direction, parse_size},
    session::{Session, SessionConfig},
};

/// Things the user can ask for from the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserAction {
    Move(Direction),
    ToggleEditMode,
    ToggleCell,
    Regenerate,
    Resize,
    ToggleRevealPaths,
    Export,
    Quit,
}

impl UserAction {
    fn from_key(code: KeyCode) -> Option<UserAction> {
        let action = match code {
            KeyCode::Down | KeyCode::Char('j') => UserAction::Move(Direction::Down),
            KeyCode::Right | KeyCode::Char('l') => UserAction::Move(Direction::Right),
            KeyCode::Up | KeyCode::Char('k') => UserAction::Move(Direction::Up),
            KeyCode::Left | KeyCode::Char('h') => UserAction::Move(Direction::Left),
            KeyCode::Char('e') => UserAction::ToggleEditMode,
            KeyCode::Char(' ') | KeyCode::Enter => UserAction::ToggleCell,
            KeyCode::Char('r') => UserAction::Regenerate,
            KeyCode::Char('s') => UserAction::Resize,
            KeyCode::Char('p') => UserAction::ToggleRevealPaths,
            KeyCode::Char('x') => UserAction::Export,
            KeyCode::Char('q') | KeyCode::Esc => UserAction::Quit,
            _ => return None,
        };
        Some(action)
    }
}

/// Interactive front-end: owns the session and forwards every key press to it.
pub struct App {
    session: Session,
    renderer: Renderer,
    cursor: Coord,
    /// Feedback from the last action, shown on the status row
    message: String,
}

impl App {
    pub fn new(config: SessionConfig) -> Self {
        let session = Session::new(config);
        let cursor = session.maze().start();
        Self {
            session,
            renderer: Renderer::new(),
            cursor,
            message: String::from("ready"),
        }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main application loop
    pub fn run(&mut self, stdout: &mut Stdout) -> std::io::Result<()> {
        tracing::info!("Started main app loop");
        loop {
            self.renderer
                .draw(stdout, &self.session, self.cursor, &self.message)?;

            let code = match event::read()? {
                event::Event::Key(event::KeyEvent { code, kind, .. })
                    if kind == KeyEventKind::Press =>
                {
                    code
                }
                // Redraw on resize and on anything else
                _ => continue,
            };
            let Some(action) = UserAction::from_key(code) else {
                continue;
            };
            tracing::debug!("[app loop] action {:?}", action);
            if action == UserAction::Quit {
                break;
            }
            self.apply(stdout, action)?;
        }
        tracing::info!("Exiting main app loop");
        Ok(())
    }

    fn apply(&mut self, stdout: &mut Stdout, action: UserAction) -> std::io::Result<()> {
        match action {
            UserAction::Move(direction) => {
                if let Some(next) = direction.step(self.cursor, 1)
                    && self.session.maze().is_in_bounds(next)
                {
                    self.cursor = next;
                }
            }
            UserAction::ToggleEditMode => {
                let on = self.session.toggle_edit_mode();
                self.message = format!("edit mode {}", if on { "on" } else { "off" });
            }
            UserAction::ToggleCell => {
                self.message = if self.session.toggle_cell(self.cursor) {
                    format!("toggled {:?}", self.cursor)
                } else {
                    "press e to enter edit mode first".to_string()
                };
            }
            UserAction::Regenerate => {
                self.session.regenerate(self.session.size() as i64);
                self.message = "new maze".to_string();
            }
            UserAction::Resize => {
                let prompt = format!("Size (odd, 5 to 1111) [{}]: ", self.session.size());
                if let Some(input) = self.prompt(stdout, &prompt)? {
                    let size = if input.trim().is_empty() {
                        self.session.size()
                    } else {
                        parse_size(&input)
                    };
                    self.session.regenerate(size as i64);
                    self.clamp_cursor();
                    self.message = format!("new {0}x{0} maze", size);
                }
            }
            UserAction::ToggleRevealPaths => {
                let on = self.session.toggle_reveal_all_paths();
                self.message = format!("all paths {}", if on { "shown" } else { "hidden" });
            }
            UserAction::Export => {
                if let Some(block) = self.prompt(stdout, "Block type [stone]: ")? {
                    self.export(block_or_default(&block));
                }
            }
            UserAction::Quit => {}
        }
        Ok(())
    }

    fn export(&mut self, block: &str) {
        let dir = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                tracing::error!("[export] cannot resolve working directory: {}", e);
                self.message = format!("export failed: {}", e);
                return;
            }
        };
        self.message = match write_datapack(self.session.maze(), block, &dir) {
            Ok(path) => format!("exported {} to {}", block, path.display()),
            Err(e) => {
                tracing::error!("[export] writing {} failed: {}", DATAPACK_FILE_NAME, e);
                format!("export failed: {}", e)
            }
        };
    }

    fn clamp_cursor(&mut self) {
        let max = self.session.size() - 1;
        self.cursor = (self.cursor.0.min(max), self.cursor.1.min(max));
    }

    /// Read a line of text on the status row.
    /// Returns None if user cancels input with Esc
    fn prompt(&self, stdout: &mut Stdout, prompt: &str) -> std::io::Result<Option<String>> {
        let mut input = String::new();
        loop {
            self.renderer.draw_prompt(stdout, prompt, &input)?;
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if kind != KeyEventKind::Press {
                    // Only handle key press events
                    continue;
                }
                match code {
                    KeyCode::Enter => return Ok(Some(input)),
                    KeyCode::Esc => return Ok(None),
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Char(c) if !c.is_control() => input.push(c),
                    _ => {}
                }
            }
        }
    }
}
