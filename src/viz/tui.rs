use std::{
    io::{self, stdout, Stdout},
    ops::{Deref, DerefMut},
    panic,
};

use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

type Backend = CrosstermBackend<Stdout>;

/// The alternate screen in raw mode, given back to the shell on drop
///
/// Dropping restores the terminal on every exit path, including early returns
/// from a failed draw. A panic hook covers unwinding on the render thread.
pub struct Screen {
    terminal: Terminal<Backend>,
}

impl Screen {
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
        enable_raw_mode()?;
        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout()))?,
        })
    }
}

impl Deref for Screen {
    type Target = Terminal<Backend>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Screen {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = restore();
    }
}

fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, cursor::Show)
}

fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}
