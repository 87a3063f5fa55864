pub mod help;
pub mod log;
pub mod maze;

use crossterm::event::Event;
use ratatui::widgets::WidgetRef;

pub use self::log::Logs;
pub use maze::MazeView;

/// A widget that reacts to terminal input
pub trait Component: WidgetRef {
    /// **Returns** whether the event was consumed
    fn handle_ui_event(&mut self, event: &Event) -> bool;
}
