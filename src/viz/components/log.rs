use crossterm::event::{Event, KeyCode};
use log::LevelFilter;
use ratatui::{prelude::*, widgets::WidgetRef};
use tui_logger::{TuiLoggerSmartWidget, TuiWidgetEvent, TuiWidgetState};

use crate::viz::util::key_press;

use super::Component;

/// Per-update traces from the Q-table drown out everything else, so they start hidden
const QUIET_TARGETS: [&str; 2] = ["maze_runner::algo::q_table", "maze_runner::episode"];

/// Scrollable view over everything the episode logs
pub struct Logs {
    state: TuiWidgetState,
}

impl Logs {
    pub fn new() -> Self {
        let state = QUIET_TARGETS.iter().fold(
            TuiWidgetState::new().set_default_display_level(LevelFilter::Debug),
            |state, target| state.set_level_for_target(target, LevelFilter::Info),
        );
        Self { state }
    }
}

/// Map a key onto the logger widget's navigation
fn widget_event(code: KeyCode) -> Option<TuiWidgetEvent> {
    let event = match code {
        KeyCode::Char(' ') => TuiWidgetEvent::SpaceKey,
        KeyCode::Esc => TuiWidgetEvent::EscapeKey,
        KeyCode::PageUp => TuiWidgetEvent::PrevPageKey,
        KeyCode::PageDown => TuiWidgetEvent::NextPageKey,
        KeyCode::Up => TuiWidgetEvent::UpKey,
        KeyCode::Down => TuiWidgetEvent::DownKey,
        KeyCode::Left => TuiWidgetEvent::LeftKey,
        KeyCode::Right => TuiWidgetEvent::RightKey,
        KeyCode::Char('+') => TuiWidgetEvent::PlusKey,
        KeyCode::Char('-') => TuiWidgetEvent::MinusKey,
        KeyCode::Char('s') => TuiWidgetEvent::HideKey,
        KeyCode::Char('f') => TuiWidgetEvent::FocusKey,
        _ => return None,
    };
    Some(event)
}

impl WidgetRef for Logs {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        TuiLoggerSmartWidget::default()
            .style(Style::default().white())
            .style_error(Style::default().light_red())
            .style_warn(Style::default().light_yellow())
            .style_info(Style::default().cyan())
            .output_separator(' ')
            .state(&self.state)
            .render(area, buf);
    }
}

impl Component for Logs {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        match key_press(event).and_then(widget_event) {
            Some(widget_event) => {
                self.state.transition(widget_event);
                true
            }
            None => false,
        }
    }
}
