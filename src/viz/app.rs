use std::{
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, TryRecvError},
        Arc,
    },
    time::Duration,
};

use crossterm::event::{self, KeyCode};
use ratatui::{layout::Flex, prelude::*, widgets::*};

use super::{
    components::{help::render_help, Component, Logs, MazeView},
    tui,
    util::key_press,
    Update,
};
use crate::{
    maze::{Maze, Pos},
    policy::Action,
};

const TABS: [&str; 2] = ["Maze", "Logs"];

#[derive(Default, PartialEq)]
enum State {
    #[default]
    Running,
    /// The goal was reached, the final policy is on screen
    Done,
    /// The learning side hung up before reaching the goal
    Detached,
    Quit,
}

/// The root TUI component which holds the episode view and runs the render loop
pub struct App {
    state: State,
    tick: u64,
    last: Option<(Action, f32)>,
    total_reward: f32,
    selected_tab: usize,
    show_help: bool,
    maze: MazeView,
    logs: Logs,
    quit: Arc<AtomicBool>,
}

impl App {
    pub fn new(maze: Maze, start: Pos, goal: Pos, quit: Arc<AtomicBool>) -> Self {
        Self {
            state: State::default(),
            tick: 0,
            last: None,
            total_reward: 0.0,
            selected_tab: 0,
            show_help: false,
            maze: MazeView::new(maze, start, goal),
            logs: Logs::new(),
            quit,
        }
    }

    /// Take over the terminal and run the main loop until the user quits
    ///
    /// The driver is told to stop however the loop ends.
    pub fn run(&mut self, rx: Receiver<Update>) -> io::Result<()> {
        let result = self.render_loop(&rx);
        self.quit.store(true, Ordering::Relaxed);
        result
    }

    fn render_loop(&mut self, rx: &Receiver<Update>) -> io::Result<()> {
        let mut screen = tui::Screen::enter()?;

        while self.state != State::Quit {
            self.drain(rx);

            screen.draw(|frame| frame.render_widget(&*self, frame.size()))?;

            if event::poll(Duration::from_millis(16))? {
                self.handle_event(event::read()?);
            }
        }

        Ok(())
    }

    fn drain(&mut self, rx: &Receiver<Update>) {
        loop {
            match rx.try_recv() {
                Ok(update) => self.apply(update),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.state == State::Running {
                        self.state = State::Detached;
                    }
                    break;
                }
            }
        }
    }

    fn apply(&mut self, update: Update) {
        match update {
            Update::Step {
                tick,
                position,
                action,
                reward,
            } => {
                self.tick = tick;
                self.last = Some((action, reward));
                self.total_reward += reward;
                self.maze.move_to(position);
            }
            Update::Terminated { policy, values } => {
                self.maze.set_policy(policy, values);
                self.state = State::Done;
            }
        }
    }

    fn handle_event(&mut self, event: event::Event) {
        match key_press(&event) {
            Some(KeyCode::Char('q')) => self.state = State::Quit,
            Some(KeyCode::Char('h')) => self.show_help = !self.show_help,
            Some(KeyCode::Tab) => self.selected_tab = (self.selected_tab + 1) % TABS.len(),
            _ => {
                let _ = match self.selected_tab {
                    0 => self.maze.handle_ui_event(&event),
                    _ => self.logs.handle_ui_event(&event),
                };
            }
        }
    }

    fn status_line(&self) -> Line<'_> {
        let state = match self.state {
            State::Running => Span::from("running").cyan(),
            State::Done => Span::from("goal reached").light_green().bold(),
            State::Detached => Span::from("stopped").light_yellow(),
            State::Quit => Span::from("quitting"),
        };
        let last = match self.last {
            Some((action, reward)) => format!("{} {reward:+}", action.arrow()),
            None => String::from("-"),
        };

        Line::from(vec![
            state,
            Span::raw(format!(
                "  tick {}  last {last}  return {:.1}",
                self.tick, self.total_reward
            )),
        ])
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Layout
        let [menu_area, main_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .areas(area);

        // Menu
        Tabs::new(TABS)
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .bold()
            .highlight_style(Style::default().light_green())
            .select(self.selected_tab)
            .render(menu_area, buf);

        // Main
        match self.selected_tab {
            0 => {
                let [maze_area] = Layout::horizontal([Constraint::Length(self.maze.width())])
                    .flex(Flex::Center)
                    .areas(main_area);
                let [maze_area] = Layout::vertical([Constraint::Length(self.maze.height())])
                    .areas(maze_area);
                self.maze.render_ref(maze_area, buf);
            }
            1 => self.logs.render_ref(main_area, buf),
            _ => {}
        }

        // Status
        Paragraph::new(self.status_line())
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Episode"),
            )
            .render(status_area, buf);

        if self.show_help {
            render_help(area, buf, self.selected_tab);
        }
    }
}
