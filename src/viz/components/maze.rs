use crossterm::event::{Event, KeyCode};
use ratatui::{prelude::*, widgets::*};

use crate::{
    codec::StateCodec,
    maze::{Maze, Pos},
    policy::Action,
    viz::util::key_press,
};

use super::Component;

/// Learned policy and state values, available once the goal is reached
struct Policy {
    actions: Vec<Action>,
    values: Vec<f32>,
    bounds: (f32, f32),
}

/// Draws the maze, the agent and the cells it has visited
///
/// Once a policy is set, `p` toggles an overlay of greedy arrows colored by state value.
pub struct MazeView {
    maze: Maze,
    codec: StateCodec,
    goal: Pos,
    position: Pos,
    visits: Vec<u32>,
    policy: Option<Policy>,
    show_policy: bool,
}

impl MazeView {
    pub fn new(maze: Maze, start: Pos, goal: Pos) -> Self {
        let codec = StateCodec::for_maze(&maze);
        let mut visits = vec![0; codec.num_states()];
        visits[codec.to_state(start)] = 1;
        Self {
            maze,
            codec,
            goal,
            position: start,
            visits,
            policy: None,
            show_policy: false,
        }
    }

    pub fn move_to(&mut self, pos: Pos) {
        self.position = pos;
        self.visits[self.codec.to_state(pos)] += 1;
    }

    pub fn set_policy(&mut self, actions: Vec<Action>, values: Vec<f32>) {
        let bounds = values
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        self.policy = Some(Policy {
            actions,
            values,
            bounds,
        });
        self.show_policy = true;
    }

    pub fn width(&self) -> u16 {
        self.maze.cols() as u16 * 2 + 2
    }

    pub fn height(&self) -> u16 {
        self.maze.rows() as u16 + 2
    }

    fn cell_span(&self, pos: Pos) -> Span<'static> {
        if pos == self.position {
            return Span::from("●●").yellow().bold();
        }
        if pos == self.goal {
            return Span::from("██").green();
        }
        if self.maze.is_wall(pos) {
            return Span::from("██").dark_gray();
        }

        let state = self.codec.to_state(pos);
        if let (true, Some(policy)) = (self.show_policy, &self.policy) {
            let (lo, hi) = policy.bounds;
            let t = if hi > lo {
                ((policy.values[state] - lo) / (hi - lo)) as f64
            } else {
                1.0
            };
            let arrow = policy.actions[state].arrow();
            return Span::styled(
                format!("{arrow} "),
                Style::default().fg(Color::from_hsl(120.0 * t, 80.0, 55.0)),
            );
        }

        match self.visits[state] {
            0 => Span::raw("  "),
            n => {
                let lightness = (10.0 + 4.0 * n as f64).min(45.0);
                Span::styled("  ", Style::default().bg(Color::from_hsl(220.0, 50.0, lightness)))
            }
        }
    }
}

impl WidgetRef for MazeView {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let lines = (0..self.maze.rows() as i32)
            .map(|row| {
                (0..self.maze.cols() as i32)
                    .map(|col| self.cell_span((row, col)))
                    .collect::<Vec<_>>()
            })
            .map(Line::from)
            .collect::<Vec<_>>();

        let title = if self.show_policy {
            "Maze (policy)"
        } else {
            "Maze"
        };

        Paragraph::new(lines)
            .block(Block::bordered().border_type(BorderType::Rounded).title(title))
            .render(area, buf);
    }
}

impl Component for MazeView {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        match key_press(event) {
            Some(KeyCode::Char('p')) if self.policy.is_some() => {
                self.show_policy = !self.show_policy;
                true
            }
            _ => false,
        }
    }
}
