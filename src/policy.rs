use strum::{EnumIter, FromRepr, VariantArray};

use crate::{
    algo::QTable,
    maze::{Maze, Pos},
};

/// One of the four moves available in every cell
///
/// The discriminant is the Q-table column, and its order breaks ties during
/// greedy selection.
#[derive(EnumIter, VariantArray, FromRepr, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Action {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Action {
    pub const COUNT: usize = 4;

    /// `(row, col)` offset applied by this action
    pub fn delta(self) -> Pos {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn arrow(self) -> char {
        match self {
            Action::Up => '↑',
            Action::Down => '↓',
            Action::Left => '←',
            Action::Right => '→',
        }
    }
}

/// The result of attempting an action from some position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    /// The cell the agent tried to enter
    pub candidate: Pos,
    /// Where the agent ends up
    pub position: Pos,
    /// Whether the candidate was a wall (or off the grid) and the agent stayed put
    pub blocked: bool,
}

/// Apply `action` to `pos`, rejecting moves into walls or off the grid
pub fn attempt_move(maze: &Maze, pos: Pos, action: Action) -> Move {
    let (dr, dc) = action.delta();
    let candidate = (pos.0 + dr, pos.1 + dc);
    let blocked = maze.is_wall(candidate);
    Move {
        candidate,
        position: if blocked { pos } else { candidate },
        blocked,
    }
}

/// The position reached by applying `action` to `pos`
pub fn apply_action(maze: &Maze, pos: Pos, action: Action) -> Pos {
    attempt_move(maze, pos, action).position
}

/// Pick the highest valued action for `state`, preferring the lowest index on ties
pub fn select_action(q_table: &QTable, state: usize) -> Action {
    q_table.best_action(state)
}
