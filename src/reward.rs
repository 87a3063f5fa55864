use crate::{
    maze::{Maze, Pos},
    policy::Move,
};

/// The reward table for a single step
///
/// Reaching the goal wins over everything, then a wall hit, then the ordinary step cost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rewards {
    pub goal: f32,
    pub wall: f32,
    pub step: f32,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            goal: 100.0,
            wall: -10.0,
            step: -1.0,
        }
    }
}

impl Rewards {
    /// Reward for the agent attempting to enter `pos`
    pub fn evaluate(&self, maze: &Maze, pos: Pos, goal: Pos) -> f32 {
        if pos == goal {
            self.goal
        } else if maze.is_wall(pos) {
            self.wall
        } else {
            self.step
        }
    }

    /// Reward for a resolved move
    ///
    /// A blocked move is charged for the wall it tried to enter, not for the
    /// cell it stayed in.
    pub fn for_move(&self, mv: &Move, goal: Pos) -> f32 {
        if mv.candidate == goal {
            self.goal
        } else if mv.blocked {
            self.wall
        } else {
            self.step
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::{
        maze::layouts::ROBOT_MAZE,
        policy::{attempt_move, Action},
    };

    #[test]
    fn evaluate_cases() {
        let maze: Maze = "..\n#.".parse().unwrap();
        let rewards = Rewards::default();
        let goal = (1, 1);
        assert_eq!(rewards.evaluate(&maze, (1, 1), goal), 100.0);
        assert_eq!(rewards.evaluate(&maze, (1, 0), goal), -10.0);
        assert_eq!(rewards.evaluate(&maze, (-1, 0), goal), -10.0, "Off-grid is a wall");
        assert_eq!(rewards.evaluate(&maze, (0, 1), goal), -1.0);
    }

    #[test]
    fn evaluate_everywhere() {
        let maze = Maze::from_bits(&ROBOT_MAZE).unwrap();
        let rewards = Rewards::default();
        let goal = (9, 9);
        for row in -1..=10 {
            for col in -1..=10 {
                let pos = (row, col);
                let expected = if pos == goal {
                    100.0
                } else if maze.is_wall(pos) {
                    -10.0
                } else {
                    -1.0
                };
                assert_eq!(rewards.evaluate(&maze, pos, goal), expected, "{pos:?}");
            }
        }
    }

    #[test]
    fn for_move_matches_candidate() {
        let maze = Maze::from_bits(&ROBOT_MAZE).unwrap();
        let rewards = Rewards::default();
        let goal = (9, 9);
        for pos in maze.positions().filter(|&p| !maze.is_wall(p)) {
            for action in Action::iter() {
                let mv = attempt_move(&maze, pos, action);
                assert_eq!(
                    rewards.for_move(&mv, goal),
                    rewards.evaluate(&maze, mv.candidate, goal),
                    "{pos:?} + {action:?}"
                );
            }
        }
    }

    #[test]
    fn blocked_from_goal_costs_wall_penalty() {
        let maze = Maze::open(2, 2).unwrap();
        let mv = attempt_move(&maze, (1, 1), Action::Down);
        assert!(mv.blocked);
        assert_eq!(mv.position, (1, 1), "Agent stays on the goal");
        assert_eq!(Rewards::default().for_move(&mv, (1, 1)), -10.0);
    }

    #[test]
    fn blocked_move_costs_wall_penalty() {
        let maze = Maze::open(4, 4).unwrap();
        let rewards = Rewards::default();
        for action in [Action::Up, Action::Left] {
            let mv = attempt_move(&maze, (0, 0), action);
            assert_eq!(mv.position, (0, 0));
            assert_eq!(rewards.for_move(&mv, (3, 3)), -10.0);
        }
    }
}
