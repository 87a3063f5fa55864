use crate::{
    algo::QTableConfig,
    error::ConfigError,
    maze::{layouts::ROBOT_MAZE, Maze, Pos},
    reward::Rewards,
};

/// Everything needed to start an episode, fixed for the lifetime of the run
#[derive(Clone, Debug, PartialEq)]
pub struct MazeConfig {
    pub maze: Maze,
    pub start: Pos,
    pub goal: Pos,
    pub q: QTableConfig,
    pub rewards: Rewards,
}

impl MazeConfig {
    /// Configuration with the default hyperparameters and reward table
    pub fn new(maze: Maze, start: Pos, goal: Pos) -> Self {
        Self {
            maze,
            start,
            goal,
            q: QTableConfig::default(),
            rewards: Rewards::default(),
        }
    }

    /// The 10x10 robot maze, from the top-left corner to the bottom-right one
    pub fn robot_maze() -> Result<Self, ConfigError> {
        let maze = Maze::from_bits(&ROBOT_MAZE)?;
        let goal = (maze.rows() as i32 - 1, maze.cols() as i32 - 1);
        Ok(Self::new(maze, (0, 0), goal))
    }

    pub fn with_q_config(mut self, q: QTableConfig) -> Self {
        self.q = q;
        self
    }

    pub fn with_rewards(mut self, rewards: Rewards) -> Self {
        self.rewards = rewards;
        self
    }

    /// Reject configurations the learning loop cannot run on
    ///
    /// Start and goal must be path cells inside the grid, and the update rule's
    /// hyperparameters must lie in `(0,1]`. Reachability of the goal is not checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_cell("start", self.start)?;
        self.check_cell("goal", self.goal)?;
        self.q.validate()
    }

    fn check_cell(&self, which: &'static str, pos: Pos) -> Result<(), ConfigError> {
        if !self.maze.contains(pos) {
            return Err(ConfigError::OutOfBounds {
                which,
                pos,
                rows: self.maze.rows(),
                cols: self.maze.cols(),
            });
        }
        if self.maze.is_wall(pos) {
            return Err(ConfigError::OnWall { which, pos });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robot_maze_is_valid() {
        let config = MazeConfig::robot_maze().unwrap();
        assert_eq!(config.start, (0, 0));
        assert_eq!(config.goal, (9, 9));
        assert_eq!(config.q, QTableConfig { alpha: 0.1, gamma: 0.9 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_positions() {
        let maze: Maze = "..\n#.".parse().unwrap();
        let config = MazeConfig::new(maze.clone(), (0, 0), (2, 1));
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfBounds {
                which: "goal",
                pos: (2, 1),
                rows: 2,
                cols: 2
            })
        );

        let config = MazeConfig::new(maze.clone(), (-1, 0), (1, 1));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfBounds { which: "start", .. })
        ));

        let config = MazeConfig::new(maze.clone(), (1, 0), (1, 1));
        assert_eq!(
            config.validate(),
            Err(ConfigError::OnWall {
                which: "start",
                pos: (1, 0)
            })
        );

        let config = MazeConfig::new(maze, (0, 0), (1, 0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OnWall { which: "goal", .. })
        ));
    }

    #[test]
    fn rejects_bad_hyperparameters() {
        let config = MazeConfig::robot_maze()
            .unwrap()
            .with_q_config(QTableConfig { alpha: 0.1, gamma: 1.1 });
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::OutOfInterval { name: "gamma", .. }), "{err}");
    }

    #[test]
    fn overrides() {
        let rewards = Rewards {
            goal: 1.0,
            wall: -1.0,
            step: -0.1,
        };
        let config = MazeConfig::robot_maze().unwrap().with_rewards(rewards);
        assert_eq!(config.rewards, rewards);
    }
}
