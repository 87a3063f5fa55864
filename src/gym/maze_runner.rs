use log::debug;

use crate::{
    codec::StateCodec,
    config::MazeConfig,
    env::Environment,
    maze::{Maze, Pos},
    policy::{self, Action, Move},
    reward::Rewards,
};

/// A robot walking a static maze toward a goal cell
///
/// States are flat cell indices from a [`StateCodec`]. Moves into walls or off
/// the grid leave the robot in place and cost the wall penalty. The episode
/// ends when the robot stands on the goal.
pub struct MazeEnv {
    maze: Maze,
    codec: StateCodec,
    goal: Pos,
    rewards: Rewards,
    pos: Pos,
}

impl MazeEnv {
    /// Build the environment from an already validated configuration
    pub fn new(config: MazeConfig) -> Self {
        let MazeConfig {
            maze,
            start,
            goal,
            rewards,
            ..
        } = config;

        Self {
            codec: StateCodec::for_maze(&maze),
            maze,
            goal,
            rewards,
            pos: start,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn codec(&self) -> StateCodec {
        self.codec
    }

    pub fn position(&self) -> Pos {
        self.pos
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    /// Resolve `action` from the current position without committing it
    pub fn attempt_move(&self, action: Action) -> Move {
        policy::attempt_move(&self.maze, self.pos, action)
    }

    /// Resolve and commit `action`
    ///
    /// **Returns** the resolved move and its reward
    pub fn advance(&mut self, action: Action) -> (Move, f32) {
        let mv = self.attempt_move(action);
        if mv.blocked {
            debug!("{action:?} from {:?} blocked at {:?}", self.pos, mv.candidate);
        }
        self.pos = mv.position;
        (mv, self.rewards.for_move(&mv, self.goal))
    }
}

impl Environment for MazeEnv {
    type State = usize;
    type Action = Action;

    fn is_active(&self) -> bool {
        self.pos != self.goal
    }

    fn state(&self) -> Self::State {
        self.codec.to_state(self.pos)
    }

    fn step(&mut self, action: Self::Action) -> (Self::State, f32) {
        let (_, reward) = self.advance(action);
        (self.state(), reward)
    }
}
