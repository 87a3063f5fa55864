use log::{info, trace};

use crate::{
    agent::Agent,
    algo::{QTable, QTableAgent},
    config::MazeConfig,
    env::Environment,
    error::ConfigError,
    exp::Exp,
    gym::MazeEnv,
    maze::{Maze, Pos},
    observer::Snapshot,
    policy::Action,
};

/// Lifecycle of an [`Episode`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Terminated,
}

/// Record of a single learning step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// 1-based tick counter
    pub index: u64,
    pub state: usize,
    pub action: Action,
    /// The cell the agent tried to enter
    pub candidate: Pos,
    /// The agent's position after the tick
    pub position: Pos,
    pub blocked: bool,
    pub next_state: usize,
    pub reward: f32,
    /// `Q(state, action)` after the update
    pub q_value: f32,
    pub status: Status,
}

/// A single greedy Q-learning run from the start cell until the goal is reached
///
/// The episode exclusively owns its position and its Q-table. Every [`tick`](Episode::tick)
/// commits exactly one table update before returning, so a caller may stop between
/// any two ticks without leaving the table half-written.
pub struct Episode {
    env: MazeEnv,
    agent: QTableAgent,
    status: Status,
    ticks: u64,
    termination_reported: bool,
}

impl Episode {
    /// Validate `config` and set up an all-zero table with the agent on the start cell
    pub fn new(config: MazeConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let num_states = config.maze.rows() * config.maze.cols();
        let agent = QTableAgent::new(num_states, config.q)?;
        info!(
            "new episode on a {}x{} maze, {:?} -> {:?}, alpha {} gamma {}",
            config.maze.rows(),
            config.maze.cols(),
            config.start,
            config.goal,
            config.q.alpha,
            config.q.gamma,
        );

        let env = MazeEnv::new(config);
        let status = if env.is_active() {
            Status::Running
        } else {
            Status::Terminated
        };

        Ok(Self {
            env,
            agent,
            status,
            ticks: 0,
            termination_reported: false,
        })
    }

    /// Run one learning step
    ///
    /// **Returns** `None` without touching anything once the episode has terminated
    pub fn tick(&mut self) -> Option<Tick> {
        if self.status == Status::Terminated {
            return None;
        }

        let state = self.env.state();
        let action = <QTableAgent as Agent<MazeEnv>>::act(&self.agent, state);
        let (mv, reward) = self.env.advance(action);
        let next_state = self.env.state();
        let q_value = self.agent.learn(Exp::<MazeEnv> {
            state,
            action,
            next_state,
            reward,
        });

        self.ticks += 1;
        if !self.env.is_active() {
            self.status = Status::Terminated;
            info!("goal {:?} reached after {} ticks", self.env.goal(), self.ticks);
        }

        let tick = Tick {
            index: self.ticks,
            state,
            action,
            candidate: mv.candidate,
            position: mv.position,
            blocked: mv.blocked,
            next_state,
            reward,
            q_value,
            status: self.status,
        };
        trace!("{tick:?}");
        Some(tick)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_terminated(&self) -> bool {
        self.status == Status::Terminated
    }

    /// Claim the one-time termination report
    ///
    /// **Returns** `true` exactly once, on the first call after the episode has terminated
    pub fn take_termination(&mut self) -> bool {
        if self.is_terminated() && !self.termination_reported {
            self.termination_reported = true;
            true
        } else {
            false
        }
    }

    /// Number of ticks processed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn position(&self) -> Pos {
        self.env.position()
    }

    pub fn goal(&self) -> Pos {
        self.env.goal()
    }

    pub fn maze(&self) -> &Maze {
        self.env.maze()
    }

    pub fn q_table(&self) -> &QTable {
        self.agent.q_table()
    }

    pub fn into_q_table(self) -> QTable {
        self.agent.into_q_table()
    }

    /// Observer view of `tick` against this episode's maze
    pub fn snapshot(&self, tick: Tick) -> Snapshot<'_> {
        Snapshot {
            tick,
            maze: self.env.maze(),
            goal: self.env.goal(),
        }
    }
}
