use log::{debug, info};

use crate::{
    algo::QTable,
    episode::Tick,
    maze::{Maze, Pos},
};

/// What an [`Observer`] sees after every tick
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub tick: Tick,
    pub maze: &'a Maze,
    pub goal: Pos,
}

impl Snapshot<'_> {
    /// The agent's position after the tick
    pub fn position(&self) -> Pos {
        self.tick.position
    }
}

/// Receives episode progress from a [`Driver`](crate::driver::Driver)
///
/// Observers only watch. Nothing they do feeds back into learning, except that
/// [`keep_running`](Observer::keep_running) may stop the driver at the next tick boundary.
pub trait Observer {
    /// Called once per tick with the post-move position
    fn on_step(&mut self, snapshot: &Snapshot<'_>);

    /// Called once with the final table when the goal is reached
    fn on_terminate(&mut self, q_table: &QTable);

    /// Whether the driver should keep ticking
    fn keep_running(&self) -> bool {
        true
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_step(&mut self, snapshot: &Snapshot<'_>) {
        (**self).on_step(snapshot)
    }

    fn on_terminate(&mut self, q_table: &QTable) {
        (**self).on_terminate(q_table)
    }

    fn keep_running(&self) -> bool {
        (**self).keep_running()
    }
}

/// Ignores everything
#[derive(Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_step(&mut self, _snapshot: &Snapshot<'_>) {}

    fn on_terminate(&mut self, _q_table: &QTable) {}
}

/// Writes every snapshot to the log
#[derive(Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn on_step(&mut self, snapshot: &Snapshot<'_>) {
        let Tick {
            index,
            action,
            position,
            reward,
            ..
        } = snapshot.tick;
        debug!("tick {index}: {action:?} -> {position:?} ({reward})");
    }

    fn on_terminate(&mut self, q_table: &QTable) {
        info!("goal reached, final Q-table over {} states:", q_table.num_states());
        for line in q_table.to_string().lines() {
            info!("{line}");
        }
    }
}

/// Keeps the visited path and the final table, optionally cancelling after a number of steps
#[derive(Default)]
pub struct Recorder {
    pub path: Vec<Pos>,
    pub rewards: Vec<f32>,
    pub q_table: Option<QTable>,
    stop_after: Option<usize>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the driver to stop once `steps` snapshots have been seen
    pub fn stop_after(steps: usize) -> Self {
        Self {
            stop_after: Some(steps),
            ..Self::default()
        }
    }
}

impl Observer for Recorder {
    fn on_step(&mut self, snapshot: &Snapshot<'_>) {
        self.path.push(snapshot.position());
        self.rewards.push(snapshot.tick.reward);
    }

    fn on_terminate(&mut self, q_table: &QTable) {
        self.q_table = Some(q_table.clone());
    }

    fn keep_running(&self) -> bool {
        self.stop_after.map_or(true, |n| self.path.len() < n)
    }
}
