//! Terminal visualizer for a running episode
//!
//! [`init`] installs [`tui_logger`] as the log backend, starts the render loop on its
//! own thread, and hands back a [`TuiObserver`] to pass to a [`Driver`](crate::driver::Driver).

use std::{
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
};

use crate::{
    algo::QTable,
    maze::{Maze, Pos},
    observer::{Observer, Snapshot},
    policy::Action,
};

pub use app::App;

mod app;
mod components;
mod tui;
mod util;

/// Messages from the learning thread to the render loop
pub enum Update {
    Step {
        tick: u64,
        position: Pos,
        action: Action,
        reward: f32,
    },
    Terminated {
        policy: Vec<Action>,
        values: Vec<f32>,
    },
}

/// Forwards episode progress to the render thread
///
/// Stops the driver once the user quits the visualizer.
pub struct TuiObserver {
    tx: Sender<Update>,
    quit: Arc<AtomicBool>,
}

impl TuiObserver {
    fn send(&mut self, update: Update) {
        if self.tx.send(update).is_err() {
            self.quit.store(true, Ordering::Relaxed);
        }
    }
}

impl Observer for TuiObserver {
    fn on_step(&mut self, snapshot: &Snapshot<'_>) {
        let tick = snapshot.tick;
        self.send(Update::Step {
            tick: tick.index,
            position: tick.position,
            action: tick.action,
            reward: tick.reward,
        });
    }

    fn on_terminate(&mut self, q_table: &QTable) {
        let values = (0..q_table.num_states()).map(|s| q_table.max(s)).collect();
        self.send(Update::Terminated {
            policy: q_table.policy(),
            values,
        });
    }

    fn keep_running(&self) -> bool {
        !self.quit.load(Ordering::Relaxed)
    }
}

/// Install the TUI logger and spawn the render loop for `maze`
///
/// **Returns** the render thread's handle and the observer feeding it
pub fn init(maze: Maze, start: Pos, goal: Pos) -> (JoinHandle<io::Result<()>>, TuiObserver) {
    let _ = tui_logger::init_logger(log::LevelFilter::Trace);
    tui_logger::set_default_level(log::LevelFilter::Debug);

    let (tx, rx) = mpsc::channel();
    let quit = Arc::new(AtomicBool::new(false));
    let mut app = App::new(maze, start, goal, Arc::clone(&quit));
    let handle = thread::spawn(move || app.run(rx));

    (handle, TuiObserver { tx, quit })
}
