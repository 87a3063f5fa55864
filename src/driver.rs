use std::{thread, time::Duration};

use log::{info, warn};

use crate::{episode::Episode, observer::Observer};

/// How a [`Driver::run`] ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    ReachedGoal { ticks: u64 },
    /// The observer asked to stop
    Cancelled { ticks: u64 },
    /// The configured tick cap was hit first
    TickLimit { ticks: u64 },
}

/// Steps an [`Episode`] and reports each tick to an [`Observer`]
///
/// Pacing and the optional tick cap live here, outside the learning step,
/// and never influence the table.
#[derive(Clone, Debug, Default)]
pub struct Driver {
    pace: Duration,
    max_ticks: Option<u64>,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for `pace` between ticks
    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = pace;
        self
    }

    /// Give up once the episode has run `max_ticks` ticks
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    /// Tick `episode` until the goal is reached, the observer cancels, or the tick cap is hit
    ///
    /// `on_terminate` fires once per episode, on the first run that sees it terminated.
    pub fn run<O: Observer>(&self, episode: &mut Episode, mut observer: O) -> Outcome {
        while !episode.is_terminated() {
            let ticks = episode.ticks();
            if !observer.keep_running() {
                info!("cancelled after {ticks} ticks");
                return Outcome::Cancelled { ticks };
            }
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                warn!("tick limit reached at {:?}", episode.position());
                return Outcome::TickLimit { ticks };
            }

            if let Some(tick) = episode.tick() {
                observer.on_step(&episode.snapshot(tick));
            }

            if !self.pace.is_zero() && !episode.is_terminated() {
                thread::sleep(self.pace);
            }
        }

        if episode.take_termination() {
            observer.on_terminate(episode.q_table());
        }
        Outcome::ReachedGoal {
            ticks: episode.ticks(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::MazeConfig,
        maze::Maze,
        observer::{NoopObserver, Recorder},
    };

    fn episode() -> Episode {
        let maze = Maze::open(4, 4).unwrap();
        Episode::new(MazeConfig::new(maze, (0, 0), (3, 3))).unwrap()
    }

    #[test]
    fn reaches_goal() {
        let mut episode = episode();
        let mut recorder = Recorder::new();
        let outcome = Driver::new().run(&mut episode, &mut recorder);

        let Outcome::ReachedGoal { ticks } = outcome else {
            panic!("unexpected outcome {outcome:?}");
        };
        assert_eq!(recorder.path.len() as u64, ticks, "One snapshot per tick");
        assert_eq!(recorder.path.last(), Some(&(3, 3)));
        assert_eq!(recorder.q_table.as_ref(), Some(episode.q_table()));
    }

    #[derive(Default)]
    struct Counter {
        steps: usize,
        terminates: usize,
    }

    impl Observer for Counter {
        fn on_step(&mut self, _snapshot: &crate::observer::Snapshot<'_>) {
            self.steps += 1;
        }

        fn on_terminate(&mut self, _q_table: &crate::algo::QTable) {
            self.terminates += 1;
        }
    }

    #[test]
    fn terminate_reported_once() {
        let mut episode = episode();
        let mut counter = Counter::default();
        let first = Driver::new().run(&mut episode, &mut counter);
        let second = Driver::new().run(&mut episode, &mut counter);

        assert_eq!(first, second, "Second run finds the goal already reached");
        assert_eq!(counter.steps as u64, episode.ticks());
        assert_eq!(counter.terminates, 1, "on_terminate fires once per episode");
    }

    #[test]
    fn start_on_goal_reported_once() {
        let maze = Maze::open(2, 2).unwrap();
        let mut episode = Episode::new(MazeConfig::new(maze, (0, 0), (0, 0))).unwrap();
        let mut counter = Counter::default();
        for _ in 0..2 {
            let outcome = Driver::new().run(&mut episode, &mut counter);
            assert_eq!(outcome, Outcome::ReachedGoal { ticks: 0 });
        }
        assert_eq!((counter.steps, counter.terminates), (0, 1));
    }

    #[test]
    fn cancel_at_tick_boundary() {
        let mut episode = episode();
        let outcome = Driver::new().run(&mut episode, Recorder::stop_after(5));
        assert_eq!(outcome, Outcome::Cancelled { ticks: 5 });
        assert_eq!(episode.ticks(), 5);

        let outcome = Driver::new().run(&mut episode, NoopObserver);
        assert!(
            matches!(outcome, Outcome::ReachedGoal { .. }),
            "Cancelled episode resumes cleanly"
        );
    }

    #[test]
    fn tick_limit() {
        let mut episode = episode();
        let outcome = Driver::new()
            .with_max_ticks(3)
            .run(&mut episode, NoopObserver);
        assert_eq!(outcome, Outcome::TickLimit { ticks: 3 });
        assert!(!episode.is_terminated());
    }

    #[test]
    fn pacing_does_not_change_learning() {
        let mut fast = episode();
        let mut slow = episode();
        Driver::new().with_max_ticks(20).run(&mut fast, NoopObserver);
        Driver::new()
            .with_pace(Duration::from_micros(50))
            .with_max_ticks(20)
            .run(&mut slow, NoopObserver);
        assert_eq!(fast.q_table(), slow.q_table());
        assert_eq!(fast.position(), slow.position());
    }
}
