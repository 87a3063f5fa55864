use std::{error::Error, time::Duration};

use maze_runner::{config::MazeConfig, driver::Driver, episode::Episode, viz};

const PACE: Duration = Duration::from_millis(60);

fn main() -> Result<(), Box<dyn Error>> {
    let config = MazeConfig::robot_maze()?;
    let (maze, start) = (config.maze.clone(), config.start);
    let mut episode = Episode::new(config)?;
    let (handle, observer) = viz::init(maze, start, episode.goal());

    let outcome = Driver::new().with_pace(PACE).run(&mut episode, observer);
    log::info!("{outcome:?}");

    handle.join().map_err(|_| "render thread panicked")??;
    Ok(())
}
