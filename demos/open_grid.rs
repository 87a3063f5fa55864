use std::{error::Error, fs, path::Path};

use maze_runner::{
    config::MazeConfig,
    driver::{Driver, Outcome},
    episode::Episode,
    maze::Maze,
    observer::Recorder,
    policy::Action,
};
use strum::IntoEnumIterator;

const SIZE: usize = 6;
const MAX_TICKS: u64 = 10_000;

fn main() -> Result<(), Box<dyn Error>> {
    let path = Path::new("demos");

    let maze = Maze::open(SIZE, SIZE)?;
    let goal = (SIZE as i32 - 1, SIZE as i32 - 1);
    let mut episode = Episode::new(MazeConfig::new(maze, (0, 0), goal))?;

    let mut recorder = Recorder::new();
    let outcome = Driver::new()
        .with_max_ticks(MAX_TICKS)
        .run(&mut episode, &mut recorder);

    let Outcome::ReachedGoal { ticks } = outcome else {
        return Err(format!("goal not reached: {outcome:?}").into());
    };
    println!("goal reached after {ticks} ticks");
    println!("return {:.1}", recorder.rewards.iter().sum::<f32>());

    fs::create_dir_all(path.join("out"))?;
    let mut wtr = csv::Writer::from_path(path.join("out/q_table.csv"))?;
    wtr.write_record(["state", "row", "col", "up", "down", "left", "right", "greedy"])?;

    let q_table = episode.q_table();
    print!("{q_table}");
    for (state, values) in q_table.values().iter().enumerate() {
        let (row, col) = (state / SIZE, state % SIZE);
        let mut record = vec![state.to_string(), row.to_string(), col.to_string()];
        record.extend(Action::iter().map(|a| values[a.index()].to_string()));
        record.push(format!("{:?}", q_table.best_action(state)));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
