pub mod maze_runner;

pub use maze_runner::MazeEnv;
