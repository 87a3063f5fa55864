use crate::maze::{Maze, Pos};

/// Bijection between valid grid positions and flat state indices `row * cols + col`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateCodec {
    rows: usize,
    cols: usize,
}

impl StateCodec {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn for_maze(maze: &Maze) -> Self {
        Self::new(maze.rows(), maze.cols())
    }

    /// Size of the state space
    pub fn num_states(&self) -> usize {
        self.rows * self.cols
    }

    /// Encode a position as a state index
    ///
    /// Callers validate `pos` first; the encoding is meaningless outside the grid.
    pub fn to_state(&self, (row, col): Pos) -> usize {
        debug_assert!(
            row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols,
            "position ({row}, {col}) is outside the {}x{} grid",
            self.rows,
            self.cols,
        );
        row as usize * self.cols + col as usize
    }

    /// Decode a state index back into a position
    pub fn to_position(&self, state: usize) -> Pos {
        debug_assert!(state < self.num_states(), "state {state} out of range");
        ((state / self.cols) as i32, (state % self.cols) as i32)
    }
}

#[cfg(test)]
mod tests {
    use rand::{thread_rng, Rng};

    use super::*;

    #[test]
    fn row_major_encoding() {
        let codec = StateCodec::new(3, 4);
        assert_eq!(codec.num_states(), 12);
        assert_eq!(codec.to_state((0, 0)), 0);
        assert_eq!(codec.to_state((0, 3)), 3);
        assert_eq!(codec.to_state((1, 0)), 4);
        assert_eq!(codec.to_state((2, 3)), 11);
        assert_eq!(codec.to_position(6), (1, 2));
    }

    #[test]
    fn bijection() {
        let mut rng = thread_rng();
        for _ in 0..20 {
            let codec = StateCodec::new(rng.gen_range(1..30), rng.gen_range(1..30));
            for state in 0..codec.num_states() {
                let pos = codec.to_position(state);
                assert_eq!(codec.to_state(pos), state, "Round trip through {pos:?}");
            }
        }
    }

    #[test]
    fn matches_maze_positions() {
        let maze = Maze::open(5, 7).unwrap();
        let codec = StateCodec::for_maze(&maze);
        for (state, pos) in maze.positions().enumerate() {
            assert_eq!(codec.to_state(pos), state);
            assert_eq!(codec.to_position(state), pos);
        }
    }
}
