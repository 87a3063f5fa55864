use std::fmt;

use log::trace;
use strum::VariantArray;

use crate::{
    agent::Agent, check_interval, env::Environment, error::ConfigError, exp::Exp, policy::Action,
};

/// Hyperparameters of the Q-learning update rule
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QTableConfig {
    /// Learning rate, in `(0,1]`
    pub alpha: f32,
    /// Discount factor, in `(0,1]`
    pub gamma: f32,
}

impl Default for QTableConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
        }
    }
}

impl QTableConfig {
    /// **Errors** if `alpha` or `gamma` is not in the interval `(0,1]`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let &Self { alpha, gamma } = self;
        check_interval!(alpha, 0.0, 1.0);
        check_interval!(gamma, 0.0, 1.0);
        Ok(())
    }
}

/// A dense table of action values, one row of [`Action::COUNT`] entries per state
///
/// Every entry starts at `0.0`. The table never grows or shrinks.
#[derive(Clone, Debug, PartialEq)]
pub struct QTable {
    values: Vec<[f32; Action::COUNT]>,
}

impl QTable {
    pub fn new(num_states: usize) -> Self {
        Self {
            values: vec![[0.0; Action::COUNT]; num_states],
        }
    }

    pub fn num_states(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, state: usize, action: Action) -> f32 {
        self.values[state][action.index()]
    }

    pub fn set(&mut self, state: usize, action: Action, value: f32) {
        self.values[state][action.index()] = value;
    }

    /// All action values for a state, indexed by [`Action::index`]
    pub fn row(&self, state: usize) -> &[f32; Action::COUNT] {
        &self.values[state]
    }

    /// Raw table rows, one per state
    pub fn values(&self) -> &[[f32; Action::COUNT]] {
        &self.values
    }

    /// Highest action value for a state
    pub fn max(&self, state: usize) -> f32 {
        self.values[state].iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// The first action holding the highest value for a state
    pub fn best_action(&self, state: usize) -> Action {
        let row = &self.values[state];
        let mut best = 0;
        for (i, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = i;
            }
        }
        Action::VARIANTS[best]
    }

    /// The greedy action of every state, in state order
    pub fn policy(&self) -> Vec<Action> {
        (0..self.num_states()).map(|s| self.best_action(s)).collect()
    }

    /// Apply one Q-learning update in place
    ///
    /// `Q(s,a) <- (1 - α) Q(s,a) + α (r + γ max_a' Q(s',a'))`
    ///
    /// **Returns** the new value of `Q(s,a)`
    pub fn update(
        &mut self,
        state: usize,
        action: Action,
        reward: f32,
        next_state: usize,
        config: &QTableConfig,
    ) -> f32 {
        let QTableConfig { alpha, gamma } = *config;
        let max_next_q = self.max(next_state);
        let q_value = self.get(state, action);
        let new_q_value = (1.0 - alpha) * q_value + alpha * (reward + gamma * max_next_q);
        self.set(state, action, new_q_value);
        new_q_value
    }
}

impl fmt::Display for QTable {
    /// One line per state: the four action values and the greedy arrow
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>5} {:>9} {:>9} {:>9} {:>9}",
            "state", "up", "down", "left", "right"
        )?;
        for (state, row) in self.values.iter().enumerate() {
            write!(f, "{state:>5}")?;
            for value in row {
                write!(f, " {value:>9.3}")?;
            }
            writeln!(f, " {}", self.best_action(state).arrow())?;
        }
        Ok(())
    }
}

/// A purely greedy Q-learning agent backed by a dense [`QTable`]
///
/// There is no exploration. Ties between equally valued actions go to the
/// action with the lowest index.
pub struct QTableAgent {
    q_table: QTable,
    config: QTableConfig,
}

impl QTableAgent {
    /// Initialize an agent with an all-zero table over `num_states` states
    ///
    /// **Errors** if `alpha` or `gamma` is not in the interval `(0,1]`
    pub fn new(num_states: usize, config: QTableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            q_table: QTable::new(num_states),
            config,
        })
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn config(&self) -> &QTableConfig {
        &self.config
    }

    pub fn into_q_table(self) -> QTable {
        self.q_table
    }
}

impl<E> Agent<E> for QTableAgent
where
    E: Environment<State = usize, Action = Action>,
{
    fn act(&self, state: usize) -> Action {
        self.q_table.best_action(state)
    }

    fn learn(&mut self, exp: Exp<E>) -> f32 {
        let Exp {
            state,
            action,
            next_state,
            reward,
        } = exp;

        let q_value = self
            .q_table
            .update(state, action, reward, next_state, &self.config);
        trace!("Q({state}, {action:?}) <- {q_value:.4}");
        q_value
    }
}

#[cfg(test)]
mod tests {
    use rand::{thread_rng, Rng};
    use strum::IntoEnumIterator;

    use super::*;

    fn random_table(num_states: usize) -> QTable {
        let mut rng = thread_rng();
        let mut q_table = QTable::new(num_states);
        for state in 0..num_states {
            for action in Action::iter() {
                q_table.set(state, action, rng.gen_range(-50.0..50.0));
            }
        }
        q_table
    }

    #[test]
    fn starts_at_zero() {
        let q_table = QTable::new(16);
        assert_eq!(q_table.num_states(), 16);
        assert!(q_table.values().iter().flatten().all(|&v| v == 0.0));
        assert_eq!(q_table.best_action(5), Action::Up, "All-zero row picks the first action");
    }

    #[test]
    fn display_rows() {
        let mut q_table = QTable::new(2);
        q_table.set(1, Action::Left, 2.5);
        let text = q_table.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3, "Header plus one line per state");
        assert_eq!(lines[0], "state        up      down      left     right");
        assert_eq!(lines[1], "    0     0.000     0.000     0.000     0.000 ↑");
        assert_eq!(lines[2], "    1     0.000     0.000     2.500     0.000 ←");
    }

    #[test]
    fn update_rule() {
        let config = QTableConfig::default();
        let mut q_table = QTable::new(2);
        q_table.set(1, Action::Right, 10.0);
        q_table.set(0, Action::Down, 5.0);

        let value = q_table.update(0, Action::Down, -1.0, 1, &config);
        let expected = 0.9 * 5.0 + 0.1 * (-1.0 + 0.9 * 10.0);
        assert!((value - expected).abs() < 1e-5, "{value} != {expected}");
        assert_eq!(q_table.get(0, Action::Down), value);
    }

    #[test]
    fn first_wall_hit_from_zero() {
        let mut q_table = QTable::new(1);
        let value = q_table.update(0, Action::Up, -10.0, 0, &QTableConfig::default());
        assert_eq!(value, -1.0);
        assert_eq!(q_table.best_action(0), Action::Down, "Untried actions now win");
    }

    #[test]
    fn update_locality() {
        let config = QTableConfig::default();
        let mut rng = thread_rng();
        for _ in 0..100 {
            let mut q_table = random_table(9);
            let before = q_table.clone();
            let state = rng.gen_range(0..9);
            let action = Action::VARIANTS[rng.gen_range(0..Action::COUNT)];
            let next_state = rng.gen_range(0..9);
            q_table.update(state, action, rng.gen_range(-10.0..100.0), next_state, &config);

            for s in 0..9 {
                for a in Action::iter() {
                    if (s, a) != (state, action) {
                        assert_eq!(
                            q_table.get(s, a).to_bits(),
                            before.get(s, a).to_bits(),
                            "Q({s}, {a:?}) untouched"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn greedy_is_pure() {
        let q_table = random_table(20);
        for state in 0..20 {
            let action = q_table.best_action(state);
            let row = q_table.row(state);
            assert_eq!(row[action.index()], q_table.max(state));
            assert!(row[..action.index()].iter().all(|&v| v < row[action.index()]));
            assert_eq!(q_table.best_action(state), action);
        }
    }

    #[test]
    fn converges_toward_reward() {
        let config = QTableConfig::default();
        let mut q_table = QTable::new(2);
        let mut previous = q_table.get(0, Action::Right);
        for _ in 0..60 {
            let value = q_table.update(0, Action::Right, 100.0, 1, &config);
            assert!(value > previous, "{value} increases past {previous}");
            assert!(value < 100.0);
            previous = value;
        }
        assert!(previous > 99.0);
    }

    #[test]
    fn config_validation() {
        assert!(QTableConfig::default().validate().is_ok());
        assert!(QTableConfig { alpha: 1.0, gamma: 1.0 }.validate().is_ok());
        for (alpha, gamma) in [(0.0, 0.9), (0.1, 1.5), (-0.1, 0.9), (f32::NAN, 0.9)] {
            let config = QTableConfig { alpha, gamma };
            assert!(
                matches!(config.validate(), Err(ConfigError::OutOfInterval { .. })),
                "{config:?} is rejected"
            );
        }
        assert!(QTableAgent::new(4, QTableConfig { alpha: 2.0, gamma: 0.9 }).is_err());
    }
}
