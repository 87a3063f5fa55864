use crate::env::Environment;

/// Represents a single experience or transition in the environment
pub struct Exp<E: Environment> {
    /// The state of the environment before taking the action
    pub state: E::State,
    /// The action taken in the given state
    pub action: E::Action,
    /// The state of the environment after the action is taken
    pub next_state: E::State,
    /// The reward received after taking the action
    pub reward: f32,
}

impl<E: Environment> Clone for Exp<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Environment> Copy for Exp<E> {}

impl<E: Environment> std::fmt::Debug for Exp<E>
where
    E::State: std::fmt::Debug,
    E::Action: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exp")
            .field("state", &self.state)
            .field("action", &self.action)
            .field("next_state", &self.next_state)
            .field("reward", &self.reward)
            .finish()
    }
}
