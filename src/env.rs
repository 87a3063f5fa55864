/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time MDP with one agent
/// and a finite state space and action space. Environments run a single episode;
/// there is no reset.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State: Copy;

    /// A representation of an action that an agent can take to affect the environment
    type Action: Copy;

    /// Determine if the state is active or terminal
    fn is_active(&self) -> bool;

    /// The current state of the environment
    fn state(&self) -> Self::State;

    /// Update the environment in response to an action taken by an agent, producing a new
    /// state and associated reward
    ///
    /// The new state is returned even when it is terminal; check
    /// [`is_active`](Environment::is_active) afterwards.
    ///
    /// **Returns** `(next_state, reward)`
    fn step(&mut self, action: Self::Action) -> (Self::State, f32);
}
