use crate::{env::Environment, exp::Exp};

/// A learner acting in an [`Environment`]
pub trait Agent<E>
where
    E: Environment,
{
    /// Choose an action for `state`
    fn act(&self, state: E::State) -> E::Action;

    /// Learn from a single transition
    ///
    /// **Returns** the updated estimate for the experienced state-action pair
    fn learn(&mut self, exp: Exp<E>) -> f32;
}
