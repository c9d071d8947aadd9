//! Policy trait shared by every robot role.

use super::random::RandomWalk;
use crate::config::AgentConfig;
use crate::controller::Controller;
use crate::error::ActionError;

/// Per-turn inputs a policy receives besides the controller.
#[derive(Debug)]
pub struct TurnContext<'a> {
    /// Number of turns this robot has been alive, starting at 1.
    pub turn: u32,
    /// The robot's private random generator.
    pub walk: &'a mut RandomWalk,
    pub config: &'a AgentConfig,
}

/// A policy that turns one turn's sensing into legality-checked actions.
pub trait Policy {
    /// Runs one turn against the controller.
    ///
    /// # Errors
    ///
    /// Returns the first [`ActionError`] raised by the environment; the rest
    /// of the turn is abandoned.
    fn take_turn<C: Controller + ?Sized>(
        &mut self,
        rc: &mut C,
        ctx: &mut TurnContext<'_>,
    ) -> Result<(), ActionError>;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}
