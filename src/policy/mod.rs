//! Policy trait, per-role implementations and role dispatch.

pub mod combatant;
pub mod gatherer;
pub mod producer;
pub mod random;
pub mod trait_;


pub use combatant::CombatantPolicy;
pub use gatherer::{GathererPolicy, RETURN_THRESHOLD};
pub use producer::ProducerPolicy;
pub use random::RandomWalk;
pub use trait_::{Policy, TurnContext};

use crate::controller::Controller;
use crate::error::ActionError;
use crate::types::RobotKind;

/// Policy selected from a robot's kind at spawn, carrying that role's state.
///
/// The mapping in [`RolePolicy::for_kind`] is an exhaustive match, so a new
/// [`RobotKind`] cannot be added without deciding its policy.
#[derive(Debug, Clone)]
pub enum RolePolicy {
    Producer(ProducerPolicy),
    Gatherer(GathererPolicy),
    Combatant(CombatantPolicy),
    /// Kinds without a strategy; every turn is a no-op.
    Idle(RobotKind),
}

impl RolePolicy {
    /// Returns the policy for a robot of the given kind.
    pub fn for_kind(kind: RobotKind) -> Self {
        match kind {
            RobotKind::Headquarters => RolePolicy::Producer(ProducerPolicy::new()),
            RobotKind::Carrier => RolePolicy::Gatherer(GathererPolicy::new()),
            RobotKind::Launcher => RolePolicy::Combatant(CombatantPolicy::new()),
            RobotKind::Booster | RobotKind::Destabilizer | RobotKind::Amplifier => {
                RolePolicy::Idle(kind)
            }
        }
    }

    /// Gatherer state, if this is a gatherer.
    pub fn as_gatherer(&self) -> Option<&GathererPolicy> {
        match self {
            RolePolicy::Gatherer(policy) => Some(policy),
            _ => None,
        }
    }
}

impl Policy for RolePolicy {
    fn take_turn<C: Controller + ?Sized>(
        &mut self,
        rc: &mut C,
        ctx: &mut TurnContext<'_>,
    ) -> Result<(), ActionError> {
        match self {
            RolePolicy::Producer(policy) => policy.take_turn(rc, ctx),
            RolePolicy::Gatherer(policy) => policy.take_turn(rc, ctx),
            RolePolicy::Combatant(policy) => policy.take_turn(rc, ctx),
            RolePolicy::Idle(_) => Ok(()),
        }
    }

    fn name(&self) -> &str {
        match self {
            RolePolicy::Producer(policy) => policy.name(),
            RolePolicy::Gatherer(policy) => policy.name(),
            RolePolicy::Combatant(policy) => policy.name(),
            RolePolicy::Idle(_) => "idle",
        }
    }
}
