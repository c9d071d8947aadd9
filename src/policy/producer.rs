//! Headquarters policy: spawn carriers toward wells and launchers all around.

use tracing::debug;

use super::trait_::{Policy, TurnContext};
use crate::controller::Controller;
use crate::error::ActionError;
use crate::geometry::DIRECTIONS;
use crate::types::RobotKind;

/// Stationary producer.
///
/// Every turn it first tries to place a carrier on the neighbouring cell
/// facing each visible well, then tries a launcher on each of the eight
/// neighbouring cells in compass order. The environment's build rules
/// (occupancy, resource cost, cooldown) are the only limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProducerPolicy;

impl ProducerPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for ProducerPolicy {
    fn take_turn<C: Controller + ?Sized>(
        &mut self,
        rc: &mut C,
        _ctx: &mut TurnContext<'_>,
    ) -> Result<(), ActionError> {
        let hq = rc.location();

        for well in rc.sense_nearby_wells(None) {
            let spawn = hq.add(hq.direction_to(&well.location));
            if rc.can_build_robot(RobotKind::Carrier, spawn) {
                rc.build_robot(RobotKind::Carrier, spawn)?;
                debug!(%spawn, well = %well.location, "built carrier");
            }
        }

        for dir in DIRECTIONS {
            let spawn = hq.add(dir);
            if rc.can_build_robot(RobotKind::Launcher, spawn) {
                rc.build_robot(RobotKind::Launcher, spawn)?;
                debug!(%spawn, "built launcher");
            }
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "producer"
    }
}
