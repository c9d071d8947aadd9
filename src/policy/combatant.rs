//! Launcher policy: shoot the first visible enemy, then wander.

use tracing::debug;

use super::trait_::{Policy, TurnContext};
use crate::controller::Controller;
use crate::error::ActionError;

/// Mobile combatant.
///
/// Attacks the first enemy the environment reports within its action
/// radius (no ranking), then takes a random step whether or not it fired.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombatantPolicy;

impl CombatantPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for CombatantPolicy {
    fn take_turn<C: Controller + ?Sized>(
        &mut self,
        rc: &mut C,
        ctx: &mut TurnContext<'_>,
    ) -> Result<(), ActionError> {
        let radius = rc.kind().action_radius_squared();
        let opponent = rc.team().opponent();
        let enemies = rc.sense_nearby_robots(Some(radius), Some(opponent));

        if let Some(enemy) = enemies.first() {
            let target = enemy.location;
            if rc.can_attack(target) {
                rc.attack(target)?;
                rc.set_indicator("Attacking");
                debug!(%target, enemy = enemy.id, "attacked");
            }
        }

        ctx.walk.step(rc)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "combatant"
    }
}
