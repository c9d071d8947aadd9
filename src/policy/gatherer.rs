//! Carrier policy: deliver anchors, mine nearby wells, bring resources home.

use std::collections::BTreeSet;

use tracing::debug;

use super::trait_::{Policy, TurnContext};
use crate::controller::{try_move, try_move_toward, Controller};
use crate::error::ActionError;
use crate::geometry::Location;
use crate::types::{ResourceKind, RobotKind, WellInfo};

/// Adamantium plus mana a carrier gathers before heading home.
pub const RETURN_THRESHOLD: u32 = 40;

/// Resource-gathering carrier.
///
/// Each turn runs, in order: home discovery (first turn only), anchor
/// delivery, then either mining (below [`RETURN_THRESHOLD`]) or the trip
/// home, and finally a random step unless the carrier is busy mining.
#[derive(Debug, Clone, Default)]
pub struct GathererPolicy {
    home: Option<Location>,
}

impl GathererPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Headquarters location remembered on the first turn, if one was seen.
    pub fn home(&self) -> Option<Location> {
        self.home
    }

    /// Remembers the nearest headquarters in view, whatever its team.
    ///
    /// Ties go to the first robot in sensing order. Leaves `home` unset if
    /// no headquarters is visible.
    fn discover_home<C: Controller + ?Sized>(&mut self, rc: &C) {
        let me = rc.location();
        self.home = rc
            .sense_nearby_robots(None, None)
            .into_iter()
            .filter(|robot| robot.kind == RobotKind::Headquarters)
            .map(|robot| robot.location)
            .min_by_key(|loc| me.distance_squared_to(loc));

        match self.home {
            Some(home) => debug!(%home, "remembered headquarters"),
            None => debug!("no headquarters in view on first turn"),
        }
    }

    /// Walks the carried anchor to the least claimable island cell in view
    /// and places it there.
    fn deliver_anchor<C: Controller + ?Sized>(
        &self,
        rc: &mut C,
        max_steps: u32,
    ) -> Result<(), ActionError> {
        let mut claimable = BTreeSet::new();
        for island in rc.sense_nearby_islands() {
            claimable.extend(rc.sense_nearby_island_locations(island));
        }
        let Some(&target) = claimable.first() else {
            return Ok(());
        };
        rc.set_indicator(&format!("Carrying anchor to {target}"));

        let mut steps = 0;
        while rc.location() != target && steps < max_steps && rc.movement_ready() {
            if !try_move_toward(rc, &target)? {
                break;
            }
            steps += 1;
        }

        if rc.location() == target && rc.can_place_anchor() {
            rc.place_anchor()?;
            rc.set_indicator("Placed anchor");
        } else if rc.location() != target {
            debug!(%target, steps, "anchor delivery unfinished this turn");
        }
        Ok(())
    }

    /// Mines the nearest well or heads toward it.
    ///
    /// Returns `true` when the carrier is next to the well and should hold
    /// its position for the rest of the turn.
    fn gather<C: Controller + ?Sized>(&self, rc: &mut C, held: u32) -> Result<bool, ActionError> {
        let me = rc.location();
        let Some(well) = nearest_well(me, &rc.sense_nearby_wells(None)) else {
            return Ok(false);
        };

        if me.is_adjacent_to(&well) {
            for cell in me.neighbourhood() {
                if rc.can_collect_resource(cell, None) {
                    rc.collect_resource(cell, None)?;
                    let status = format!(
                        "Collecting, holding AD: {} MN: {} EX: {}",
                        rc.resource_amount(ResourceKind::Adamantium),
                        rc.resource_amount(ResourceKind::Mana),
                        rc.resource_amount(ResourceKind::Elixir),
                    );
                    rc.set_indicator(&status);
                }
            }
            return Ok(true);
        }

        self.approach_well(rc, &well)?;
        // Empty carriers are light enough to try a second step.
        if held == 0 {
            self.approach_well(rc, &well)?;
        }
        Ok(false)
    }

    fn approach_well<C: Controller + ?Sized>(
        &self,
        rc: &mut C,
        well: &Location,
    ) -> Result<(), ActionError> {
        let dir = rc.location().direction_to(well);
        if try_move(rc, dir)? {
            rc.set_indicator(&format!("Heading to well at {well}, moving {dir}"));
        }
        Ok(())
    }

    /// Hands everything over when next to home, otherwise steps toward it.
    fn return_home<C: Controller + ?Sized>(&self, rc: &mut C) -> Result<(), ActionError> {
        let Some(home) = self.home else {
            debug!("home unknown, keeping resources");
            return Ok(());
        };

        if !rc.location().is_adjacent_to(&home) {
            try_move_toward(rc, &home)?;
            return Ok(());
        }

        for resource in ResourceKind::all() {
            let amount = rc.resource_amount(resource);
            if amount == 0 {
                continue;
            }
            if rc.can_transfer_resource(home, resource, amount) {
                rc.transfer_resource(home, resource, amount)?;
                rc.set_indicator(&format!("Transferred {resource} to {home}"));
            }
        }
        Ok(())
    }
}

/// Nearest well by squared distance; ties go to the smaller location.
pub fn nearest_well(me: Location, wells: &[WellInfo]) -> Option<Location> {
    wells
        .iter()
        .map(|well| well.location)
        .min_by_key(|loc| (me.distance_squared_to(loc), *loc))
}

impl Policy for GathererPolicy {
    fn take_turn<C: Controller + ?Sized>(
        &mut self,
        rc: &mut C,
        ctx: &mut TurnContext<'_>,
    ) -> Result<(), ActionError> {
        if ctx.turn == 1 {
            self.discover_home(&*rc);
        }

        if rc.anchor().is_some() {
            self.deliver_anchor(rc, ctx.config.max_delivery_steps)?;
        }

        let held = rc
            .resource_amount(ResourceKind::Adamantium)
            .saturating_add(rc.resource_amount(ResourceKind::Mana));
        let hold_position = if held < RETURN_THRESHOLD {
            self.gather(rc, held)?
        } else {
            self.return_home(rc)?;
            false
        };

        // Drawn every turn, even when holding position.
        let dir = ctx.walk.next_direction();
        if !hold_position {
            try_move(rc, dir)?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "gatherer"
    }
}
