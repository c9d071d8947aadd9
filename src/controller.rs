//! Capability surface a robot uses to sense and act on the game world.
//!
//! Every write operation has a matching `can_*` probe. Policies always call
//! the probe with the exact arguments they then pass to the action; the
//! environment remains the sole arbiter and may still reject the action.

use crate::error::ActionError;
use crate::geometry::{Direction, Location};
use crate::types::{Anchor, IslandId, ResourceKind, RobotId, RobotInfo, RobotKind, Team, WellInfo};

/// Whether the robot survives the end of its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// The robot will be resumed on a later turn.
    Alive,
    /// The robot was destroyed; its loop must stop.
    Destroyed,
}

/// Environment interface for a single robot.
///
/// Sensing methods taking `radius_squared: Option<u32>` treat `None` as the
/// robot's full vision range.
pub trait Controller {
    // --- Self ---
    fn id(&self) -> RobotId;
    fn kind(&self) -> RobotKind;
    fn team(&self) -> Team;
    fn health(&self) -> u32;
    fn location(&self) -> Location;
    fn resource_amount(&self, resource: ResourceKind) -> u32;
    fn anchor(&self) -> Option<Anchor>;

    /// True while the robot still has movement left this turn.
    ///
    /// Each successful [`Controller::move_to`] consumes part of a per-turn
    /// budget; loops issuing several moves must stop once this is false.
    fn movement_ready(&self) -> bool;

    // --- Sensing ---
    fn sense_nearby_robots(&self, radius_squared: Option<u32>, team: Option<Team>)
        -> Vec<RobotInfo>;
    fn sense_nearby_wells(&self, radius_squared: Option<u32>) -> Vec<WellInfo>;
    fn sense_nearby_islands(&self) -> Vec<IslandId>;
    fn sense_nearby_island_locations(&self, island: IslandId) -> Vec<Location>;

    // --- Actions ---
    fn can_move(&self, dir: Direction) -> bool;
    fn move_to(&mut self, dir: Direction) -> Result<(), ActionError>;

    fn can_build_robot(&self, kind: RobotKind, location: Location) -> bool;
    fn build_robot(&mut self, kind: RobotKind, location: Location) -> Result<(), ActionError>;

    /// `resource == None` collects whatever the well at `location` yields.
    fn can_collect_resource(&self, location: Location, resource: Option<ResourceKind>) -> bool;
    fn collect_resource(
        &mut self,
        location: Location,
        resource: Option<ResourceKind>,
    ) -> Result<(), ActionError>;

    fn can_transfer_resource(&self, to: Location, resource: ResourceKind, amount: u32) -> bool;
    fn transfer_resource(
        &mut self,
        to: Location,
        resource: ResourceKind,
        amount: u32,
    ) -> Result<(), ActionError>;

    fn can_attack(&self, target: Location) -> bool;
    fn attack(&mut self, target: Location) -> Result<(), ActionError>;

    fn can_place_anchor(&self) -> bool;
    fn place_anchor(&mut self) -> Result<(), ActionError>;

    // --- Diagnostics and lifecycle ---

    /// Sets the free-text status shown for this robot. No gameplay effect.
    fn set_indicator(&mut self, text: &str);

    /// Ends the current turn and blocks until the robot's next turn.
    fn end_turn(&mut self) -> Lifecycle;
}

/// Moves one step in `dir` if the environment allows it.
///
/// Returns whether a move was issued.
pub fn try_move<C: Controller + ?Sized>(rc: &mut C, dir: Direction) -> Result<bool, ActionError> {
    if rc.can_move(dir) {
        rc.move_to(dir)?;
        return Ok(true);
    }
    Ok(false)
}

/// Moves one step toward `target` if the environment allows it.
pub fn try_move_toward<C: Controller + ?Sized>(
    rc: &mut C,
    target: &Location,
) -> Result<bool, ActionError> {
    let dir = rc.location().direction_to(target);
    try_move(rc, dir)
}
