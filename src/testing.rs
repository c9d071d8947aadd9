//! In-memory scripted controller for exercising policies.
//!
//! [`ScriptedController`] models a small rectangular grid around a single
//! controlled robot. It applies simple legality rules (bounds, walls,
//! occupancy, adjacency, carrying capacity, per-turn move and action
//! budgets) and records every probe, action, indicator update and turn end
//! so tests can assert on the exact sequence a policy produced.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::controller::{Controller, Lifecycle};
use crate::error::ActionError;
use crate::geometry::{Direction, Location};
use crate::types::{Anchor, IslandId, ResourceKind, RobotId, RobotInfo, RobotKind, Team, WellInfo};

/// Most resources a carrier can hold in total.
pub const CARRIER_CAPACITY: u32 = 40;

/// Units gained per successful collect.
pub const COLLECT_RATE: u32 = 2;

/// An action request, with the arguments it was issued with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Build(RobotKind, Location),
    Collect(Location, Option<ResourceKind>),
    Transfer(Location, ResourceKind, u32),
    Attack(Location),
    PlaceAnchor,
}

/// One recorded interaction with the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// A `can_*` legality probe and its answer.
    Probe(Action, bool),
    /// An action that the controller applied.
    Act(Action),
    /// An action the controller refused.
    Rejected(Action),
    Indicator(String),
    EndTurn,
}

/// Scripted single-robot grid world implementing [`Controller`].
#[derive(Debug)]
pub struct ScriptedController {
    me: RobotInfo,
    health: u32,
    width: i32,
    height: i32,
    held: BTreeMap<ResourceKind, u32>,
    anchor: Option<Anchor>,
    robots: Vec<RobotInfo>,
    wells: Vec<WellInfo>,
    islands: Vec<(IslandId, Vec<Location>)>,
    walls: Vec<Location>,
    move_budget: u32,
    moves_left: u32,
    action_budget: u32,
    actions_left: u32,
    stale_probes: bool,
    sensor_fault: bool,
    destroyed_after: Option<u32>,
    turns_ended: u32,
    next_id: RobotId,
    indicator: Option<String>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedController {
    /// Creates a 30×30 world with one robot of `kind` on team A at `location`.
    pub fn new(kind: RobotKind, location: Location) -> Self {
        Self {
            me: RobotInfo {
                id: 1,
                kind,
                team: Team::A,
                location,
            },
            health: 100,
            width: 30,
            height: 30,
            held: BTreeMap::new(),
            anchor: None,
            robots: Vec::new(),
            wells: Vec::new(),
            islands: Vec::new(),
            walls: Vec::new(),
            move_budget: 1,
            moves_left: 1,
            action_budget: u32::MAX,
            actions_left: u32::MAX,
            stale_probes: false,
            sensor_fault: false,
            destroyed_after: None,
            turns_ended: 0,
            next_id: 2,
            indicator: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_team(mut self, team: Team) -> Self {
        self.me.team = team;
        self
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Adds another robot; robots are sensed in insertion order.
    pub fn with_robot(mut self, kind: RobotKind, team: Team, location: Location) -> Self {
        self.spawn(kind, team, location);
        self
    }

    pub fn with_well(mut self, location: Location, resource: ResourceKind) -> Self {
        self.wells.push(WellInfo { location, resource });
        self
    }

    pub fn with_island(mut self, id: IslandId, locations: Vec<Location>) -> Self {
        self.islands.push((id, locations));
        self
    }

    pub fn with_wall(mut self, location: Location) -> Self {
        self.walls.push(location);
        self
    }

    pub fn with_resource(mut self, resource: ResourceKind, amount: u32) -> Self {
        self.held.insert(resource, amount);
        self
    }

    pub fn with_anchor(mut self) -> Self {
        self.anchor = Some(Anchor::Standard);
        self
    }

    /// Sets how many moves the robot may make per turn.
    pub fn with_move_budget(mut self, moves: u32) -> Self {
        self.move_budget = moves;
        self.moves_left = moves;
        self
    }

    /// Sets how many non-move actions the robot may take per turn.
    pub fn with_action_budget(mut self, actions: u32) -> Self {
        self.action_budget = actions;
        self.actions_left = actions;
        self
    }

    /// Probes answer normally but every action is refused, as if the
    /// world changed between the probe and the action.
    pub fn with_stale_probes(mut self) -> Self {
        self.stale_probes = true;
        self
    }

    /// Sensing robots or wells panics.
    pub fn with_sensor_fault(mut self) -> Self {
        self.sensor_fault = true;
        self
    }

    /// The robot is destroyed at the end of its `turns`-th turn.
    pub fn destroyed_after(mut self, turns: u32) -> Self {
        self.destroyed_after = Some(turns);
        self
    }

    /// Everything recorded so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Applied actions only.
    pub fn actions(&self) -> Vec<Action> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Act(action) => Some(action.clone()),
                _ => None,
            })
            .collect()
    }

    /// Probes only, with their answers.
    pub fn probes(&self) -> Vec<(Action, bool)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Probe(action, ok) => Some((action.clone(), *ok)),
                _ => None,
            })
            .collect()
    }

    /// Directions of applied moves.
    pub fn moves(&self) -> Vec<Direction> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                Action::Move(dir) => Some(dir),
                _ => None,
            })
            .collect()
    }

    /// Last indicator string set.
    pub fn indicator(&self) -> Option<&str> {
        self.indicator.as_deref()
    }

    pub fn turns_ended(&self) -> u32 {
        self.turns_ended
    }

    /// Other robots in the world, including any built so far.
    pub fn robots(&self) -> &[RobotInfo] {
        &self.robots
    }

    /// Forgets recorded calls, keeping world state.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn probe(&self, action: Action, ok: bool) -> bool {
        self.record(Call::Probe(action, ok));
        ok
    }

    fn spawn(&mut self, kind: RobotKind, team: Team, location: Location) {
        self.robots.push(RobotInfo {
            id: self.next_id,
            kind,
            team,
            location,
        });
        self.next_id += 1;
    }

    /// Checks legality, then applies `effect` or records a rejection.
    fn act(
        &mut self,
        action: Action,
        legal: bool,
        name: &'static str,
        effect: impl FnOnce(&mut Self),
    ) -> Result<(), ActionError> {
        if self.stale_probes {
            self.record(Call::Rejected(action));
            return Err(ActionError::illegal(name, "world changed since probe"));
        }
        if !legal {
            self.record(Call::Rejected(action));
            return Err(ActionError::illegal(name, "not allowed"));
        }
        effect(self);
        self.record(Call::Act(action));
        Ok(())
    }

    fn in_bounds(&self, loc: Location) -> bool {
        loc.x >= 0 && loc.y >= 0 && loc.x < self.width && loc.y < self.height
    }

    fn robot_at(&self, loc: Location) -> Option<&RobotInfo> {
        self.robots.iter().find(|robot| robot.location == loc)
    }

    fn is_free(&self, loc: Location) -> bool {
        self.in_bounds(loc)
            && !self.walls.contains(&loc)
            && loc != self.me.location
            && self.robot_at(loc).is_none()
    }

    fn within(&self, radius_squared: Option<u32>, loc: &Location) -> bool {
        let radius = radius_squared.unwrap_or_else(|| self.me.kind.vision_radius_squared());
        self.me.location.distance_squared_to(loc) <= radius
    }

    fn total_held(&self) -> u32 {
        self.held.values().fold(0, |total, amount| total.saturating_add(*amount))
    }

    fn move_legal(&self, dir: Direction) -> bool {
        dir != Direction::Center
            && self.me.kind.is_mobile()
            && self.moves_left > 0
            && self.is_free(self.me.location.add(dir))
    }

    fn build_legal(&self, kind: RobotKind, location: Location) -> bool {
        self.me.kind == RobotKind::Headquarters
            && kind != RobotKind::Headquarters
            && self.actions_left > 0
            && self.within(Some(self.me.kind.action_radius_squared()), &location)
            && self.is_free(location)
    }

    fn collect_legal(&self, location: Location, resource: Option<ResourceKind>) -> bool {
        self.me.kind == RobotKind::Carrier
            && self.actions_left > 0
            && self.me.location.is_adjacent_to(&location)
            && self.total_held() < CARRIER_CAPACITY
            && self
                .wells
                .iter()
                .any(|w| w.location == location && resource.map_or(true, |r| r == w.resource))
    }

    fn transfer_legal(&self, to: Location, resource: ResourceKind, amount: u32) -> bool {
        self.actions_left > 0
            && amount > 0
            && amount <= self.held.get(&resource).copied().unwrap_or(0)
            && self.me.location.is_adjacent_to(&to)
            && self
                .robot_at(to)
                .is_some_and(|robot| robot.team == self.me.team)
    }

    fn attack_legal(&self, target: Location) -> bool {
        self.me.kind == RobotKind::Launcher
            && self.actions_left > 0
            && self.within(Some(self.me.kind.action_radius_squared()), &target)
            && self
                .robot_at(target)
                .is_some_and(|robot| robot.team != self.me.team)
    }

    fn place_anchor_legal(&self) -> bool {
        self.anchor.is_some()
            && self
                .islands
                .iter()
                .any(|(_, cells)| cells.contains(&self.me.location))
    }
}

impl Controller for ScriptedController {
    fn id(&self) -> RobotId {
        self.me.id
    }

    fn kind(&self) -> RobotKind {
        self.me.kind
    }

    fn team(&self) -> Team {
        self.me.team
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn location(&self) -> Location {
        self.me.location
    }

    fn resource_amount(&self, resource: ResourceKind) -> u32 {
        self.held.get(&resource).copied().unwrap_or(0)
    }

    fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    fn movement_ready(&self) -> bool {
        self.moves_left > 0
    }

    fn sense_nearby_robots(
        &self,
        radius_squared: Option<u32>,
        team: Option<Team>,
    ) -> Vec<RobotInfo> {
        if self.sensor_fault {
            panic!("sensor fault");
        }
        self.robots
            .iter()
            .filter(|robot| self.within(radius_squared, &robot.location))
            .filter(|robot| team.map_or(true, |t| t == robot.team))
            .copied()
            .collect()
    }

    fn sense_nearby_wells(&self, radius_squared: Option<u32>) -> Vec<WellInfo> {
        if self.sensor_fault {
            panic!("sensor fault");
        }
        self.wells
            .iter()
            .filter(|well| self.within(radius_squared, &well.location))
            .copied()
            .collect()
    }

    fn sense_nearby_islands(&self) -> Vec<IslandId> {
        self.islands
            .iter()
            .filter(|(_, cells)| cells.iter().any(|cell| self.within(None, cell)))
            .map(|(id, _)| *id)
            .collect()
    }

    fn sense_nearby_island_locations(&self, island: IslandId) -> Vec<Location> {
        self.islands
            .iter()
            .filter(|(id, _)| *id == island)
            .flat_map(|(_, cells)| cells.iter().copied())
            .filter(|cell| self.within(None, cell))
            .collect()
    }

    fn can_move(&self, dir: Direction) -> bool {
        self.probe(Action::Move(dir), self.move_legal(dir))
    }

    fn move_to(&mut self, dir: Direction) -> Result<(), ActionError> {
        let legal = self.move_legal(dir);
        self.act(Action::Move(dir), legal, "move", |world| {
            world.me.location = world.me.location.add(dir);
            world.moves_left -= 1;
        })
    }

    fn can_build_robot(&self, kind: RobotKind, location: Location) -> bool {
        self.probe(
            Action::Build(kind, location),
            self.build_legal(kind, location),
        )
    }

    fn build_robot(&mut self, kind: RobotKind, location: Location) -> Result<(), ActionError> {
        let legal = self.build_legal(kind, location);
        self.act(Action::Build(kind, location), legal, "build", |world| {
            let team = world.me.team;
            world.spawn(kind, team, location);
            world.actions_left -= 1;
        })
    }

    fn can_collect_resource(&self, location: Location, resource: Option<ResourceKind>) -> bool {
        self.probe(
            Action::Collect(location, resource),
            self.collect_legal(location, resource),
        )
    }

    fn collect_resource(
        &mut self,
        location: Location,
        resource: Option<ResourceKind>,
    ) -> Result<(), ActionError> {
        let legal = self.collect_legal(location, resource);
        self.act(
            Action::Collect(location, resource),
            legal,
            "collect",
            |world| {
                let yielded = world
                    .wells
                    .iter()
                    .find(|w| w.location == location)
                    .map(|w| w.resource);
                if let Some(kind) = yielded {
                    let room = CARRIER_CAPACITY - world.total_held();
                    *world.held.entry(kind).or_insert(0) += COLLECT_RATE.min(room);
                }
                world.actions_left -= 1;
            },
        )
    }

    fn can_transfer_resource(&self, to: Location, resource: ResourceKind, amount: u32) -> bool {
        self.probe(
            Action::Transfer(to, resource, amount),
            self.transfer_legal(to, resource, amount),
        )
    }

    fn transfer_resource(
        &mut self,
        to: Location,
        resource: ResourceKind,
        amount: u32,
    ) -> Result<(), ActionError> {
        let legal = self.transfer_legal(to, resource, amount);
        self.act(
            Action::Transfer(to, resource, amount),
            legal,
            "transfer",
            |world| {
                if let Some(held) = world.held.get_mut(&resource) {
                    *held -= amount;
                }
                world.actions_left -= 1;
            },
        )
    }

    fn can_attack(&self, target: Location) -> bool {
        self.probe(Action::Attack(target), self.attack_legal(target))
    }

    fn attack(&mut self, target: Location) -> Result<(), ActionError> {
        let legal = self.attack_legal(target);
        self.act(Action::Attack(target), legal, "attack", |world| {
            world.actions_left -= 1;
        })
    }

    fn can_place_anchor(&self) -> bool {
        self.probe(Action::PlaceAnchor, self.place_anchor_legal())
    }

    fn place_anchor(&mut self) -> Result<(), ActionError> {
        let legal = self.place_anchor_legal();
        self.act(Action::PlaceAnchor, legal, "place anchor", |world| {
            world.anchor = None;
        })
    }

    fn set_indicator(&mut self, text: &str) {
        self.indicator = Some(text.to_string());
        self.record(Call::Indicator(text.to_string()));
    }

    fn end_turn(&mut self) -> Lifecycle {
        self.record(Call::EndTurn);
        self.turns_ended += 1;
        self.moves_left = self.move_budget;
        self.actions_left = self.action_budget;
        match self.destroyed_after {
            Some(turns) if self.turns_ended >= turns => Lifecycle::Destroyed,
            _ => Lifecycle::Alive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_is_blocked_by_walls_and_robots() {
        let rc = ScriptedController::new(RobotKind::Carrier, Location::new(5, 5))
            .with_wall(Location::new(5, 6))
            .with_robot(RobotKind::Launcher, Team::A, Location::new(6, 5));
        assert!(!rc.can_move(Direction::North));
        assert!(!rc.can_move(Direction::East));
        assert!(rc.can_move(Direction::South));
    }

    #[test]
    fn move_budget_is_per_turn() {
        let mut rc = ScriptedController::new(RobotKind::Carrier, Location::new(5, 5));
        rc.move_to(Direction::North).unwrap();
        assert!(!rc.movement_ready());
        assert!(rc.move_to(Direction::North).is_err());
        rc.end_turn();
        assert!(rc.movement_ready());
        assert_eq!(rc.location(), Location::new(5, 6));
    }

    #[test]
    fn headquarters_cannot_move() {
        let rc = ScriptedController::new(RobotKind::Headquarters, Location::new(5, 5));
        assert!(!rc.can_move(Direction::North));
    }

    #[test]
    fn collect_fills_up_to_capacity() {
        let mut rc = ScriptedController::new(RobotKind::Carrier, Location::new(5, 5))
            .with_well(Location::new(5, 6), ResourceKind::Mana)
            .with_resource(ResourceKind::Adamantium, CARRIER_CAPACITY - 1);
        rc.collect_resource(Location::new(5, 6), None).unwrap();
        assert_eq!(rc.resource_amount(ResourceKind::Mana), 1);
        assert!(!rc.can_collect_resource(Location::new(5, 6), None));
    }

    #[test]
    fn collect_checks_resource_kind() {
        let rc = ScriptedController::new(RobotKind::Carrier, Location::new(5, 5))
            .with_well(Location::new(5, 6), ResourceKind::Mana);
        assert!(rc.can_collect_resource(Location::new(5, 6), Some(ResourceKind::Mana)));
        assert!(!rc.can_collect_resource(Location::new(5, 6), Some(ResourceKind::Adamantium)));
    }

    #[test]
    fn sensing_respects_radius_and_team() {
        let rc = ScriptedController::new(RobotKind::Launcher, Location::new(10, 10))
            .with_robot(RobotKind::Carrier, Team::B, Location::new(11, 10))
            .with_robot(RobotKind::Carrier, Team::A, Location::new(12, 10))
            .with_robot(RobotKind::Carrier, Team::B, Location::new(20, 20));
        assert_eq!(rc.sense_nearby_robots(None, None).len(), 2);
        assert_eq!(rc.sense_nearby_robots(None, Some(Team::B)).len(), 1);
    }

    #[test]
    fn destroyed_after_counts_turns() {
        let mut rc =
            ScriptedController::new(RobotKind::Booster, Location::new(0, 0)).destroyed_after(2);
        assert_eq!(rc.end_turn(), Lifecycle::Alive);
        assert_eq!(rc.end_turn(), Lifecycle::Destroyed);
    }

    #[test]
    fn probes_are_recorded_with_answers() {
        let rc = ScriptedController::new(RobotKind::Carrier, Location::new(0, 0));
        rc.can_move(Direction::South);
        rc.can_move(Direction::North);
        assert_eq!(
            rc.probes(),
            vec![
                (Action::Move(Direction::South), false),
                (Action::Move(Direction::North), true),
            ]
        );
    }
}
