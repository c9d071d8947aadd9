//! Core game types shared by the controller surface and the policies.
//!
//! Defines robot kinds, teams, resource kinds and the per-turn sensing
//! records a robot receives from the environment.

use std::fmt;

use crate::geometry::Location;

/// Kind of a robot, fixed at spawn.
///
/// Only headquarters, carriers and launchers run a policy; the remaining
/// kinds are recognised but idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RobotKind {
    /// Stationary producer that builds other robots.
    Headquarters,
    /// Mobile gatherer that collects resources and carries anchors.
    Carrier,
    /// Mobile combatant.
    Launcher,
    Booster,
    Destabilizer,
    Amplifier,
}

impl RobotKind {
    /// Squared radius within which this kind can act (attack, collect, build).
    pub fn action_radius_squared(&self) -> u32 {
        match self {
            RobotKind::Headquarters => 9,
            RobotKind::Carrier => 9,
            RobotKind::Launcher => 16,
            RobotKind::Booster => 0,
            RobotKind::Destabilizer => 13,
            RobotKind::Amplifier => 0,
        }
    }

    /// Squared radius this kind can sense.
    pub fn vision_radius_squared(&self) -> u32 {
        match self {
            RobotKind::Headquarters => 34,
            _ => 20,
        }
    }

    /// Whether robots of this kind can ever move.
    pub fn is_mobile(&self) -> bool {
        !matches!(self, RobotKind::Headquarters)
    }

    /// Returns all robot kinds in order.
    pub fn all() -> [RobotKind; 6] {
        [
            RobotKind::Headquarters,
            RobotKind::Carrier,
            RobotKind::Launcher,
            RobotKind::Booster,
            RobotKind::Destabilizer,
            RobotKind::Amplifier,
        ]
    }
}

impl fmt::Display for RobotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RobotKind::Headquarters => write!(f, "HEADQUARTERS"),
            RobotKind::Carrier => write!(f, "CARRIER"),
            RobotKind::Launcher => write!(f, "LAUNCHER"),
            RobotKind::Booster => write!(f, "BOOSTER"),
            RobotKind::Destabilizer => write!(f, "DESTABILIZER"),
            RobotKind::Amplifier => write!(f, "AMPLIFIER"),
        }
    }
}

/// Side a robot plays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    A,
    B,
}

impl Team {
    /// The opposing team.
    pub fn opponent(&self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

/// Resources a carrier can hold and hand over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    Adamantium,
    Mana,
    Elixir,
}

impl ResourceKind {
    /// Returns all resource kinds in order.
    pub fn all() -> [ResourceKind; 3] {
        [
            ResourceKind::Adamantium,
            ResourceKind::Mana,
            ResourceKind::Elixir,
        ]
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Adamantium => write!(f, "ADAMANTIUM"),
            ResourceKind::Mana => write!(f, "MANA"),
            ResourceKind::Elixir => write!(f, "ELIXIR"),
        }
    }
}

/// Anchor variants a carrier may be holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    Standard,
    Accelerating,
}

/// Identifier of a robot, assigned by the environment.
pub type RobotId = u32;

/// Identifier of an island, assigned by the environment.
pub type IslandId = u32;

/// A robot as seen by another robot's sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotInfo {
    pub id: RobotId,
    pub kind: RobotKind,
    pub team: Team,
    pub location: Location,
}

/// A sensed resource well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WellInfo {
    pub location: Location,
    pub resource: ResourceKind,
}
