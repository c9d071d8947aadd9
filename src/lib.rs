//! turnwise - per-robot turn policies for a partially observable grid game
//!
//! Each robot runs its own [`Agent`]: once per turn the agent hands the
//! robot's [`Controller`] to the policy chosen from the robot's kind, which
//! senses the surroundings and issues legality-checked actions. Failures are
//! contained to the turn they happen in.
//!
//! Roles:
//! - headquarters ([`policy::ProducerPolicy`]) build carriers and launchers,
//! - carriers ([`policy::GathererPolicy`]) mine wells, bring resources home
//!   and deliver anchors to islands,
//! - launchers ([`policy::CombatantPolicy`]) attack enemies and wander.

pub mod agent;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod policy;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;

pub use agent::Agent;
pub use config::AgentConfig;
pub use controller::{Controller, Lifecycle};
pub use error::{ActionError, TurnError};
pub use geometry::{Direction, Location, DIRECTIONS};
pub use policy::{Policy, RolePolicy};
pub use types::{Anchor, ResourceKind, RobotInfo, RobotKind, Team, WellInfo};
