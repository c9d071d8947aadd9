//! Per-robot state and the turn loop that drives it.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{error, info, warn};

use crate::config::AgentConfig;
use crate::controller::{Controller, Lifecycle};
use crate::error::TurnError;
use crate::policy::{Policy, RandomWalk, RolePolicy, TurnContext};
use crate::types::RobotKind;

/// State of a single robot for its whole lifetime.
///
/// Holds the turn counter, the role policy chosen from the robot's kind and
/// the robot's private random generator. Nothing here is shared between
/// robots.
#[derive(Debug, Clone)]
pub struct Agent {
    kind: RobotKind,
    turn_count: u32,
    policy: RolePolicy,
    walk: RandomWalk,
    config: AgentConfig,
}

impl Agent {
    /// Creates a new agent for a robot of the given kind.
    pub fn new(kind: RobotKind, config: AgentConfig) -> Self {
        Self {
            kind,
            turn_count: 0,
            policy: RolePolicy::for_kind(kind),
            walk: RandomWalk::new(config.seed),
            config,
        }
    }

    /// Creates an agent for the robot behind `rc`.
    pub fn for_controller<C: Controller + ?Sized>(rc: &C, config: AgentConfig) -> Self {
        Self::new(rc.kind(), config)
    }

    pub fn kind(&self) -> RobotKind {
        self.kind
    }

    /// Number of turns started so far.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn policy(&self) -> &RolePolicy {
        &self.policy
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Runs the policy for one turn without ending it.
    ///
    /// The turn counter is advanced before the policy runs. Panics inside
    /// the policy are caught and reported as [`TurnError::Fault`].
    ///
    /// # Errors
    ///
    /// Returns the failure that cut the turn short.
    pub fn play_turn<C: Controller + ?Sized>(&mut self, rc: &mut C) -> Result<(), TurnError> {
        self.turn_count += 1;
        let kind = self.kind;
        let mut ctx = TurnContext {
            turn: self.turn_count,
            walk: &mut self.walk,
            config: &self.config,
        };
        let policy = &mut self.policy;

        match panic::catch_unwind(AssertUnwindSafe(|| policy.take_turn(rc, &mut ctx))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(TurnError::Rejected { kind, source }),
            Err(payload) => Err(TurnError::Fault {
                kind,
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    /// Plays one turn, logs any failure, and always ends the turn.
    pub fn step<C: Controller + ?Sized>(&mut self, rc: &mut C) -> Lifecycle {
        match self.play_turn(rc) {
            Ok(()) => {}
            Err(err @ TurnError::Rejected { .. }) => {
                warn!(robot = rc.id(), kind = %self.kind, turn = self.turn_count, error = %err, "turn aborted");
            }
            Err(err @ TurnError::Fault { .. }) => {
                error!(robot = rc.id(), kind = %self.kind, turn = self.turn_count, error = %err, "turn aborted");
            }
        }
        rc.end_turn()
    }

    /// Runs turns until the environment reports the robot destroyed.
    pub fn run<C: Controller + ?Sized>(&mut self, rc: &mut C) {
        info!(
            robot = rc.id(),
            kind = %self.kind,
            health = rc.health(),
            policy = self.policy.name(),
            "robot created"
        );
        rc.set_indicator("Spawned");

        while self.step(rc) == Lifecycle::Alive {}

        info!(robot = rc.id(), kind = %self.kind, turns = self.turn_count, "robot destroyed");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Location;
    use crate::testing::{Call, ScriptedController};

    #[test]
    fn turn_counter_starts_at_one() {
        let mut rc = ScriptedController::new(RobotKind::Booster, Location::new(3, 3));
        let mut agent = Agent::for_controller(&rc, AgentConfig::default());
        assert_eq!(agent.turn_count(), 0);
        agent.step(&mut rc);
        agent.step(&mut rc);
        assert_eq!(agent.turn_count(), 2);
    }

    #[test]
    fn idle_kinds_do_nothing() {
        for kind in [RobotKind::Booster, RobotKind::Destabilizer, RobotKind::Amplifier] {
            let mut rc = ScriptedController::new(kind, Location::new(3, 3));
            let mut agent = Agent::new(kind, AgentConfig::default());
            assert_eq!(agent.policy().name(), "idle");
            agent.step(&mut rc);
            assert_eq!(rc.calls(), &[Call::EndTurn]);
        }
    }

    #[test]
    fn rejected_action_still_ends_turn() {
        let mut rc = ScriptedController::new(RobotKind::Launcher, Location::new(5, 5))
            .with_stale_probes();
        let mut agent = Agent::for_controller(&rc, AgentConfig::default());

        let err = agent.play_turn(&mut rc).unwrap_err();
        assert!(matches!(err, TurnError::Rejected { kind: RobotKind::Launcher, .. }));

        assert_eq!(agent.step(&mut rc), Lifecycle::Alive);
        assert_eq!(rc.calls().last(), Some(&Call::EndTurn));
        assert_eq!(rc.turns_ended(), 1);
    }

    #[test]
    fn panic_in_policy_is_contained() {
        let mut rc = ScriptedController::new(RobotKind::Carrier, Location::new(5, 5))
            .with_sensor_fault();
        let mut agent = Agent::for_controller(&rc, AgentConfig::default());

        let err = agent.play_turn(&mut rc).unwrap_err();
        match err {
            TurnError::Fault { kind, message } => {
                assert_eq!(kind, RobotKind::Carrier);
                assert!(message.contains("sensor fault"));
            }
            other => panic!("expected fault, got {other:?}"),
        }

        // The loop keeps going after the fault.
        assert_eq!(agent.step(&mut rc), Lifecycle::Alive);
        assert_eq!(agent.turn_count(), 2);
    }

    #[test]
    fn run_stops_when_destroyed() {
        let mut rc = ScriptedController::new(RobotKind::Launcher, Location::new(5, 5))
            .destroyed_after(3);
        let mut agent = Agent::for_controller(&rc, AgentConfig::default());
        agent.run(&mut rc);
        assert_eq!(agent.turn_count(), 3);
        assert_eq!(rc.turns_ended(), 3);
        assert_eq!(rc.indicator(), Some("Spawned"));
    }

    #[test]
    fn run_survives_failing_turns() {
        let mut rc = ScriptedController::new(RobotKind::Carrier, Location::new(5, 5))
            .with_sensor_fault()
            .destroyed_after(4);
        let mut agent = Agent::for_controller(&rc, AgentConfig::default());
        agent.run(&mut rc);
        assert_eq!(agent.turn_count(), 4);
        assert_eq!(rc.turns_ended(), 4);
    }
}
