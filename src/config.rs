//! Per-agent configuration.

/// Configuration for a single robot's decision loop.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    /// Seed for the robot's private random generator.
    pub seed: u64,
    /// Upper bound on steps taken by one anchor-delivery run, on top of the
    /// environment's own movement budget.
    pub max_delivery_steps: u32,
}

impl AgentConfig {
    /// Default seed, shared by every robot unless overridden.
    pub const DEFAULT_SEED: u64 = 6147;

    /// Default cap on anchor-delivery steps per turn.
    pub const DEFAULT_MAX_DELIVERY_STEPS: u32 = 64;

    /// Returns a copy with a different RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns a copy with a different delivery step cap.
    pub fn with_max_delivery_steps(mut self, steps: u32) -> Self {
        self.max_delivery_steps = steps;
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            max_delivery_steps: Self::DEFAULT_MAX_DELIVERY_STEPS,
        }
    }
}
