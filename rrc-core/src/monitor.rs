//! Detection of stuck policies.
//!
//! A policy can fall into attractor states in which it repeatedly commands the
//! same ineffective lateral action. [`StuckMonitor`] counts consecutive lateral
//! failures reported by the environment and, once the count reaches a
//! threshold, switches to [`MonitorMode::Recovering`], in which random actions
//! are sent to the environment instead of the actions of the policy. After a
//! fixed number of random actions control returns to the policy.
//!
//! Recovery always lasts the full number of steps; the failure flag is ignored
//! while recovering.
use crate::error::RrcError;
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};

/// Configuration of [`StuckMonitor`].
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct StuckMonitorConfig {
    /// Number of consecutive lateral failures that triggers recovery.
    pub fails_threshold: usize,

    /// Additional random actions; recovery lasts `fails_threshold + rand_actions` steps.
    pub rand_actions: usize,
}

impl Default for StuckMonitorConfig {
    fn default() -> Self {
        Self {
            fails_threshold: 50,
            rand_actions: 5,
        }
    }
}

impl StuckMonitorConfig {
    /// Sets the number of consecutive failures that triggers recovery.
    pub fn fails_threshold(mut self, v: usize) -> Self {
        self.fails_threshold = v;
        self
    }

    /// Sets the number of additional random actions.
    pub fn rand_actions(mut self, v: usize) -> Self {
        self.rand_actions = v;
        self
    }

    /// Checks the configuration.
    ///
    /// `fails_threshold` must be positive, a zero threshold would enter
    /// recovery without any failure.
    pub fn check(&self) -> Result<()> {
        if self.fails_threshold == 0 {
            return Err(
                RrcError::Configuration("fails_threshold must be positive".to_string()).into(),
            );
        }
        Ok(())
    }

    /// Number of random actions taken in a recovery.
    pub fn recovery_len(&self) -> usize {
        self.fails_threshold + self.rand_actions
    }
}

/// Source of the action of the next step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorMode {
    /// The action of the policy is used.
    Following,

    /// A random action is used.
    Recovering,
}

/// Counters of [`StuckMonitor`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MonitorState {
    /// Current run of lateral failures.
    pub consecutive_fail_count: usize,

    /// Number of random actions since entering recovery.
    pub recovery_action_count: usize,
}

/// State machine deciding whether the action of the policy is overridden.
///
/// A monitor belongs to a single episode and must not be shared.
#[derive(Clone, Debug)]
pub struct StuckMonitor {
    config: StuckMonitorConfig,
    state: MonitorState,
    mode: MonitorMode,
}

impl StuckMonitor {
    /// Constructs a monitor in [`MonitorMode::Following`] with zero counters.
    pub fn new(config: StuckMonitorConfig) -> Self {
        Self {
            config,
            state: MonitorState::default(),
            mode: MonitorMode::Following,
        }
    }

    /// The mode deciding the action of the next step.
    pub fn mode(&self) -> MonitorMode {
        self.mode
    }

    /// Current counters.
    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Updates the monitor with the lateral failure flag of the last step.
    ///
    /// Returns the mode for the next step.
    pub fn update(&mut self, xy_fail: bool) -> MonitorMode {
        match self.mode {
            MonitorMode::Following => {
                if xy_fail {
                    self.state.consecutive_fail_count += 1;
                } else {
                    self.state.consecutive_fail_count = 0;
                }
                if self.state.consecutive_fail_count >= self.config.fails_threshold {
                    info!(
                        "Stuck after {} lateral failures, taking random actions",
                        self.state.consecutive_fail_count
                    );
                    self.mode = MonitorMode::Recovering;
                }
            }
            MonitorMode::Recovering => {
                self.state.recovery_action_count += 1;
                if self.state.recovery_action_count >= self.config.recovery_len() {
                    info!(
                        "Recovered after {} random actions",
                        self.state.recovery_action_count
                    );
                    self.state = MonitorState::default();
                    self.mode = MonitorMode::Following;
                }
            }
        }
        self.mode
    }

    /// Resets the monitor to its initial state.
    pub fn reset(&mut self) {
        self.state = MonitorState::default();
        self.mode = MonitorMode::Following;
    }
}
