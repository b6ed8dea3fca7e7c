use domain::services::Confirmer;
use infrastructure::danger;
use shared::error::Result;
use tracing::debug;

/// Gate states. `AutoApproved` and `Approved` both lead to execution;
/// `Cancelled` is terminal with no execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Generated,
    AutoApproved,
    PendingConfirmation,
    Approved,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Cancelled,
}

/// Two-state confirmation gate between generation and execution:
/// auto-proceed for safe commands, blocking yes/no for dangerous ones.
pub struct ExecutionGate {
    state: GateState,
}

impl ExecutionGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Generated,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Drives the gate from `Generated` to a terminal state for `command`.
    pub fn resolve<C: Confirmer>(
        &mut self,
        command: &str,
        confirmer: &mut C,
    ) -> Result<GateDecision> {
        debug_assert_eq!(self.state, GateState::Generated);

        if !danger::is_dangerous(command) {
            self.state = GateState::AutoApproved;
            return Ok(GateDecision::Proceed);
        }

        debug!(command, "command flagged as dangerous, confirming");
        self.state = GateState::PendingConfirmation;

        if confirmer.confirm(command)? {
            self.state = GateState::Approved;
            Ok(GateDecision::Proceed)
        } else {
            self.state = GateState::Cancelled;
            Ok(GateDecision::Cancelled)
        }
    }
}

impl Default for ExecutionGate {
    fn default() -> Self {
        Self::new()
    }
}
