//! Console lifecycle status.

/// Lifecycle state of the console session around the subprocess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleStatus {
    /// Subprocess not yet started.
    #[default]
    Initializing,
    /// Subprocess running, output flowing.
    Running,
    /// Subprocess exited; the display stays readable but accepts no
    /// further producer input.
    Terminated,
}

impl ConsoleStatus {
    /// Check if transition to the target status is valid.
    ///
    /// Valid transitions:
    /// - Initializing -> Running
    /// - Initializing -> Terminated (spawn failure)
    /// - Running -> Terminated
    pub fn can_transition_to(&self, target: ConsoleStatus) -> bool {
        use ConsoleStatus::*;
        matches!(
            (*self, target),
            (Initializing, Running) | (Initializing, Terminated) | (Running, Terminated)
        )
    }

    /// Attempt to transition to a new status.
    pub fn transition_to(&mut self, target: ConsoleStatus) -> crate::Result<()> {
        if self.can_transition_to(target) {
            *self = target;
            Ok(())
        } else {
            Err(crate::error::ConsoleError::InvalidStatusTransition {
                from: *self,
                to: target,
            })
        }
    }

    /// Check if this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConsoleStatus::Terminated)
    }

    /// Check if producer output is still accepted.
    pub fn accepts_output(&self) -> bool {
        matches!(self, ConsoleStatus::Running)
    }
}

impl std::fmt::Display for ConsoleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ConsoleStatus::Initializing => "Initializing",
            ConsoleStatus::Running => "Running",
            ConsoleStatus::Terminated => "Terminated",
        };
        write!(f, "{}", label)
    }
}
