/// Where a cleanup run is in its connection/transaction lifecycle.
///
/// `Idle -> Connected -> InTransaction -> {Committed | RolledBack} -> Closed`.
/// Every run ends in `Closed`, including runs that never managed to connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Connected,
    InTransaction,
    Committed,
    RolledBack,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Connect,
    Begin,
    Commit,
    Rollback,
    Close,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Cannot apply {event:?} while {state:?}.")]
pub struct InvalidTransition {
    pub state: LifecycleState,
    pub event: LifecycleEvent,
}

impl LifecycleState {
    pub fn on(self, event: LifecycleEvent) -> Result<LifecycleState, InvalidTransition> {
        use LifecycleEvent as E;
        use LifecycleState as S;

        let next = match (self, event) {
            (S::Idle, E::Connect) => S::Connected,
            (S::Connected, E::Begin) => S::InTransaction,
            (S::InTransaction, E::Commit) => S::Committed,
            (S::InTransaction, E::Rollback) => S::RolledBack,
            // An open transaction must be settled before the connection goes.
            (S::Idle | S::Connected | S::Committed | S::RolledBack, E::Close) => S::Closed,
            (state, event) => return Err(InvalidTransition { state, event }),
        };
        Ok(next)
    }

    pub fn is_terminal(self) -> bool {
        self == LifecycleState::Closed
    }
}

/// Applies events and remembers every state visited.
#[derive(Debug)]
pub struct LifecycleTracker {
    history: Vec<LifecycleState>,
}

impl Default for LifecycleTracker {
    fn default() -> Self {
        Self {
            history: vec![LifecycleState::Idle],
        }
    }
}

impl LifecycleTracker {
    pub fn state(&self) -> LifecycleState {
        // `history` starts with `Idle` and is never drained.
        self.history
            .last()
            .copied()
            .unwrap_or(LifecycleState::Idle)
    }

    pub fn advance(&mut self, event: LifecycleEvent) -> Result<LifecycleState, InvalidTransition> {
        let next = self.state().on(event)?;
        tracing::debug!(from = ?self.state(), to = ?next, "Cleanup lifecycle transition");
        self.history.push(next);
        Ok(next)
    }

    /// Like `advance`, for paths that are already handling another error:
    /// an invalid transition is logged instead of replacing that error.
    pub fn advance_on_unwind(&mut self, event: LifecycleEvent) {
        if let Err(e) = self.advance(event) {
            tracing::error!(error.message = %e, "Invalid cleanup lifecycle transition");
        }
    }

    pub fn history(&self) -> &[LifecycleState] {
        &self.history
    }

    pub fn into_history(self) -> Vec<LifecycleState> {
        self.history
    }
}
