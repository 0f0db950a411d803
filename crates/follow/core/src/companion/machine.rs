use std::collections::HashMap;

use crate::companion::{
    AvailableState, Companion, CompanionState, ResetState, StateMachineError, StateName,
};
use crate::error::CoreError;

/// Explicit state machine over a companion's lifecycle.
///
/// At most one state is current. Every transition runs `exit` on the
/// outgoing handler, then `entry` on the incoming one, and only then updates
/// the current state. RESET and AVAILABLE come with built-in handlers;
/// RECRUITED and UNAVAILABLE must be registered by the host.
pub struct CompanionStateMachine {
    companion: Companion,
    states: HashMap<StateName, Box<dyn CompanionState>>,
    current: Option<StateName>,
}

impl CompanionStateMachine {
    /// Creates the machine and enters RESET.
    ///
    /// # Errors
    ///
    /// Never fails in practice since RESET is always registered; the result
    /// mirrors [`Self::change_state`].
    pub fn new(companion: Companion) -> Result<Self, StateMachineError> {
        let mut states: HashMap<StateName, Box<dyn CompanionState>> = HashMap::new();
        states.insert(StateName::Reset, Box::new(ResetState));
        states.insert(StateName::Available, Box::new(AvailableState));

        let mut machine = Self {
            companion,
            states,
            current: None,
        };
        machine.reset_state_machine()?;
        Ok(machine)
    }

    pub fn name(&self) -> &str {
        &self.companion.name
    }

    pub fn companion(&self) -> &Companion {
        &self.companion
    }

    pub fn current_state(&self) -> Option<StateName> {
        self.current
    }

    pub fn is_registered(&self, name: StateName) -> bool {
        self.states.contains_key(&name)
    }

    /// Installs (or replaces) the handler for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StateMachineError::StateActive`] if `name` is the current state.
    pub fn register_state(
        &mut self,
        name: StateName,
        handler: Box<dyn CompanionState>,
    ) -> Result<(), StateMachineError> {
        if self.current == Some(name) {
            return Err(StateMachineError::StateActive(name));
        }
        self.states.insert(name, handler);
        Ok(())
    }

    /// Switches to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StateMachineError::UnknownState`] if no handler is registered
    /// for `name`. The current state is left untouched in that case.
    pub fn change_state(&mut self, name: StateName) -> Result<(), StateMachineError> {
        if !self.states.contains_key(&name) {
            let err = StateMachineError::UnknownState(name);
            tracing::error!(
                companion = %self.companion.name,
                state = %name,
                severity = err.severity().as_str(),
                code = err.error_code(),
                "unknown companion state"
            );
            return Err(err);
        }

        if let Some(current) = self.current {
            if let Some(state) = self.states.get_mut(&current) {
                state.exit(&mut self.companion);
            }
        }

        let next = self
            .states
            .get_mut(&name)
            .ok_or(StateMachineError::UnknownState(name))?;
        next.entry(&mut self.companion);

        tracing::debug!(
            companion = %self.companion.name,
            from = ?self.current,
            to = %name,
            "companion state changed"
        );
        self.current = Some(name);
        Ok(())
    }

    /// Start-of-day transition to AVAILABLE.
    ///
    /// # Errors
    ///
    /// See [`Self::change_state`].
    pub fn new_day_setup(&mut self) -> Result<(), StateMachineError> {
        self.change_state(StateName::Available)
    }

    /// Transition back to RESET.
    ///
    /// # Errors
    ///
    /// See [`Self::change_state`].
    pub fn reset_state_machine(&mut self) -> Result<(), StateMachineError> {
        self.change_state(StateName::Reset)
    }

    /// Leaves the current state and releases every handler.
    ///
    /// Consumes the machine, so no further operation is possible. The
    /// companion record is handed back to the caller.
    pub fn dispose(mut self) -> Companion {
        if let Some(current) = self.current.take() {
            if let Some(state) = self.states.get_mut(&current) {
                state.exit(&mut self.companion);
            }
        }
        self.states.clear();
        tracing::debug!(companion = %self.companion.name, "companion state machine disposed");
        self.companion
    }
}

impl std::fmt::Debug for CompanionStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut registered: Vec<_> = self.states.keys().copied().collect();
        registered.sort();
        f.debug_struct("CompanionStateMachine")
            .field("companion", &self.companion)
            .field("current", &self.current)
            .field("registered", &registered)
            .finish()
    }
}
