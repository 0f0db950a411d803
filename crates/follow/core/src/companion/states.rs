//! Built-in companion state handlers.

use crate::types::ActorId;

/// Companion record the state handlers operate on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Companion {
    pub id: ActorId,
    pub name: String,
    /// The player may recruit this companion today.
    pub recruitable: bool,
    /// A follow controller should be driving this companion.
    pub following: bool,
}

impl Companion {
    pub fn new(id: ActorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            recruitable: false,
            following: false,
        }
    }
}

/// Handler for one named companion state.
///
/// `entry` runs when the machine switches to the state, `exit` when it
/// leaves it (including on disposal).
pub trait CompanionState {
    fn entry(&mut self, companion: &mut Companion);

    fn exit(&mut self, companion: &mut Companion);
}

/// Neutral state used at construction and whenever the companion is torn down.
#[derive(Debug, Default)]
pub struct ResetState;

impl CompanionState for ResetState {
    fn entry(&mut self, companion: &mut Companion) {
        companion.recruitable = false;
        companion.following = false;
        tracing::debug!(companion = %companion.name, "companion reset");
    }

    fn exit(&mut self, _companion: &mut Companion) {}
}

/// Companion is around and can be recruited.
#[derive(Debug, Default)]
pub struct AvailableState;

impl CompanionState for AvailableState {
    fn entry(&mut self, companion: &mut Companion) {
        companion.recruitable = true;
        tracing::debug!(companion = %companion.name, "companion available");
    }

    fn exit(&mut self, companion: &mut Companion) {
        companion.recruitable = false;
    }
}
