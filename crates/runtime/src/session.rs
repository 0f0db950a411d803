//! Companion session: the lifecycle machine wired to a follow controller.
//!
//! The controller is only ticked while the companion is RECRUITED. Recruiting
//! restarts tracking from scratch; dismissing drops any path in progress.
use follow_core::{
    Actor, Companion, CompanionState, CompanionStateMachine, FollowConfig, FollowController,
    FollowStep, Follower, StateName, Tick,
};

use crate::actor::SimActor;
use crate::error::Result;
use crate::world::World;

/// The companion follows the player.
#[derive(Debug, Default)]
pub struct RecruitedState;

impl CompanionState for RecruitedState {
    fn entry(&mut self, companion: &mut Companion) {
        companion.following = true;
        tracing::info!(companion = %companion.name, "companion recruited");
    }

    fn exit(&mut self, companion: &mut Companion) {
        companion.following = false;
        tracing::info!(companion = %companion.name, "companion dismissed");
    }
}

/// The companion is out of play for the rest of the day.
#[derive(Debug, Default)]
pub struct UnavailableState;

impl CompanionState for UnavailableState {
    fn entry(&mut self, companion: &mut Companion) {
        companion.recruitable = false;
        companion.following = false;
    }

    fn exit(&mut self, _companion: &mut Companion) {}
}

#[derive(Debug)]
pub struct CompanionSession {
    machine: CompanionStateMachine,
    controller: FollowController,
    follower: SimActor,
}

impl CompanionSession {
    pub fn new(companion: Companion, follower: SimActor, config: FollowConfig) -> Result<Self> {
        let mut machine = CompanionStateMachine::new(companion)?;
        machine.register_state(StateName::Recruited, Box::new(RecruitedState))?;
        machine.register_state(StateName::Unavailable, Box::new(UnavailableState))?;

        Ok(Self {
            machine,
            controller: FollowController::with_config(config),
            follower,
        })
    }

    pub fn machine(&self) -> &CompanionStateMachine {
        &self.machine
    }

    pub fn controller(&self) -> &FollowController {
        &self.controller
    }

    pub fn follower(&self) -> &SimActor {
        &self.follower
    }

    pub fn follower_mut(&mut self) -> &mut SimActor {
        &mut self.follower
    }

    pub fn state(&self) -> Option<StateName> {
        self.machine.current_state()
    }

    pub fn is_following(&self) -> bool {
        self.machine.companion().following
    }

    pub fn new_day(&mut self) -> Result<()> {
        self.machine.new_day_setup()?;
        Ok(())
    }

    pub fn recruit(&mut self) -> Result<()> {
        self.machine.change_state(StateName::Recruited)?;
        self.controller.reset();
        Ok(())
    }

    /// Back to AVAILABLE; the follower stops where it stands.
    pub fn dismiss(&mut self) -> Result<()> {
        self.machine.change_state(StateName::Available)?;
        self.follower.set_path_controller(None);
        self.follower.halt();
        Ok(())
    }

    pub fn make_unavailable(&mut self) -> Result<()> {
        self.machine.change_state(StateName::Unavailable)?;
        Ok(())
    }

    /// Ticks the follow controller if the companion is following.
    pub fn update<L>(
        &mut self,
        tick: Tick,
        leader: Option<&L>,
        world: &mut World,
    ) -> Option<FollowStep>
    where
        L: Actor + ?Sized,
    {
        if !self.is_following() {
            return None;
        }
        Some(
            self.controller
                .update(tick, leader, Some(&mut self.follower), world),
        )
    }

    /// Tears the lifecycle down and hands back the companion record and actor.
    pub fn dispose(self) -> (Companion, SimActor) {
        (self.machine.dispose(), self.follower)
    }
}
