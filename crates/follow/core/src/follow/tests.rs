use super::testing::{TestFollower, TestLeader, TestWorld, tick};
use super::*;
use crate::config::FollowConfig;
use crate::env::{Emote, Follower, Heading, TilePath};
use crate::geometry::Position;
use crate::types::{ActorId, LocationId};

fn run(
    controller: &mut FollowController,
    n: u64,
    leader: &TestLeader,
    follower: &mut TestFollower,
    world: &mut TestWorld,
) -> FollowStep {
    controller.update(tick(n), Some(leader), Some(follower), world)
}

#[test]
fn missing_actor_is_skipped() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::reachable();
    let leader = TestLeader::at("Farm", 10, 10);
    let mut follower = TestFollower::at("Farm", 10, 20);

    let step = controller.update::<TestLeader, TestFollower, _>(
        tick(1),
        None,
        Some(&mut follower),
        &mut world,
    );
    assert_eq!(step, FollowStep::Skipped);

    let step = controller.update::<_, TestFollower, _>(tick(2), Some(&leader), None, &mut world);
    assert_eq!(step, FollowStep::Skipped);

    assert_eq!(controller.lost_time(), 0);
    assert_eq!(controller.breadcrumb_count(), 0);
    assert_eq!(follower.tile, Position::new(10, 20));
}

#[test]
fn location_change_warps_follower_into_leader_location() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::reachable();
    let mut follower = TestFollower::at("Farm", 3, 3).moving();
    follower.path = Some(TilePath::new([Position::new(3, 4)]));
    world.roster.entry(LocationId::new("Farm")).or_default().insert(follower.id);

    let mut leader = TestLeader::at("Farm", 5, 3);
    run(&mut controller, 1, &leader, &mut follower, &mut world);
    assert!(controller.last_leader_tile().is_some());

    leader.location = LocationId::new("Town");
    leader.tile = Position::new(7, 7);
    let step = run(&mut controller, 2, &leader, &mut follower, &mut world);

    assert_eq!(step, FollowStep::Warped);
    assert_eq!(follower.location, LocationId::new("Town"));
    assert_eq!(follower.tile, Position::new(7, 7));
    assert!(follower.path.is_none());
    assert!(follower.intent.is_halted());
    assert!(follower.intent.passes_through);
    assert!(world.members("Farm").is_empty());
    assert_eq!(world.members("Town"), vec![ActorId(1)]);
    assert_eq!(controller.breadcrumb_count(), 0);
    assert_eq!(controller.current_target(), None);
    assert_eq!(controller.last_leader_tile(), None);
}

#[test]
fn out_of_range_warps_within_same_location() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::reachable();
    let leader = TestLeader::at("Farm", 100, 10);
    let mut follower = TestFollower::at("Farm", 10, 10);

    let step = run(&mut controller, 1, &leader, &mut follower, &mut world);

    assert_eq!(step, FollowStep::Warped);
    assert_eq!(follower.tile, Position::new(100, 10));
    assert_eq!(follower.location, LocationId::new("Farm"));
    assert!(world.roster.is_empty());
}

#[test]
fn speed_is_synced_and_boosted_when_far() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::reachable();
    let mut leader = TestLeader::at("Farm", 10, 10);
    leader.speed = 5;
    let mut follower = TestFollower::at("Farm", 10, 20).moving();

    let step = run(&mut controller, 1, &leader, &mut follower, &mut world);
    assert_eq!(step, FollowStep::Stepped);
    assert_eq!(follower.intent.speed, 5);
    assert_eq!(follower.intent.added_speed, 2);

    follower.tile = Position::new(10, 15);
    run(&mut controller, 2, &leader, &mut follower, &mut world);
    assert_eq!(follower.intent.added_speed, 0);
}

#[test]
fn stationary_follower_close_to_leader_just_stands() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::reachable();
    let leader = TestLeader::at("Farm", 10, 10);
    let mut follower = TestFollower::at("Farm", 10, 12);

    for n in 1..=40 {
        let step = run(&mut controller, n, &leader, &mut follower, &mut world);
        assert_eq!(step, FollowStep::Standing);
    }
    assert_eq!(controller.lost_time(), 0);
    assert_eq!(controller.breadcrumb_count(), 0);
    assert_eq!(follower.steps, 0);
}

#[test]
fn stuck_follower_gets_direct_path_after_timeout() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::reachable();
    let leader = TestLeader::at("Farm", 10, 10);
    let mut follower = TestFollower::at("Farm", 10, 14);

    for n in 1..=24 {
        let step = run(&mut controller, n, &leader, &mut follower, &mut world);
        assert_eq!(step, FollowStep::Stepped);
    }
    assert_eq!(controller.lost_time(), 24);
    assert_eq!(controller.breadcrumb_count(), 1);
    assert_eq!(follower.intent.heading, Heading::UP);

    let step = run(&mut controller, 25, &leader, &mut follower, &mut world);

    assert_eq!(step, FollowStep::Lost(Recovery::PathFound));
    assert_eq!(controller.lost_time(), 0);
    assert_eq!(controller.breadcrumb_count(), 0);
    assert_eq!(controller.current_target(), Some(Position::new(10, 10)));
    assert_eq!(follower.path, Some(TilePath::new([Position::new(10, 11)])));
    assert_eq!(follower.tile, Position::new(10, 14));
    assert!(follower.emotes.is_empty());
    assert_eq!(*world.searched.borrow(), vec![Position::new(10, 11)]);
}

#[test]
fn stuck_follower_without_path_forces_march_along_trail() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::unreachable();
    let leader = TestLeader::at("Farm", 10, 10);
    let mut follower = TestFollower::at("Farm", 10, 14);

    for n in 1..=24 {
        run(&mut controller, n, &leader, &mut follower, &mut world);
    }
    let step = run(&mut controller, 25, &leader, &mut follower, &mut world);

    assert_eq!(step, FollowStep::Lost(Recovery::ForcedMarch));
    assert!(follower.intent.charging);
    assert_eq!(follower.intent.added_speed, 4);
    assert_eq!(controller.breadcrumb_count(), 1);
    assert_eq!(follower.emotes, vec![Emote::Confused]);
    assert_eq!(world.searched.borrow().len(), 9);

    // The march bonus survives while the leader is near.
    run(&mut controller, 26, &leader, &mut follower, &mut world);
    assert_eq!(follower.intent.added_speed, 4);
}

fn force_march(
    controller: &mut FollowController,
    leader: &TestLeader,
    follower: &mut TestFollower,
    world: &mut TestWorld,
) {
    for n in 1..=24 {
        run(controller, n, leader, follower, world);
    }
    let step = run(controller, 25, leader, follower, world);
    assert_eq!(step, FollowStep::Lost(Recovery::ForcedMarch));
}

#[test]
fn forced_march_ends_on_arrival() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::unreachable();
    let leader = TestLeader::at("Farm", 10, 10);
    let mut follower = TestFollower::at("Farm", 10, 14);
    force_march(&mut controller, &leader, &mut follower, &mut world);

    follower.tile = Position::new(10, 11);
    follower.moving = true;
    let step = run(&mut controller, 26, &leader, &mut follower, &mut world);

    assert_eq!(step, FollowStep::Arrived);
    assert!(!follower.intent.charging);
    assert_eq!(follower.intent.added_speed, 0);

    follower.moving = false;
    for n in 27..127 {
        let step = run(&mut controller, n, &leader, &mut follower, &mut world);
        assert_eq!(step, FollowStep::Standing);
    }
    assert!(!follower.intent.charging);
    assert_eq!(follower.intent.added_speed, 0);
}

#[test]
fn forced_march_ends_when_trail_runs_out() {
    let config = FollowConfig {
        proximity_threshold: 0.0,
        ..FollowConfig::default()
    };
    let mut controller = FollowController::with_config(config);
    let mut world = TestWorld::unreachable();
    let leader = TestLeader::at("Farm", 10, 10);
    let mut follower = TestFollower::at("Farm", 10, 14);
    force_march(&mut controller, &leader, &mut follower, &mut world);

    follower.tile = Position::new(10, 10);
    follower.moving = true;
    assert_eq!(
        run(&mut controller, 26, &leader, &mut follower, &mut world),
        FollowStep::Stepped
    );
    assert!(follower.intent.charging);

    let step = run(&mut controller, 27, &leader, &mut follower, &mut world);

    assert_eq!(step, FollowStep::Idle);
    assert!(!follower.intent.charging);
    assert_eq!(follower.intent.added_speed, 0);
}

#[test]
fn warp_drops_charge() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::reachable();
    let leader = TestLeader::at("Farm", 10, 10);
    let mut follower = TestFollower::at("Town", 3, 3);
    follower.intent.charging = true;
    follower.intent.added_speed = 4;

    let step = run(&mut controller, 1, &leader, &mut follower, &mut world);

    assert_eq!(step, FollowStep::Warped);
    assert!(!follower.intent.charging);
}

#[test]
fn stationary_close_follower_stands_before_arrival_check() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::reachable();
    let leader = TestLeader::at("Farm", 10, 10);
    let mut follower = TestFollower::at("Farm", 10, 14).moving();
    run(&mut controller, 1, &leader, &mut follower, &mut world);
    assert_eq!(follower.intent.heading, Heading::UP);

    follower.tile = Position::new(10, 11);
    follower.moving = false;
    let step = run(&mut controller, 2, &leader, &mut follower, &mut world);

    // Standing wins: heading and trail are left as they were.
    assert_eq!(step, FollowStep::Standing);
    assert_eq!(follower.intent.heading, Heading::UP);
    assert_eq!(controller.breadcrumb_count(), 1);
    assert_eq!(controller.current_target(), Some(Position::new(10, 10)));
}

#[test]
fn distant_leader_without_path_forces_warp() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::unreachable();
    let leader = TestLeader::at("Farm", 10, 10);
    let mut follower = TestFollower::at("Farm", 10, 28).moving();
    follower.intent.charging = true;

    let step = run(&mut controller, 1, &leader, &mut follower, &mut world);

    assert_eq!(step, FollowStep::Overflow(Recovery::Warped));
    assert_eq!(follower.tile, Position::new(10, 10));
    assert!(!follower.intent.charging);
    assert!(follower.path.is_none());
    assert_eq!(controller.breadcrumb_count(), 0);
    assert_eq!(controller.current_target(), Some(Position::new(10, 10)));
}

#[test]
fn distant_leader_with_path_emotes_and_keeps_position() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::reachable();
    let leader = TestLeader::at("Farm", 10, 10);
    let mut follower = TestFollower::at("Farm", 10, 28).moving();

    let step = run(&mut controller, 1, &leader, &mut follower, &mut world);

    assert_eq!(step, FollowStep::Overflow(Recovery::PathFound));
    assert_eq!(follower.tile, Position::new(10, 28));
    assert!(follower.path.is_some());
    assert_eq!(follower.emotes, vec![Emote::FoundIt]);
    assert_eq!(controller.breadcrumb_count(), 0);
}

#[test]
fn breadcrumb_queue_never_exceeds_node_limit() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::reachable();
    let mut leader = TestLeader::at("Farm", 10, 10);
    let mut follower = TestFollower::at("Farm", 10, 14).moving();
    let limit = controller.config().path_max_node_count;
    let mut overflows = 0;

    for n in 1..=90 {
        leader.tile = if n % 2 == 0 {
            Position::new(11, 10)
        } else {
            Position::new(10, 10)
        };
        let step = run(&mut controller, n, &leader, &mut follower, &mut world);
        if let FollowStep::Overflow(_) = step {
            overflows += 1;
        }
        assert!(controller.breadcrumb_count() <= limit, "tick {n}");
    }
    assert!(overflows >= 1);
}

#[test]
fn arrival_halts_and_clears_trail() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::reachable();
    let leader = TestLeader::at("Farm", 10, 10);
    let mut follower = TestFollower::at("Farm", 10, 11).moving();
    follower.intent.heading = Heading::UP;

    let step = run(&mut controller, 1, &leader, &mut follower, &mut world);

    assert_eq!(step, FollowStep::Arrived);
    assert!(follower.intent.is_halted());
    assert_eq!(controller.breadcrumb_count(), 0);
    assert_eq!(controller.current_target(), Some(Position::new(10, 10)));
    assert_eq!(follower.steps, 0);
}

#[test]
fn follower_retraces_breadcrumbs_in_order() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::reachable();
    let mut leader = TestLeader::at("Farm", 10, 10);
    let mut follower = TestFollower::at("Farm", 10, 14).moving();

    run(&mut controller, 1, &leader, &mut follower, &mut world);
    assert_eq!(controller.current_target(), Some(Position::new(10, 10)));

    leader.tile = Position::new(10, 9);
    run(&mut controller, 2, &leader, &mut follower, &mut world);
    assert_eq!(controller.breadcrumb_count(), 2);
    assert_eq!(controller.current_target(), Some(Position::new(10, 10)));

    follower.tile = Position::new(10, 10);
    leader.tile = Position::new(10, 7);
    run(&mut controller, 3, &leader, &mut follower, &mut world);
    assert_eq!(controller.current_target(), Some(Position::new(10, 10)));
    assert_eq!(controller.breadcrumb_count(), 2);

    let step = run(&mut controller, 4, &leader, &mut follower, &mut world);
    assert_eq!(step, FollowStep::Stepped);
    assert_eq!(controller.current_target(), Some(Position::new(10, 9)));
    assert_eq!(
        controller.breadcrumbs().copied().collect::<Vec<_>>(),
        vec![Position::new(10, 7)]
    );
    assert_eq!(follower.intent.heading, Heading::UP);
    assert_eq!(follower.steps, 4);
}

#[test]
fn steering_prefers_horizontal_correction() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::reachable();
    let leader = TestLeader::at("Farm", 4, 10);
    let mut follower = TestFollower::at("Farm", 10, 14).moving();

    run(&mut controller, 1, &leader, &mut follower, &mut world);
    assert_eq!(follower.intent.heading, Heading::LEFT);

    let leader = TestLeader::at("Farm", 16, 10);
    controller.reset();
    run(&mut controller, 2, &leader, &mut follower, &mut world);
    assert_eq!(follower.intent.heading, Heading::RIGHT);
}

#[test]
fn reaching_end_of_trail_halts() {
    let config = FollowConfig {
        proximity_threshold: 0.0,
        ..FollowConfig::default()
    };
    let mut controller = FollowController::with_config(config);
    let mut world = TestWorld::reachable();
    let leader = TestLeader::at("Farm", 10, 10);
    let mut follower = TestFollower::at("Farm", 10, 14).moving();

    run(&mut controller, 1, &leader, &mut follower, &mut world);
    follower.tile = Position::new(10, 10);
    assert_eq!(
        run(&mut controller, 2, &leader, &mut follower, &mut world),
        FollowStep::Stepped
    );

    let step = run(&mut controller, 3, &leader, &mut follower, &mut world);

    assert_eq!(step, FollowStep::Idle);
    assert_eq!(controller.current_target(), None);
    assert!(follower.intent.is_halted());
    assert_eq!(follower.steps, 2);
}

#[test]
fn active_path_controller_takes_over_stepping() {
    let mut controller = FollowController::new();
    let mut world = TestWorld::reachable();
    let leader = TestLeader::at("Farm", 10, 10);
    let mut follower = TestFollower::at("Farm", 10, 14).moving();
    follower.path = Some(TilePath::new([Position::new(10, 13)]));

    let step = run(&mut controller, 1, &leader, &mut follower, &mut world);

    assert_eq!(step, FollowStep::Deferred);
    assert_eq!(follower.steps, 0);
    assert_eq!(controller.breadcrumb_count(), 1);
}

#[test]
fn same_location_warp_is_idempotent() {
    let mut world = TestWorld::reachable();
    let mut follower = TestFollower::at("Farm", 1, 1);
    follower.path = Some(TilePath::new([Position::new(1, 2)]));
    follower.intent.heading = Heading::DOWN;
    let farm = LocationId::new("Farm");

    warp(&mut follower, &mut world, Position::new(6, 6), None);
    assert_eq!(follower.tile, Position::new(6, 6));
    assert!(follower.path.is_none());

    warp(&mut follower, &mut world, Position::new(6, 6), Some(&farm));
    assert_eq!(follower.tile, Position::new(6, 6));
    assert!(follower.path.is_none());
    assert!(follower.intent.is_halted());
    assert!(world.roster.is_empty());
}

#[test]
fn cross_location_warp_moves_roster_membership_once() {
    let mut world = TestWorld::reachable();
    let mut follower = TestFollower::at("Farm", 1, 1);
    world.roster.entry(LocationId::new("Farm")).or_default().insert(follower.id);
    let town = LocationId::new("Town");

    warp(&mut follower, &mut world, Position::new(2, 2), Some(&town));
    warp(&mut follower, &mut world, Position::new(2, 2), Some(&town));

    assert_eq!(follower.location, town);
    assert_eq!(world.members("Town"), vec![ActorId(1)]);
    assert!(world.members("Farm").is_empty());
}

#[test]
fn come_to_tries_nearest_tile_first() {
    let world = TestWorld::reachable();
    let mut follower = TestFollower::at("Farm", 10, 14);

    assert!(come_to(&mut follower, &world, Position::new(10, 10), 28, true));
    assert_eq!(*world.searched.borrow(), vec![Position::new(10, 11)]);
    assert_eq!(follower.emotes, vec![Emote::FoundIt]);
}

#[test]
fn come_to_defers_to_existing_path_controller() {
    let world = TestWorld::reachable();
    let mut follower = TestFollower::at("Farm", 10, 14);
    let existing = TilePath::new([Position::new(10, 13)]);
    follower.path = Some(existing.clone());

    assert!(!come_to(&mut follower, &world, Position::new(10, 10), 28, true));
    assert!(world.searched.borrow().is_empty());
    assert!(follower.emotes.is_empty());
    assert_eq!(follower.path, Some(existing));
}

#[test]
fn come_to_without_path_is_confused() {
    let world = TestWorld::unreachable();
    let mut follower = TestFollower::at("Farm", 10, 14);

    assert!(!come_to(&mut follower, &world, Position::new(10, 10), 28, false));
    assert_eq!(world.searched.borrow().len(), 9);
    assert_eq!(follower.emotes, vec![Emote::Confused]);
    assert!(!follower.has_path_controller());
}
