//! Unit tests for the swept collision resolver

use glam::DVec2;
use platstep_core::math::SKIN;
use platstep_core::resolver::{resolve, sweep_x, sweep_y, AxisHit};
use platstep_core::tests::test_helpers::{approx_eq_f64, obstacle};
use platstep_core::{ContactFlags, Side};

const BODY: DVec2 = DVec2::new(0.5, 0.5);

#[test]
fn test_axis_hit_rejects_non_positive_and_later_times() {
    let start = AxisHit::unobstructed(1.0);

    assert_eq!(start.consider(0.0, Side::Right), start);
    assert_eq!(start.consider(-0.5, Side::Right), start);
    assert_eq!(start.consider(1.0, Side::Right), start);
    assert_eq!(start.consider(1.5, Side::Right), start);
    assert_eq!(start.consider(f64::NAN, Side::Right), start);

    let hit = start.consider(0.25, Side::Left);
    assert_eq!(hit.time, 0.25);
    assert_eq!(hit.side, Some(Side::Left));
}

#[test]
fn test_axis_hit_ties_keep_first() {
    let hit = AxisHit::unobstructed(1.0)
        .consider(0.5, Side::Right)
        .consider(0.5, Side::Left);

    assert_eq!(hit.side, Some(Side::Right));
}

#[test]
fn test_empty_obstacles_move_exactly() {
    let position = DVec2::new(1.5, 2.25);
    let velocity = DVec2::new(3.0, -1.25);
    let dt = 0.5;

    let r = resolve(position, BODY, velocity, &[], dt);

    assert_eq!(r.position, position + velocity * dt);
    assert_eq!(r.velocity, velocity);
    assert!(!r.contacts.any());
}

#[test]
fn test_zero_velocity_skips_sweep() {
    // Body anchor sits inside the inflated box; with no motion nothing is tested.
    let walls = [obstacle(4.0, 0.0, 2.0, 2.0)];

    assert_eq!(sweep_x(DVec2::new(5.0, 1.0), BODY, 0.0, &walls, 1.0), AxisHit::unobstructed(1.0));
    assert_eq!(sweep_y(DVec2::new(5.0, 1.0), BODY, 0.0, &walls, 1.0), AxisHit::unobstructed(1.0));
}

#[test]
fn test_landing_on_floor() {
    let floor = [obstacle(0.0, 0.0, 10.0, 0.25)];

    let r = resolve(DVec2::new(5.0, 1.0), BODY, DVec2::new(0.0, -10.0), &floor, 1.0);

    assert_eq!(r.velocity.y, 0.0);
    assert!(approx_eq_f64(r.position.y, 0.25 + SKIN, 1e-5), "y = {}", r.position.y);
    assert_eq!(r.position.x, 5.0);
    assert_eq!(
        r.contacts,
        ContactFlags {
            down: true,
            ..ContactFlags::NONE
        }
    );
}

#[test]
fn test_running_into_right_wall() {
    let wall = [obstacle(9.75, 0.0, 0.25, 10.0)];

    let r = resolve(DVec2::new(5.0, 1.0), BODY, DVec2::new(5.0, 0.0), &wall, 1.0);

    assert_eq!(r.velocity.x, 0.0);
    assert!(approx_eq_f64(r.position.x, 9.75 - BODY.x / 2.0 - SKIN, 1e-5), "x = {}", r.position.x);
    assert!(r.contacts.right);
    assert!(!r.contacts.left);
}

#[test]
fn test_running_into_left_wall() {
    let wall = [obstacle(0.0, 0.0, 0.25, 10.0)];

    let r = resolve(DVec2::new(1.0, 1.0), BODY, DVec2::new(-5.0, 0.0), &wall, 1.0);

    assert_eq!(r.velocity.x, 0.0);
    assert!(approx_eq_f64(r.position.x, 0.5 + SKIN, 1e-5), "x = {}", r.position.x);
    assert!(r.contacts.left);
    assert!(!r.contacts.right);
}

#[test]
fn test_head_hits_ceiling() {
    let ceiling = [obstacle(0.0, 3.0, 10.0, 0.25)];

    let r = resolve(DVec2::new(5.0, 1.0), BODY, DVec2::new(0.0, 5.0), &ceiling, 1.0);

    assert_eq!(r.velocity.y, 0.0);
    assert!(approx_eq_f64(r.position.y, 2.5 - SKIN, 1e-5), "y = {}", r.position.y);
    assert!(r.contacts.up);
    assert!(!r.contacts.down);
}

#[test]
fn test_wall_out_of_reach_does_not_clamp() {
    let wall = [obstacle(9.75, 0.0, 0.25, 10.0)];

    let r = resolve(DVec2::new(5.0, 1.0), BODY, DVec2::new(1.0, 0.0), &wall, 1.0);

    assert_eq!(r.position.x, 6.0);
    assert_eq!(r.velocity.x, 1.0);
    assert_eq!(r.contacts, ContactFlags::NONE);
}

#[test]
fn test_obstacle_outside_cross_axis_range_is_ignored() {
    // Inflated y range is [2.5, 4.0]; the body's bottom sits at 1.0.
    let high_block = [obstacle(6.0, 3.0, 1.0, 1.0)];

    let hit = sweep_x(DVec2::new(5.0, 1.0), BODY, 5.0, &high_block, 1.0);

    assert_eq!(hit, AxisHit::unobstructed(1.0));
}

#[test]
fn test_nearest_wall_wins_regardless_of_order() {
    let near = obstacle(6.0, 0.0, 0.25, 10.0);
    let far = obstacle(8.0, 0.0, 0.25, 10.0);

    let forward = sweep_x(DVec2::new(5.0, 1.0), BODY, 5.0, &[near, far], 1.0);
    let reverse = sweep_x(DVec2::new(5.0, 1.0), BODY, 5.0, &[far, near], 1.0);

    // (5.75 - 5) / 5
    assert!(approx_eq_f64(forward.time, 0.15, 1e-6));
    assert_eq!(forward, reverse);
    assert_eq!(forward.side, Some(Side::Right));
}

#[test]
fn test_overlapping_obstacles_resolve_like_one() {
    let floor = obstacle(0.0, 0.0, 10.0, 0.25);
    let overlapping = [floor, obstacle(2.0, 0.0, 6.0, 0.25), floor];

    let single = resolve(DVec2::new(5.0, 1.0), BODY, DVec2::new(0.0, -10.0), &[floor], 1.0);
    let many = resolve(DVec2::new(5.0, 1.0), BODY, DVec2::new(0.0, -10.0), &overlapping, 1.0);

    assert_eq!(single, many);
}

#[test]
fn test_only_nearest_blocker_is_flagged() {
    // The body already straddles a thin post, so moving right it first
    // crosses the post's far edge (left side) before reaching the wall.
    let obstacles = [obstacle(9.75, 0.0, 0.25, 10.0), obstacle(4.9, 0.0, 0.2, 10.0)];

    let r = resolve(DVec2::new(5.0, 1.0), BODY, DVec2::new(5.0, 0.0), &obstacles, 1.0);

    assert_eq!(
        r.contacts,
        ContactFlags {
            left: true,
            ..ContactFlags::NONE
        }
    );
}

#[test]
fn test_axes_resolve_independently() {
    let floor = obstacle(0.0, 0.0, 10.0, 0.25);
    let wall = obstacle(9.75, 0.0, 0.25, 10.0);

    let r = resolve(DVec2::new(9.0, 1.0), BODY, DVec2::new(5.0, -10.0), &[floor, wall], 1.0);

    assert!(r.contacts.right);
    assert!(r.contacts.down);
    assert_eq!(r.velocity, DVec2::ZERO);
    assert!(approx_eq_f64(r.position.x, 9.5 - SKIN, 1e-5));
    assert!(approx_eq_f64(r.position.y, 0.25 + SKIN, 1e-5));
}

#[test]
fn test_diagonal_corner_is_a_known_miss() {
    // Moving diagonally past a block's corner: at the start the body is
    // below the block's inflated y range and left of its inflated x range,
    // so neither decoupled sweep sees it.
    let block = [obstacle(6.0, 3.0, 1.0, 1.0)];

    let r = resolve(DVec2::new(5.0, 1.0), BODY, DVec2::new(2.0, 2.5), &block, 1.0);

    assert_eq!(r.contacts, ContactFlags::NONE);
    assert_eq!(r.position, DVec2::new(7.0, 3.5));
}
