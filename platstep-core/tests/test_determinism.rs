//! Determinism tests - identical inputs produce bit-identical outputs

use platstep_core::tests::test_helpers::{load_level, load_script};
use platstep_core::{
    build_simulation_context, run_level, step, step_simulation, InputState, Level, PlayerState,
};

const DT: f64 = 1.0 / 60.0;

fn assert_bit_identical(a: &PlayerState, b: &PlayerState) {
    let bits = |s: &PlayerState| {
        [
            s.body.position.x.to_bits(),
            s.body.position.y.to_bits(),
            s.body.velocity.x.to_bits(),
            s.body.velocity.y.to_bits(),
        ]
    };
    assert_eq!(bits(a), bits(b));
    assert_eq!(a.contacts, b.contacts);
}

#[test]
fn test_run_twice_matches() {
    let level = load_level("room.json").expect("room fixture should load");
    let script = load_script("run_right.json").expect("script fixture should load");

    let first = run_level(level.clone(), &script, DT, 200).expect("first run failed");
    let second = run_level(level, &script, DT, 200).expect("second run failed");

    assert_bit_identical(&first.final_state, &second.final_state);
    assert_eq!(first, second);
}

#[test]
fn test_multiple_runs_match() {
    let script = load_script("jump_once.json").expect("script fixture should load");

    let results: Vec<_> = (0..5)
        .map(|_| run_level(Level::demo(), &script, DT, 150).expect("run failed"))
        .collect();

    for i in 1..results.len() {
        assert_eq!(results[0], results[i], "run {} should match run 0", i);
    }
}

#[test]
fn test_snapshot_round_trip_replays_identically() {
    let level = Level::demo();
    let mut ctx = build_simulation_context(level.clone()).expect("demo level is valid");
    let run = InputState::from_pressed(false, true, false);
    for _ in 0..47 {
        step_simulation(&mut ctx, &run, DT);
    }
    let jump = InputState::from_pressed(false, true, true);
    for _ in 0..5 {
        step_simulation(&mut ctx, &jump, DT);
    }

    let snapshot = serde_json::to_string(&ctx.state).expect("state serializes");
    let restored: PlayerState = serde_json::from_str(&snapshot).expect("state deserializes");
    assert_bit_identical(&restored, &ctx.state);

    let level_json = level.to_json().expect("level serializes");
    let restored_level = Level::from_json(&level_json).expect("level deserializes");
    assert_eq!(restored_level, level);

    let mut original = ctx.state;
    let mut replayed = restored;
    for frame in 0..120 {
        let input = if frame % 40 < 20 { jump } else { run.mirrored() };
        original = step(&original, &input, &level.obstacles, &level.tuning, DT);
        replayed = step(&replayed, &input, &restored_level.obstacles, &restored_level.tuning, DT);
        assert_bit_identical(&original, &replayed);
    }
}
