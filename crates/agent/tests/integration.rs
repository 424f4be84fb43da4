use tankbot_agent::{
    run_session, DoNothingModel, GreedyAimModel, GreedyChaseModel, TankController,
};
use tankbot_shared::*;

fn greedy_controller() -> TankController {
    TankController::new(Box::new(GreedyAimModel), Box::new(GreedyChaseModel))
}

#[test]
fn test_greedy_clears_single_rival() {
    let config = SessionConfig::default();
    let mut controller = greedy_controller();

    let log = run_session(&config, &mut controller);

    assert_eq!(
        log.outcome.rivals_destroyed, 1,
        "Greedy controller should destroy the fixed-spawn rival. Got {:?} after {} ticks",
        log.outcome, log.outcome.final_tick,
    );
    assert_eq!(log.outcome.resets, 0);
}

#[test]
fn test_greedy_clears_two_rivals_in_turn() {
    let config = SessionConfig {
        rival_count: 2,
        ..Default::default()
    };
    let mut controller = greedy_controller();

    let log = run_session(&config, &mut controller);

    assert_eq!(
        log.outcome.rivals_destroyed, 2,
        "Both fixed-spawn rivals should fall. Got {:?} after {} ticks",
        log.outcome, log.outcome.final_tick,
    );
    // The nearer rival must be engaged first.
    let first_target = log
        .ticks
        .iter()
        .find_map(|t| t.target_id.clone())
        .expect("some tick should carry a target");
    assert_eq!(first_target, "2R");
}

#[test]
fn test_do_nothing_goes_nowhere() {
    let config = SessionConfig {
        aim_model: "do_nothing".into(),
        chase_model: "do_nothing".into(),
        max_ticks: 120,
        ..Default::default()
    };
    let mut controller = TankController::new(Box::new(DoNothingModel), Box::new(DoNothingModel));

    let log = run_session(&config, &mut controller);

    assert_eq!(log.outcome.rivals_destroyed, 0);
    assert_eq!(log.outcome.shots, 0);
    assert_eq!(log.outcome.final_tick, 120);
}

#[test]
fn test_branches_progress_chase_then_aim() {
    // Fixed spawns put the rival 300 px east: one chase tick closes inside
    // engagement range, then the aim branch fires.
    let config = SessionConfig::default();
    let mut controller = greedy_controller();

    let log = run_session(&config, &mut controller);

    assert_eq!(log.ticks[0].command, Command::Forward);
    assert_eq!(log.ticks[1].command, Command::Shoot);
}

#[test]
fn test_dead_scene_resets_controller() {
    let mut controller = greedy_controller();
    let scene = SceneInfo {
        id: "1P".into(),
        status: GameStatus::Over,
        x: 100.0,
        y: 300.0,
        angle: 0.0,
        gun_angle: 0.0,
        lives: 0,
        rivals: vec![RivalState {
            id: "2R".into(),
            x: 400.0,
            y: 300.0,
            angle: 180.0,
            gun_angle: 0.0,
            lives: 3,
        }],
    };

    assert_eq!(controller.update(&scene), Command::Reset);
    assert!(controller.target_id().is_none());
}
