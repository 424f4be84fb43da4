use glam::Vec2;
use tankbot_shared::*;
use tracing::{debug, warn};

use crate::geometry::{distance_sq, heading_matches};
use crate::model::DecisionModel;
use crate::observation::{aim_observation, chase_observation};
use crate::target::TargetLock;

/// Per-tick decision controller for one tank.
///
/// Owns the two decision models loaded at startup and a target lock. Called
/// synchronously once per game tick with the host's scene snapshot; returns
/// exactly one command.
pub struct TankController {
    aim: Box<dyn DecisionModel>,
    chase: Box<dyn DecisionModel>,
    lock: TargetLock,
    tick: u64,
}

impl TankController {
    pub fn new(aim: Box<dyn DecisionModel>, chase: Box<dyn DecisionModel>) -> Self {
        Self {
            aim,
            chase,
            lock: TargetLock::default(),
            tick: 0,
        }
    }

    pub fn aim_model_name(&self) -> &str {
        self.aim.name()
    }

    pub fn chase_model_name(&self) -> &str {
        self.chase.name()
    }

    pub fn target_id(&self) -> Option<&str> {
        self.lock.target_id()
    }

    /// Clear all per-round state. Called between rounds.
    pub fn reset(&mut self) {
        self.lock.clear();
        self.tick = 0;
    }

    /// Decide one command for the given scene snapshot.
    pub fn update(&mut self, scene: &SceneInfo) -> Command {
        self.tick += 1;

        if scene.status != GameStatus::Alive {
            self.lock.clear();
            return Command::Reset;
        }

        let Some(target) = self.lock.acquire(scene) else {
            warn!(tick = self.tick, "no rival available to target");
            return Command::Reset;
        };
        let target_pos = target.position();

        let dist_sq = distance_sq(scene.position(), target_pos);
        let axis_aligned = (scene.x - target_pos.x).abs() <= AXIS_ALIGN_TOLERANCE
            || (scene.y - target_pos.y).abs() <= AXIS_ALIGN_TOLERANCE;

        if dist_sq < ENGAGE_RANGE_SQ && axis_aligned {
            // Close and lined up on an axis: let the aim model fire the gun.
            let obs = aim_observation(scene, target_pos);
            let action = self.aim.predict(&obs);
            let command = lookup(&AIM_COMMANDS, action, self.aim.name());
            debug!(tick = self.tick, ?obs, action, %command, "aim branch");
            self.lock.spend();
            command
        } else if dist_sq < ENGAGE_RANGE_SQ {
            // Close but off-axis: rotate onto an axis-aligned heading and
            // close the remaining gap.
            let command = rotate_toward(scene, target_pos);
            debug!(tick = self.tick, %command, "approach branch");
            command
        } else {
            // Long range: let the chase model drive.
            let obs = chase_observation(scene, target_pos);
            let action = self.chase.predict(&obs);
            let command = lookup(&CHASE_COMMANDS, action, self.chase.name());
            debug!(tick = self.tick, ?obs, action, %command, "chase branch");
            command
        }
    }
}

/// Map a model's action index through its command table. Out-of-range
/// indices degrade to NONE rather than panicking mid-tick.
fn lookup(table: &[Command], action: usize, model: &str) -> Command {
    match table.get(action) {
        Some(command) => *command,
        None => {
            warn!(model, action, table_len = table.len(), "action index out of range");
            Command::None
        }
    }
}

/// Heuristic used inside engagement range when no axis is lined up yet:
/// turn onto the vertical heading that faces the target (270 is up-screen,
/// 90 is down-screen), then drive forward.
fn rotate_toward(scene: &SceneInfo, target: Vec2) -> Command {
    let dy = scene.y - target.y;
    if dy > 0.0 {
        if heading_matches(scene.angle, 270.0) {
            Command::Forward
        } else {
            Command::TurnRight
        }
    } else if dy < 0.0 {
        if heading_matches(scene.angle, 90.0) {
            Command::Forward
        } else {
            Command::TurnRight
        }
    } else if heading_matches(scene.angle, 0.0) {
        Command::Forward
    } else {
        Command::TurnLeft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DoNothingModel, GreedyAimModel, GreedyChaseModel};

    fn controller() -> TankController {
        TankController::new(Box::new(GreedyAimModel), Box::new(GreedyChaseModel))
    }

    fn rival(id: &str, x: f32, y: f32, lives: u8) -> RivalState {
        RivalState {
            id: id.into(),
            x,
            y,
            angle: 0.0,
            gun_angle: 0.0,
            lives,
        }
    }

    fn scene(x: f32, y: f32, angle: f32, rivals: Vec<RivalState>) -> SceneInfo {
        SceneInfo {
            id: "1P".into(),
            status: GameStatus::Alive,
            x,
            y,
            angle,
            gun_angle: 0.0,
            lives: 3,
            rivals,
        }
    }

    #[test]
    fn test_reset_when_dead() {
        let mut c = controller();
        let mut s = scene(100.0, 300.0, 0.0, vec![rival("2P", 200.0, 300.0, 3)]);
        s.status = GameStatus::Dead;
        assert_eq!(c.update(&s), Command::Reset);
        assert!(c.target_id().is_none());
    }

    #[test]
    fn test_reset_when_no_rivals() {
        let mut c = controller();
        let s = scene(100.0, 300.0, 0.0, vec![]);
        assert_eq!(c.update(&s), Command::Reset);
    }

    #[test]
    fn test_aim_branch_when_close_and_aligned() {
        let mut c = controller();
        // 200 px east, same y: inside range, axis-aligned. Gun already
        // points at it, so the greedy aim model shoots.
        let s = scene(100.0, 300.0, 0.0, vec![rival("2P", 300.0, 300.0, 3)]);
        assert_eq!(c.update(&s), Command::Shoot);
    }

    #[test]
    fn test_approach_branch_when_close_but_off_axis() {
        let mut c = controller();
        // Inside range, neither axis lined up, target above on screen.
        let s = scene(100.0, 300.0, 0.0, vec![rival("2P", 250.0, 200.0, 3)]);
        assert_eq!(c.update(&s), Command::TurnRight);

        // Already on the up-screen heading: drive.
        let s = scene(100.0, 300.0, 270.0, vec![rival("2P", 250.0, 200.0, 3)]);
        let mut c = controller();
        assert_eq!(c.update(&s), Command::Forward);
    }

    #[test]
    fn test_approach_branch_target_below() {
        let mut c = controller();
        let s = scene(100.0, 200.0, 90.0, vec![rival("2P", 250.0, 300.0, 3)]);
        assert_eq!(c.update(&s), Command::Forward);
    }

    #[test]
    fn test_chase_branch_when_far() {
        let mut c = controller();
        // 600 px east, hull facing it: the greedy chase model drives.
        let s = scene(100.0, 300.0, 0.0, vec![rival("2P", 700.0, 300.0, 3)]);
        assert_eq!(c.update(&s), Command::Forward);
    }

    #[test]
    fn test_aim_branch_spends_budget() {
        let mut c = controller();
        let s = scene(100.0, 300.0, 0.0, vec![rival("2P", 300.0, 300.0, 2)]);
        c.update(&s);
        assert!(c.target_id().is_some());
        c.update(&s);
        // Budget of 2 spent: lock dropped, next tick re-acquires.
        assert!(c.target_id().is_none());
    }

    #[test]
    fn test_reset_clears_round_state() {
        let mut c = controller();
        let s = scene(100.0, 300.0, 0.0, vec![rival("2P", 300.0, 300.0, 3)]);
        c.update(&s);
        assert!(c.target_id().is_some());

        c.reset();
        assert!(c.target_id().is_none());
    }

    #[test]
    fn test_out_of_range_action_degrades_to_none() {
        struct BadModel;
        impl DecisionModel for BadModel {
            fn name(&self) -> &str {
                "bad"
            }
            fn predict(&mut self, _obs: &Observation) -> usize {
                99
            }
        }
        let mut c = TankController::new(Box::new(BadModel), Box::new(DoNothingModel));
        let s = scene(100.0, 300.0, 0.0, vec![rival("2P", 300.0, 300.0, 3)]);
        assert_eq!(c.update(&s), Command::None);
    }

    #[test]
    fn test_boundary_distance_is_chase() {
        let mut c = controller();
        // Exactly ENGAGE_RANGE away and axis-aligned: strict less-than keeps
        // this in the chase branch.
        let s = scene(
            100.0,
            300.0,
            0.0,
            vec![rival("2P", 100.0 + ENGAGE_RANGE, 300.0, 3)],
        );
        assert_eq!(c.update(&s), Command::Forward);
    }
}
