use glam::Vec2;
use tankbot_shared::*;
use tracing::trace;

use crate::geometry::angle_to_bucket;

// Both observation builders encode two direction buckets as floats. The
// target bearing is computed in a y-up frame (the host scene is y-down), and
// the hull/gun angles carry a fixed 180-degree offset straight from the host
// frame. The pretrained models were fitted against exactly this encoding, so
// every quirk here is load-bearing; scripted models in `model` mirror it.

/// Angle from the player to the target in the y-up frame, in degrees.
fn target_bearing(scene: &SceneInfo, target: Vec2) -> f32 {
    let dx = target.x - scene.x;
    let dy = scene.y - target.y; // flip: screen y grows downward
    dy.atan2(dx).to_degrees()
}

/// Observation for the chase model: [hull direction bucket, target bearing bucket].
pub fn chase_observation(scene: &SceneInfo, target: Vec2) -> Observation {
    let hull_bucket = angle_to_bucket(scene.angle + 180.0);
    let bearing_bucket = angle_to_bucket(target_bearing(scene, target));
    let obs = Observation {
        data: [hull_bucket as f32, bearing_bucket as f32],
    };
    trace!(?obs, "chase observation");
    obs
}

/// Observation for the aim model: [absolute gun direction bucket, target
/// bearing bucket]. The gun angle is hull-relative, so the absolute direction
/// is gun + hull.
pub fn aim_observation(scene: &SceneInfo, target: Vec2) -> Observation {
    let gun_bucket = angle_to_bucket(scene.gun_angle + scene.angle + 180.0);
    let bearing_bucket = angle_to_bucket(target_bearing(scene, target));
    let obs = Observation {
        data: [gun_bucket as f32, bearing_bucket as f32],
    };
    trace!(?obs, "aim observation");
    obs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_at(x: f32, y: f32, angle: f32, gun_angle: f32) -> SceneInfo {
        SceneInfo {
            id: "1P".into(),
            status: GameStatus::Alive,
            x,
            y,
            angle,
            gun_angle,
            lives: 3,
            rivals: Vec::new(),
        }
    }

    #[test]
    fn test_chase_observation_level_target() {
        // Target due east at the same height: bearing 0, bucket 0.
        let scene = scene_at(100.0, 300.0, 0.0, 0.0);
        let obs = chase_observation(&scene, Vec2::new(400.0, 300.0));
        assert_eq!(obs.data[0], 4.0); // hull 0 + 180 -> bucket 4
        assert_eq!(obs.data[1], 0.0);
    }

    #[test]
    fn test_chase_observation_flips_y() {
        // Target below on screen (larger y) is a negative bearing in the
        // model's y-up frame.
        let scene = scene_at(100.0, 100.0, 0.0, 0.0);
        let obs = chase_observation(&scene, Vec2::new(100.0, 400.0));
        // Straight down-screen: bearing -90 -> 270 -> bucket 6.
        assert_eq!(obs.data[1], 6.0);
    }

    #[test]
    fn test_aim_observation_gun_is_hull_relative() {
        let scene = scene_at(100.0, 300.0, 90.0, 45.0);
        let obs = aim_observation(&scene, Vec2::new(400.0, 300.0));
        // 45 + 90 + 180 = 315 -> bucket 7.
        assert_eq!(obs.data[0], 7.0);
        assert_eq!(obs.data[1], 0.0);
    }

    #[test]
    fn test_bearing_diagonal() {
        let scene = scene_at(0.0, 0.0, 0.0, 0.0);
        // Up-right on screen: dy_screen negative, y-up bearing 45 -> bucket 1.
        let obs = chase_observation(&scene, Vec2::new(100.0, -100.0));
        assert_eq!(obs.data[1], 1.0);
    }
}
