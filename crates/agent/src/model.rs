use tankbot_shared::*;

/// A decision model: maps an observation to a discrete action index.
///
/// Indices are interpreted through `AIM_COMMANDS` or `CHASE_COMMANDS`
/// depending on which slot the model is plugged into.
pub trait DecisionModel: Send {
    fn name(&self) -> &str;
    fn predict(&mut self, obs: &Observation) -> usize;
}

/// Model that always emits action 0 (NONE) - useful for testing.
pub struct DoNothingModel;

impl DecisionModel for DoNothingModel {
    fn name(&self) -> &str {
        "do_nothing"
    }

    fn predict(&mut self, _obs: &Observation) -> usize {
        0
    }
}

/// Self-direction bucket that points at the target, given the target's
/// bearing bucket.
///
/// The observation encodes the self angle in the screen frame plus 180 while
/// the target bearing is mirrored into a y-up frame; those two conventions
/// cancel into a reflection, so pointing at bearing bucket `b` means holding
/// self bucket `(4 - b) mod 8`.
fn aligned_bucket(bearing_bucket: usize) -> usize {
    (DIRECTION_BUCKETS + 4 - bearing_bucket % DIRECTION_BUCKETS) % DIRECTION_BUCKETS
}

/// Clockwise bucket steps from `current` to `desired` (0..8).
fn clockwise_steps(desired: usize, current: usize) -> usize {
    (desired + DIRECTION_BUCKETS - current) % DIRECTION_BUCKETS
}

/// Scripted stand-in for the pretrained aim model: rotate the gun toward the
/// target's bucket by the shorter way, shoot once aligned.
pub struct GreedyAimModel;

impl DecisionModel for GreedyAimModel {
    fn name(&self) -> &str {
        "greedy_aim"
    }

    fn predict(&mut self, obs: &Observation) -> usize {
        let gun = obs.data[0] as usize % DIRECTION_BUCKETS;
        let desired = aligned_bucket(obs.data[1] as usize);
        let cw = clockwise_steps(desired, gun);
        if cw == 0 {
            3 // SHOOT
        } else if cw <= DIRECTION_BUCKETS / 2 {
            2 // AIM_RIGHT
        } else {
            1 // AIM_LEFT
        }
    }
}

/// Scripted stand-in for the pretrained chase model: turn the hull toward the
/// target's bucket, drive forward once aligned. Never reverses.
pub struct GreedyChaseModel;

impl DecisionModel for GreedyChaseModel {
    fn name(&self) -> &str {
        "greedy_chase"
    }

    fn predict(&mut self, obs: &Observation) -> usize {
        let hull = obs.data[0] as usize % DIRECTION_BUCKETS;
        let desired = aligned_bucket(obs.data[1] as usize);
        let cw = clockwise_steps(desired, hull);
        if cw == 0 {
            1 // FORWARD
        } else if cw <= DIRECTION_BUCKETS / 2 {
            4 // TURN_RIGHT
        } else {
            3 // TURN_LEFT
        }
    }
}
