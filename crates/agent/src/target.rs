use tankbot_shared::*;
use tracing::debug;

use crate::geometry::distance_sq;

#[derive(Debug, Clone)]
struct LockedTarget {
    id: String,
    /// Aim ticks left before the lock is dropped. Seeded from the rival's
    /// life count at acquisition.
    budget: u8,
}

/// Target lock: which rival the controller is committed to.
///
/// The closest rival by squared distance is acquired once, then held until
/// the aim budget is spent; re-acquisition picks whichever rival is closest
/// at that point.
#[derive(Debug, Clone, Default)]
pub struct TargetLock {
    locked: Option<LockedTarget>,
}

impl TargetLock {
    /// Resolve the current target, acquiring a new lock if needed.
    /// Returns `None` only when the scene has no rivals.
    pub fn acquire<'a>(&mut self, scene: &'a SceneInfo) -> Option<&'a RivalState> {
        if let Some(lock) = &self.locked {
            if let Some(rival) = scene.rivals.iter().find(|r| r.id == lock.id) {
                return Some(rival);
            }
            // Locked rival left the scene; fall through and re-acquire.
            debug!(id = %lock.id, "locked rival gone, re-acquiring");
            self.locked = None;
        }

        let me = scene.position();
        let closest = scene.rivals.iter().min_by(|a, b| {
            distance_sq(me, a.position()).total_cmp(&distance_sq(me, b.position()))
        })?;
        debug!(id = %closest.id, lives = closest.lives, "acquired target");
        self.locked = Some(LockedTarget {
            id: closest.id.clone(),
            budget: closest.lives,
        });
        Some(closest)
    }

    /// Spend one aim tick from the budget; the lock drops at zero.
    pub fn spend(&mut self) {
        if let Some(lock) = &mut self.locked {
            lock.budget = lock.budget.saturating_sub(1);
            if lock.budget == 0 {
                debug!(id = %lock.id, "aim budget spent, dropping lock");
                self.locked = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.locked = None;
    }

    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }

    pub fn target_id(&self) -> Option<&str> {
        self.locked.as_ref().map(|l| l.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn scene(rivals: Vec<RivalState>) -> SceneInfo {
        SceneInfo {
            id: "1P".into(),
            status: GameStatus::Alive,
            x: 0.0,
            y: 0.0,
            angle: 0.0,
            gun_angle: 0.0,
            lives: 3,
            rivals,
        }
    }

    #[test]
    fn test_acquires_closest() {
        let mut lock = TargetLock::default();
        let s = scene(vec![rival("far", 500.0, 0.0, 3), rival("near", 100.0, 0.0, 3)]);
        let target = lock.acquire(&s).unwrap();
        assert_eq!(target.id, "near");
        assert!(lock.is_locked());
    }

    #[test]
    fn test_lock_sticks_while_budget_remains() {
        let mut lock = TargetLock::default();
        let s = scene(vec![rival("a", 100.0, 0.0, 3), rival("b", 500.0, 0.0, 3)]);
        lock.acquire(&s).unwrap();

        // "a" moves away; lock still follows it.
        let s2 = scene(vec![rival("a", 800.0, 0.0, 3), rival("b", 500.0, 0.0, 3)]);
        let target = lock.acquire(&s2).unwrap();
        assert_eq!(target.id, "a");
    }

    #[test]
    fn test_budget_exhaustion_drops_lock() {
        let mut lock = TargetLock::default();
        let s = scene(vec![rival("a", 100.0, 0.0, 2)]);
        lock.acquire(&s).unwrap();

        lock.spend();
        assert!(lock.is_locked());
        lock.spend();
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_reacquires_when_rival_vanishes() {
        let mut lock = TargetLock::default();
        let s = scene(vec![rival("a", 100.0, 0.0, 3), rival("b", 500.0, 0.0, 3)]);
        lock.acquire(&s).unwrap();

        let s2 = scene(vec![rival("b", 500.0, 0.0, 3)]);
        let target = lock.acquire(&s2).unwrap();
        assert_eq!(target.id, "b");
    }

    #[test]
    fn test_no_rivals() {
        let mut lock = TargetLock::default();
        let s = scene(vec![]);
        assert!(lock.acquire(&s).is_none());
        assert!(!lock.is_locked());
    }
}
