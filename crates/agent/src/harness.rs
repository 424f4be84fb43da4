//! Deterministic kinematic arena for exercising the controller end to end.
//!
//! This is test and evaluation tooling, not a game engine: rivals follow a
//! fixed script (they hold position), there are no projectiles in flight,
//! and a shot lands instantly when the gun faces its target.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use tankbot_shared::*;
use tracing::debug;

use crate::controller::TankController;
use crate::geometry::{angle_diff_degrees, normalize_degrees};

#[derive(Debug, Clone)]
pub struct TankBody {
    pub id: String,
    pub position: Vec2,
    /// Hull heading in degrees, screen frame, always a multiple of 45.
    pub angle: f32,
    /// Gun angle relative to the hull, degrees.
    pub gun_angle: f32,
    pub lives: u8,
}

impl TankBody {
    pub fn heading(&self) -> Vec2 {
        let r = self.angle.to_radians();
        Vec2::new(r.cos(), r.sin())
    }
}

/// Minimal arena state: one controlled tank plus scripted rivals.
#[derive(Debug, Clone)]
pub struct Arena {
    pub player: TankBody,
    pub rivals: Vec<TankBody>,
    pub tick: u32,
    pub shots: u32,
    pub hits: u32,
}

impl Arena {
    pub fn new(config: &SessionConfig) -> Self {
        let mut rng = Pcg64Mcg::seed_from_u64(config.seed);

        let player = TankBody {
            id: "1P".into(),
            position: Vec2::new(100.0, 300.0),
            angle: 0.0,
            gun_angle: 0.0,
            lives: 3,
        };

        let rivals = (0..config.rival_count)
            .map(|i| {
                let position = if config.randomize_spawns {
                    // Snap spawns to grid cells, clear of the arena edge.
                    let cols = (ARENA_WIDTH / CELL_PIXEL_SIZE) as i32 - 2;
                    let rows = (ARENA_HEIGHT / CELL_PIXEL_SIZE) as i32 - 2;
                    Vec2::new(
                        (rng.gen_range(8..cols) as f32 + 0.5) * CELL_PIXEL_SIZE,
                        (rng.gen_range(1..rows) as f32 + 0.5) * CELL_PIXEL_SIZE,
                    )
                } else {
                    Vec2::new(400.0 + i as f32 * 150.0, 300.0)
                };
                TankBody {
                    id: format!("{}R", i + 2),
                    position,
                    angle: 180.0,
                    gun_angle: 0.0,
                    lives: 3,
                }
            })
            .collect();

        Self {
            player,
            rivals,
            tick: 0,
            shots: 0,
            hits: 0,
        }
    }

    /// Snapshot the arena as the host game would report it to the player.
    pub fn scene(&self) -> SceneInfo {
        SceneInfo {
            id: self.player.id.clone(),
            status: GameStatus::Alive,
            x: self.player.position.x,
            y: self.player.position.y,
            angle: self.player.angle,
            gun_angle: self.player.gun_angle,
            lives: self.player.lives,
            rivals: self
                .rivals
                .iter()
                .filter(|r| r.lives > 0)
                .map(|r| RivalState {
                    id: r.id.clone(),
                    x: r.position.x,
                    y: r.position.y,
                    angle: r.angle,
                    gun_angle: r.gun_angle,
                    lives: r.lives,
                })
                .collect(),
        }
    }

    /// Apply one player command and advance one tick.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Forward => self.drive(1.0),
            Command::Backward => self.drive(-1.0),
            Command::TurnLeft => {
                self.player.angle = normalize_degrees(self.player.angle - ANGLE_STEP);
            }
            Command::TurnRight => {
                self.player.angle = normalize_degrees(self.player.angle + ANGLE_STEP);
            }
            Command::AimLeft => {
                self.player.gun_angle = normalize_degrees(self.player.gun_angle - ANGLE_STEP);
            }
            Command::AimRight => {
                self.player.gun_angle = normalize_degrees(self.player.gun_angle + ANGLE_STEP);
            }
            Command::Shoot => self.shoot(),
            Command::None | Command::Reset => {}
        }
        self.tick += 1;
    }

    fn drive(&mut self, direction: f32) {
        let next = self.player.position + self.player.heading() * TANK_SPEED * direction;
        self.player.position.x = next.x.clamp(0.0, ARENA_WIDTH);
        self.player.position.y = next.y.clamp(0.0, ARENA_HEIGHT);
    }

    fn shoot(&mut self) {
        self.shots += 1;
        let gun_abs = normalize_degrees(self.player.angle + self.player.gun_angle);
        let origin = self.player.position;

        // The shot hits the nearest living rival inside the gun's segment.
        let hit = self
            .rivals
            .iter_mut()
            .filter(|r| r.lives > 0)
            .filter(|r| {
                let rel = r.position - origin;
                let bearing = rel.y.atan2(rel.x).to_degrees();
                angle_diff_degrees(bearing, gun_abs).abs() <= HALF_SEGMENT + 1e-3
            })
            .min_by(|a, b| {
                (a.position - origin)
                    .length_squared()
                    .total_cmp(&(b.position - origin).length_squared())
            });

        if let Some(rival) = hit {
            rival.lives -= 1;
            self.hits += 1;
            debug!(id = %rival.id, lives = rival.lives, "shot landed");
        }
    }

    pub fn rivals_alive(&self) -> usize {
        self.rivals.iter().filter(|r| r.lives > 0).count()
    }
}

/// Drive a controller against the arena for up to `max_ticks`, recording the
/// command trace and outcome.
pub fn run_session(config: &SessionConfig, controller: &mut TankController) -> SessionLog {
    let mut arena = Arena::new(config);
    let mut ticks = Vec::new();
    let mut resets = 0u32;
    let initial_rivals = arena.rivals_alive() as u32;

    for tick in 0..config.max_ticks {
        if arena.rivals_alive() == 0 {
            break;
        }

        let scene = arena.scene();
        let command = controller.update(&scene);
        if command == Command::Reset {
            resets += 1;
        }

        ticks.push(TickRecord {
            tick,
            command,
            x: scene.x,
            y: scene.y,
            target_id: controller.target_id().map(str::to_owned),
        });

        arena.apply(command);
    }

    let outcome = SessionOutcome {
        rivals_destroyed: initial_rivals - arena.rivals_alive() as u32,
        shots: arena.shots,
        hits: arena.hits,
        resets,
        final_tick: arena.tick,
    };

    SessionLog {
        config: config.clone(),
        ticks,
        outcome,
    }
}
