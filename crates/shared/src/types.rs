use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Discrete command returned to the host game each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    None,
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    AimLeft,
    AimRight,
    Shoot,
    Reset,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::None => "NONE",
            Command::Forward => "FORWARD",
            Command::Backward => "BACKWARD",
            Command::TurnLeft => "TURN_LEFT",
            Command::TurnRight => "TURN_RIGHT",
            Command::AimLeft => "AIM_LEFT",
            Command::AimRight => "AIM_RIGHT",
            Command::Shoot => "SHOOT",
            Command::Reset => "RESET",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action table for the aim model: index -> command.
pub const AIM_COMMANDS: [Command; crate::AIM_ACTION_COUNT] = [
    Command::None,
    Command::AimLeft,
    Command::AimRight,
    Command::Shoot,
];

/// Action table for the chase model: index -> command.
pub const CHASE_COMMANDS: [Command; crate::CHASE_ACTION_COUNT] = [
    Command::None,
    Command::Forward,
    Command::Backward,
    Command::TurnLeft,
    Command::TurnRight,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[serde(rename = "GAME_ALIVE")]
    Alive,
    #[serde(rename = "GAME_DEAD")]
    Dead,
    #[serde(rename = "GAME_OVER")]
    Over,
}

/// One rival tank as reported by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RivalState {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub gun_angle: f32,
    pub lives: u8,
}

impl RivalState {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Per-tick snapshot of the world delivered by the host game.
///
/// Coordinates are screen pixels (y grows downward); angles are degrees.
/// `gun_angle` is relative to the hull.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneInfo {
    pub id: String,
    pub status: GameStatus,
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub gun_angle: f32,
    pub lives: u8,
    pub rivals: Vec<RivalState>,
}

impl SceneInfo {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Observation vector fed to a decision model: two discretized direction
/// buckets encoded as floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub data: [f32; crate::OBS_SIZE],
}

impl serde::Serialize for Observation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.as_slice().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Observation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v: Vec<f32> = Vec::deserialize(deserializer)?;
        if v.len() != crate::OBS_SIZE {
            return Err(serde::de::Error::custom(format!(
                "expected {} floats, got {}",
                crate::OBS_SIZE,
                v.len()
            )));
        }
        let mut data = [0.0f32; crate::OBS_SIZE];
        data.copy_from_slice(&v);
        Ok(Observation { data })
    }
}

/// Configuration for a harness session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub seed: u64,
    pub max_ticks: u32,
    pub rival_count: usize,
    pub aim_model: String,
    pub chase_model: String,
    pub randomize_spawns: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_ticks: 600,
            rival_count: 1,
            aim_model: "greedy_aim".into(),
            chase_model: "greedy_chase".into(),
            randomize_spawns: false,
        }
    }
}

/// One tick of a recorded harness session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickRecord {
    pub tick: u32,
    pub command: Command,
    pub x: f32,
    pub y: f32,
    pub target_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub rivals_destroyed: u32,
    pub shots: u32,
    pub hits: u32,
    pub resets: u32,
    pub final_tick: u32,
}

/// Full record of a harness session: config, per-tick trace, outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLog {
    pub config: SessionConfig,
    pub ticks: Vec<TickRecord>,
    pub outcome: SessionOutcome,
}
