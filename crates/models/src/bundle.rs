use std::path::Path;

use tracing::info;

use tankbot_shared::{AIM_MODEL_FILE, CHASE_MODEL_FILE};

use crate::onnx::OnnxModel;
use crate::validate::{ValidationError, ModelKind};

/// The two pretrained models the controller needs, loaded once at startup
/// from a fixed directory.
#[derive(Debug)]
pub struct ModelBundle {
    pub aim: OnnxModel,
    pub chase: OnnxModel,
}

impl ModelBundle {
    /// Load `aim.onnx` and `chase.onnx` from `dir`. A missing or malformed
    /// file is a hard error; there is no degraded mode at load time.
    pub fn load(dir: &Path) -> Result<Self, ValidationError> {
        let aim_path = dir.join(AIM_MODEL_FILE);
        let chase_path = dir.join(CHASE_MODEL_FILE);

        let aim = OnnxModel::load(&aim_path, ModelKind::Aim)?;
        let chase = OnnxModel::load(&chase_path, ModelKind::Chase)?;
        info!(dir = %dir.display(), "loaded aim and chase models");

        Ok(Self { aim, chase })
    }
}
