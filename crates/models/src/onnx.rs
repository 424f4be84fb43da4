use std::path::Path;

use ort::session::Session;
use ort::value::Tensor;
use tracing::warn;

use tankbot_agent::DecisionModel;
use tankbot_shared::{Observation, OBS_SIZE};

use crate::validate::{ValidationError, ModelKind};

/// A pretrained decision model backed by an ONNX Runtime session.
///
/// Inference runs a `[1, 2]` observation through the network and argmaxes
/// the logit row into an action index. Any runtime failure degrades to
/// action 0 (NONE) — the controller must never panic mid-tick.
#[derive(Debug)]
pub struct OnnxModel {
    session: Session,
    kind: ModelKind,
    name: String,
}

impl OnnxModel {
    /// Load an ONNX model from disk.
    ///
    /// This does **not** run the full validation suite
    /// (`validate_model_file`); call that separately if you need the report.
    pub fn load(path: &Path, kind: ModelKind) -> Result<Self, ValidationError> {
        if !path.exists() {
            return Err(ValidationError::MissingFile(path.to_path_buf()));
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(kind.as_str())
            .to_string();

        let session = Session::builder()
            .map_err(ValidationError::from)?
            .commit_from_file(path)
            .map_err(ValidationError::from)?;

        Ok(Self {
            session,
            kind,
            name,
        })
    }
}

impl DecisionModel for OnnxModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&mut self, obs: &Observation) -> usize {
        let input_data: Vec<f32> = obs.data.to_vec();
        let input_tensor =
            match Tensor::from_array(([1usize, OBS_SIZE], input_data.into_boxed_slice())) {
                Ok(t) => t,
                Err(e) => {
                    warn!(model = %self.name, "failed to create input tensor: {e}");
                    return 0;
                }
            };

        let outputs = match self.session.run(ort::inputs![input_tensor]) {
            Ok(o) => o,
            Err(e) => {
                warn!(model = %self.name, "inference failed: {e}");
                return 0;
            }
        };

        let output_value = &outputs[0];
        match output_value.try_extract_tensor::<f32>() {
            Ok((_shape, logits)) => {
                let expected = self.kind.action_count();
                if logits.len() < expected {
                    warn!(
                        model = %self.name,
                        got = logits.len(),
                        expected,
                        "output tensor too short"
                    );
                    return 0;
                }
                argmax(&logits[..expected])
            }
            Err(e) => {
                warn!(model = %self.name, "failed to extract output tensor: {e}");
                0
            }
        }
    }
}

/// Index of the largest logit. NaNs lose to everything; an all-NaN row
/// degrades to 0.
fn argmax(logits: &[f32]) -> usize {
    let mut best = 0usize;
    let mut best_value = f32::NEG_INFINITY;
    for (i, &v) in logits.iter().enumerate() {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[0.1, 0.9, 0.3]), 1);
        assert_eq!(argmax(&[2.0, -1.0, 0.0, 1.5]), 0);
        assert_eq!(argmax(&[-3.0, -1.0]), 1);
    }

    #[test]
    fn test_argmax_handles_nan() {
        assert_eq!(argmax(&[f32::NAN, 1.0, 0.5]), 1);
        assert_eq!(argmax(&[f32::NAN, f32::NAN]), 0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = OnnxModel::load(Path::new("/nonexistent/chase.onnx"), ModelKind::Chase)
            .expect_err("missing file must fail");
        assert!(matches!(err, ValidationError::MissingFile(_)));
    }
}
