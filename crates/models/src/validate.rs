use std::path::{Path, PathBuf};

use ort::session::Session;
use ort::value::{TensorElementType, ValueType};
use thiserror::Error;

use tankbot_shared::{AIM_ACTION_COUNT, CHASE_ACTION_COUNT, MAX_MODEL_SIZE_BYTES, MAX_PARAMETERS, OBS_SIZE};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Model file not found: {0}")]
    MissingFile(PathBuf),
    #[error("Model file too large: {0} bytes (max {1})")]
    FileTooLarge(usize, usize),
    #[error("Invalid input shape: expected [1, {expected}] or [N, {expected}], got {got:?}")]
    InvalidInputShape { expected: usize, got: Vec<i64> },
    #[error("Invalid output shape: expected [1, {expected}] or [N, {expected}], got {got:?}")]
    InvalidOutputShape { expected: usize, got: Vec<i64> },
    #[error("Too many parameters: {0} (max {1})")]
    TooManyParameters(usize, usize),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ONNX runtime error: {0}")]
    Ort(String),
}

impl From<ort::Error> for ValidationError {
    fn from(e: ort::Error) -> Self {
        ValidationError::Ort(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// ModelKind
// ---------------------------------------------------------------------------

/// Which of the two controller slots a model file is meant for. Determines
/// the expected output width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Aim,
    Chase,
}

impl ModelKind {
    pub fn action_count(&self) -> usize {
        match self {
            ModelKind::Aim => AIM_ACTION_COUNT,
            ModelKind::Chase => CHASE_ACTION_COUNT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Aim => "aim",
            ModelKind::Chase => "chase",
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationReport
// ---------------------------------------------------------------------------

/// Summary of a validated ONNX model.
#[derive(Debug)]
pub struct ValidationReport {
    pub kind: ModelKind,
    pub file_size_bytes: usize,
    pub input_shape: Vec<i64>,
    pub output_shape: Vec<i64>,
    pub parameter_count: usize,
}

// ---------------------------------------------------------------------------
// validate_model_file
// ---------------------------------------------------------------------------

/// Validate an ONNX model file at the given path for the given slot.
///
/// Checks performed:
/// 1. File exists and is <= MAX_MODEL_SIZE_BYTES
/// 2. Model can be loaded by ONNX Runtime (valid protobuf, supported ops)
/// 3. Input is float32 `[1, 2]` or `[N, 2]` (dynamic batch with -1)
/// 4. Output is float32 `[1, n]` or `[N, n]` where n is the slot's action count
/// 5. Estimated parameter count <= MAX_PARAMETERS
pub fn validate_model_file(path: &Path, kind: ModelKind) -> Result<ValidationReport, ValidationError> {
    if !path.exists() {
        return Err(ValidationError::MissingFile(path.to_path_buf()));
    }

    let metadata = std::fs::metadata(path)?;
    let file_size_bytes = metadata.len() as usize;
    if file_size_bytes > MAX_MODEL_SIZE_BYTES {
        return Err(ValidationError::FileTooLarge(
            file_size_bytes,
            MAX_MODEL_SIZE_BYTES,
        ));
    }

    // Loading the session validates the protobuf and rejects unsupported ops.
    let session = Session::builder()
        .map_err(ValidationError::from)?
        .commit_from_file(path)
        .map_err(ValidationError::from)?;

    let inputs = session.inputs();
    if inputs.is_empty() {
        return Err(ValidationError::InvalidInputShape {
            expected: OBS_SIZE,
            got: vec![],
        });
    }
    let input_shape = validate_tensor_shape(inputs[0].dtype(), OBS_SIZE as i64, true)?;

    let outputs = session.outputs();
    if outputs.is_empty() {
        return Err(ValidationError::InvalidOutputShape {
            expected: kind.action_count(),
            got: vec![],
        });
    }
    let output_shape = validate_tensor_shape(outputs[0].dtype(), kind.action_count() as i64, false)?;

    // Parameter count estimation from file size: weights are stored as raw
    // float32, so every 4 bytes could be a parameter.
    let parameter_count = file_size_bytes / 4;
    if parameter_count > MAX_PARAMETERS {
        return Err(ValidationError::TooManyParameters(parameter_count, MAX_PARAMETERS));
    }

    Ok(ValidationReport {
        kind,
        file_size_bytes,
        input_shape,
        output_shape,
        parameter_count,
    })
}

/// Helper: require `Tensor<f32>` of rank 2 with a batch dim of 1 or -1 and
/// the given feature dim; returns the shape.
fn validate_tensor_shape(
    dtype: &ValueType,
    expected_dim: i64,
    is_input: bool,
) -> Result<Vec<i64>, ValidationError> {
    let shape_error = |dims: Vec<i64>| -> ValidationError {
        if is_input {
            ValidationError::InvalidInputShape {
                expected: expected_dim as usize,
                got: dims,
            }
        } else {
            ValidationError::InvalidOutputShape {
                expected: expected_dim as usize,
                got: dims,
            }
        }
    };

    match dtype {
        ValueType::Tensor { ty, shape, .. } => {
            let dims: Vec<i64> = shape.iter().copied().collect();

            if *ty != TensorElementType::Float32 {
                return Err(shape_error(dims));
            }
            if dims.len() != 2 {
                return Err(shape_error(dims));
            }
            if dims[0] != 1 && dims[0] != -1 {
                return Err(shape_error(dims));
            }
            if dims[1] != expected_dim {
                return Err(shape_error(dims));
            }

            Ok(dims)
        }
        _ => Err(shape_error(vec![])),
    }
}
