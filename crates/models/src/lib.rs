pub mod bundle;
pub mod onnx;
pub mod validate;

pub use bundle::ModelBundle;
pub use onnx::OnnxModel;
pub use validate::{validate_model_file, ValidationError, ModelKind, ValidationReport};
