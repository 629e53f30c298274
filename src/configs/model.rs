use serde::{Deserialize, Serialize};

/// Model selection forwarded untouched to the base runner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelArgs {
    pub model_name_or_path: String,
    pub torch_dtype: Option<String>,
}
