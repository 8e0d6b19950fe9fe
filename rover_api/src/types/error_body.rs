use serde::{Deserialize, Serialize};

/// Error payload RoVer returns alongside a non-2xx status.
/// Every field is optional; anything else in the object is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: Option<String>,
    pub error_code: Option<String>,
    pub detail: Option<serde_json::Value>,
}
