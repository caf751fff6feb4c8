use serde::{Deserialize, Serialize};

/// Status/detail body used for informational replies and errors.
#[derive(Debug, Serialize, Deserialize)]
pub struct GeneralResponse {
    pub status: String,
    pub detail: String,
}

impl GeneralResponse {
    pub fn success(detail: impl Into<String>) -> Self {
        Self {
            status: "Success".to_string(),
            detail: detail.into(),
        }
    }

    pub fn warning(detail: impl Into<String>) -> Self {
        Self {
            status: "Warning".to_string(),
            detail: detail.into(),
        }
    }

    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            status: "Error".to_string(),
            detail: detail.into(),
        }
    }
}
