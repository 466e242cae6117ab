//! Receipt email request body

use serde::{Deserialize, Serialize};

/// Body of `POST /baskets/send-email`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub to_email: String,
    pub body: String,
}

impl EmailRequest {
    pub fn new(to_email: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to_email: to_email.into(),
            body: body.into(),
        }
    }
}
