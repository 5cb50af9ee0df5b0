//! Inbox alert payloads.
//!
//! The worker never delivers notifications itself; it serializes one alert
//! per terminal transition and hands the bytes to the coordination bus. The
//! delivery side expects a MessagePack map with string keys.

use serde::{Deserialize, Serialize};

const EXPORT_READY_BODY: &str = "Your data export is ready for download. \
You can download your data export from the [settings page](/settings) any \
time during the next 7 days.";

const EXPORT_FAILED_BODY: &str = "Your data export failed. Please request \
another data export from the [settings page](/settings). If you continue to \
experience issues, please contact \
[support@meower.org](mailto:support@meower.org).";

/// One user-facing alert message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAlert {
    pub op: String,
    pub user: String,
    pub content: String,
}

impl UserAlert {
    /// Success template: archive uploaded, redeemable for 7 days.
    pub fn export_ready(user: &str) -> Self {
        Self {
            op: "alert_user".to_string(),
            user: user.to_string(),
            content: EXPORT_READY_BODY.to_string(),
        }
    }

    /// Failure template: the user must request a new export.
    pub fn export_failed(user: &str) -> Self {
        Self {
            op: "alert_user".to_string(),
            user: user.to_string(),
            content: EXPORT_FAILED_BODY.to_string(),
        }
    }

    /// MessagePack map encoding (named fields, not a tuple), the layout the
    /// inbox delivery collaborator decodes.
    pub fn encode(&self) -> Result<Vec<u8>, rmp_serde::encode::Error> {
        rmp_serde::to_vec_named(self)
    }
}
