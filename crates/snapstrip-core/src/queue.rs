use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SnapstripError};

/// Most copies a single print job may request.
pub const MAX_COPIES: u32 = 5;

/// One print request for a finished strip, ready to be posted to a print
/// queue as an HTML form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrintJob {
    /// Number of copies, 1 through [`MAX_COPIES`].
    pub copies: u32,
    /// Submission time, milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    /// Optional guest name echoed back by the queue.
    pub guest: Option<String>,
}

impl PrintJob {
    /// Build a job for `copies` copies, stamped with the current time.
    pub fn new(copies: u32) -> Result<Self> {
        if copies == 0 || copies > MAX_COPIES {
            return Err(SnapstripError::InvalidConfig(format!(
                "copies must be between 1 and {MAX_COPIES}, got {copies}"
            )));
        }
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Ok(Self {
            copies,
            timestamp_ms,
            guest: None,
        })
    }

    pub fn with_guest(mut self, guest: impl Into<String>) -> Self {
        self.guest = Some(guest.into());
        self
    }

    /// Form fields for an `application/x-www-form-urlencoded` submission:
    /// the encoded strip as a data URL plus the job metadata.
    pub fn form_fields(&self, photo_data_url: &str) -> Vec<(String, String)> {
        let mut fields = vec![
            ("photo".to_string(), photo_data_url.to_string()),
            ("copies".to_string(), self.copies.to_string()),
            ("ts".to_string(), self.timestamp_ms.to_string()),
        ];
        if let Some(guest) = &self.guest {
            fields.push(("guest".to_string(), guest.clone()));
        }
        fields
    }
}
