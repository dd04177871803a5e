// Copyright 2026 sftp-bridge contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Trigger event parsing and request validation.
//!
//! The inbound JSON event is deserialized into [`RawEvent`] with every
//! field optional, so validation can report all missing fields in one
//! aggregated error instead of failing on the first. Validation is a pure
//! gate: no network or secret access happens before it passes.

use serde::Deserialize;
use std::fmt;

use crate::error::ValidationError;

/// Direction of one transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Object store → SFTP.
    Upload,
    /// SFTP → object store.
    Download,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Upload => write!(f, "upload"),
            Direction::Download => write!(f, "download"),
        }
    }
}

/// How the SFTP credential is obtained. Fixed per deployment; the trigger
/// event cannot choose or carry authentication material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Password,
    PrivateKey,
}

/// A (bucket, key) pair identifying one object in the backend store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocator {
    pub bucket: String,
    pub key: String,
}

/// The trigger event as received, before validation.
///
/// The `bucket_name` alias accepts the legacy upload-only event shape
/// `{bucket_name, s3_key}`; [`RawEvent::with_deployment_defaults`] turns
/// that shape into a full upload request when the deployment configures a
/// target directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub operation: Option<String>,

    #[serde(default, alias = "bucket_name")]
    pub s3_bucket: Option<String>,

    #[serde(default)]
    pub s3_key: Option<String>,

    #[serde(default)]
    pub sftp_path: Option<String>,
}

impl RawEvent {
    /// Adapt the legacy upload-only event shape.
    ///
    /// Only an event carrying neither `operation` nor `sftp_path` is
    /// treated as legacy, and only when the deployment provides a target
    /// directory; otherwise the event is left untouched and fails
    /// validation normally.
    pub fn with_deployment_defaults(mut self, target_dir: Option<&str>) -> Self {
        if self.operation.is_none() && self.sftp_path.is_none() {
            if let Some(dir) = target_dir {
                self.operation = Some("upload".to_string());
                self.sftp_path = Some(dir.to_string());
            }
        }
        self
    }
}

/// A fully validated transfer request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub direction: Direction,
    pub locator: ObjectLocator,
    pub remote_path: String,
    pub auth_mode: AuthMode,
}

impl TransferRequest {
    /// Validate a raw event into a request, or fail with a single error
    /// naming every missing/empty field. The operation string must match
    /// `upload`/`download` exactly (case-sensitive).
    pub fn validate(event: RawEvent, auth_mode: AuthMode) -> Result<Self, ValidationError> {
        let mut missing = Vec::new();

        let operation = present(&event.operation, "operation", &mut missing);
        let bucket = present(&event.s3_bucket, "s3_bucket", &mut missing);
        let key = present(&event.s3_key, "s3_key", &mut missing);
        let sftp_path = present(&event.sftp_path, "sftp_path", &mut missing);

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        // All four fields are Some past the emptiness check above.
        let operation = operation.unwrap_or_default();
        let direction = match operation.as_str() {
            "upload" => Direction::Upload,
            "download" => Direction::Download,
            other => return Err(ValidationError::InvalidOperation(other.to_string())),
        };

        Ok(Self {
            direction,
            locator: ObjectLocator {
                bucket: bucket.unwrap_or_default(),
                key: key.unwrap_or_default(),
            },
            remote_path: sftp_path.unwrap_or_default(),
            auth_mode,
        })
    }
}

fn present(value: &Option<String>, name: &str, missing: &mut Vec<String>) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => Some(v.clone()),
        _ => {
            missing.push(name.to_string());
            None
        }
    }
}
