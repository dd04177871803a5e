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

//! Error taxonomy for the transfer pipeline.
//!
//! Every stage maps its failures into one [`BridgeError`] variant so the
//! caller can tell a bad request from a bad credential from a bad remote.
//! Error text never contains credential material.

use thiserror::Error;

use crate::request::Direction;
use crate::sftp::SftpError;
use crate::store::ObjectStoreError;

/// Request validation failure, raised before any collaborator is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One aggregated error naming every missing or empty event field.
    #[error("missing required event fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// The operation string is present but not one of the closed set.
    #[error("invalid operation '{0}': expected 'upload' or 'download'")]
    InvalidOperation(String),
}

/// Top-level error for one transfer invocation.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Secret fetch or private-key decode failure.
    #[error("credential error: {0}")]
    Credential(String),

    /// Transport-level failure before a session existed.
    #[error("failed to connect to {host}:{port}")]
    Connection {
        host: String,
        port: u16,
        #[source]
        source: SftpError,
    },

    /// The remote host rejected the resolved credential.
    #[error("authentication as '{username}' rejected by {host}:{port}")]
    Authentication {
        username: String,
        host: String,
        port: u16,
        #[source]
        source: SftpError,
    },

    /// SFTP read or write failure mid-transfer. The remote or local
    /// destination may be left with a partial file; that is accepted.
    #[error("{direction} of '{remote_path}' failed")]
    Transfer {
        direction: Direction,
        remote_path: String,
        #[source]
        source: SftpError,
    },

    #[error(transparent)]
    ObjectStore(#[from] ObjectStoreError),
}
