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

//! Error type for SFTP session operations.

use thiserror::Error;

/// Errors raised inside the session layer. The orchestrator maps these
/// into the pipeline taxonomy at each lifecycle stage.
#[derive(Debug, Error)]
pub enum SftpError {
    /// SSH protocol error from russh.
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Key handling error from russh.
    #[error("SSH key error: {0}")]
    Key(#[from] russh::keys::Error),

    /// SFTP protocol error from russh-sftp.
    #[error("SFTP error: {0}")]
    Sftp(#[from] russh_sftp::client::error::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server rejected the presented credential.
    #[error("authentication rejected for user '{0}'")]
    AuthenticationRejected(String),

    /// The server host key failed the configured verification policy.
    #[error("server host key verification failed")]
    ServerCheckFailed,

    #[error("{0}")]
    Other(String),
}

impl SftpError {
    pub fn other(msg: impl Into<String>) -> Self {
        SftpError::Other(msg.into())
    }
}

/// Result type for SFTP session operations.
pub type SftpResult<T> = std::result::Result<T, SftpError>;
