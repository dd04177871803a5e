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

//! Deployment configuration: the SFTP endpoint and how to authenticate
//! against it. Loaded once at process startup from a YAML file; the
//! trigger event never carries any of this.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tokio::fs;

use crate::request::AuthMode;

/// Connection target for the SFTP endpoint, constant per deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct SftpEndpoint {
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    pub username: String,

    /// Remote directory for legacy upload-only events that carry no
    /// `sftp_path` of their own.
    #[serde(default)]
    pub target_dir: Option<String>,
}

fn default_port() -> u16 {
    22
}

/// Credential source selection.
///
/// Password mode carries a static deployment-level secret; private-key
/// mode names a secret-store entry holding PEM/OpenSSH key material.
#[derive(Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AuthConfig {
    Password {
        password: String,
    },
    PrivateKey {
        secret_id: String,
        #[serde(default)]
        passphrase: Option<String>,
    },
}

impl AuthConfig {
    pub fn mode(&self) -> AuthMode {
        match self {
            AuthConfig::Password { .. } => AuthMode::Password,
            AuthConfig::PrivateKey { .. } => AuthMode::PrivateKey,
        }
    }
}

// Manual Debug so the password and passphrase never reach logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthConfig::Password { .. } => f
                .debug_struct("Password")
                .field("password", &"<redacted>")
                .finish(),
            AuthConfig::PrivateKey { secret_id, .. } => f
                .debug_struct("PrivateKey")
                .field("secret_id", secret_id)
                .field("passphrase", &"<redacted>")
                .finish(),
        }
    }
}

/// Top-level configuration for one bridge deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    pub sftp: SftpEndpoint,
    pub auth: AuthConfig,
}

impl BridgeConfig {
    /// Load configuration from a YAML file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await.with_context(|| {
            format!(
                "Failed to read configuration file at {}. Please check file permissions and ensure the file is accessible.",
                path.display()
            )
        })?;

        let config: BridgeConfig = serde_yaml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse YAML configuration file at {}. Please check the YAML syntax is valid.",
                path.display()
            )
        })?;

        Ok(config)
    }
}
