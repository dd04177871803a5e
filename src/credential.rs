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

//! Credential resolution.
//!
//! Resolution runs once per invocation with no caching, so a rotated or
//! revoked secret is honored on the very next invocation. Key material is
//! decoded before any network connection is attempted; a malformed key
//! aborts the pipeline without touching the SFTP host.

use russh::keys::PrivateKey;
use std::fmt;
use std::sync::Arc;
use zeroize::Zeroizing;

use crate::config::AuthConfig;
use crate::error::BridgeError;
use crate::store::SecretStore;

/// Authentication material for one SFTP session.
///
/// Held only in memory for the duration of the session; never persisted,
/// never logged.
#[derive(Clone)]
pub enum Credential {
    Password(Zeroizing<String>),
    PrivateKey(Arc<PrivateKey>),
}

impl Credential {
    /// Resolve the credential for this invocation from deployment
    /// configuration, fetching and decoding key material through the
    /// secret store when in private-key mode.
    pub async fn resolve(
        auth: &AuthConfig,
        secrets: &dyn SecretStore,
    ) -> Result<Self, BridgeError> {
        match auth {
            AuthConfig::Password { password } => {
                Ok(Credential::Password(Zeroizing::new(password.clone())))
            }
            AuthConfig::PrivateKey {
                secret_id,
                passphrase,
            } => {
                tracing::debug!(secret_id = %secret_id, "fetching private key from secret store");
                let key_data = secrets.get_secret(secret_id).await.map_err(|e| {
                    BridgeError::Credential(format!("failed to fetch secret '{secret_id}': {e}"))
                })?;

                let key = russh::keys::decode_secret_key(&key_data, passphrase.as_deref())
                    .map_err(|e| BridgeError::Credential(format!("malformed private key: {e}")))?;

                Ok(Credential::PrivateKey(Arc::new(key)))
            }
        }
    }
}

// Manual Debug so credential material never reaches logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Password(_) => write!(f, "Credential::Password(<redacted>)"),
            Credential::PrivateKey(_) => write!(f, "Credential::PrivateKey(<redacted>)"),
        }
    }
}
