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

//! The transfer orchestrator: validate → resolve credential → transfer.
//!
//! One `handle_event` call performs exactly one directional transfer. The
//! stages are strictly sequential and each failure aborts the pipeline;
//! the session, once created, is closed on every exit path.

use serde::Serialize;
use std::sync::Arc;

use crate::config::BridgeConfig;
use crate::credential::Credential;
use crate::error::BridgeError;
use crate::request::{Direction, RawEvent, TransferRequest};
use crate::sftp::{RemoteSession, RusshTransport, Transport};
use crate::store::{ObjectStore, SecretStore};

/// Successful invocation summary returned to the caller. Failures
/// propagate as [`BridgeError`] instead of a structured body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResult {
    pub status_code: u16,
    pub body: String,
}

/// Process-wide orchestrator.
///
/// Constructed once at startup with the collaborator handles; the handles
/// are stateless connection factories, so concurrent invocations share
/// nothing mutable and need no locking.
pub struct TransferOrchestrator {
    config: BridgeConfig,
    object_store: Arc<dyn ObjectStore>,
    secret_store: Arc<dyn SecretStore>,
    transport: Arc<dyn Transport>,
}

impl TransferOrchestrator {
    pub fn new(
        config: BridgeConfig,
        object_store: Arc<dyn ObjectStore>,
        secret_store: Arc<dyn SecretStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            object_store,
            secret_store,
            transport,
        }
    }

    /// Convenience constructor using the russh-backed transport.
    pub fn with_default_transport(
        config: BridgeConfig,
        object_store: Arc<dyn ObjectStore>,
        secret_store: Arc<dyn SecretStore>,
    ) -> Self {
        Self::new(
            config,
            object_store,
            secret_store,
            Arc::new(RusshTransport::default()),
        )
    }

    /// Handle one trigger event end to end.
    pub async fn handle_event(&self, event: RawEvent) -> Result<TransferResult, BridgeError> {
        match self.run(event).await {
            Ok(result) => Ok(result),
            Err(err) => {
                tracing::error!(error = %err, "transfer invocation failed");
                Err(err)
            }
        }
    }

    async fn run(&self, event: RawEvent) -> Result<TransferResult, BridgeError> {
        let event = event.with_deployment_defaults(self.config.sftp.target_dir.as_deref());
        let request = TransferRequest::validate(event, self.config.auth.mode())?;

        tracing::info!(
            operation = %request.direction,
            bucket = %request.locator.bucket,
            key = %request.locator.key,
            sftp_path = %request.remote_path,
            "starting transfer"
        );

        let credential = Credential::resolve(&self.config.auth, self.secret_store.as_ref()).await?;

        let endpoint = &self.config.sftp;
        let mut session =
            self.transport
                .connect(endpoint)
                .await
                .map_err(|source| BridgeError::Connection {
                    host: endpoint.host.clone(),
                    port: endpoint.port,
                    source,
                })?;

        let outcome = self
            .run_session(session.as_mut(), &request, &credential)
            .await;

        // Unconditional teardown; close is idempotent and never raises.
        session.close().await;

        outcome?;

        Ok(TransferResult {
            status_code: 200,
            body: format!("Operation '{}' completed successfully.", request.direction),
        })
    }

    async fn run_session(
        &self,
        session: &mut dyn RemoteSession,
        request: &TransferRequest,
        credential: &Credential,
    ) -> Result<(), BridgeError> {
        let endpoint = &self.config.sftp;

        session
            .authenticate(credential)
            .await
            .map_err(|source| BridgeError::Authentication {
                username: endpoint.username.clone(),
                host: endpoint.host.clone(),
                port: endpoint.port,
                source,
            })?;

        let remote_file = remote_file_path(&request.remote_path, &request.locator.key);

        match request.direction {
            Direction::Upload => {
                let body = self
                    .object_store
                    .get_object(&request.locator.bucket, &request.locator.key)
                    .await?;

                session
                    .write_file(&remote_file, &body)
                    .await
                    .map_err(|source| BridgeError::Transfer {
                        direction: Direction::Upload,
                        remote_path: remote_file.clone(),
                        source,
                    })?;

                tracing::info!(
                    key = %request.locator.key,
                    remote = %remote_file,
                    bytes = body.len(),
                    "uploaded object to SFTP"
                );
            }
            Direction::Download => {
                let body =
                    session
                        .read_file(&remote_file)
                        .await
                        .map_err(|source| BridgeError::Transfer {
                            direction: Direction::Download,
                            remote_path: remote_file.clone(),
                            source,
                        })?;
                let bytes = body.len();

                self.object_store
                    .put_object(&request.locator.bucket, &request.locator.key, body)
                    .await?;

                tracing::info!(
                    remote = %remote_file,
                    key = %request.locator.key,
                    bytes,
                    "downloaded file to object store"
                );
            }
        }

        Ok(())
    }
}

/// Remote destination rule: the configured directory joined with the final
/// `/`-separated segment of the object key. Applied identically in both
/// directions.
pub fn remote_file_path(sftp_dir: &str, key: &str) -> String {
    let name = key.rsplit('/').next().unwrap_or(key);
    if sftp_dir.ends_with('/') {
        format!("{sftp_dir}{name}")
    } else {
        format!("{sftp_dir}/{name}")
    }
}
