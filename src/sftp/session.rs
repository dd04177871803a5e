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

//! Session lifecycle and the russh-backed transport implementation.

use async_trait::async_trait;
use russh::client::{Config, Handle, Handler};
use russh::keys::{PrivateKeyWithHashAlg, PublicKey};
use russh::Disconnect;
use russh_sftp::client::SftpSession;
use russh_sftp::protocol::OpenFlags;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::error::{SftpError, SftpResult};
use crate::config::SftpEndpoint;
use crate::credential::Credential;

/// One authenticated-or-authenticating remote session.
///
/// Exclusive, non-shared ownership: a session belongs to exactly one
/// invocation and never outlives it. `close` must be safe to call at any
/// point after creation, must be idempotent, and must never raise.
#[async_trait]
pub trait RemoteSession: Send {
    /// Connecting → Authenticated.
    async fn authenticate(&mut self, credential: &Credential) -> SftpResult<()>;

    /// Write the whole buffer to `remote_path`, overwriting any existing
    /// remote file. Last writer wins.
    async fn write_file(&mut self, remote_path: &str, data: &[u8]) -> SftpResult<()>;

    /// Read the whole remote file into memory.
    async fn read_file(&mut self, remote_path: &str) -> SftpResult<Vec<u8>>;

    /// Best-effort teardown. Idempotent; underlying close failures are
    /// logged, never propagated.
    async fn close(&mut self);
}

/// Opens sessions against an endpoint. This is the seam mocked in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Unconnected → Connecting. On failure no session exists and there
    /// is nothing to close.
    async fn connect(&self, endpoint: &SftpEndpoint) -> SftpResult<Box<dyn RemoteSession>>;
}

/// Server host key verification policy.
///
/// The default accepts any host key, matching the behavior of the
/// deployments this bridge replaces; point it at a known-hosts file to
/// pin the endpoint.
#[derive(Debug, Clone, Default)]
pub enum ServerCheck {
    #[default]
    AcceptAny,
    DefaultKnownHostsFile,
    KnownHostsFile(String),
}

/// SSH client handler applying the configured host key policy.
#[derive(Debug, Clone)]
pub struct BridgeHandler {
    host: String,
    port: u16,
    server_check: ServerCheck,
}

impl Handler for BridgeHandler {
    type Error = SftpError;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> Result<bool, Self::Error> {
        match &self.server_check {
            ServerCheck::AcceptAny => Ok(true),
            ServerCheck::DefaultKnownHostsFile => {
                let result =
                    russh::keys::check_known_hosts(&self.host, self.port, server_public_key)
                        .map_err(|_| SftpError::ServerCheckFailed)?;
                Ok(result)
            }
            ServerCheck::KnownHostsFile(known_hosts_path) => {
                let result = russh::keys::check_known_hosts_path(
                    &self.host,
                    self.port,
                    server_public_key,
                    known_hosts_path,
                )
                .map_err(|_| SftpError::ServerCheckFailed)?;
                Ok(result)
            }
        }
    }
}

/// Production [`Transport`] backed by russh.
#[derive(Debug, Clone, Default)]
pub struct RusshTransport {
    server_check: ServerCheck,
}

impl RusshTransport {
    pub fn new(server_check: ServerCheck) -> Self {
        Self { server_check }
    }
}

#[async_trait]
impl Transport for RusshTransport {
    async fn connect(&self, endpoint: &SftpEndpoint) -> SftpResult<Box<dyn RemoteSession>> {
        let config = Arc::new(Config {
            inactivity_timeout: Some(Duration::from_secs(300)),
            ..Default::default()
        });

        let handler = BridgeHandler {
            host: endpoint.host.clone(),
            port: endpoint.port,
            server_check: self.server_check.clone(),
        };

        tracing::debug!("connecting to {}:{}", endpoint.host, endpoint.port);

        let handle = russh::client::connect(
            config,
            (endpoint.host.as_str(), endpoint.port),
            handler,
        )
        .await?;

        Ok(Box::new(RusshSession {
            handle,
            sftp: None,
            host: endpoint.host.clone(),
            port: endpoint.port,
            username: endpoint.username.clone(),
            closed: false,
        }))
    }
}

/// Session over one russh connection with a lazily opened SFTP subsystem.
struct RusshSession {
    handle: Handle<BridgeHandler>,
    sftp: Option<SftpSession>,
    host: String,
    port: u16,
    username: String,
    closed: bool,
}

impl RusshSession {
    async fn ensure_sftp(&mut self) -> SftpResult<&SftpSession> {
        if self.sftp.is_none() {
            tracing::debug!("opening SFTP subsystem on {}:{}", self.host, self.port);
            let channel = self.handle.channel_open_session().await?;
            channel.request_subsystem(true, "sftp").await?;
            let sftp = SftpSession::new(channel.into_stream()).await?;
            self.sftp = Some(sftp);
        }

        self.sftp
            .as_ref()
            .ok_or_else(|| SftpError::other("SFTP subsystem not initialized"))
    }
}

#[async_trait]
impl RemoteSession for RusshSession {
    async fn authenticate(&mut self, credential: &Credential) -> SftpResult<()> {
        match credential {
            Credential::Password(password) => {
                let result = self
                    .handle
                    .authenticate_password(self.username.as_str(), password.as_str())
                    .await?;
                if !result.success() {
                    return Err(SftpError::AuthenticationRejected(self.username.clone()));
                }
            }
            Credential::PrivateKey(key) => {
                let hash_alg = self.handle.best_supported_rsa_hash().await?.flatten();
                let result = self
                    .handle
                    .authenticate_publickey(
                        self.username.as_str(),
                        PrivateKeyWithHashAlg::new(Arc::clone(key), hash_alg),
                    )
                    .await?;
                if !result.success() {
                    return Err(SftpError::AuthenticationRejected(self.username.clone()));
                }
            }
        }

        tracing::debug!("authenticated as '{}' on {}:{}", self.username, self.host, self.port);
        Ok(())
    }

    async fn write_file(&mut self, remote_path: &str, data: &[u8]) -> SftpResult<()> {
        let sftp = self.ensure_sftp().await?;

        let mut file = sftp
            .open_with_flags(
                remote_path,
                OpenFlags::CREATE | OpenFlags::TRUNCATE | OpenFlags::WRITE,
            )
            .await?;
        file.write_all(data).await?;
        file.flush().await?;
        file.shutdown().await?;

        Ok(())
    }

    async fn read_file(&mut self, remote_path: &str) -> SftpResult<Vec<u8>> {
        let sftp = self.ensure_sftp().await?;

        let mut file = sftp.open_with_flags(remote_path, OpenFlags::READ).await?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).await?;

        Ok(contents)
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Some(sftp) = self.sftp.take() {
            if let Err(e) = sftp.close().await {
                tracing::warn!(
                    "SFTP channel close failed for {}:{}: {e}",
                    self.host,
                    self.port
                );
            }
        }

        if let Err(e) = self
            .handle
            .disconnect(Disconnect::ByApplication, "", "")
            .await
        {
            tracing::warn!("disconnect from {}:{} failed: {e}", self.host, self.port);
        }

        tracing::debug!("session to {}:{} closed", self.host, self.port);
    }
}
