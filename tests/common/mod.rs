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

//! Mock collaborators shared by the integration tests. Every mock counts
//! its calls so tests can assert what the pipeline did and did not touch.

// Not every test binary uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use zeroize::Zeroizing;

use sftp_bridge::config::{AuthConfig, BridgeConfig, SftpEndpoint};
use sftp_bridge::credential::Credential;
use sftp_bridge::sftp::{RemoteSession, SftpError, Transport};
use sftp_bridge::store::{ObjectStore, ObjectStoreError, SecretStore, SecretStoreError};
use sftp_bridge::TransferOrchestrator;

pub fn test_config(auth: AuthConfig, target_dir: Option<&str>) -> BridgeConfig {
    BridgeConfig {
        sftp: SftpEndpoint {
            host: "sftp.test".to_string(),
            port: 22,
            username: "bridge".to_string(),
            target_dir: target_dir.map(str::to_string),
        },
        auth,
    }
}

pub fn password_auth() -> AuthConfig {
    AuthConfig::Password {
        password: "hunter2".to_string(),
    }
}

pub fn orchestrator(
    config: BridgeConfig,
    objects: Arc<MemoryObjectStore>,
    secrets: Arc<MemorySecretStore>,
    transport: Arc<MockTransport>,
) -> TransferOrchestrator {
    TransferOrchestrator::new(config, objects, secrets, transport)
}

// ---------------------------------------------------------------------------
// Object store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    pub get_calls: AtomicUsize,
    pub put_calls: AtomicUsize,
    pub fail_gets: bool,
}

impl MemoryObjectStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_object(bucket: &str, key: &str, body: &[u8]) -> Arc<Self> {
        let store = Self::default();
        store
            .objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), body.to_vec());
        Arc::new(store)
    }

    pub fn failing_gets() -> Arc<Self> {
        Arc::new(Self {
            fail_gets: true,
            ..Self::default()
        })
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_gets {
            return Err(ObjectStoreError::Backend("backend unavailable".to_string()));
        }
        self.object(bucket, key)
            .ok_or_else(|| ObjectStoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), ObjectStoreError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), body);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Secret store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemorySecretStore {
    secrets: HashMap<String, String>,
    pub calls: AtomicUsize,
}

impl MemorySecretStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_secret(secret_id: &str, value: &str) -> Arc<Self> {
        let mut secrets = HashMap::new();
        secrets.insert(secret_id.to_string(), value.to_string());
        Arc::new(Self {
            secrets,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn get_secret(&self, secret_id: &str) -> Result<Zeroizing<String>, SecretStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.secrets
            .get(secret_id)
            .cloned()
            .map(Zeroizing::new)
            .ok_or_else(|| SecretStoreError(format!("no secret named '{secret_id}'")))
    }
}

// ---------------------------------------------------------------------------
// SFTP transport
// ---------------------------------------------------------------------------

/// Shared state observed by tests: the remote filesystem plus lifecycle
/// counters for the session the transport hands out.
#[derive(Default)]
pub struct SessionState {
    pub files: Mutex<HashMap<String, Vec<u8>>>,
    pub auth_calls: AtomicUsize,
    pub close_calls: AtomicUsize,
    pub reject_auth: bool,
    pub fail_writes: bool,
    pub fail_reads: bool,
    pub fail_close: bool,
}

impl SessionState {
    pub fn with_file(remote_path: &str, body: &[u8]) -> Arc<Self> {
        let state = Self::default();
        state
            .files
            .lock()
            .unwrap()
            .insert(remote_path.to_string(), body.to_vec());
        Arc::new(state)
    }

    pub fn file(&self, remote_path: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(remote_path).cloned()
    }
}

pub struct MockTransport {
    state: Arc<SessionState>,
    pub fail_connect: bool,
    pub connect_calls: AtomicUsize,
}

impl MockTransport {
    pub fn new(state: Arc<SessionState>) -> Arc<Self> {
        Arc::new(Self {
            state,
            fail_connect: false,
            connect_calls: AtomicUsize::new(0),
        })
    }

    pub fn refusing_connections(state: Arc<SessionState>) -> Arc<Self> {
        Arc::new(Self {
            state,
            fail_connect: true,
            connect_calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(&self, _endpoint: &SftpEndpoint) -> Result<Box<dyn RemoteSession>, SftpError> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_connect {
            return Err(SftpError::other("connection refused"));
        }
        Ok(Box::new(MockSession {
            state: Arc::clone(&self.state),
            closed: false,
        }))
    }
}

pub struct MockSession {
    state: Arc<SessionState>,
    closed: bool,
}

#[async_trait]
impl RemoteSession for MockSession {
    async fn authenticate(&mut self, _credential: &Credential) -> Result<(), SftpError> {
        self.state.auth_calls.fetch_add(1, Ordering::SeqCst);
        if self.state.reject_auth {
            return Err(SftpError::other("permission denied"));
        }
        Ok(())
    }

    async fn write_file(&mut self, remote_path: &str, data: &[u8]) -> Result<(), SftpError> {
        if self.state.fail_writes {
            return Err(SftpError::other("write failed mid-stream"));
        }
        self.state
            .files
            .lock()
            .unwrap()
            .insert(remote_path.to_string(), data.to_vec());
        Ok(())
    }

    async fn read_file(&mut self, remote_path: &str) -> Result<Vec<u8>, SftpError> {
        if self.state.fail_reads {
            return Err(SftpError::other("read failed mid-stream"));
        }
        self.state
            .file(remote_path)
            .ok_or_else(|| SftpError::other(format!("no such remote file: {remote_path}")))
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.state.close_calls.fetch_add(1, Ordering::SeqCst);
        // A failing underlying close is swallowed here exactly like the
        // production session: counted, logged, never raised.
        if self.state.fail_close {
            tracing::warn!("mock close failure (not propagated)");
        }
    }
}
