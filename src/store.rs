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

//! External collaborator capability traits.
//!
//! The object store and the secret store are provided by the embedding
//! process as process-wide handles constructed once at startup. The
//! bridge never reimplements them; it only calls these contracts.

use async_trait::async_trait;
use thiserror::Error;
use zeroize::Zeroizing;

/// Failure reported by the object-storage backend.
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("object store backend error: {0}")]
    Backend(String),
}

/// Failure reported by the secret-retrieval backend.
#[derive(Debug, Error)]
#[error("secret store error: {0}")]
pub struct SecretStoreError(pub String);

/// Get/put whole objects by (bucket, key).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError>;

    /// Overwrites any existing object at the locator; last writer wins.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), ObjectStoreError>;
}

/// Fetch an opaque secret blob by identifier. Used in private-key mode
/// only; the returned material is zeroized on drop.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get_secret(&self, secret_id: &str) -> Result<Zeroizing<String>, SecretStoreError>;
}
