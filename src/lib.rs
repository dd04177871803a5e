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

//! Event-driven bridge between an object-storage backend and an SFTP endpoint.
//!
//! Each invocation moves exactly one named object in one direction
//! (object store → SFTP or SFTP → object store), driven by a JSON trigger
//! event. The pipeline is strictly sequential: validate the request,
//! resolve the SFTP credential, open a session, transfer, and close the
//! session on every exit path.
//!
//! The object store, the secret store, and the SFTP transport are
//! capability traits; production code plugs in real backends, tests plug
//! in mocks.

pub mod config;
pub mod credential;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod request;
pub mod sftp;
pub mod store;

pub use config::{AuthConfig, BridgeConfig, SftpEndpoint};
pub use credential::Credential;
pub use error::{BridgeError, ValidationError};
pub use orchestrator::{TransferOrchestrator, TransferResult};
pub use request::{AuthMode, Direction, ObjectLocator, RawEvent, TransferRequest};
