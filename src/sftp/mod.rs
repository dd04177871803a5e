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

//! SFTP session layer based on russh and russh-sftp.
//!
//! One [`RemoteSession`] owns exactly one SSH connection with one SFTP
//! subsystem layered on it. Sessions move through
//! connect → authenticate → transfer → close, strictly in that order, and
//! `close` runs exactly once on every exit path. The [`Transport`] trait
//! is the seam that lets tests drive the same lifecycle against a mock.

pub mod error;
pub mod session;

pub use error::SftpError;
pub use session::{RemoteSession, RusshTransport, ServerCheck, Transport};
