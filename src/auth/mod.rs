// Copyright 2026 The anf contributors
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

//! Authentication modules.
//!
//! Accessing the management API requires a bearer token. This module defines
//! the [AuthType](trait.AuthType.html) trait used by the
//! [Session](../struct.Session.html) and a simple implementation for
//! pre-issued tokens. Service principal authentication lives in the
//! [identity](../identity/index.html) module.
//!
//! # Examples
//!
//! Creating a session from a service principal described by the file in
//! `AZURE_AUTH_LOCATION`:
//!
//! ```rust,no_run
//! # fn session() -> anf::Result<anf::Session> {
//! let auth = anf::identity::ServicePrincipal::from_env()?;
//! Ok(anf::Session::new(auth))
//! # }
//! ```
//!
//! Using a token obtained elsewhere:
//!
//! ```
//! let auth = anf::auth::StaticToken::new("eyJ0eXAiOi...");
//! let session = anf::Session::new(auth);
//! ```

use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use super::Result;

mod simple;

pub use self::simple::StaticToken;

/// Trait for an authentication type.
#[async_trait]
pub trait AuthType: Debug + Send + Sync {
    /// Authenticate a request.
    async fn authenticate(&self, client: &Client, request: RequestBuilder)
        -> Result<RequestBuilder>;

    /// Refresh the cached credentials (if any).
    async fn refresh(&self, client: &Client) -> Result<()>;
}
