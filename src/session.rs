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

//! Session structure definition.
//!
//! The Session object serves as a wrapper around an HTTP(s) client, handling
//! authentication, request paths and API versions.

use std::fmt;
use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use static_assertions::assert_impl_all;

use super::auth::AuthType;
use super::{Error, Result};

/// Default Resource Manager endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com";

/// Default API version of the NetApp provider.
pub const DEFAULT_API_VERSION: &str = "2019-11-01";

/// A management API session.
///
/// Owns an authentication method and an underlying HTTP client. Cloning is
/// cheap: clones share the client and the authentication (including its
/// cached token).
#[derive(Clone)]
pub struct Session {
    client: Client,
    auth: Arc<dyn AuthType>,
    endpoint: String,
    api_version: String,
}

assert_impl_all!(Session: Send, Sync);

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Session")
            .field("auth", &self.auth)
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Session {
    /// Create a new session with a given authentication plugin.
    pub fn new<Auth: AuthType + 'static>(auth: Auth) -> Session {
        Session::new_with_client(Client::new(), auth)
    }

    /// Create a new session with a given HTTP client and authentication plugin.
    pub fn new_with_client<Auth: AuthType + 'static>(client: Client, auth: Auth) -> Session {
        Session {
            client,
            auth: Arc::new(auth),
            endpoint: String::from(DEFAULT_ENDPOINT),
            api_version: String::from(DEFAULT_API_VERSION),
        }
    }

    /// Set the Resource Manager endpoint.
    pub fn set_endpoint<S: Into<String>>(&mut self, endpoint: S) {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
    }

    /// Set the Resource Manager endpoint.
    #[inline]
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Session {
        self.set_endpoint(endpoint);
        self
    }

    /// Set the API version to use.
    pub fn set_api_version<S: Into<String>>(&mut self, version: S) {
        self.api_version = version.into();
    }

    /// Set the API version to use.
    #[inline]
    pub fn with_api_version<S: Into<String>>(mut self, version: S) -> Session {
        self.set_api_version(version);
        self
    }

    /// Resource Manager endpoint.
    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// API version in use.
    #[inline]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Authentication in use.
    #[inline]
    pub fn auth(&self) -> &dyn AuthType {
        self.auth.as_ref()
    }

    /// Refresh the session (drop cached credentials).
    pub async fn refresh(&self) -> Result<()> {
        self.auth.refresh(&self.client).await
    }

    /// Full URL of a request path.
    pub fn url<S: AsRef<str>>(&self, path: S) -> String {
        let path = path.as_ref();
        let sep = if path.starts_with('/') { "" } else { "/" };
        format!(
            "{}{}{}?api-version={}",
            self.endpoint, sep, path, self.api_version
        )
    }

    /// Start an authenticated request.
    pub async fn request<S: AsRef<str>>(&self, method: Method, path: S) -> Result<RequestBuilder> {
        let url = self.url(path);
        trace!("Sending HTTP {} {}", method, url);
        let builder = self.client.request(method, url);
        self.auth.authenticate(&self.client, builder).await
    }

    /// Fetch a JSON resource.
    pub async fn get<T, S>(&self, path: S) -> Result<T>
    where
        T: DeserializeOwned,
        S: AsRef<str>,
    {
        let resp = self.request(Method::GET, path).await?.send().await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Create or update a JSON resource.
    pub async fn put<B, T, S>(&self, path: S, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
        S: AsRef<str>,
    {
        let resp = self.request(Method::PUT, path).await?.json(body).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Delete a resource.
    ///
    /// A resource that is already gone is not an error.
    pub async fn delete<S: AsRef<str>>(&self, path: S) -> Result<()> {
        let resp = self.request(Method::DELETE, path).await?.send().await?;
        if resp.status() == reqwest::StatusCode::NO_CONTENT {
            debug!("Resource {} is already gone", resp.url());
            return Ok(());
        }
        let _ = check(resp).await?;
        Ok(())
    }
}

/// Convert an unsuccessful response into an error.
pub(crate) async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        trace!("HTTP {} from {}", status, resp.url());
        return Ok(resp);
    }

    let url = resp.url().clone();
    let body = resp.text().await.unwrap_or_default();
    let err = Error::from_response(status, &body);
    debug!("HTTP request to {} failed with {}", url, err);
    Err(err)
}
