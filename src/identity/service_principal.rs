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

//! Service principal authentication.

use std::env;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use static_assertions::assert_impl_all;

use super::internal::Internal;
use super::protocol::AuthFile;
use super::{AUTH_LOCATION_ENV, DEFAULT_AUTHORITY};
use crate::auth::AuthType;
use crate::session::DEFAULT_ENDPOINT;
use crate::{Error, ErrorKind, Result};

/// Service principal authentication with a client secret.
///
/// You need to know the tenant of the principal, its client ID and secret.
/// The token is requested for the Resource Manager endpoint.
///
/// ```rust,no_run
/// # async fn example() -> anf::Result<()> {
/// let auth = anf::identity::ServicePrincipal::new("tenant", "client", "s3cr3t")?;
/// let session = anf::Session::new(auth);
/// # Ok(()) }
/// ```
///
/// Most often the credentials come from an SDK authentication file, in which
/// case the file also provides the subscription to use:
///
/// ```rust,no_run
/// # async fn example() -> anf::Result<()> {
/// let auth = anf::identity::ServicePrincipal::from_auth_file("/etc/azure/auth.json")?;
/// println!("Using subscription {:?}", auth.subscription_id());
/// # Ok(()) }
/// ```
///
/// The token is cached while it's still valid or until
/// [refresh](../auth/trait.AuthType.html#tymethod.refresh) is called.
/// Clones of a `ServicePrincipal` start with an empty cache.
#[derive(Debug, Clone)]
pub struct ServicePrincipal {
    inner: Internal,
    subscription_id: Option<String>,
    resource_manager_endpoint: String,
}

assert_impl_all!(ServicePrincipal: Send, Sync);

impl ServicePrincipal {
    /// Create a service principal authentication against the public cloud.
    pub fn new<S1, S2, S3>(
        tenant_id: S1,
        client_id: S2,
        client_secret: S3,
    ) -> Result<ServicePrincipal>
    where
        S1: AsRef<str>,
        S2: Into<String>,
        S3: Into<String>,
    {
        ServicePrincipal::with_endpoints(
            DEFAULT_AUTHORITY,
            DEFAULT_ENDPOINT,
            tenant_id,
            client_id,
            client_secret,
        )
    }

    /// Create a service principal authentication with custom endpoints.
    ///
    /// The `resource_manager_endpoint` is also used as the token resource.
    pub fn with_endpoints<S1, S2, S3, S4, S5>(
        authority: S1,
        resource_manager_endpoint: S2,
        tenant_id: S3,
        client_id: S4,
        client_secret: S5,
    ) -> Result<ServicePrincipal>
    where
        S1: AsRef<str>,
        S2: Into<String>,
        S3: AsRef<str>,
        S4: Into<String>,
        S5: Into<String>,
    {
        let resource_manager_endpoint = resource_manager_endpoint.into();
        let inner = Internal::new(
            authority.as_ref(),
            tenant_id.as_ref(),
            client_id.into(),
            client_secret.into(),
            resource_manager_endpoint.clone(),
        )?;
        Ok(ServicePrincipal {
            inner,
            subscription_id: None,
            resource_manager_endpoint,
        })
    }

    /// Load the service principal from an SDK authentication file.
    pub fn from_auth_file<P: AsRef<Path>>(path: P) -> Result<ServicePrincipal> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Cannot read authentication file {}: {}", path.display(), e),
            )
        })?;
        let file: AuthFile = serde_json::from_str(&content).map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Malformed authentication file {}: {}", path.display(), e),
            )
        })?;
        debug!("Loaded authentication file {}: {:?}", path.display(), file);
        ServicePrincipal::from_parsed(file)
    }

    /// Load the service principal from the file named by `AZURE_AUTH_LOCATION`.
    pub fn from_env() -> Result<ServicePrincipal> {
        match env::var(AUTH_LOCATION_ENV) {
            Ok(path) if !path.trim().is_empty() => ServicePrincipal::from_auth_file(path),
            _ => Err(Error::new(
                ErrorKind::InvalidConfig,
                format!("{} is not set", AUTH_LOCATION_ENV),
            )),
        }
    }

    fn from_parsed(file: AuthFile) -> Result<ServicePrincipal> {
        let mut result = ServicePrincipal::with_endpoints(
            file.active_directory_endpoint_url,
            file.resource_manager_endpoint_url,
            file.tenant_id,
            file.client_id,
            file.client_secret,
        )?;
        result.subscription_id = file.subscription_id.filter(|s| !s.is_empty());
        Ok(result)
    }

    /// Set the subscription to report.
    pub fn set_subscription_id<S: Into<String>>(&mut self, value: S) {
        self.subscription_id = Some(value.into());
    }

    /// Set the subscription to report.
    #[inline]
    pub fn with_subscription_id<S: Into<String>>(mut self, value: S) -> Self {
        self.set_subscription_id(value);
        self
    }

    /// Client ID of the principal.
    #[inline]
    pub fn client_id(&self) -> &str {
        self.inner.client_id()
    }

    /// Subscription ID (if known).
    #[inline]
    pub fn subscription_id(&self) -> Option<&str> {
        self.subscription_id.as_deref()
    }

    /// Resource Manager endpoint the token is issued for.
    #[inline]
    pub fn resource_manager_endpoint(&self) -> &str {
        &self.resource_manager_endpoint
    }
}

#[async_trait]
impl AuthType for ServicePrincipal {
    /// Authenticate a request.
    async fn authenticate(
        &self,
        client: &Client,
        request: RequestBuilder,
    ) -> Result<RequestBuilder> {
        self.inner.authenticate(client, request).await
    }

    /// Refresh the cached token.
    async fn refresh(&self, client: &Client) -> Result<()> {
        self.inner.refresh(client, true).await
    }
}

#[cfg(test)]
pub mod test {
    use std::io::Write;

    use super::ServicePrincipal;
    use crate::ErrorKind;

    #[test]
    fn test_from_auth_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "clientId": "client1",
                "clientSecret": "s3cr3t",
                "subscriptionId": "sub1",
                "tenantId": "tenant1",
                "activeDirectoryEndpointUrl": "https://login.example.com",
                "resourceManagerEndpointUrl": "https://management.example.com/",
                "managementEndpointUrl": "https://ignored.example.com/"
            }}"#
        )
        .unwrap();

        let sp = ServicePrincipal::from_auth_file(file.path()).unwrap();
        assert_eq!(sp.client_id(), "client1");
        assert_eq!(sp.subscription_id(), Some("sub1"));
        assert_eq!(
            sp.resource_manager_endpoint(),
            "https://management.example.com/"
        );
        assert!(!format!("{:?}", sp).contains("s3cr3t"));
    }

    #[test]
    fn test_from_auth_file_missing() {
        let err = ServicePrincipal::from_auth_file("/nonexistent/auth.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[test]
    fn test_from_auth_file_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"clientId": "client1"}}"#).unwrap();
        let err = ServicePrincipal::from_auth_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[test]
    fn test_new_defaults() {
        let sp = ServicePrincipal::new("tenant1", "client1", "secret")
            .unwrap()
            .with_subscription_id("sub2");
        assert_eq!(sp.subscription_id(), Some("sub2"));
        assert_eq!(sp.resource_manager_endpoint(), "https://management.azure.com");
    }
}
