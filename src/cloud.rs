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

//! Cloud API.

use std::path::Path;

use super::auth::AuthType;
use super::common::ResourceId;
use super::identity::ServicePrincipal;
use super::netapp::{Account, CapacityPool, NewAccount, Volume};
use super::session::Session;
use super::{Error, ErrorKind, Result};

/// NetApp Files management API of one subscription.
///
/// Provides high-level API for working with NetApp accounts, capacity pools
/// and volumes.
#[derive(Debug, Clone)]
pub struct Cloud {
    session: Session,
    subscription_id: String,
}

impl Cloud {
    /// Create a new cloud object with a given authentication plugin.
    ///
    /// See [`identity` module](identity/index.html) for details on how to
    /// authenticate.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// fn cloud() -> anf::Result<anf::Cloud> {
    ///     let auth = anf::identity::ServicePrincipal::new("tenant", "client", "s3cr3t")?;
    ///     Ok(anf::Cloud::new(auth, "00000000-0000-0000-0000-000000000000"))
    /// }
    ///
    /// # fn main() { cloud().unwrap(); }
    /// ```
    pub fn new<Auth, S>(auth_type: Auth, subscription_id: S) -> Cloud
    where
        Auth: AuthType + 'static,
        S: Into<String>,
    {
        Cloud::new_with_session(Session::new(auth_type), subscription_id)
    }

    /// Create a new cloud object from an existing session.
    pub fn new_with_session<S: Into<String>>(session: Session, subscription_id: S) -> Cloud {
        Cloud {
            session,
            subscription_id: subscription_id.into(),
        }
    }

    /// Create a new cloud object from a service principal.
    ///
    /// Uses the subscription and the Resource Manager endpoint of the
    /// principal. Fails with `InvalidConfig` if the subscription is unknown.
    pub fn from_service_principal(auth: ServicePrincipal) -> Result<Cloud> {
        let subscription_id = auth.subscription_id().map(String::from).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidConfig,
                "Subscription ID is not provided in the authentication file",
            )
        })?;
        let endpoint = auth.resource_manager_endpoint().to_string();
        Ok(Cloud::new(auth, subscription_id).with_endpoint(endpoint))
    }

    /// Create a new cloud object from an SDK authentication file.
    pub fn from_auth_file<P: AsRef<Path>>(path: P) -> Result<Cloud> {
        Cloud::from_service_principal(ServicePrincipal::from_auth_file(path)?)
    }

    /// Create a new cloud object from the file in `AZURE_AUTH_LOCATION`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # fn cloud_from_env() -> anf::Result<()> {
    /// let cloud = anf::Cloud::from_env()?;
    /// # Ok(()) }
    /// # fn main() { cloud_from_env().unwrap(); }
    /// ```
    pub fn from_env() -> Result<Cloud> {
        Cloud::from_service_principal(ServicePrincipal::from_env()?)
    }

    /// Convert this cloud into one using the given Resource Manager endpoint.
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Cloud {
        self.session.set_endpoint(endpoint);
        self
    }

    /// Convert this cloud into one using the given API version.
    pub fn with_api_version<S: Into<String>>(mut self, api_version: S) -> Cloud {
        self.session.set_api_version(api_version);
        self
    }

    /// Convert this cloud into one working with another subscription.
    pub fn with_subscription_id<S: Into<String>>(mut self, subscription_id: S) -> Cloud {
        self.subscription_id = subscription_id.into();
        self
    }

    /// API version in use.
    #[inline]
    pub fn api_version(&self) -> &str {
        self.session.api_version()
    }

    /// Subscription in use.
    #[inline]
    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    /// Underlying session.
    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Refresh this `Cloud` object (renew the token).
    pub async fn refresh(&self) -> Result<()> {
        self.session.refresh().await
    }

    /// Resource ID of an account in this subscription.
    pub fn account_id<S1, S2>(&self, resource_group: S1, name: S2) -> ResourceId
    where
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        ResourceId::account(&self.subscription_id, resource_group, name)
    }

    /// Prepare a new NetApp account.
    pub fn new_account<S1, S2, S3>(&self, resource_group: S1, name: S2, location: S3) -> NewAccount
    where
        S1: AsRef<str>,
        S2: AsRef<str>,
        S3: Into<String>,
    {
        NewAccount::new(
            self.session.clone(),
            self.account_id(resource_group, name),
            location.into(),
        )
    }

    /// Find a NetApp account.
    pub async fn get_account<S1, S2>(&self, resource_group: S1, name: S2) -> Result<Account>
    where
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        Account::load(self.session.clone(), self.account_id(resource_group, name)).await
    }

    /// Find a capacity pool.
    pub async fn get_pool<S1, S2, S3>(
        &self,
        resource_group: S1,
        account: S2,
        name: S3,
    ) -> Result<CapacityPool>
    where
        S1: AsRef<str>,
        S2: AsRef<str>,
        S3: AsRef<str>,
    {
        let id = self
            .account_id(resource_group, account)
            .child("capacityPools", name);
        CapacityPool::load(self.session.clone(), id).await
    }

    /// Find a volume.
    pub async fn get_volume<S1, S2, S3, S4>(
        &self,
        resource_group: S1,
        account: S2,
        pool: S3,
        name: S4,
    ) -> Result<Volume>
    where
        S1: AsRef<str>,
        S2: AsRef<str>,
        S3: AsRef<str>,
        S4: AsRef<str>,
    {
        let id = self
            .account_id(resource_group, account)
            .child("capacityPools", pool)
            .child("volumes", name);
        Volume::load(self.session.clone(), id).await
    }
}

#[cfg(test)]
mod test {
    use super::Cloud;
    use crate::auth::StaticToken;

    #[test]
    fn test_cloud_settings() {
        let cloud = Cloud::new(StaticToken::new("t"), "sub1")
            .with_endpoint("http://127.0.0.1:8080/")
            .with_api_version("2020-02-01");
        assert_eq!(cloud.subscription_id(), "sub1");
        assert_eq!(cloud.api_version(), "2020-02-01");
        assert_eq!(cloud.session().endpoint(), "http://127.0.0.1:8080");

        let account = cloud.new_account("rg1", "account01", "westus");
        assert_eq!(
            account.id().as_ref(),
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.NetApp/netAppAccounts/account01"
        );
        let cloud = cloud.with_subscription_id("sub2");
        assert_eq!(cloud.account_id("rg", "a").subscription_id(), Some("sub2"));
    }
}
