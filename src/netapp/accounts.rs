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

//! NetApp account management.

use std::collections::HashMap;

use async_trait::async_trait;

use super::super::common::{
    DeletionWaiter, Provisioned, ProvisioningState, ProvisioningWaiter, Refresh, ResourceId,
};
use super::super::session::Session;
use super::super::Result;
use super::pools::{CapacityPool, NewPool};
use super::{api, protocol};

/// Structure representing a NetApp account.
#[derive(Clone, Debug)]
pub struct Account {
    session: Session,
    inner: protocol::Account,
}

/// A request to create a NetApp account.
#[derive(Clone, Debug)]
pub struct NewAccount {
    session: Session,
    id: ResourceId,
    inner: protocol::AccountCreate,
}

impl Account {
    /// Load an account.
    pub(crate) async fn load(session: Session, id: ResourceId) -> Result<Account> {
        let inner = api::get_account(&session, &id).await?;
        Ok(Account { session, inner })
    }

    transparent_property! {
        #[doc = "Resource ID of the account."]
        id: ref ResourceId
    }

    transparent_property! {
        #[doc = "Location (region) of the account."]
        location: ref String
    }

    transparent_property! {
        #[doc = "Tags of the account."]
        tags: ref HashMap<String, String>
    }

    transparent_property! {
        #[doc = "Provisioning state as of the last request."]
        provisioning_state: ProvisioningState => properties.provisioning_state
    }

    /// Name of the account.
    #[inline]
    pub fn name(&self) -> &str {
        self.inner.id.name()
    }

    /// Resource group of the account.
    #[inline]
    pub fn resource_group(&self) -> Option<&str> {
        self.inner.id.resource_group()
    }

    /// Get a capacity pool of this account.
    pub async fn get_pool<S: AsRef<str>>(&self, name: S) -> Result<CapacityPool> {
        let id = self.inner.id.child(api::POOLS, name);
        CapacityPool::load(self.session.clone(), id).await
    }

    /// Prepare a new capacity pool in this account.
    ///
    /// The pool is created in the location of the account.
    pub fn new_pool<S: AsRef<str>>(
        &self,
        name: S,
        service_level: protocol::ServiceLevel,
        size: u64,
    ) -> NewPool {
        NewPool::new(
            self.session.clone(),
            self.inner.id.child(api::POOLS, name),
            self.inner.location.clone(),
            service_level,
            size,
        )
    }

    /// Delete the account.
    ///
    /// The account must not contain capacity pools.
    pub async fn delete(self) -> Result<DeletionWaiter<Account>> {
        api::delete_account(&self.session, &self.inner.id).await?;
        let resource = self.inner.id.to_string();
        Ok(DeletionWaiter::new(self, resource))
    }
}

#[async_trait]
impl Refresh for Account {
    /// Refresh the account.
    async fn refresh(&mut self) -> Result<()> {
        self.inner = api::get_account(&self.session, &self.inner.id).await?;
        Ok(())
    }
}

impl Provisioned for Account {
    fn provisioning_state(&self) -> ProvisioningState {
        self.inner.properties.provisioning_state
    }
}

impl NewAccount {
    /// Start creating an account.
    pub(crate) fn new(session: Session, id: ResourceId, location: String) -> NewAccount {
        NewAccount {
            session,
            id,
            inner: protocol::AccountCreate {
                location,
                tags: HashMap::new(),
                properties: protocol::AccountCreateProperties::default(),
            },
        }
    }

    /// Resource ID the account will have.
    #[inline]
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Request creation of the account.
    ///
    /// Returns a waiter that resolves once the account is provisioned.
    pub async fn create(self) -> Result<ProvisioningWaiter<Account>> {
        let inner = api::create_account(&self.session, &self.id, &self.inner).await?;
        let account = Account {
            session: self.session,
            inner,
        };
        let resource = account.inner.id.to_string();
        Ok(ProvisioningWaiter::new(account, resource))
    }

    creation_inner_field! {
        #[doc = "Set location of the account."]
        set_location, with_location -> location: String
    }

    /// Add a tag.
    pub fn set_tag<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let _ = self.inner.tags.insert(key.into(), value.into());
    }

    /// Add a tag.
    #[inline]
    pub fn with_tag<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.set_tag(key, value);
        self
    }
}
