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

//! Capacity pool management.

use std::collections::HashMap;

use async_trait::async_trait;

use super::super::common::{
    DeletionWaiter, Provisioned, ProvisioningState, ProvisioningWaiter, Refresh, ResourceId,
};
use super::super::session::Session;
use super::super::{Error, ErrorKind, Result};
use super::volumes::{NewVolume, Volume};
use super::{api, protocol};

/// Structure representing a capacity pool.
#[derive(Clone, Debug)]
pub struct CapacityPool {
    session: Session,
    inner: protocol::Pool,
}

/// A request to create a capacity pool.
#[derive(Clone, Debug)]
pub struct NewPool {
    session: Session,
    id: ResourceId,
    inner: protocol::PoolCreate,
}

impl CapacityPool {
    /// Load a capacity pool.
    pub(crate) async fn load(session: Session, id: ResourceId) -> Result<CapacityPool> {
        let inner = api::get_pool(&session, &id).await?;
        Ok(CapacityPool { session, inner })
    }

    transparent_property! {
        #[doc = "Resource ID of the capacity pool."]
        id: ref ResourceId
    }

    transparent_property! {
        #[doc = "Location (region) of the capacity pool."]
        location: ref String
    }

    transparent_property! {
        #[doc = "Tags of the capacity pool."]
        tags: ref HashMap<String, String>
    }

    transparent_property! {
        #[doc = "Provisioning state as of the last request."]
        provisioning_state: ProvisioningState => properties.provisioning_state
    }

    transparent_property! {
        #[doc = "Service level of the capacity pool."]
        service_level: protocol::ServiceLevel => properties.service_level
    }

    transparent_property! {
        #[doc = "Provisioned size in bytes."]
        size: u64 => properties.size
    }

    transparent_property! {
        #[doc = "Internal UUID of the pool."]
        pool_id: ref Option<String> => properties.pool_id
    }

    /// Name of the capacity pool.
    #[inline]
    pub fn name(&self) -> &str {
        self.inner.id.name()
    }

    /// Name of the account the pool belongs to.
    #[inline]
    pub fn account_name(&self) -> Option<&str> {
        self.inner.id.account_name()
    }

    /// Get a volume in this capacity pool.
    pub async fn get_volume<S: AsRef<str>>(&self, name: S) -> Result<Volume> {
        let id = self.inner.id.child(api::VOLUMES, name);
        Volume::load(self.session.clone(), id).await
    }

    /// Prepare a new volume in this capacity pool.
    ///
    /// The volume inherits the location and the service level of the pool,
    /// its creation token defaults to the volume name.
    pub fn new_volume<S: AsRef<str>>(&self, name: S, size: u64) -> NewVolume {
        NewVolume::new(
            self.session.clone(),
            self.inner.id.child(api::VOLUMES, name.as_ref()),
            self.inner.location.clone(),
            name.as_ref().to_string(),
            self.inner.properties.service_level,
            size,
        )
    }

    /// Delete the capacity pool.
    ///
    /// The pool must not contain volumes.
    pub async fn delete(self) -> Result<DeletionWaiter<CapacityPool>> {
        api::delete_pool(&self.session, &self.inner.id).await?;
        let resource = self.inner.id.to_string();
        Ok(DeletionWaiter::new(self, resource))
    }
}

#[async_trait]
impl Refresh for CapacityPool {
    /// Refresh the capacity pool.
    async fn refresh(&mut self) -> Result<()> {
        self.inner = api::get_pool(&self.session, &self.inner.id).await?;
        Ok(())
    }
}

impl Provisioned for CapacityPool {
    fn provisioning_state(&self) -> ProvisioningState {
        self.inner.properties.provisioning_state
    }
}

impl NewPool {
    /// Start creating a capacity pool.
    pub(crate) fn new(
        session: Session,
        id: ResourceId,
        location: String,
        service_level: protocol::ServiceLevel,
        size: u64,
    ) -> NewPool {
        NewPool {
            session,
            id,
            inner: protocol::PoolCreate {
                location,
                tags: HashMap::new(),
                properties: protocol::PoolCreateProperties {
                    service_level,
                    size,
                },
            },
        }
    }

    /// Resource ID the capacity pool will have.
    #[inline]
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Request creation of the capacity pool.
    ///
    /// Fails with `InvalidInput` without contacting the server if the size is
    /// below the service minimum.
    pub async fn create(self) -> Result<ProvisioningWaiter<CapacityPool>> {
        if self.inner.properties.size < protocol::MIN_POOL_SIZE {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "Capacity pool size {} is below the minimum of {} bytes",
                    self.inner.properties.size,
                    protocol::MIN_POOL_SIZE
                ),
            ));
        }

        let inner = api::create_pool(&self.session, &self.id, &self.inner).await?;
        let pool = CapacityPool {
            session: self.session,
            inner,
        };
        let resource = pool.inner.id.to_string();
        Ok(ProvisioningWaiter::new(pool, resource))
    }

    creation_inner_field! {
        #[doc = "Set location of the capacity pool."]
        set_location, with_location -> location: String
    }

    creation_inner_field! {
        #[doc = "Set service level of the capacity pool."]
        set_service_level, with_service_level -> properties.service_level: protocol::ServiceLevel
    }

    creation_inner_field! {
        #[doc = "Set size of the capacity pool in bytes."]
        set_size, with_size -> properties.size: u64
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
