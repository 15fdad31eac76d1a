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

//! Volume management.

use std::collections::HashMap;

use async_trait::async_trait;

use super::super::common::{
    DeletionWaiter, Provisioned, ProvisioningState, ProvisioningWaiter, Refresh, ResourceId,
};
use super::super::session::Session;
use super::super::{Error, ErrorKind, Result};
use super::{api, protocol};

/// Structure representing a volume.
#[derive(Clone, Debug)]
pub struct Volume {
    session: Session,
    inner: protocol::Volume,
}

/// A request to create a volume.
#[derive(Clone, Debug)]
pub struct NewVolume {
    session: Session,
    id: ResourceId,
    inner: protocol::VolumeCreate,
}

impl Volume {
    /// Load a volume.
    pub(crate) async fn load(session: Session, id: ResourceId) -> Result<Volume> {
        let inner = api::get_volume(&session, &id).await?;
        Ok(Volume { session, inner })
    }

    transparent_property! {
        #[doc = "Resource ID of the volume."]
        id: ref ResourceId
    }

    transparent_property! {
        #[doc = "Location (region) of the volume."]
        location: ref String
    }

    transparent_property! {
        #[doc = "Tags of the volume."]
        tags: ref HashMap<String, String>
    }

    transparent_property! {
        #[doc = "Provisioning state as of the last request."]
        provisioning_state: ProvisioningState => properties.provisioning_state
    }

    transparent_property! {
        #[doc = "Unique file path of the volume."]
        creation_token: ref String => properties.creation_token
    }

    transparent_property! {
        #[doc = "Service level of the volume."]
        service_level: Option<protocol::ServiceLevel> => properties.service_level
    }

    transparent_property! {
        #[doc = "Quota of the volume in bytes."]
        usage_threshold: u64 => properties.usage_threshold
    }

    transparent_property! {
        #[doc = "Delegated subnet the volume is attached to."]
        subnet_id: ref String => properties.subnet_id
    }

    transparent_property! {
        #[doc = "Protocols the volume is exported with."]
        protocol_types: ref Vec<protocol::ProtocolType> => properties.protocol_types
    }

    transparent_property! {
        #[doc = "Export policy of the volume."]
        export_policy: ref Option<protocol::ExportPolicy> => properties.export_policy
    }

    transparent_property! {
        #[doc = "File system UUID."]
        file_system_id: ref Option<String> => properties.file_system_id
    }

    transparent_property! {
        #[doc = "Addresses to mount the volume from."]
        mount_targets: ref Vec<protocol::MountTarget> => properties.mount_targets
    }

    /// Name of the volume.
    #[inline]
    pub fn name(&self) -> &str {
        self.inner.id.name()
    }

    /// Name of the capacity pool the volume belongs to.
    #[inline]
    pub fn pool_name(&self) -> Option<&str> {
        self.inner.id.pool_name()
    }

    /// Delete the volume.
    pub async fn delete(self) -> Result<DeletionWaiter<Volume>> {
        api::delete_volume(&self.session, &self.inner.id).await?;
        let resource = self.inner.id.to_string();
        Ok(DeletionWaiter::new(self, resource))
    }
}

#[async_trait]
impl Refresh for Volume {
    /// Refresh the volume.
    async fn refresh(&mut self) -> Result<()> {
        self.inner = api::get_volume(&self.session, &self.inner.id).await?;
        Ok(())
    }
}

impl Provisioned for Volume {
    fn provisioning_state(&self) -> ProvisioningState {
        self.inner.properties.provisioning_state
    }
}

impl NewVolume {
    /// Start creating a volume.
    pub(crate) fn new(
        session: Session,
        id: ResourceId,
        location: String,
        creation_token: String,
        service_level: protocol::ServiceLevel,
        size: u64,
    ) -> NewVolume {
        NewVolume {
            session,
            id,
            inner: protocol::VolumeCreate {
                location,
                tags: HashMap::new(),
                properties: protocol::VolumeCreateProperties {
                    creation_token,
                    service_level,
                    usage_threshold: size,
                    subnet_id: String::new(),
                    protocol_types: Vec::new(),
                    export_policy: None,
                },
            },
        }
    }

    /// Resource ID the volume will have.
    #[inline]
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Request creation of the volume.
    ///
    /// The subnet is required. Without explicit protocol types the volume
    /// is exported with NFSv3.
    pub async fn create(self) -> Result<ProvisioningWaiter<Volume>> {
        if self.inner.properties.subnet_id.trim().is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Subnet ID is required to create a volume",
            ));
        }

        if self.inner.properties.usage_threshold < protocol::MIN_VOLUME_SIZE {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "Volume size {} is below the minimum of {} bytes",
                    self.inner.properties.usage_threshold,
                    protocol::MIN_VOLUME_SIZE
                ),
            ));
        }

        let mut request = self.inner;
        if request.properties.protocol_types.is_empty() {
            request.properties.protocol_types.push(protocol::ProtocolType::Nfsv3);
        }

        let inner = api::create_volume(&self.session, &self.id, &request).await?;
        let volume = Volume {
            session: self.session,
            inner,
        };
        let resource = volume.inner.id.to_string();
        Ok(ProvisioningWaiter::new(volume, resource))
    }

    creation_inner_field! {
        #[doc = "Set location of the volume."]
        set_location, with_location -> location: String
    }

    creation_inner_field! {
        #[doc = "Set the unique file path of the volume."]
        set_creation_token, with_creation_token -> properties.creation_token: String
    }

    creation_inner_field! {
        #[doc = "Set service level of the volume."]
        set_service_level, with_service_level -> properties.service_level: protocol::ServiceLevel
    }

    creation_inner_field! {
        #[doc = "Set quota of the volume in bytes."]
        set_usage_threshold, with_usage_threshold -> properties.usage_threshold: u64
    }

    creation_inner_field! {
        #[doc = "Set the delegated subnet."]
        set_subnet_id, with_subnet_id -> properties.subnet_id: String
    }

    creation_inner_field! {
        #[doc = "Set the export policy."]
        set_export_policy, with_export_policy -> properties.export_policy: optional protocol::ExportPolicy
    }

    /// Add a protocol to export the volume with.
    pub fn add_protocol_type(&mut self, value: protocol::ProtocolType) {
        if !self.inner.properties.protocol_types.contains(&value) {
            self.inner.properties.protocol_types.push(value);
        }
    }

    /// Add a protocol to export the volume with.
    #[inline]
    pub fn with_protocol_type(mut self, value: protocol::ProtocolType) -> Self {
        self.add_protocol_type(value);
        self
    }

    /// Add an export policy rule.
    pub fn add_export_rule(&mut self, rule: protocol::ExportPolicyRule) {
        self.inner
            .properties
            .export_policy
            .get_or_insert_with(Default::default)
            .rules
            .push(rule);
    }

    /// Add an export policy rule.
    #[inline]
    pub fn with_export_rule(mut self, rule: protocol::ExportPolicyRule) -> Self {
        self.add_export_rule(rule);
        self
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
