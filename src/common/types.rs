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

//! Types and traits shared between resources.

use std::fmt;

use async_trait::async_trait;

use super::protocol::ProvisioningState;
use crate::Result;

const PROVIDER: &str = "Microsoft.NetApp";

/// Trait representing something that can be refreshed.
#[async_trait]
pub trait Refresh {
    /// Refresh the resource representation.
    async fn refresh(&mut self) -> Result<()>;
}

/// Something that reports a provisioning state.
pub trait Provisioned {
    /// Current provisioning state.
    fn provisioning_state(&self) -> ProvisioningState;
}

impl Provisioned for ProvisioningState {
    fn provisioning_state(&self) -> ProvisioningState {
        *self
    }
}

/// A Resource Manager identifier of a resource.
///
/// Looks like `/subscriptions/<sub>/resourceGroups/<rg>/providers/Microsoft.NetApp/...`
/// and doubles as the request path of the resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    /// Identifier of a NetApp account.
    pub fn account<S1, S2, S3>(subscription_id: S1, resource_group: S2, account: S3) -> ResourceId
    where
        S1: AsRef<str>,
        S2: AsRef<str>,
        S3: AsRef<str>,
    {
        ResourceId(format!(
            "/subscriptions/{}/resourceGroups/{}/providers/{}/netAppAccounts/{}",
            subscription_id.as_ref(),
            resource_group.as_ref(),
            PROVIDER,
            account.as_ref()
        ))
    }

    /// Identifier of a child resource of the given type.
    pub fn child<S1: AsRef<str>, S2: AsRef<str>>(&self, kind: S1, name: S2) -> ResourceId {
        ResourceId(format!(
            "{}/{}/{}",
            self.0.trim_end_matches('/'),
            kind.as_ref(),
            name.as_ref()
        ))
    }

    /// Value following the given key segment (compared case-insensitively).
    ///
    /// Segments come in key/value pairs, so names are never taken for keys.
    pub fn segment<S: AsRef<str>>(&self, key: S) -> Option<&str> {
        let key = key.as_ref();
        let mut parts = self.0.split('/').filter(|x| !x.is_empty());
        while let Some(part) = parts.next() {
            let value = parts.next()?;
            if part.eq_ignore_ascii_case(key) {
                return Some(value);
            }
        }
        None
    }

    /// Subscription the resource belongs to.
    #[inline]
    pub fn subscription_id(&self) -> Option<&str> {
        self.segment("subscriptions")
    }

    /// Resource group of the resource.
    #[inline]
    pub fn resource_group(&self) -> Option<&str> {
        self.segment("resourceGroups")
    }

    /// Name of the NetApp account.
    #[inline]
    pub fn account_name(&self) -> Option<&str> {
        self.segment("netAppAccounts")
    }

    /// Name of the capacity pool.
    #[inline]
    pub fn pool_name(&self) -> Option<&str> {
        self.segment("capacityPools")
    }

    /// Name of the volume.
    #[inline]
    pub fn volume_name(&self) -> Option<&str> {
        self.segment("volumes")
    }

    /// The last segment of the identifier.
    pub fn name(&self) -> &str {
        self.0
            .split('/')
            .filter(|x| !x.is_empty())
            .last()
            .unwrap_or_default()
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> ResourceId {
        ResourceId(value)
    }
}

impl<'s> From<&'s str> for ResourceId {
    fn from(value: &'s str) -> ResourceId {
        ResourceId(String::from(value))
    }
}

impl From<ResourceId> for String {
    fn from(value: ResourceId) -> String {
        value.0
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ::serde::ser::Serialize for ResourceId {
    fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
    where
        S: ::serde::ser::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> ::serde::de::Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> ::std::result::Result<ResourceId, D::Error>
    where
        D: ::serde::de::Deserializer<'de>,
    {
        Ok(ResourceId(<String as ::serde::de::Deserialize>::deserialize(
            deserializer,
        )?))
    }
}

#[cfg(test)]
mod test {
    use super::ResourceId;

    const VOLUME: &str = "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.NetApp\
                          /netAppAccounts/account01/capacityPools/pool01/volumes/vol01";

    #[test]
    fn test_resource_id_segments() {
        let id = ResourceId::from(VOLUME);
        assert_eq!(id.subscription_id(), Some("sub1"));
        assert_eq!(id.resource_group(), Some("rg1"));
        assert_eq!(id.account_name(), Some("account01"));
        assert_eq!(id.pool_name(), Some("pool01"));
        assert_eq!(id.volume_name(), Some("vol01"));
        assert_eq!(id.name(), "vol01");
    }

    #[test]
    fn test_resource_id_case_insensitive() {
        let id = ResourceId::from("/SUBSCRIPTIONS/s/RESOURCEGROUPS/rg/providers/x/NETAPPACCOUNTS/a");
        assert_eq!(id.subscription_id(), Some("s"));
        assert_eq!(id.resource_group(), Some("rg"));
        assert_eq!(id.account_name(), Some("a"));
        assert!(id.pool_name().is_none());
    }

    #[test]
    fn test_resource_id_names_matching_keys() {
        let id = ResourceId::account("sub1", "rg1", "capacityPools")
            .child("capacityPools", "volumes")
            .child("volumes", "vol01");
        assert_eq!(id.account_name(), Some("capacityPools"));
        assert_eq!(id.pool_name(), Some("volumes"));
        assert_eq!(id.volume_name(), Some("vol01"));

        let id = ResourceId::from("/subscriptions/resourceGroups/resourceGroups/rg1");
        assert_eq!(id.subscription_id(), Some("resourceGroups"));
        assert_eq!(id.resource_group(), Some("rg1"));
    }

    #[test]
    fn test_resource_id_build() {
        let account = ResourceId::account("sub1", "rg1", "account01");
        let volume = account
            .child("capacityPools", "pool01")
            .child("volumes", "vol01");
        assert_eq!(volume.as_ref(), VOLUME);
        assert_eq!(account.name(), "account01");
    }

    #[test]
    fn test_resource_id_serde() {
        let id: ResourceId = serde_json::from_str("\"/subscriptions/x\"").unwrap();
        assert_eq!(id.subscription_id(), Some("x"));
        assert!(id.resource_group().is_none());
        assert_eq!(id.name(), "x");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"/subscriptions/x\"");
    }
}
