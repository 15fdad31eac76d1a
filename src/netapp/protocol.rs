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

//! JSON structures and protocol bits for the NetApp provider.

#![allow(missing_docs)]

use std::collections::HashMap;

use serde_derive::{Deserialize, Serialize};

use crate::common::{ProvisioningState, ResourceId};

/// Minimum size of a capacity pool (4 TiB).
pub const MIN_POOL_SIZE: u64 = 4_398_046_511_104;

/// Minimum quota of a volume (100 GiB).
pub const MIN_VOLUME_SIZE: u64 = 107_374_182_400;

protocol_enum! {
    #[doc = "Service level of a capacity pool or a volume."]
    enum ServiceLevel {
        Standard = "Standard",
        Premium = "Premium",
        Ultra = "Ultra"
    }
}

protocol_enum! {
    #[doc = "File protocol of a volume."]
    enum ProtocolType = Unknown {
        Nfsv3 = "NFSv3",
        Nfsv41 = "NFSv4.1",
        Cifs = "CIFS",
        Unknown = ""
    }
}

impl Default for ServiceLevel {
    fn default() -> ServiceLevel {
        ServiceLevel::Standard
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProperties {
    #[serde(default)]
    pub provisioning_state: ProvisioningState,
}

/// A NetApp account.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub properties: AccountProperties,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountCreateProperties {}

#[derive(Debug, Clone, Serialize)]
pub struct AccountCreate {
    pub location: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
    pub properties: AccountCreateProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolProperties {
    #[serde(default)]
    pub provisioning_state: ProvisioningState,
    pub service_level: ServiceLevel,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub pool_id: Option<String>,
}

/// A capacity pool.
#[derive(Debug, Clone, Deserialize)]
pub struct Pool {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    pub properties: PoolProperties,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolCreateProperties {
    pub service_level: ServiceLevel,
    pub size: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoolCreate {
    pub location: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
    pub properties: PoolCreateProperties,
}

/// A rule of a volume export policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPolicyRule {
    pub rule_index: u32,
    #[serde(default)]
    pub unix_read_only: bool,
    #[serde(default)]
    pub unix_read_write: bool,
    #[serde(default)]
    pub cifs: bool,
    #[serde(default)]
    pub nfsv3: bool,
    #[serde(default)]
    pub nfsv41: bool,
    pub allowed_clients: String,
}

impl ExportPolicyRule {
    /// A read-write NFSv4.1 rule for the given clients.
    pub fn nfsv41<S: Into<String>>(rule_index: u32, allowed_clients: S) -> ExportPolicyRule {
        ExportPolicyRule {
            rule_index,
            unix_read_only: false,
            unix_read_write: true,
            cifs: false,
            nfsv3: false,
            nfsv41: true,
            allowed_clients: allowed_clients.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExportPolicy {
    #[serde(default)]
    pub rules: Vec<ExportPolicyRule>,
}

/// A mount target of a volume.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountTarget {
    #[serde(default)]
    pub mount_target_id: Option<String>,
    #[serde(default)]
    pub file_system_id: Option<String>,
    pub ip_address: String,
    #[serde(default)]
    pub smb_server_fqdn: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeProperties {
    #[serde(default)]
    pub provisioning_state: ProvisioningState,
    pub creation_token: String,
    #[serde(default)]
    pub service_level: Option<ServiceLevel>,
    #[serde(default)]
    pub usage_threshold: u64,
    #[serde(default)]
    pub subnet_id: String,
    #[serde(default)]
    pub protocol_types: Vec<ProtocolType>,
    #[serde(default)]
    pub export_policy: Option<ExportPolicy>,
    #[serde(default)]
    pub file_system_id: Option<String>,
    #[serde(default)]
    pub mount_targets: Vec<MountTarget>,
}

/// A volume.
#[derive(Debug, Clone, Deserialize)]
pub struct Volume {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    pub properties: VolumeProperties,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeCreateProperties {
    pub creation_token: String,
    pub service_level: ServiceLevel,
    pub usage_threshold: u64,
    pub subnet_id: String,
    pub protocol_types: Vec<ProtocolType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_policy: Option<ExportPolicy>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VolumeCreate {
    pub location: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
    pub properties: VolumeCreateProperties,
}
