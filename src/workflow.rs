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

//! End-to-end provisioning of an NFSv4.1 volume.
//!
//! Creates an account, a capacity pool and a volume from a
//! [Config](../config/struct.Config.html), waiting for each of them, and
//! optionally deletes them again in reverse order.
//!
//! ```rust,no_run
//! # async fn example() -> anf::Result<()> {
//! use anf::config::Config;
//! use anf::identity::ServicePrincipal;
//!
//! let config = Config::load(Some("anf.yaml"))?;
//! let cloud = anf::workflow::connect(&config, ServicePrincipal::from_env()?)?;
//! let outcome =
//!     anf::workflow::provision(&cloud, &config, &config.wait_options(), |msg| {
//!         println!("{}", msg)
//!     })
//!     .await?;
//! println!("Mount with {:?}", outcome.mount_targets);
//! # Ok(()) }
//! ```

use crate::common::{ResourceId, WaitOptions};
use crate::config::Config;
use crate::identity::ServicePrincipal;
use crate::netapp::{ExportPolicyRule, ProtocolType};
use crate::{Cloud, Error, ErrorKind, Result};

/// Resources touched by a provisioning run.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// NetApp account.
    pub account: ResourceId,
    /// Capacity pool.
    pub pool: ResourceId,
    /// NFSv4.1 volume.
    pub volume: ResourceId,
    /// Mount paths of the volume as `address:/creation-token`.
    pub mount_targets: Vec<String>,
    /// Whether the resources were deleted afterwards.
    pub cleaned_up: bool,
}

/// Create a cloud for the configured subscription.
///
/// The subscription from the configuration wins over the one from the
/// authentication file. The Resource Manager endpoint of the service principal
/// is used for all requests.
pub fn connect(config: &Config, auth: ServicePrincipal) -> Result<Cloud> {
    let subscription_id = config
        .subscription_id
        .clone()
        .or_else(|| auth.subscription_id().map(String::from))
        .ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidConfig,
                "Subscription ID is neither configured nor present in the authentication file",
            )
        })?;
    let endpoint = auth.resource_manager_endpoint().to_string();
    debug!(
        "Using subscription {} at {} for client {}",
        subscription_id,
        endpoint,
        auth.client_id()
    );
    Ok(Cloud::new(auth, subscription_id).with_endpoint(endpoint))
}

/// Provision the account, the pool and the volume described by `config`.
///
/// Every resource is waited for before the next one is requested. Progress
/// messages are passed to `report`. Resources are deleted volume first when
/// `config.should_cleanup` is set. The first error stops the run and nothing
/// is rolled back.
pub async fn provision<F>(
    cloud: &Cloud,
    config: &Config,
    options: &WaitOptions,
    mut report: F,
) -> Result<Outcome>
where
    F: FnMut(&str),
{
    config.validate()?;

    report("Requesting account to be created...");
    let account = cloud
        .new_account(&config.resource_group, &config.account_name, &config.location)
        .create()
        .await?
        .wait_with(options.clone())
        .await?;
    report(&format!("\tAccount Resource Id: {}", account.id()));

    report("Requesting capacity pool to be created...");
    let pool = account
        .new_pool(&config.pool_name, config.service_level, config.pool_size)
        .create()
        .await?
        .wait_with(options.clone())
        .await?;
    report(&format!("\tCapacity Pool Resource Id: {}", pool.id()));

    report("Requesting volume to be created...");
    let volume = pool
        .new_volume(&config.volume_name, config.volume_size)
        .with_subnet_id(config.subnet_id.clone())
        .with_protocol_type(ProtocolType::Nfsv41)
        .with_export_rule(ExportPolicyRule::nfsv41(1, config.allowed_clients.clone()))
        .create()
        .await?
        .wait_with(options.clone())
        .await?;
    report(&format!("\tVolume Resource Id: {}", volume.id()));

    let mount_targets: Vec<String> = volume
        .mount_targets()
        .iter()
        .map(|target| format!("{}:/{}", target.ip_address, volume.creation_token()))
        .collect();
    for target in &mount_targets {
        report(&format!("\tMount target: {}", target));
    }

    let mut outcome = Outcome {
        account: account.id().clone(),
        pool: pool.id().clone(),
        volume: volume.id().clone(),
        mount_targets,
        cleaned_up: false,
    };

    if !config.should_cleanup {
        debug!("Keeping resources of account {}", outcome.account);
        return Ok(outcome);
    }

    report("Cleaning up created resources...");

    report("\tDeleting volume...");
    volume.delete().await?.wait_with(options.clone()).await?;
    report(&format!("\t\tDeleted volume: {}", outcome.volume));

    report("\tDeleting capacity pool...");
    pool.delete().await?.wait_with(options.clone()).await?;
    report(&format!("\t\tDeleted capacity pool: {}", outcome.pool));

    report("\tDeleting account...");
    account.delete().await?.wait_with(options.clone()).await?;
    report(&format!("\t\tDeleted account: {}", outcome.account));

    outcome.cleaned_up = true;
    Ok(outcome)
}
