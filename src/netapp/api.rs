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

//! Foundation bits exposing the NetApp provider API.

use super::super::common::ResourceId;
use super::super::session::Session;
use super::super::Result;
use super::protocol::*;

/// Path segment of capacity pools.
pub const POOLS: &str = "capacityPools";

/// Path segment of volumes.
pub const VOLUMES: &str = "volumes";

/// Create or update an account.
pub async fn create_account(
    session: &Session,
    id: &ResourceId,
    request: &AccountCreate,
) -> Result<Account> {
    debug!("Creating account {} with {:?}", id, request);
    let account: Account = session.put(id, request).await?;
    trace!("Requested creation of account {:?}", account);
    Ok(account)
}

/// Delete an account.
pub async fn delete_account(session: &Session, id: &ResourceId) -> Result<()> {
    trace!("Deleting account {}", id);
    session.delete(id).await?;
    debug!("Successfully requested deletion of account {}", id);
    Ok(())
}

/// Get an account.
pub async fn get_account(session: &Session, id: &ResourceId) -> Result<Account> {
    trace!("Fetching account {}", id);
    let account: Account = session.get(id).await?;
    trace!("Received {:?}", account);
    Ok(account)
}

/// Create or update a capacity pool.
pub async fn create_pool(session: &Session, id: &ResourceId, request: &PoolCreate) -> Result<Pool> {
    debug!("Creating capacity pool {} with {:?}", id, request);
    let pool: Pool = session.put(id, request).await?;
    trace!("Requested creation of capacity pool {:?}", pool);
    Ok(pool)
}

/// Delete a capacity pool.
pub async fn delete_pool(session: &Session, id: &ResourceId) -> Result<()> {
    trace!("Deleting capacity pool {}", id);
    session.delete(id).await?;
    debug!("Successfully requested deletion of capacity pool {}", id);
    Ok(())
}

/// Get a capacity pool.
pub async fn get_pool(session: &Session, id: &ResourceId) -> Result<Pool> {
    trace!("Fetching capacity pool {}", id);
    let pool: Pool = session.get(id).await?;
    trace!("Received {:?}", pool);
    Ok(pool)
}

/// Create or update a volume.
pub async fn create_volume(
    session: &Session,
    id: &ResourceId,
    request: &VolumeCreate,
) -> Result<Volume> {
    debug!("Creating volume {} with {:?}", id, request);
    let volume: Volume = session.put(id, request).await?;
    trace!("Requested creation of volume {:?}", volume);
    Ok(volume)
}

/// Delete a volume.
pub async fn delete_volume(session: &Session, id: &ResourceId) -> Result<()> {
    trace!("Deleting volume {}", id);
    session.delete(id).await?;
    debug!("Successfully requested deletion of volume {}", id);
    Ok(())
}

/// Get a volume.
pub async fn get_volume(session: &Session, id: &ResourceId) -> Result<Volume> {
    trace!("Fetching volume {}", id);
    let volume: Volume = session.get(id).await?;
    trace!("Received {:?}", volume);
    Ok(volume)
}
