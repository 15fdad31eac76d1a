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

//! NetApp Files management: accounts, capacity pools and volumes.

mod accounts;
mod api;
mod pools;
mod protocol;
mod volumes;

pub use self::accounts::{Account, NewAccount};
pub use self::pools::{CapacityPool, NewPool};
pub use self::protocol::{
    ExportPolicy, ExportPolicyRule, MountTarget, ProtocolType, ServiceLevel, MIN_POOL_SIZE,
    MIN_VOLUME_SIZE,
};
pub use self::volumes::{NewVolume, Volume};
