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

//! Types and traits shared by all API parts.

pub(crate) mod protocol;
mod types;
mod waiter;

pub use self::protocol::ProvisioningState;
pub use self::types::{Provisioned, Refresh, ResourceId};
pub use self::waiter::{
    poll_until, wait_for_absence, wait_for_state, Backoff, Convergence, DeletionWaiter,
    ProvisioningWaiter, Tick, Verdict, WaitError, WaitOptions, DEFAULT_DELAY, DEFAULT_TIMEOUT,
    MIN_DELAY,
};
