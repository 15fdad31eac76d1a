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

//! NetApp Files provisioning in Rust.
//!
//! The goal of this project is to provide a simple asynchronous API for
//! creating NetApp accounts, capacity pools and volumes through the Resource
//! Manager and for waiting until they are ready (or gone).
//!
//! # Features
//!
//! * [Authentication](identity/index.html) with a service principal
//! * [Accounts, capacity pools and volumes](netapp/index.html)
//! * Waiting for [provisioning](struct.ProvisioningWaiter.html) and
//!   [deletion](struct.DeletionWaiter.html), or for anything else with
//!   [poll_until](fn.poll_until.html)
//! * The whole [account, pool and volume workflow](workflow/index.html) driven
//!   by a [configuration](config/struct.Config.html)
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn example() -> anf::Result<()> {
//! let cloud = anf::Cloud::from_env()?;
//! let account = cloud
//!     .new_account("anf-rg", "account01", "westus")
//!     .create()
//!     .await?
//!     .wait()
//!     .await?;
//! println!("Created {}", account.id());
//! # Ok(()) }
//! ```

// NOTE: we do not use generic deny(warnings) to avoid breakages with new
// versions of the compiler. Add more warnings here as you discover them.
#![deny(
    missing_debug_implementations,
    missing_docs,
    non_shorthand_field_patterns,
    overflowing_literals,
    path_statements,
    trivial_numeric_casts,
    unconditional_recursion,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces,
    while_true
)]

#[macro_use]
extern crate log;

#[macro_use]
mod utils;

pub mod auth;
mod cloud;
mod common;
pub mod config;
mod error;
pub mod identity;
pub mod netapp;
mod session;
pub mod workflow;

pub use crate::cloud::Cloud;
pub use crate::common::{
    poll_until, wait_for_absence, wait_for_state, Backoff, Convergence, DeletionWaiter,
    Provisioned, ProvisioningState, ProvisioningWaiter, Refresh, ResourceId, Tick, Verdict,
    WaitError, WaitOptions, DEFAULT_DELAY, DEFAULT_TIMEOUT, MIN_DELAY,
};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::session::{Session, DEFAULT_API_VERSION, DEFAULT_ENDPOINT};
