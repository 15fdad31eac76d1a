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

//! Authentication against the directory service.
//!
//! Currently supports [ServicePrincipal](struct.ServicePrincipal.html) authentication
//! with a client secret, configured either directly or through an SDK
//! authentication file.

mod internal;
pub(crate) mod protocol;
mod service_principal;

pub use self::service_principal::ServicePrincipal;

/// Default directory authority.
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";

/// Environment variable pointing at the SDK authentication file.
pub const AUTH_LOCATION_ENV: &str = "AZURE_AUTH_LOCATION";

// Refresh the token if it expires in 5 minutes or less.
const TOKEN_MIN_VALIDITY: i64 = 5;
