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

//! JSON structures and protocol bits for the token endpoint.

#![allow(missing_docs)]

use std::fmt;

use serde_derive::{Deserialize, Serialize};

use crate::{Error, ErrorKind, Result};

fn default_authority() -> String {
    String::from(super::DEFAULT_AUTHORITY)
}

fn default_resource_manager() -> String {
    String::from(crate::session::DEFAULT_ENDPOINT)
}

/// Contents of an SDK authentication file.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthFile {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub subscription_id: Option<String>,
    pub tenant_id: String,
    #[serde(default = "default_authority")]
    pub active_directory_endpoint_url: String,
    #[serde(default = "default_resource_manager")]
    pub resource_manager_endpoint_url: String,
}

impl fmt::Debug for AuthFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AuthFile")
            .field("client_id", &self.client_id)
            .field("subscription_id", &self.subscription_id)
            .field("tenant_id", &self.tenant_id)
            .field(
                "active_directory_endpoint_url",
                &self.active_directory_endpoint_url,
            )
            .field(
                "resource_manager_endpoint_url",
                &self.resource_manager_endpoint_url,
            )
            .finish()
    }
}

/// Client credentials grant.
#[derive(Clone, Serialize)]
pub struct TokenRequest {
    pub grant_type: &'static str,
    pub client_id: String,
    pub client_secret: String,
    pub resource: String,
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("grant_type", &self.grant_type)
            .field("client_id", &self.client_id)
            .field("resource", &self.resource)
            .finish()
    }
}

/// The token endpoint reports numbers either as numbers or as strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Seconds {
    Number(i64),
    Text(String),
}

impl Seconds {
    pub fn value(&self) -> Result<i64> {
        match self {
            Seconds::Number(n) => Ok(*n),
            Seconds::Text(s) => s.trim().parse().map_err(|e| {
                Error::new(
                    ErrorKind::InvalidResponse,
                    format!("Invalid token lifetime {:?}: {}", s, e),
                )
            }),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub expires_in: Seconds,
}

#[cfg(test)]
mod test {
    use super::{AuthFile, TokenResponse};

    #[test]
    fn test_auth_file_defaults() {
        let file: AuthFile = serde_json::from_str(
            r#"{"clientId": "c", "clientSecret": "s3cr3t", "tenantId": "t"}"#,
        )
        .unwrap();
        assert_eq!(file.client_id, "c");
        assert!(file.subscription_id.is_none());
        assert_eq!(
            file.active_directory_endpoint_url,
            "https://login.microsoftonline.com"
        );
        assert_eq!(
            file.resource_manager_endpoint_url,
            "https://management.azure.com"
        );
        assert!(!format!("{:?}", file).contains("s3cr3t"));
    }

    #[test]
    fn test_token_lifetime_formats() {
        let resp: TokenResponse =
            serde_json::from_str(r#"{"access_token": "a", "expires_in": "3599"}"#).unwrap();
        assert_eq!(resp.expires_in.value().unwrap(), 3599);
        let resp: TokenResponse = serde_json::from_str(
            r#"{"access_token": "a", "token_type": "Bearer", "expires_in": 60}"#,
        )
        .unwrap();
        assert_eq!(resp.expires_in.value().unwrap(), 60);
        assert_eq!(resp.token_type.as_deref(), Some("Bearer"));
        let resp: TokenResponse =
            serde_json::from_str(r#"{"access_token": "a", "expires_in": "soon"}"#).unwrap();
        assert!(resp.expires_in.value().is_err());
    }
}
