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

//! Internal implementation of the token cache.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use chrono::{DateTime, Duration, Local, Utc};
use reqwest::{Client, RequestBuilder, Response};
use tokio::sync::RwLock;

use super::protocol::{TokenRequest, TokenResponse};
use super::TOKEN_MIN_VALIDITY;
use crate::session::check;
use crate::{Error, ErrorKind, Result};

const GRANT_TYPE: &str = "client_credentials";

/// Plain access token with its expiration time.
#[derive(Clone)]
pub(crate) struct Token {
    value: String,
    expires_at: DateTime<Utc>,
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut hasher = DefaultHasher::new();
        self.value.hash(&mut hasher);
        write!(
            f,
            "Token {{ value: hash({}), expires_at: {} }}",
            hasher.finish(),
            self.expires_at
        )
    }
}

/// Internal token authentication object.
#[derive(Debug)]
pub(crate) struct Internal {
    request: TokenRequest,
    token_endpoint: String,
    cached_token: RwLock<Option<Token>>,
}

impl Internal {
    /// Create a new implementation.
    pub fn new(
        authority: &str,
        tenant_id: &str,
        client_id: String,
        client_secret: String,
        resource: String,
    ) -> Result<Internal> {
        if tenant_id.trim().is_empty() {
            return Err(Error::new(ErrorKind::InvalidConfig, "Tenant ID is empty"));
        }

        let token_endpoint = format!(
            "{}/{}/oauth2/token",
            authority.trim_end_matches('/'),
            tenant_id
        );

        Ok(Internal {
            request: TokenRequest {
                grant_type: GRANT_TYPE,
                client_id,
                client_secret,
                resource,
            },
            token_endpoint,
            cached_token: RwLock::new(None),
        })
    }

    /// Client ID used for authentication.
    #[inline]
    pub fn client_id(&self) -> &str {
        &self.request.client_id
    }

    /// Get the access token string.
    pub async fn get_token(&self, client: &Client) -> Result<String> {
        self.refresh(client, false).await?;
        let guard = self.cached_token.read().await;
        guard.as_ref().map(|t| t.value.clone()).ok_or_else(|| {
            Error::new(
                ErrorKind::AuthenticationFailed,
                "Token was invalidated while in use",
            )
        })
    }

    /// Refresh the token (if needed or forced).
    pub async fn refresh(&self, client: &Client, force: bool) -> Result<()> {
        // Hit on every request, so start with the read lock.
        if !force && token_alive(&self.cached_token.read().await) {
            return Ok(());
        }

        let mut lock = self.cached_token.write().await;
        // Another task may have refreshed the token while we waited for the lock.
        if !force && token_alive(&lock) {
            return Ok(());
        }

        debug!(
            "Requesting a new token for client {} from {}",
            self.request.client_id, self.token_endpoint
        );
        let resp = client
            .post(&self.token_endpoint)
            .form(&self.request)
            .send()
            .await?;
        *lock = Some(token_from_response(check(resp).await?).await?);
        Ok(())
    }

    /// Create an authenticated request.
    pub async fn authenticate(
        &self,
        client: &Client,
        request: RequestBuilder,
    ) -> Result<RequestBuilder> {
        let token = self.get_token(client).await?;
        Ok(request.bearer_auth(token))
    }

    #[cfg(test)]
    pub fn token_endpoint(&self) -> &str {
        &self.token_endpoint
    }
}

impl Clone for Internal {
    fn clone(&self) -> Internal {
        Internal {
            request: self.request.clone(),
            token_endpoint: self.token_endpoint.clone(),
            cached_token: RwLock::new(None),
        }
    }
}

#[inline]
fn token_alive(token: &impl Deref<Target = Option<Token>>) -> bool {
    if let Some(value) = token.deref() {
        let validity_time_left = value.expires_at.signed_duration_since(Local::now());
        trace!("Token is valid for {:?}", validity_time_left);
        validity_time_left > Duration::minutes(TOKEN_MIN_VALIDITY)
    } else {
        false
    }
}

/// Expiration time of a token valid for `seconds` from now.
///
/// Negative lifetimes are treated as already expired.
fn expiry_after(seconds: i64) -> Result<DateTime<Utc>> {
    Duration::try_seconds(seconds.max(0))
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidResponse,
                format!("Token lifetime of {} seconds is out of range", seconds),
            )
        })
}

async fn token_from_response(resp: Response) -> Result<Token> {
    let url = resp.url().clone();
    let root = resp.json::<TokenResponse>().await?;
    if root.access_token.is_empty() {
        error!("Empty access token received from {}", url);
        return Err(Error::new(
            ErrorKind::InvalidResponse,
            "Empty access token in the response",
        ));
    }

    let expires_at = expiry_after(root.expires_in.value()?)?;
    debug!(
        "Received a {} token expiring at {}",
        root.token_type.as_deref().unwrap_or("bearer"),
        expires_at
    );
    Ok(Token {
        value: root.access_token,
        expires_at,
    })
}
