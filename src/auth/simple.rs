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

//! Simple authentication methods.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use super::super::Result;
use super::AuthType;

/// Authentication with a pre-issued bearer token.
///
/// The token is never refreshed.
#[derive(Clone)]
pub struct StaticToken {
    token: String,
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut hasher = DefaultHasher::new();
        self.token.hash(&mut hasher);
        write!(f, "StaticToken {{ token: hash({}) }}", hasher.finish())
    }
}

impl StaticToken {
    /// Create a new authentication with a fixed token.
    pub fn new<S: Into<String>>(token: S) -> StaticToken {
        StaticToken {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AuthType for StaticToken {
    async fn authenticate(
        &self,
        _client: &Client,
        request: RequestBuilder,
    ) -> Result<RequestBuilder> {
        Ok(request.bearer_auth(&self.token))
    }

    async fn refresh(&self, _client: &Client) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
pub mod test {
    use reqwest::Client;

    use super::super::AuthType;
    use super::StaticToken;

    #[test]
    fn test_static_token_hidden() {
        let auth = StaticToken::new("s3cr3t");
        assert!(!format!("{:?}", auth).contains("s3cr3t"));
    }

    #[tokio::test]
    async fn test_static_token_header() {
        let client = Client::new();
        let auth = StaticToken::new("abcd");
        let request = auth
            .authenticate(&client, client.get("http://127.0.0.1/"))
            .await
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer abcd"
        );
        auth.refresh(&client).await.unwrap();
    }
}
