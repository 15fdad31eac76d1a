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

//! Provisioning configuration.
//!
//! The configuration describes which resources to create and how long to wait
//! for them. It is read from a YAML file and/or from `ANF_*` environment
//! variables, the latter taking priority:
//!
//! ```yaml
//! subscription_id: 00000000-0000-0000-0000-000000000000
//! location: westus
//! resource_group: anf-rg
//! subnet_id: /subscriptions/.../subnets/anf-sn
//! pool_size: 4398046511104
//! should_cleanup: true
//! ```

use std::env;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde_derive::{Deserialize, Serialize};

use super::common::{Backoff, WaitOptions};
use super::netapp::{ServiceLevel, MIN_POOL_SIZE, MIN_VOLUME_SIZE};
use super::{Error, ErrorKind, Result};

/// Environment variable with the path to the configuration file.
pub const CONFIG_ENV: &str = "ANF_CONFIG";

const ENV_PREFIX: &str = "ANF_";

/// Provisioning configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Subscription to use, defaults to the one from the authentication file.
    pub subscription_id: Option<String>,
    /// Region to create resources in.
    pub location: String,
    /// Existing resource group.
    pub resource_group: String,
    /// Existing subnet delegated to NetApp volumes.
    pub subnet_id: String,
    /// Name of the account to create.
    pub account_name: String,
    /// Name of the capacity pool to create.
    pub pool_name: String,
    /// Service level of the capacity pool and the volume.
    pub service_level: ServiceLevel,
    /// Size of the capacity pool in bytes.
    pub pool_size: u64,
    /// Name (and creation token) of the volume to create.
    pub volume_name: String,
    /// Quota of the volume in bytes.
    pub volume_size: u64,
    /// Clients allowed by the export policy.
    pub allowed_clients: String,
    /// Whether to delete everything after creation.
    pub should_cleanup: bool,
    /// Seconds between two lookups.
    pub poll_interval_secs: u64,
    /// Seconds to wait for each resource.
    pub wait_timeout_secs: u64,
    /// Upper bound for the interval, enables exponential backoff.
    pub max_poll_interval_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            subscription_id: None,
            location: String::from("westus"),
            resource_group: String::new(),
            subnet_id: String::new(),
            account_name: String::from("account01"),
            pool_name: String::from("pool01"),
            service_level: ServiceLevel::Standard,
            pool_size: MIN_POOL_SIZE,
            volume_name: String::from("vol01"),
            volume_size: MIN_VOLUME_SIZE,
            allowed_clients: String::from("0.0.0.0"),
            should_cleanup: false,
            poll_interval_secs: 10,
            wait_timeout_secs: 600,
            max_poll_interval_secs: None,
        }
    }
}

fn parse_value<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value.trim().parse().map_err(|e| {
        Error::new(
            ErrorKind::InvalidConfig,
            format!("Invalid value {:?} of {}: {}", value, name, e),
        )
    })
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(Error::new(
            ErrorKind::InvalidConfig,
            format!("Invalid boolean {:?} of {}", value, name),
        )),
    }
}

fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.starts_with('<') && value.ends_with('>')
}

impl Config {
    /// Read the configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Cannot read configuration file {}: {}", path.display(), e),
            )
        })?;
        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Malformed configuration file {}: {}", path.display(), e),
            )
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Build the configuration from defaults and `ANF_*` environment variables.
    pub fn from_env() -> Result<Config> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load the configuration.
    ///
    /// Reads the file at `path` or the one named by `ANF_CONFIG`, if any,
    /// then applies `ANF_*` environment variables on top.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Config> {
        let mut config = match path {
            Some(path) => Config::from_file(path)?,
            None => match env::var(CONFIG_ENV) {
                Ok(path) if !path.trim().is_empty() => Config::from_file(path)?,
                _ => Config::default(),
            },
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Override values from `ANF_*` environment variables.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_with(|name| env::var(format!("{}{}", ENV_PREFIX, name)).ok())
    }

    /// Override values using a lookup function.
    ///
    /// The function receives upper-case field names (e.g. `POOL_SIZE`).
    pub fn apply_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("SUBSCRIPTION_ID") {
            self.subscription_id = Some(value).filter(|v| !v.is_empty());
        }

        for (name, field) in [
            ("LOCATION", &mut self.location),
            ("RESOURCE_GROUP", &mut self.resource_group),
            ("SUBNET_ID", &mut self.subnet_id),
            ("ACCOUNT_NAME", &mut self.account_name),
            ("POOL_NAME", &mut self.pool_name),
            ("VOLUME_NAME", &mut self.volume_name),
            ("ALLOWED_CLIENTS", &mut self.allowed_clients),
        ] {
            if let Some(value) = lookup(name) {
                *field = value;
            }
        }

        if let Some(value) = lookup("SERVICE_LEVEL") {
            self.service_level = parse_value("SERVICE_LEVEL", &value)?;
        }
        if let Some(value) = lookup("POOL_SIZE") {
            self.pool_size = parse_value("POOL_SIZE", &value)?;
        }
        if let Some(value) = lookup("VOLUME_SIZE") {
            self.volume_size = parse_value("VOLUME_SIZE", &value)?;
        }
        if let Some(value) = lookup("SHOULD_CLEANUP") {
            self.should_cleanup = parse_bool("SHOULD_CLEANUP", &value)?;
        }
        if let Some(value) = lookup("POLL_INTERVAL_SECS") {
            self.poll_interval_secs = parse_value("POLL_INTERVAL_SECS", &value)?;
        }
        if let Some(value) = lookup("WAIT_TIMEOUT_SECS") {
            self.wait_timeout_secs = parse_value("WAIT_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = lookup("MAX_POLL_INTERVAL_SECS") {
            self.max_poll_interval_secs = if value.trim().is_empty() {
                None
            } else {
                Some(parse_value("MAX_POLL_INTERVAL_SECS", &value)?)
            };
        }

        Ok(())
    }

    /// Check that the configuration can be used for provisioning.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref subscription_id) = self.subscription_id {
            if subscription_id.trim().is_empty() || is_placeholder(subscription_id) {
                return Err(invalid("subscription_id is not set"));
            }
        }

        for (name, value) in [
            ("location", &self.location),
            ("resource_group", &self.resource_group),
            ("subnet_id", &self.subnet_id),
            ("account_name", &self.account_name),
            ("pool_name", &self.pool_name),
            ("volume_name", &self.volume_name),
            ("allowed_clients", &self.allowed_clients),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(format!("{} is required", name)));
            }
            if is_placeholder(value) {
                return Err(invalid(format!(
                    "{} still has a placeholder value {}",
                    name, value
                )));
            }
        }

        if self.pool_size < MIN_POOL_SIZE {
            return Err(invalid(format!(
                "pool_size {} is below the minimum of {} bytes",
                self.pool_size, MIN_POOL_SIZE
            )));
        }
        if self.volume_size < MIN_VOLUME_SIZE {
            return Err(invalid(format!(
                "volume_size {} is below the minimum of {} bytes",
                self.volume_size, MIN_VOLUME_SIZE
            )));
        }
        if self.volume_size > self.pool_size {
            return Err(invalid(format!(
                "volume_size {} exceeds pool_size {}",
                self.volume_size, self.pool_size
            )));
        }

        if self.poll_interval_secs == 0 {
            return Err(invalid("poll_interval_secs must be positive"));
        }
        if let Some(max) = self.max_poll_interval_secs {
            if max < self.poll_interval_secs {
                return Err(invalid(format!(
                    "max_poll_interval_secs {} is below poll_interval_secs {}",
                    max, self.poll_interval_secs
                )));
            }
        }

        Ok(())
    }

    /// Waiting options matching this configuration.
    pub fn wait_options(&self) -> WaitOptions {
        let options = WaitOptions::new(
            Duration::from_secs(self.poll_interval_secs),
            Duration::from_secs(self.wait_timeout_secs),
        );
        match self.max_poll_interval_secs {
            Some(max) => options.with_backoff(Backoff::Exponential {
                factor: 2,
                max_delay: Duration::from_secs(max),
            }),
            None => options,
        }
    }
}

fn invalid<S: Into<String>>(message: S) -> Error {
    Error::new(ErrorKind::InvalidConfig, message)
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;
    use std::io::Write;
    use std::time::Duration;

    use super::Config;
    use crate::common::Backoff;
    use crate::netapp::{ServiceLevel, MIN_POOL_SIZE};
    use crate::ErrorKind;

    fn valid() -> Config {
        Config {
            subscription_id: Some("sub1".into()),
            resource_group: "rg1".into(),
            subnet_id: "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Network/virtualNetworks/vnet/subnets/anf".into(),
            ..Config::default()
        }
    }

    fn vars(items: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.location, "westus");
        assert_eq!(config.account_name, "account01");
        assert_eq!(config.pool_size, 4398046511104);
        assert_eq!(config.volume_size, 107374182400);
        assert_eq!(config.service_level, ServiceLevel::Standard);
        assert!(!config.should_cleanup);
        let options = config.wait_options();
        assert_eq!(options.delay(), Duration::from_secs(10));
        assert_eq!(options.timeout(), Duration::from_secs(600));
        assert_eq!(options.backoff(), Backoff::Fixed);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "subscription_id: sub1\nresource_group: rg1\nsubnet_id: /subnets/anf\n\
             service_level: premium\nshould_cleanup: true\nmax_poll_interval_secs: 60"
        )
        .unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.subscription_id.as_deref(), Some("sub1"));
        assert_eq!(config.service_level, ServiceLevel::Premium);
        assert!(config.should_cleanup);
        assert_eq!(config.pool_name, "pool01");
        config.validate().unwrap();
        assert_eq!(
            config.wait_options().backoff(),
            Backoff::Exponential {
                factor: 2,
                max_delay: Duration::from_secs(60)
            }
        );
    }

    #[test]
    fn test_from_file_errors() {
        let err = Config::from_file("/nonexistent/anf.yaml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "service_level: Gold").unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pool_sise: 5").unwrap();
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_apply_with() {
        let mut config = valid();
        config
            .apply_with(vars(&[
                ("LOCATION", "eastus"),
                ("POOL_SIZE", "8796093022208"),
                ("SHOULD_CLEANUP", "yes"),
                ("SERVICE_LEVEL", "Ultra"),
                ("WAIT_TIMEOUT_SECS", "30"),
            ]))
            .unwrap();
        assert_eq!(config.location, "eastus");
        assert_eq!(config.pool_size, 2 * MIN_POOL_SIZE);
        assert!(config.should_cleanup);
        assert_eq!(config.service_level, ServiceLevel::Ultra);
        assert_eq!(config.wait_options().timeout(), Duration::from_secs(30));
        assert_eq!(config.resource_group, "rg1");
    }

    #[test]
    fn test_apply_with_invalid() {
        let mut config = valid();
        let err = config
            .apply_with(vars(&[("POOL_SIZE", "four")]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        let err = config
            .apply_with(vars(&[("SHOULD_CLEANUP", "maybe")]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        let err = config
            .apply_with(vars(&[("SERVICE_LEVEL", "Gold")]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[test]
    fn test_validate() {
        valid().validate().unwrap();

        let mut config = valid();
        config.subscription_id = Some("<subscriptionId>".into());
        assert_eq!(
            config.validate().unwrap_err().kind(),
            ErrorKind::InvalidConfig
        );

        let mut config = valid();
        config.resource_group = "<Resource group name>".into();
        assert!(config.validate().is_err());

        let mut config = valid();
        config.subnet_id = String::new();
        assert!(config.validate().is_err());

        let mut config = valid();
        config.pool_size = MIN_POOL_SIZE - 1;
        assert!(config.validate().is_err());

        let mut config = valid();
        config.volume_size = 1024;
        assert!(config.validate().is_err());

        let mut config = valid();
        config.max_poll_interval_secs = Some(5);
        assert!(config.validate().is_err());

        let mut config = valid();
        config.subscription_id = None;
        config.validate().unwrap();
    }
}
