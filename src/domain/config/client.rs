// Copyright 2025 JiangLong.
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

//! Client configuration file
//!
//! Values resolve as command line > config file > defaults.

use crate::infrastructure::constants::CONF_FILE_ENV;
use crate::shared::error::KubeError;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;

/// Optional TOML file with connection defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConf {
    pub namespace: Option<String>,
    pub kubeconfig: Option<String>,
    pub context: Option<String>,
}

impl ClientConf {
    /// Load configuration from a TOML file
    pub fn from<T: AsRef<str>>(path: T) -> Result<Self, KubeError> {
        let content = read_to_string(path.as_ref()).map_err(|e| {
            KubeError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.as_ref(),
                e
            ))
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// Load from `path`, else from the `KUBECLIENT_CONF_FILE` environment
    /// variable, else fall back to defaults
    pub fn load(path: Option<&str>) -> Result<Self, KubeError> {
        match path {
            Some(path) => Self::from(path),
            None => match std::env::var(CONF_FILE_ENV) {
                Ok(env_path) if !env_path.is_empty() => Self::from(env_path),
                _ => Ok(Self::default()),
            },
        }
    }
}

/// Connection settings after merging flags over the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// Empty means the kubeconfig context's namespace
    pub namespace: String,
    pub kubeconfig: Option<String>,
    pub context: Option<String>,
}

impl ConnectionSettings {
    pub fn resolve(
        conf: &ClientConf,
        namespace: Option<String>,
        kubeconfig: Option<String>,
        context: Option<String>,
    ) -> Self {
        Self {
            namespace: namespace
                .or_else(|| conf.namespace.clone())
                .unwrap_or_default(),
            kubeconfig: kubeconfig.or_else(|| conf.kubeconfig.clone()),
            context: context.or_else(|| conf.context.clone()),
        }
    }
}
