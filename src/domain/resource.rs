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

//! Resource kinds and the `kind/argument` references accepted on the command line

use crate::infrastructure::constants::{DNS_SUBDOMAIN_PATTERN, MAX_NAME_LENGTH, USAGE_ERROR};
use crate::shared::error::KubeError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Pod,
    ReplicationController,
}

impl ResourceKind {
    /// Singular form used in `kind/argument` references
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Pod => "pod",
            Self::ReplicationController => "rc",
        }
    }

    /// Parse the plural form (`pods`, `rcs`)
    pub fn from_plural(s: &str) -> Result<Self, KubeError> {
        match s {
            "pods" => Ok(Self::Pod),
            "rcs" => Ok(Self::ReplicationController),
            _ => Err(usage_error()),
        }
    }
}

impl FromStr for ResourceKind {
    type Err = KubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pod" => Ok(Self::Pod),
            "rc" => Ok(Self::ReplicationController),
            _ => Err(usage_error()),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// A `kind/argument` reference such as `pod/pod.json` or `rc/web`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub argument: String,
}

impl FromStr for ResourceRef {
    type Err = KubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, argument) = s.split_once('/').ok_or_else(usage_error)?;
        if argument.is_empty() {
            return Err(usage_error());
        }

        Ok(Self {
            kind: kind.parse()?,
            argument: argument.to_string(),
        })
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.argument)
    }
}

pub fn usage_error() -> KubeError {
    KubeError::InvalidResource(USAGE_ERROR.to_string())
}

/// Check that `name` is a valid object name (DNS-1123 subdomain)
pub fn validate_name(name: &str) -> Result<(), KubeError> {
    if name.is_empty() || name.len() > MAX_NAME_LENGTH {
        return Err(KubeError::InvalidResource(format!(
            "Name '{}' must be between 1 and {} characters",
            name, MAX_NAME_LENGTH
        )));
    }

    let re = Regex::new(DNS_SUBDOMAIN_PATTERN)
        .map_err(|e| KubeError::ConfigError(format!("Invalid name pattern: {}", e)))?;
    if !re.is_match(name) {
        return Err(KubeError::InvalidResource(format!(
            "Name '{}' must consist of lower case alphanumeric characters, '-' or '.', \
            and must start and end with an alphanumeric character",
            name
        )));
    }

    Ok(())
}
