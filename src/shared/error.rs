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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, KubeError>;

#[derive(Error, Debug)]
pub enum KubeError {
    #[error("Kubernetes API error: {0}")]
    KubeError(String),

    #[error("Error parsing {kind}: {message}")]
    Parse { kind: String, message: String },

    #[error("Error creating {kind}: {source}")]
    Submission {
        kind: String,
        #[source]
        source: Box<KubeError>,
    },

    #[error("Error watching task pod: {0}")]
    Watch(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Resource not found: {resource_type} '{name}' in namespace '{namespace}'")]
    NotFound {
        resource_type: String,
        name: String,
        namespace: String,
    },

    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl From<kube::Error> for KubeError {
    fn from(err: kube::Error) -> Self {
        KubeError::KubeError(err.to_string())
    }
}

impl KubeError {
    pub fn parse(kind: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            kind: kind.into(),
            message: message.to_string(),
        }
    }

    pub fn submission(kind: impl Into<String>, source: KubeError) -> Self {
        Self::Submission {
            kind: kind.into(),
            source: Box::new(source),
        }
    }

    pub fn not_found(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Map a kube error for a named object, turning 404 responses into `NotFound`.
    pub fn from_api(
        err: kube::Error,
        resource_type: &str,
        name: &str,
        namespace: &str,
    ) -> Self {
        match err {
            kube::Error::Api(ae) if ae.code == 404 => {
                KubeError::not_found(resource_type, name, namespace)
            }
            kube::Error::Api(ae) => KubeError::KubeError(ae.message),
            e => KubeError::KubeError(e.to_string()),
        }
    }
}
