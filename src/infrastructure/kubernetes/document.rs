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

//! Loading of local resource documents

use crate::shared::error::KubeError;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::de::DeserializeOwned;
use std::path::Path;

/// On-disk encoding of a resource document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` and `.yml` files are YAML, everything else is JSON
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Deserialize a document of the given `kind` ("pod", "rc") from raw bytes
pub fn parse_document<T: DeserializeOwned>(
    bytes: &[u8],
    format: DocumentFormat,
    kind: &str,
) -> Result<T, KubeError> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_slice(bytes).map_err(|e| KubeError::parse(kind, e))
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_slice(bytes).map_err(|e| KubeError::parse(kind, e))
        }
    }
}

/// Read a document file, returning its bytes and detected format
pub fn read_document(path: impl AsRef<Path>) -> Result<(Vec<u8>, DocumentFormat), KubeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        KubeError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read {}: {}", path.display(), e),
        ))
    })?;
    Ok((bytes, DocumentFormat::from_path(path)))
}

/// Overwrite the object's namespace. An empty namespace clears the field so
/// the server applies the request namespace.
pub fn assign_namespace(metadata: &mut ObjectMeta, namespace: &str) {
    metadata.namespace = if namespace.is_empty() {
        None
    } else {
        Some(namespace.to_string())
    };
}
