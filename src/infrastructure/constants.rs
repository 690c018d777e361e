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

/// Configuration file
pub const CONF_FILE_ENV: &str = "KUBECLIENT_CONF_FILE";

/// Logging
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Object names (DNS-1123 subdomain)
pub const MAX_NAME_LENGTH: usize = 253;
pub const DNS_SUBDOMAIN_PATTERN: &str =
    r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$";

/// Returned for any command line the tool cannot interpret
pub const USAGE_ERROR: &str = "Unable to process command use --help for more info";

/// Placeholder for empty table cells
pub const EMPTY_CELL: &str = "-";
