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

use clap::Parser;
use kubeclient_example::cli::{CliArgs, Commands};

#[test]
fn test_parse_create_with_global_flags() {
    let args = CliArgs::try_parse_from([
        "kubeclient-example",
        "create",
        "pod/pod.json",
        "--namespace",
        "jobs",
        "--context",
        "staging",
    ])
    .unwrap();

    assert_eq!(args.connection.namespace.as_deref(), Some("jobs"));
    assert_eq!(args.connection.context.as_deref(), Some("staging"));
    match args.command {
        Commands::Create(cmd) => assert_eq!(cmd.target, "pod/pod.json"),
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_parse_update_requires_image() {
    assert!(CliArgs::try_parse_from(["kubeclient-example", "update", "rc/web"]).is_err());

    let args = CliArgs::try_parse_from([
        "kubeclient-example",
        "-n",
        "jobs",
        "update",
        "rc/web",
        "--image",
        "nginx",
        "--version",
        "1.25",
    ])
    .unwrap();
    match args.command {
        Commands::Update(cmd) => {
            assert_eq!(cmd.image, "nginx");
            assert_eq!(cmd.version.as_deref(), Some("1.25"));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_missing_argument_is_rejected() {
    assert!(CliArgs::try_parse_from(["kubeclient-example", "list"]).is_err());
    assert!(CliArgs::try_parse_from(["kubeclient-example", "scale", "rc/web"]).is_err());
}
