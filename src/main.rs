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
use kubeclient_example::infrastructure::constants::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let (client, namespace) = args.connection.connect().await?;

    match args.command {
        Commands::Create(cmd) => cmd.execute(&client, &namespace).await,
        Commands::List(cmd) => cmd.execute(&client, &namespace).await,
        Commands::Delete(cmd) => cmd.execute(&client, &namespace).await,
        Commands::Update(cmd) => cmd.execute(&client, &namespace).await,
    }
}
