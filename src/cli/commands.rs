// CLI command definitions

use super::k8s::{ConnectionArgs, CreateCommand, DeleteCommand, ListCommand, UpdateCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "kubeclient-example",
    version,
    about = "A minimal kubectl clone for pods and replication controllers",
    long_about = "Create, list, delete and update pods and replication controllers.\n\
        Creating a pod waits until it succeeds or fails, deleting it on failure."
)]
pub struct CliArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Create a pod or replication controller from a local document
    ///
    /// create pod/pod.json | create rc/replication-controller.json
    Create(CreateCommand),

    /// List pods or replication controllers
    ///
    /// list pods | list rcs
    List(ListCommand),

    /// Delete a pod or replication controller by name
    ///
    /// delete pod/<name> | delete rc/<name>
    Delete(DeleteCommand),

    /// Change the image of a replication controller
    ///
    /// update rc/<name> --image <image> [--version <tag>]
    Update(UpdateCommand),
}
