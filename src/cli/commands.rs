// CLI command definitions

use super::loki::{ApplyCommand, CrdCommand, RenderCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "ssd-loki-kube",
    version,
    about = "Manifest renderer for simple scalable Loki deployments",
    long_about = "Renders and applies the write, read and backend tiers of a Loki instance described by an SsdLoki resource"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render all objects for an SsdLoki resource as multi-document YAML
    Render(RenderCommand),

    /// Server-side apply the rendered objects to a cluster
    Apply(ApplyCommand),

    /// Print the SsdLoki CustomResourceDefinition
    Crd(CrdCommand),
}
