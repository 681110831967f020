use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use easel_graph::{EdgeId, NodeId};

/// Easel agent canvas
#[derive(Debug, Parser)]
#[command(name = "easel", about = "Canvas synchronizer for platform agents")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "easel.toml", env = "EASEL_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open an agent's canvas and print the composed graph
    Show(ShowArgs),
    /// Drop a palette component onto an agent's canvas
    Attach(AttachArgs),
    /// Remove a node or an edge from an agent's canvas
    Detach(DetachArgs),
    /// List the tools and knowledge bases available to drop
    Catalog(CatalogArgs),
    /// Probe an MCP server and print the sub-tools it reports
    Inspect(InspectArgs),
}

#[derive(Debug, clap::Args)]
pub struct ShowArgs {
    /// Agent whose canvas to open
    #[arg(long)]
    pub agent: i64,

    /// Print the graph as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Skip the MCP discovery pass
    #[arg(long)]
    pub no_discovery: bool,
}

#[derive(Debug, clap::Args)]
#[command(group(ArgGroup::new("source").required(true).args(["tool", "knowledge_base", "payload"])))]
pub struct AttachArgs {
    /// Agent whose canvas to edit
    #[arg(long)]
    pub agent: i64,

    /// Tool id from the catalog
    #[arg(long)]
    pub tool: Option<i64>,

    /// Knowledge base id from the catalog
    #[arg(long)]
    pub knowledge_base: Option<i64>,

    /// Raw drop payload as JSON, e.g. `{"nodeType":"tools","id":7,"label":"Search"}`
    #[arg(long)]
    pub payload: Option<String>,
}

#[derive(Debug, clap::Args)]
#[command(group(ArgGroup::new("target").required(true).args(["node", "edge"])))]
pub struct DetachArgs {
    /// Agent whose canvas to edit
    #[arg(long)]
    pub agent: i64,

    /// Node id to remove, e.g. `tools-7`
    #[arg(long)]
    pub node: Option<NodeId>,

    /// Edge id to remove, e.g. `agent-tool-edge-7`
    #[arg(long)]
    pub edge: Option<EdgeId>,
}

#[derive(Debug, clap::Args)]
pub struct CatalogArgs {
    /// Print the catalog as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args)]
pub struct InspectArgs {
    /// MCP server URL to probe
    #[arg(long)]
    pub url: String,
}
