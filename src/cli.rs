use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "playground-cli")]
#[command(about = "Playground CLI - persisted playground state for agent and team endpoints", long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long)]
    pub config_path: Option<std::path::PathBuf>,

    /// App origin serving /api/default-endpoint (overrides config)
    #[arg(long)]
    pub app_url: Option<String>,

    /// Keep state in memory only; nothing is read from or written to disk
    #[arg(long)]
    pub no_persist: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hydrate, check the selected endpoint and summarize its catalog
    Status,

    /// Inspect or change the selected endpoint
    Endpoint {
        #[command(subcommand)]
        action: EndpointAction,
    },

    /// List agents served by the selected endpoint
    Agents,

    /// List teams served by the selected endpoint
    Teams,

    /// List sessions of an agent or team
    Sessions {
        /// Agent or team identifier
        id: String,

        /// Treat the identifier as a team
        #[arg(long)]
        team: bool,
    },
}

#[derive(Subcommand)]
pub enum EndpointAction {
    /// Print the selected endpoint after hydration
    Show,

    /// Select and persist an endpoint
    Set {
        /// Endpoint URL
        url: String,
    },

    /// List configured endpoints
    List,
}
