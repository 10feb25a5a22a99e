//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Trellis - platform families and target resolution
#[derive(Parser)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every known platform and family as a tree
    Platforms,

    /// Show the families and capabilities of a platform
    Family(FamilyArgs),

    /// Resolve connection options into a target configuration
    Resolve(ResolveArgs),

    /// List available transport plugins
    Plugins,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct FamilyArgs {
    /// Platform name (e.g. ubuntu)
    pub platform: String,

    /// Detected attribute, as key=value (repeatable)
    #[arg(long = "attr", value_name = "KEY=VALUE")]
    pub attrs: Vec<String>,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Target, e.g. ssh://user@host:22
    pub target: Option<String>,

    /// Start from a `[targets.<name>]` profile in config
    #[arg(long)]
    pub profile: Option<String>,

    /// Transport backend
    #[arg(short, long)]
    pub backend: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long)]
    pub user: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    #[arg(long)]
    pub path: Option<String>,

    /// Key material or key file path (repeatable)
    #[arg(short = 'i', long = "key", value_name = "KEY")]
    pub keys: Vec<String>,

    /// Run commands with sudo on the target
    #[arg(long)]
    pub sudo: bool,

    /// Decode the target password as www-form data
    #[arg(long)]
    pub www_form_encoded_password: bool,

    /// Extra transport option, as key=value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Backend used when nothing else selects one
    #[arg(long, env = "TRELLIS_DEFAULT_BACKEND")]
    pub default_backend: Option<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
