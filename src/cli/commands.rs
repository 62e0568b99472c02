//! CLI commands

use crate::config::{DuplicatePolicy, StoreConfig};
use crate::error::Result;
use crate::generate::DEFAULT_MAX_USERS;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Post-Index CLI
#[derive(Parser, Debug)]
#[command(name = "post-index")]
#[command(about = "Generate posts and query them by timestamp, month range or views")]
pub struct Cli {
    /// JSON store configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Duplicate-timestamp policy (overrides the config file)
    #[arg(long, global = true, value_enum)]
    pub duplicates: Option<DuplicateArg>,

    /// How records are printed
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write logs to `<dir>/post-index.log` instead of stderr
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Generate posts, then open the query menu (default)
    Interactive {
        /// Number of posts; asked for when omitted
        #[arg(short, long)]
        posts: Option<usize>,
        /// Size of the author pool
        #[arg(short, long, default_value_t = DEFAULT_MAX_USERS)]
        users: u32,
        /// RNG seed for reproducible posts
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Generate posts, print them ranked by views and exit
    Generate {
        /// Number of posts
        #[arg(short, long)]
        posts: usize,
        /// Size of the author pool
        #[arg(short, long, default_value_t = DEFAULT_MAX_USERS)]
        users: u32,
        /// RNG seed for reproducible posts
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Interactive {
            posts: None,
            users: DEFAULT_MAX_USERS,
            seed: None,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateArg {
    Chain,
    Reject,
}

impl From<DuplicateArg> for DuplicatePolicy {
    fn from(arg: DuplicateArg) -> Self {
        match arg {
            DuplicateArg::Chain => DuplicatePolicy::Chain,
            DuplicateArg::Reject => DuplicatePolicy::Reject,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Cli {
    /// Config file (if any) with command-line overrides applied
    pub fn store_config(&self) -> Result<StoreConfig> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::load(path)?,
            None => StoreConfig::default(),
        };
        if let Some(policy) = self.duplicates {
            config = config.with_duplicate_policy(policy.into());
        }
        Ok(config)
    }
}
