pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::config::ApiConfig;
use crate::session::Session;

#[derive(Parser)]
#[command(name = "blooms")]
#[command(about = "Blooms admin console - manage categories, subcategories and blogs")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Override the Blooms API base URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Sign in, sign out and register admin accounts")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Show blog, category and subcategory counts")]
    Dashboard,

    #[command(about = "Manage top-level categories")]
    Category {
        #[command(subcommand)]
        cmd: commands::category::CategoryCommands,
    },

    #[command(about = "Manage subcategories")]
    Subcategory {
        #[command(subcommand)]
        cmd: commands::subcategory::SubCategoryCommands,
    },

    #[command(about = "Manage blog posts and their tags")]
    Blog {
        #[command(subcommand)]
        cmd: commands::blog::BlogCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Everything a command needs, built once per invocation
pub struct Context {
    pub session: Session,
    pub api: ApiClient,
    pub output: OutputFormat,
}

impl Context {
    pub fn new(api_url: Option<String>, output: OutputFormat) -> anyhow::Result<Self> {
        let session = config::open_session()?;
        let api_config = match api_url {
            Some(url) => ApiConfig::for_base_url(url),
            None => crate::config::config().api.clone(),
        };
        let api = ApiClient::new(&api_config)?.with_session(&session);

        Ok(Self { session, api, output })
    }

    /// Rebuild the client after login/logout so the bearer token follows the session
    pub fn refresh_client(&mut self) {
        self.api = self.api.clone().with_session(&self.session);
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output = OutputFormat::from_cli(&cli);
    let mut ctx = Context::new(cli.api_url.clone(), output)?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &mut ctx).await,
        Commands::Dashboard => commands::dashboard::handle(&ctx).await,
        Commands::Category { cmd } => commands::category::handle(cmd, &ctx).await,
        Commands::Subcategory { cmd } => commands::subcategory::handle(cmd, &ctx).await,
        Commands::Blog { cmd } => commands::blog::handle(cmd, &ctx).await,
    }
}
