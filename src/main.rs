use anyhow::Result;
use clap::Parser;
use release_binder::{commands, commands::config::Config, platform::ClientIdentity};
use std::path::PathBuf;

/// release-binder - point download buttons at the latest release
///
/// Detects a client's platform, fetches the latest GitHub release, and works
/// out which asset each download control on the product page should offer.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
/// This is useful for avoiding rate limits.
///
/// Examples:
///   release-binder detect --platform Win32
///   release-binder latest --repo owner/repo
///   release-binder render --page layout.json --lang es
#[derive(Parser, Debug)]
#[command(author, version = env!("RELEASE_BINDER_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// The GitHub repository in the format "owner/repo"
    #[arg(
        long,
        env = "RELEASE_BINDER_REPO",
        value_name = "OWNER/REPO",
        default_value = "pablojavier/libredrop",
        global = true
    )]
    pub repo: String,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(
        long = "api-url",
        env = "RELEASE_BINDER_API_URL",
        value_name = "URL",
        global = true
    )]
    pub api_url: Option<String>,

    /// GitHub token used for API requests
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the platform a client would be served
    Detect(IdentityArgs),

    /// Show the latest release and the asset offered to a client
    Latest(IdentityArgs),

    /// Bind the latest release to a page and print the page state as JSON
    Render(RenderArgs),
}

#[derive(clap::Args, Debug)]
pub struct IdentityArgs {
    /// Client user agent (defaults to this binary's own)
    #[arg(long = "user-agent", value_name = "UA")]
    pub user_agent: Option<String>,

    /// Client platform hint, e.g. "Win32" or "MacIntel" (defaults to the host)
    #[arg(long, value_name = "HINT")]
    pub platform: Option<String>,
}

impl IdentityArgs {
    fn identity(&self) -> ClientIdentity {
        let host = ClientIdentity::host();
        ClientIdentity::new(
            self.user_agent.clone().unwrap_or(host.user_agent),
            self.platform.clone().unwrap_or(host.platform),
        )
    }
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Page layout JSON file (defaults to the standard download page)
    #[arg(long, value_name = "PATH")]
    pub page: Option<PathBuf>,

    /// Page language, overriding the layout's
    #[arg(long, value_name = "LANG")]
    pub lang: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Detect(args) => {
            commands::detect(&args.identity());
        }
        Commands::Latest(args) => {
            let config = Config::new(&cli.repo, cli.api_url, cli.token)?;
            commands::latest(&config, &args.identity()).await?
        }
        Commands::Render(args) => {
            let config = Config::new(&cli.repo, cli.api_url, cli.token)?;
            let layout = commands::load_layout(args.page.as_deref(), args.lang)?;
            commands::render(&config, &args.identity.identity(), layout).await?
        }
    }
    Ok(())
}
