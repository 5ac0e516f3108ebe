use crate::prelude::*;
use clap::Parser;

mod error;
mod gitlab;
mod prelude;
mod serve;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "GitLab membership and activity tools, as a CLI and a small HTTP proxy service"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// GitLab instance base URL (overrides GITLAB_URL)
    #[clap(long, global = true)]
    base_url: Option<String>,

    /// GitLab personal access token (overrides GITLAB_TOKEN)
    #[clap(long, global = true)]
    token: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "GLABTOOLS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// GitLab membership and activity operations
    Gitlab(crate::gitlab::App),

    /// HTTP service exposing the same operations
    Serve(crate::serve::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Gitlab(sub_app) => crate::gitlab::run(sub_app, app.global).await,
        SubCommands::Serve(sub_app) => crate::serve::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
