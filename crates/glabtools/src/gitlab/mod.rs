use crate::prelude::{println, *};

pub mod items;
pub mod permission;


// Re-export public data functions
pub use items::list_items_data;
pub use permission::set_role_data;

/// GitLab module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "gitlab")]
#[command(about = "GitLab membership and activity operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Grant or update a user's role on a group or project
    #[clap(name = "permission")]
    Permission(permission::PermissionOptions),

    /// List issues or merge requests created in a given year
    #[clap(name = "items")]
    Items(items::ItemsOptions),
}

/// GitLab configuration, read once and passed into every operation
#[derive(Debug, Clone)]
pub struct GitLabConfig {
    pub base_url: String,
    pub token: String,
}

impl GitLabConfig {
    /// Default public GitLab instance
    pub const DEFAULT_BASE_URL: &'static str = "https://gitlab.com/";

    /// Load configuration from environment variables
    ///
    /// `GITLAB_URL` falls back to the public instance. `GITLAB_TOKEN` has no
    /// default; an empty token is surfaced by the validator at call time
    /// rather than here, so startup never fails on a missing token.
    pub fn from_env() -> Self {
        let base_url = std::env::var("GITLAB_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        Self {
            base_url: normalize_base_url(&base_url),
            token: std::env::var("GITLAB_TOKEN").unwrap_or_default(),
        }
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(mut self, base_url: Option<String>, token: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = normalize_base_url(&url);
        }
        if let Some(token) = token {
            self.token = token;
        }
        self
    }

    /// Absolute URL for an API path, e.g. `api_url("users")`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}api/v4/{path}", self.base_url)
    }
}

/// Normalize a base URL to exactly one trailing slash.
pub fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}

/// Create an HTTP client that authenticates with the static token header
pub fn create_gitlab_client(config: &GitLabConfig) -> Result<reqwest::Client, Error> {
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

    let mut headers = HeaderMap::new();
    headers.insert(
        "PRIVATE-TOKEN",
        HeaderValue::from_str(&config.token)
            .map_err(|e| Error::Unexpected(format!("Invalid token header value: {e}")))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| Error::Unexpected(format!("Failed to build HTTP client: {e}")))
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config = GitLabConfig::from_env()
        .with_overrides(global.base_url.clone(), global.token.clone());

    if global.verbose {
        println!("GitLab API base: {}", config.base_url);
        println!();
    }

    match app.command {
        Commands::Permission(options) => permission::run(options, config).await,
        Commands::Items(options) => items::run(options, config).await,
    }
}
