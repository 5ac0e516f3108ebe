//! List issues or merge requests created in a given year

use chrono::{Datelike, Utc};
use colored::Colorize;
use glabtools_core::gitlab::validation::EARLIEST_YEAR;
use glabtools_core::gitlab::{
    has_four_digits, transform_item_list, validate_inputs, year_bounds, ItemRecord, ListOutput,
    ValidationRequest,
};
use glabtools_core::outcome::Outcome;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::StatusCode;

use crate::gitlab::{create_gitlab_client, GitLabConfig};
use crate::prelude::{println, *};

/// Upstream page size; pages are requested until one comes back empty.
const PER_PAGE: u32 = 100;

/// Options for the items command
#[derive(Debug, clap::Args, Clone)]
pub struct ItemsOptions {
    /// Item category: 'mr' for merge requests or 'issues'
    #[clap(long = "type", value_name = "TYPE")]
    pub item_type: String,

    /// Calendar year to filter by (4-digit)
    #[clap(long)]
    pub year: String,

    /// Stop after this many pages instead of draining the listing
    #[arg(long, env = "GITLAB_MAX_PAGES")]
    pub max_pages: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Helper to set spinner message if spinner is present
fn set_spinner_msg(spinner: Option<&ProgressBar>, msg: impl Into<String>) {
    if let Some(s) = spinner {
        s.set_message(msg.into());
    }
}

/// Public data function - used by both CLI and HTTP service
///
/// Pages through the year-scoped listing until the upstream returns an empty
/// page, then projects every accumulated record. Results are all-or-nothing:
/// a failure on any page discards whatever was fetched before it.
pub async fn list_items_data(
    config: &GitLabConfig,
    item_type: &str,
    year: &str,
    max_pages: Option<u32>,
    spinner: Option<&ProgressBar>,
) -> Result<ListOutput, Error> {
    let request = ValidationRequest {
        item_type: Some(item_type),
        year: Some(year),
        ..Default::default()
    };
    let current_year = Utc::now().year();
    let errors = validate_inputs(&request, &config.token, current_year);
    if !errors.is_empty() {
        log::error!("validation errors: {errors:?}");
        return Err(Error::Validation(errors));
    }

    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| Error::YearNotNumeric(year.to_string()))?;
    if !has_four_digits(year) || year < EARLIEST_YEAR || year > current_year {
        return Err(Error::YearOutOfRange {
            year,
            latest: current_year,
        });
    }

    let (created_after, created_before) = year_bounds(year);
    log::info!("retrieving {item_type} created between {created_after} and {created_before}");

    let endpoint = if item_type == "mr" {
        config.api_url("merge_requests")
    } else {
        config.api_url("issues")
    };

    let client = create_gitlab_client(config)?;
    let per_page = PER_PAGE.to_string();
    let mut page: u32 = 1;
    let mut all_results: Vec<ItemRecord> = Vec::new();

    loop {
        if let Some(limit) = max_pages {
            if page > limit {
                log::error!("page ceiling of {limit} reached before the listing ended");
                return Err(Error::PageLimitExceeded(limit));
            }
        }

        set_spinner_msg(spinner, format!("Fetching page {page} of {item_type}..."));
        log::info!("requesting page {page} of {item_type}");

        let page_str = page.to_string();
        let response = client
            .get(&endpoint)
            .query(&[
                ("created_after", created_after.as_str()),
                ("created_before", created_before.as_str()),
                ("per_page", per_page.as_str()),
                ("page", page_str.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::ListingFailed {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let records: Vec<ItemRecord> = response.json().await.map_err(|_| Error::MalformedResponse)?;

        // An empty page is the termination signal.
        if records.is_empty() {
            break;
        }

        log::info!(
            "added {} items from page {page}, total: {}",
            records.len(),
            all_results.len() + records.len()
        );
        all_results.extend(records);
        page += 1;
    }

    log::info!("found {} {item_type} from {year}", all_results.len());
    Ok(transform_item_list(all_results, item_type, year))
}

/// Handle the items command
pub async fn run(options: ItemsOptions, config: GitLabConfig) -> Result<()> {
    // Create spinner for progress indication
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = list_items_data(
        &config,
        &options.item_type,
        &options.year,
        options.max_pages,
        Some(&spinner),
    )
    .await;

    // Clear the spinner before printing output
    spinner.finish_and_clear();
    let output = result.map_err(|err| eyre!("{err}"))?;

    if options.json {
        let data = serde_json::to_value(&output.items)?;
        let outcome = Outcome::success(output.message.clone(), data);
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("\n{}\n", output.message.bold());

    if output.items.is_empty() {
        println!("No {} found.", options.item_type);
        return Ok(());
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Title".bold().cyan(),
        "State".bold().cyan(),
        "Created".bold().cyan(),
        "URL".bold().cyan()
    ]);

    for item in &output.items {
        table.add_row(prettytable::row![
            item.id,
            item.title,
            format_state(&item.state),
            item.created_at,
            item.web_url
        ]);
    }

    table.printstd();

    Ok(())
}

/// Format item state with appropriate color
fn format_state(state: &str) -> String {
    match state {
        "opened" => state.bright_green().to_string(),
        "merged" => state.bright_magenta().to_string(),
        "closed" => state.bright_red().to_string(),
        "locked" => state.bright_yellow().to_string(),
        _ => state.to_string(),
    }
}
