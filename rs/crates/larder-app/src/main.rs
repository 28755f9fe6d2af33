use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use larder_api::{ForkifyClient, HttpClient, NutritionApi, RecipeApi, SpoonacularClient};
use larder_app::{logging, AppConfig, Controller, Page, RegionChange};
use larder_core::{parse_action, FileStore, KeyValueStore, MemoryStore, Store};
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "larder", about = "Recipe lookup and meal planning, one action per line")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Read actions from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// How changed regions are printed
    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Recipe API base URL
    #[arg(long)]
    api_url: Option<String>,

    #[arg(long)]
    api_key: Option<String>,

    /// Nutrition API base URL
    #[arg(long)]
    nutrition_url: Option<String>,

    #[arg(long)]
    nutrition_key: Option<String>,

    /// Seconds before a request is abandoned
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Search results per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Directory for bookmarks and the shopping list
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep bookmarks and the shopping list in memory only
    #[arg(long)]
    ephemeral: bool,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Apply every action, then print the whole page once
    Page,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Html,
    Json,
}

impl Args {
    fn config(&self) -> AppConfig {
        let mut cfg = AppConfig::from_env();
        if let Some(url) = &self.api_url {
            cfg.api.recipe_url = url.clone();
        }
        if let Some(key) = &self.api_key {
            cfg.api.api_key = key.clone();
        }
        if let Some(url) = &self.nutrition_url {
            cfg.api.nutrition_url = url.clone();
        }
        if let Some(key) = &self.nutrition_key {
            cfg.api.nutrition_key = key.clone();
        }
        if let Some(secs) = self.timeout_secs {
            cfg.api.timeout = Duration::from_secs(secs);
        }
        if let Some(n) = self.page_size.filter(|n| *n > 0) {
            cfg.page_size = n;
        }
        if let Some(dir) = &self.data_dir {
            cfg.data_dir = dir.clone();
        }
        cfg
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init(logging::DEFAULT_FILTER)?;
    let args = Args::parse();
    let cfg = args.config();

    let http = HttpClient::from_config(&cfg.api).context("failed to build HTTP client")?;
    let recipes = ForkifyClient::from_config(http.clone(), &cfg.api);
    let nutrition = SpoonacularClient::from_config(http, &cfg.api);
    let storage: Box<dyn KeyValueStore> = if args.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(FileStore::new(&cfg.data_dir))
    };
    info!(
        recipe_url = %cfg.api.recipe_url,
        page_size = cfg.page_size,
        data_dir = %cfg.data_dir.display(),
        ephemeral = args.ephemeral,
        "starting larder"
    );

    let mut controller = Controller::new(Store::open(recipes, nutrition, storage, cfg.page_size));

    let input: Box<dyn AsyncBufRead + Unpin> = match &args.script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("cannot open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    match args.command {
        Some(Command::Page) => {
            run(&mut controller, input, None).await?;
            println!("{}", controller.page().to_html());
        }
        None => {
            print_changes(controller.page_mut(), "init", args.format);
            run(&mut controller, input, Some(args.format)).await?;
        }
    }
    Ok(())
}

/// Dispatch every action line of `input`. Blank lines and `#` comments are skipped.
async fn run<R, N, S>(
    controller: &mut Controller<R, N, S>,
    input: impl AsyncBufRead + Unpin,
    format: Option<Format>,
) -> Result<()>
where
    R: RecipeApi,
    N: NutritionApi,
    S: KeyValueStore,
{
    let mut lines = input.lines();
    let mut line_no = 0usize;
    while let Some(line) = lines.next_line().await.context("failed to read actions")? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let action = match parse_action(line) {
            Ok(action) => action,
            Err(e) => {
                warn!(line = line_no, error = %e, "skipping malformed action");
                continue;
            }
        };
        let name = action.name();
        controller.dispatch(action).await;
        if let Some(format) = format {
            print_changes(controller.page_mut(), name, format);
        }
    }
    Ok(())
}

fn print_changes(page: &mut Page, action: &str, format: Format) {
    let changes: Vec<RegionChange> = page.take_changes();
    match format {
        Format::Html => {
            for change in &changes {
                println!("<!-- region: {} ({} mutations) -->", change.name, change.mutations.len());
                println!("{}", page.region_html(&change.name).unwrap_or_default());
            }
        }
        Format::Json => {
            let regions: Vec<_> = changes
                .iter()
                .map(|change| {
                    json!({
                        "name": change.name,
                        "mutations": change.mutations.len(),
                        "html": page.region_html(&change.name).unwrap_or_default(),
                        "nodes": page.region(&change.name).map(|r| r.children()).unwrap_or_default(),
                    })
                })
                .collect();
            println!("{}", json!({ "action": action, "regions": regions }));
        }
    }
}
