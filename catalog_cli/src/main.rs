//! Card Catalog CLI
//!
//! Terminal front end for the card catalog service: lists, adds, edits and
//! deletes cards and checks their prices.

mod render;

use anyhow::{bail, Context, Result};
use card_catalog::{CardRecord, CatalogService, ClientConfig, CONNECT_FAILED_MESSAGE};
use clap::{Parser, Subcommand};

/// Manage a remote card catalog
#[derive(Parser, Debug)]
#[command(name = "catalog_cli")]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the catalog service
    #[arg(long, env = "CARD_CATALOG_URL", default_value = card_catalog::config::DEFAULT_CATALOG_URL)]
    url: String,

    /// Price-quote endpoint
    #[arg(long, env = "CARD_PRICE_URL", default_value = card_catalog::config::DEFAULT_PRICE_URL)]
    price_url: String,

    /// API key for the catalog service
    #[arg(long, env = "CARD_CATALOG_TOKEN", default_value = "", hide_env_values = true)]
    token: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all cards, optionally filtered
    List {
        /// Only cards whose id, name or unique key contains this
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a single card
    Show { id: i64 },
    /// Add a new card
    Add {
        #[arg(long)]
        key: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        image: String,
    },
    /// Change an existing card; omitted fields keep their value
    Edit {
        id: i64,
        #[arg(long)]
        key: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a card
    Delete { id: i64 },
    /// Check the current market price of a card
    Price {
        /// Unique key, e.g. swsh4-23
        key: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = ClientConfig {
        catalog_base_url: args.url.clone(),
        price_url: args.price_url.clone(),
        ..ClientConfig::default()
    };
    let service = CatalogService::new(config);

    if let Err(e) = run(&service, args).await {
        log::error!("{:#}", e);
        service.notifications().push_error(format!("{:#}", e));
        render::print_notifications(&service.notifications().list());
        std::process::exit(1);
    }
}

async fn run(service: &CatalogService, args: Args) -> Result<()> {
    let cards = service.cards();
    cards.subscribe(|list| log::debug!("Catalog now holds {} cards", list.len()));

    match args.command {
        // Price quotes need no credential; with one, the catalog supplies the card name
        Command::Price { key } => {
            if !args.token.is_empty() {
                if let Err(e) = service.connect(args.token).await {
                    log::warn!("Catalog not loaded, showing price without card details: {}", e);
                }
            }
            let card = cards
                .find_by_unique_key(&key)
                .unwrap_or_else(|| CardRecord::new(key.as_str(), "", ""));
            service
                .check_price(&card)
                .await
                .with_context(|| format!("Failed to check price for {}", key))?;
            if let Some(snapshot) = service.prices().get(&key) {
                render::print_prices(&card, &snapshot);
            }
        }
        Command::List { search } => {
            setup(service, args.token).await?;
            let shown = cards.search(search.as_deref().unwrap_or(""));
            render::print_cards(&shown);
        }
        Command::Show { id } => {
            setup(service, args.token).await?;
            match service.fetch_one(id).await? {
                Some(card) => render::print_cards(std::slice::from_ref(&card)),
                None => bail!("No card with id {}", id),
            }
        }
        Command::Add { key, name, image } => {
            setup(service, args.token).await?;
            service
                .create(&CardRecord::new(key, name, image))
                .await
                .context("Failed to add card")?;
            service.notifications().push("Card added");
            render::print_cards(&cards.current());
        }
        Command::Edit { id, key, name, image } => {
            setup(service, args.token).await?;
            let mut card = cached_card(service, id)?;
            if let Some(key) = key {
                card.unique_key = key;
            }
            if let Some(name) = name {
                card.display_name = name;
            }
            if let Some(image) = image {
                card.image_ref = image;
            }
            service.edit(&card).await.context("Failed to edit card")?;
            service.notifications().push("Card updated");
            render::print_cards(&cards.current());
        }
        Command::Delete { id } => {
            setup(service, args.token).await?;
            let card = cached_card(service, id)?;
            service.delete_one(&card).await.context("Failed to delete card")?;
            service.notifications().push(format!("Deleted {}", card.display_name));
            render::print_cards(&cards.current());
        }
    }

    render::print_notifications(&service.notifications().list());
    Ok(())
}

/// Sets the credential and loads the catalog; catalog commands need both.
async fn setup(service: &CatalogService, token: String) -> Result<()> {
    if token.is_empty() {
        bail!("No API key configured (use --token or CARD_CATALOG_TOKEN)");
    }
    service.connect(token).await.context(CONNECT_FAILED_MESSAGE)
}

fn cached_card(service: &CatalogService, id: i64) -> Result<CardRecord> {
    service
        .cards()
        .current()
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .with_context(|| format!("No card with id {}", id))
}
