//! Catalog CLI
//!
//! Terminal front end for the catalog API: list the gallery, show or edit
//! one product, add a product with images, delete with confirmation.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use catalog_client::models::{Category, Dimensions, ImageFile, Product};
use catalog_client::views::gallery::DELETE_PROMPT;
use catalog_client::views::{AddForm, DetailView, Gallery, Notice};
use catalog_client::{CatalogClient, DEFAULT_API_URL};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Browse and manage the product catalog")]
#[command(version)]
struct Cli {
    /// Base URL of the catalog API
    #[arg(long = "api-url", env = "CATALOG_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Product size class as typed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CategoryArg {
    Small,
    Medium,
    Large,
    Nil,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Small => Category::Small,
            CategoryArg::Medium => Category::Medium,
            CategoryArg::Large => Category::Large,
            CategoryArg::Nil => Category::Nil,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// List all products
    List,

    /// Show one product
    Show {
        /// Product ID
        id: String,
    },

    /// Add a product with one or more images
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        stock: u32,
        #[arg(long, requires_all = ["breadth", "height"])]
        length: Option<f64>,
        #[arg(long, requires_all = ["length", "height"])]
        breadth: Option<f64>,
        #[arg(long, requires_all = ["length", "breadth"])]
        height: Option<f64>,
        #[arg(long = "type", value_enum)]
        category: Option<CategoryArg>,
        /// Image file to upload (repeatable)
        #[arg(long = "image", required = true)]
        images: Vec<PathBuf>,
    },

    /// Change fields of a product
    Edit {
        /// Product ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        stock: Option<u32>,
        #[arg(long)]
        length: Option<f64>,
        #[arg(long)]
        breadth: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
        /// Remove the product's dimensions
        #[arg(long, conflicts_with_all = ["length", "breadth", "height"])]
        clear_size: bool,
        #[arg(long = "type", value_enum)]
        category: Option<CategoryArg>,
    },

    /// Delete a product and its images
    Delete {
        /// Product ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so rendered views stay clean on stdout
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let api = CatalogClient::new(&cli.api_url)?;
    tracing::debug!("Using catalog API at {}", api.base_url());

    match cli.command {
        Command::List => {
            let gallery = Gallery::load(&api).await?;
            print!("{}", gallery.render(&api));
        }
        Command::Show { id } => {
            let view = DetailView::load(&api, &id).await?;
            print!("{}", view.render(&api));
        }
        Command::Add {
            name,
            price,
            stock,
            length,
            breadth,
            height,
            category,
            images,
        } => {
            let mut form = AddForm::new();
            let fields = form.fields_mut();
            fields.name = name;
            fields.price = price.to_string();
            fields.stock = stock.to_string();
            fields.length = length.map(|v| v.to_string()).unwrap_or_default();
            fields.breadth = breadth.map(|v| v.to_string()).unwrap_or_default();
            fields.height = height.map(|v| v.to_string()).unwrap_or_default();
            fields.category = category
                .map(|c| Category::from(c).to_string())
                .unwrap_or_default();
            for path in &images {
                form.add_image(ImageFile::read(path).await?);
            }

            let added = form.submit(&api).await;
            report(form.take_notice())?;
            if let Some(product) = added {
                println!("{}", product.id);
            }
        }
        Command::Edit {
            id,
            name,
            price,
            stock,
            length,
            breadth,
            height,
            clear_size,
            category,
        } => {
            let mut view = DetailView::load(&api, &id).await?;
            let size = if clear_size {
                None
            } else {
                edited_size(view.product().size, length, breadth, height)?
            };

            view.toggle_edit();
            if let Some(form) = view.form_mut() {
                if let Some(name) = name {
                    form.name = name;
                }
                if let Some(price) = price {
                    form.price = price;
                }
                if let Some(stock) = stock {
                    form.stock = stock;
                }
                if let Some(category) = category {
                    form.category = category.into();
                }
                form.size = size;
            }

            view.submit(&api).await;
            report(view.take_notice())?;
            print!("{}", view.render(&api));
        }
        Command::Delete { id, yes } => {
            let mut gallery = Gallery::load(&api).await?;
            gallery
                .delete(&api, &id, |product| yes || confirm_delete(product))
                .await;
            report(gallery.take_notice())?;
        }
    }

    Ok(())
}

/// Dimensions after applying the sides given on the command line
///
/// Sides that are not given keep their current value. A product without
/// dimensions needs all three.
fn edited_size(
    current: Option<Dimensions>,
    length: Option<f64>,
    breadth: Option<f64>,
    height: Option<f64>,
) -> Result<Option<Dimensions>> {
    if length.is_none() && breadth.is_none() && height.is_none() {
        return Ok(current);
    }

    match current {
        Some(current) => Ok(Some(Dimensions {
            length: length.unwrap_or(current.length),
            breadth: breadth.unwrap_or(current.breadth),
            height: height.unwrap_or(current.height),
        })),
        None => match (length, breadth, height) {
            (Some(length), Some(breadth), Some(height)) => Ok(Some(Dimensions {
                length,
                breadth,
                height,
            })),
            _ => anyhow::bail!(
                "This product has no dimensions yet; give --length, --breadth and --height together"
            ),
        },
    }
}

/// Print a success notice, turn a failure notice into an error
fn report(notice: Option<Notice>) -> Result<()> {
    match notice {
        Some(Notice::Failure(msg)) => anyhow::bail!(msg),
        Some(notice) => {
            println!("{}", notice);
            Ok(())
        }
        None => Ok(()),
    }
}

fn confirm_delete(product: &Product) -> bool {
    print!("{} ({}) [y/N] ", DELETE_PROMPT, product.name);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer).context("Failed to read answer") {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(e) => {
            tracing::warn!("{:#}", e);
            false
        }
    }
}
