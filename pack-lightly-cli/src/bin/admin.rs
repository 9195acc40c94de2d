//! PackLightly Admin CLI
//!
//! Back-office tool for managing the product inventory, news articles and
//! users through the admin endpoints of the PackLightly API.
//!
//! # Usage
//!
//! ```bash
//! pack-admin product add "Bamboo Cutlery Set" --price 12.50 --eco --stock 40
//! pack-admin news add "Pack light, travel far" --body "..." --publish
//! pack-admin user role ana@example.com admin
//! ```
//!
//! # Environment Variables
//!
//! - `PACK_API_URL`: API base URL (default: https://api.packlightly.app)
//! - `PACK_API_TOKEN`: admin bearer token (required)

use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use uuid::Uuid;

use pack_lightly_core::{
    ApiClient, ArticleUpdate, NewArticle, NewProduct, ProductUpdate, Role, StaticToken, User,
};

// ============================================================================
// CLI Structure
// ============================================================================

#[derive(Parser)]
#[command(name = "pack-admin")]
#[command(version)]
#[command(about = "PackLightly back-office administration tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the product inventory
    Product(ProductCommand),

    /// Manage news articles
    News(NewsCommand),

    /// Manage users
    User(UserCommand),
}

#[derive(Args)]
struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Subcommand)]
enum ProductSubcommand {
    /// List all products
    List,
    /// Add a new product
    Add {
        /// Product name
        name: String,
        /// Price
        #[arg(long)]
        price: f64,
        /// Description
        #[arg(long, short)]
        description: Option<String>,
        /// Certified eco-friendly
        #[arg(long)]
        eco: bool,
        /// Units in stock
        #[arg(long, short, default_value_t = 0)]
        stock: u32,
    },
    /// Update an existing product
    Update {
        /// Product id
        id: Uuid,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New price
        #[arg(long)]
        price: Option<f64>,
        /// New description
        #[arg(long, short)]
        description: Option<String>,
        /// New eco flag (true/false)
        #[arg(long)]
        eco: Option<bool>,
        /// New stock count
        #[arg(long, short)]
        stock: Option<u32>,
    },
    /// Remove a product
    Remove {
        /// Product id
        id: Uuid,
    },
}

#[derive(Args)]
struct NewsCommand {
    #[command(subcommand)]
    command: NewsSubcommand,
}

#[derive(Subcommand)]
enum NewsSubcommand {
    /// List all articles (drafts included)
    List,
    /// Add a new article
    Add {
        /// Article title
        title: String,
        /// Article body
        #[arg(long, short)]
        body: String,
        /// Publish immediately instead of saving a draft
        #[arg(long)]
        publish: bool,
    },
    /// Publish a draft
    Publish {
        /// Article id
        id: Uuid,
    },
    /// Take a published article offline
    Unpublish {
        /// Article id
        id: Uuid,
    },
    /// Remove an article
    Remove {
        /// Article id
        id: Uuid,
    },
}

#[derive(Args)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Subcommand)]
enum UserSubcommand {
    /// List all users
    List,
    /// Change a user's role
    Role {
        /// User's email address
        email: String,
        /// New role (admin or member)
        role: Role,
    },
    /// Remove a user
    Remove {
        /// User's email address
        email: String,
    },
}

// ============================================================================
// API access
// ============================================================================

/// Build the API client from environment variables.
fn api_client() -> Result<ApiClient, Box<dyn std::error::Error>> {
    let base_url = std::env::var("PACK_API_URL")
        .unwrap_or_else(|_| "https://api.packlightly.app".to_string());
    let token = std::env::var("PACK_API_TOKEN")
        .map_err(|_| "PACK_API_TOKEN is not set. Export an admin bearer token first.")?;

    Ok(ApiClient::new(base_url, Arc::new(StaticToken::new(token))))
}

/// Users are addressed by email on the command line; resolve to the record.
async fn find_user(api: &ApiClient, email: &str) -> Result<User, Box<dyn std::error::Error>> {
    let users = api.list_users().await?;
    users
        .into_iter()
        .find(|u| u.email.eq_ignore_ascii_case(email))
        .ok_or_else(|| format!("No user with email '{}'", email).into())
}

// ============================================================================
// Commands
// ============================================================================

async fn run_product(
    api: &ApiClient,
    command: &ProductSubcommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        ProductSubcommand::List => {
            let products = api.list_products().await?;
            if products.is_empty() {
                println!("No products.");
                return Ok(());
            }
            for product in products {
                println!("{}  {}", product.id, product);
            }
            Ok(())
        }
        ProductSubcommand::Add {
            name,
            price,
            description,
            eco,
            stock,
        } => {
            let new_product = NewProduct {
                name: name.clone(),
                description: description.clone(),
                price: *price,
                eco: *eco,
                stock: *stock,
            };
            let product = api.create_product(&new_product).await?;
            println!("Added product: {}", product.name);
            println!("  Id: {}", product.id);
            Ok(())
        }
        ProductSubcommand::Update {
            id,
            name,
            price,
            description,
            eco,
            stock,
        } => {
            let update = ProductUpdate {
                name: name.clone(),
                description: description.clone(),
                price: *price,
                eco: *eco,
                stock: *stock,
            };
            if update.is_empty() {
                return Err("Nothing to update.".into());
            }
            let product = api.update_product(*id, &update).await?;
            println!("Updated product: {}", product);
            Ok(())
        }
        ProductSubcommand::Remove { id } => {
            api.delete_product(*id).await?;
            println!("Removed product {}", id);
            Ok(())
        }
    }
}

async fn run_news(
    api: &ApiClient,
    command: &NewsSubcommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        NewsSubcommand::List => {
            let articles = api.list_articles().await?;
            if articles.is_empty() {
                println!("No articles.");
                return Ok(());
            }
            for article in articles {
                let state = if article.published { "published" } else { "draft" };
                println!("{}  [{}] {}", article.id, state, article.title);
            }
            Ok(())
        }
        NewsSubcommand::Add {
            title,
            body,
            publish,
        } => {
            let mut article = NewArticle::draft(title.clone(), body.clone());
            article.published = *publish;
            let created = api.create_article(&article).await?;
            println!("Added article: {}", created.title);
            println!("  Id: {}", created.id);
            println!("  State: {}", if created.published { "published" } else { "draft" });
            Ok(())
        }
        NewsSubcommand::Publish { id } => {
            let update = ArticleUpdate {
                published: Some(true),
                ..Default::default()
            };
            let article = api.update_article(*id, &update).await?;
            println!("Published '{}'", article.title);
            Ok(())
        }
        NewsSubcommand::Unpublish { id } => {
            let update = ArticleUpdate {
                published: Some(false),
                ..Default::default()
            };
            let article = api.update_article(*id, &update).await?;
            println!("Unpublished '{}'", article.title);
            Ok(())
        }
        NewsSubcommand::Remove { id } => {
            api.delete_article(*id).await?;
            println!("Removed article {}", id);
            Ok(())
        }
    }
}

async fn run_user(
    api: &ApiClient,
    command: &UserSubcommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        UserSubcommand::List => {
            let users = api.list_users().await?;
            if users.is_empty() {
                println!("No users.");
                return Ok(());
            }
            println!("{:<38} {:<30} ROLE", "ID", "EMAIL");
            for user in users {
                println!("{:<38} {:<30} {}", user.id, user.email, user.role);
            }
            Ok(())
        }
        UserSubcommand::Role { email, role } => {
            let user = find_user(api, email).await?;
            let updated = api.update_user_role(user.id, *role).await?;
            println!("{} is now {}", updated.email, updated.role);
            Ok(())
        }
        UserSubcommand::Remove { email } => {
            let user = find_user(api, email).await?;
            api.delete_user(user.id).await?;
            println!("Removed user {}", email);
            Ok(())
        }
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let api = api_client()?;

    match &cli.command {
        Commands::Product(cmd) => run_product(&api, &cmd.command).await,
        Commands::News(cmd) => run_news(&api, &cmd.command).await,
        Commands::User(cmd) => run_user(&api, &cmd.command).await,
    }
}
