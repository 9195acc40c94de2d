//! Manually re-push categories to the server.

use clap::Args;
use uuid::Uuid;

use pack_lightly_core::{ApiClient, Category, SaveStatus};

use super::{display_order, open_session, resolve_list_id};
use crate::config::Config;

#[derive(Args)]
pub struct SyncCommand {
    /// Packing list id (defaults to config default_list)
    #[arg(long, short)]
    pub list: Option<Uuid>,

    /// Sync only one category
    #[arg(long, short)]
    pub category: Option<String>,
}

impl SyncCommand {
    pub async fn run(
        &self,
        api: &ApiClient,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let list_id = resolve_list_id(self.list, config)?;
        let (engine, list) = open_session(api, list_id).await?;

        let categories: Vec<Category> = match &self.category {
            Some(name) => vec![Category::from(name.clone())],
            None => {
                let store = engine.store();
                let all: Vec<Category> = store.lock().unwrap().categories().cloned().collect();
                display_order(&all)
            }
        };

        println!("Syncing '{}'...", list.title);
        let handles: Vec<_> = categories
            .iter()
            .map(|c| engine.sync_category(c.clone()))
            .collect();
        for handle in handles {
            handle.await?;
        }

        let mut failed = 0;
        for category in &categories {
            let status = engine.status(category);
            let label = match status {
                Some(SaveStatus::Error) => {
                    failed += 1;
                    "error"
                }
                _ => "saved",
            };
            println!("  {:<20} {}", category.to_string(), label);
        }

        if failed > 0 {
            return Err(format!("{} categor(ies) failed to sync", failed).into());
        }
        Ok(())
    }
}
