//! Render the checklist for one packing list.

use clap::{Args, ValueEnum};
use uuid::Uuid;

use pack_lightly_core::{ApiClient, Category};

use super::{display_order, open_session, resolve_list_id};
use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args)]
pub struct ShowCommand {
    /// Packing list id (defaults to config default_list)
    #[arg(long, short)]
    pub list: Option<Uuid>,

    /// Show only one category
    #[arg(long, short)]
    pub category: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ShowCommand {
    pub async fn run(
        &self,
        api: &ApiClient,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let list_id = resolve_list_id(self.list, config)?;
        let (engine, list) = open_session(api, list_id).await?;
        let store = engine.store();
        let mut store = store.lock().unwrap();

        let all: Vec<Category> = store.categories().cloned().collect();
        let selected: Vec<Category> = match &self.category {
            Some(name) => {
                let category = Category::from(name.clone());
                store.set_active_category(Some(category.clone()));
                vec![category]
            }
            None => display_order(&all),
        };

        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "id": list.id,
                    "title": list.title,
                    "destination": list.destination,
                    "categories": selected.iter().map(|c| {
                        serde_json::json!({
                            "name": c,
                            "items": store.visible_items(c),
                        })
                    }).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                print!("{}", list);
                for category in &selected {
                    let items = store.visible_items(category);
                    println!("\n{}", category);
                    if items.is_empty() {
                        println!("  (empty)");
                    }
                    for item in items {
                        println!("  {}", item);
                    }
                }
            }
        }

        Ok(())
    }
}
