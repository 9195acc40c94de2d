//! List the user's packing lists.

use clap::{Args, ValueEnum};

use pack_lightly_core::ApiClient;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args)]
pub struct ListsCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ListsCommand {
    pub async fn run(&self, api: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
        let lists = api.fetch_packing_lists().await?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&lists)?);
            }
            OutputFormat::Table => {
                if lists.is_empty() {
                    println!("No packing lists yet.");
                    return Ok(());
                }
                println!("{:<38} {:<28} {:<20} UPDATED", "ID", "TITLE", "DESTINATION");
                for list in lists {
                    println!(
                        "{:<38} {:<28} {:<20} {}",
                        list.id,
                        list.title,
                        list.destination.as_deref().unwrap_or("-"),
                        list.updated_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }

        Ok(())
    }
}
