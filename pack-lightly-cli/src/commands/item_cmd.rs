//! Item editing commands.
//!
//! These are the checklist editor actions: every one applies a single
//! store mutation and immediately synchronizes the affected category.
//! There is no batching; one action, one network call.

use clap::{Args, Subcommand};
use uuid::Uuid;

use pack_lightly_core::{ApiClient, Category, Item, ItemUpdate};

use super::{edit_category, open_session, resolve_list_id, sync_and_report};
use crate::config::Config;

#[derive(Args)]
pub struct ItemCommand {
    #[command(subcommand)]
    pub command: ItemSubcommand,
}

#[derive(Subcommand)]
pub enum ItemSubcommand {
    /// Add an item to a category
    Add {
        /// Item name
        name: String,

        /// Category to add to
        #[arg(long, short)]
        category: String,

        /// How many to pack
        #[arg(long, short, default_value_t = 1)]
        qty: u32,

        /// Mark as an eco-friendly choice
        #[arg(long)]
        eco: bool,

        /// Packing list id (defaults to config default_list)
        #[arg(long, short)]
        list: Option<Uuid>,
    },

    /// Remove an item from a category
    Remove {
        /// Item name
        name: String,

        /// Category to remove from
        #[arg(long, short)]
        category: String,

        /// Packing list id (defaults to config default_list)
        #[arg(long, short)]
        list: Option<Uuid>,
    },

    /// Mark an item as packed
    Check {
        /// Item name
        name: String,

        /// Category the item is in
        #[arg(long, short)]
        category: String,

        /// Packing list id (defaults to config default_list)
        #[arg(long, short)]
        list: Option<Uuid>,
    },

    /// Mark an item as not packed
    Uncheck {
        /// Item name
        name: String,

        /// Category the item is in
        #[arg(long, short)]
        category: String,

        /// Packing list id (defaults to config default_list)
        #[arg(long, short)]
        list: Option<Uuid>,
    },

    /// Mark every item in a category as packed
    CheckAll {
        /// Category to check off
        #[arg(long, short)]
        category: String,

        /// Packing list id (defaults to config default_list)
        #[arg(long, short)]
        list: Option<Uuid>,
    },

    /// Mark every item in a category as not packed
    UncheckAll {
        /// Category to reset
        #[arg(long, short)]
        category: String,

        /// Packing list id (defaults to config default_list)
        #[arg(long, short)]
        list: Option<Uuid>,
    },

    /// Update quantity or eco flag of an item
    Update {
        /// Item name
        name: String,

        /// Category the item is in
        #[arg(long, short)]
        category: String,

        /// New quantity
        #[arg(long, short)]
        qty: Option<u32>,

        /// New eco flag (true/false)
        #[arg(long)]
        eco: Option<bool>,

        /// Packing list id (defaults to config default_list)
        #[arg(long, short)]
        list: Option<Uuid>,
    },
}

impl ItemCommand {
    pub async fn run(
        &self,
        api: &ApiClient,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ItemSubcommand::Add {
                name,
                category,
                qty,
                eco,
                list,
            } => {
                let list_id = resolve_list_id(*list, config)?;
                let (engine, _) = open_session(api, list_id).await?;
                let category = Category::from(category.clone());

                let item = Item::new(name.clone()).with_quantity(*qty).with_eco(*eco);
                let added = edit_category(&engine, &category, |store| {
                    store.add_item(&category, item)
                });
                if !added {
                    println!("'{}' is already in {}.", name, category);
                }
                sync_and_report(&engine, &category).await
            }

            ItemSubcommand::Remove {
                name,
                category,
                list,
            } => {
                let list_id = resolve_list_id(*list, config)?;
                let (engine, _) = open_session(api, list_id).await?;
                let category = Category::from(category.clone());

                let removed = edit_category(&engine, &category, |store| {
                    store.remove_item(&category, name)
                });
                if !removed {
                    println!("No item named '{}' in {}.", name, category);
                }
                sync_and_report(&engine, &category).await
            }

            ItemSubcommand::Check {
                name,
                category,
                list,
            } => self.toggle(api, config, name, category, *list, true).await,

            ItemSubcommand::Uncheck {
                name,
                category,
                list,
            } => self.toggle(api, config, name, category, *list, false).await,

            ItemSubcommand::CheckAll { category, list } => {
                let list_id = resolve_list_id(*list, config)?;
                let (engine, _) = open_session(api, list_id).await?;
                let category = Category::from(category.clone());

                edit_category(&engine, &category, |store| store.check_all(&category));
                sync_and_report(&engine, &category).await
            }

            ItemSubcommand::UncheckAll { category, list } => {
                let list_id = resolve_list_id(*list, config)?;
                let (engine, _) = open_session(api, list_id).await?;
                let category = Category::from(category.clone());

                edit_category(&engine, &category, |store| store.uncheck_all(&category));
                sync_and_report(&engine, &category).await
            }

            ItemSubcommand::Update {
                name,
                category,
                qty,
                eco,
                list,
            } => {
                let update = ItemUpdate {
                    quantity: *qty,
                    eco: *eco,
                    ..Default::default()
                };
                if update.is_empty() {
                    return Err("Nothing to update. Pass --qty and/or --eco.".into());
                }

                let list_id = resolve_list_id(*list, config)?;
                let (engine, _) = open_session(api, list_id).await?;
                let category = Category::from(category.clone());

                let updated = edit_category(&engine, &category, |store| {
                    store.update_item(&category, name, &update)
                });
                if !updated {
                    println!("No item named '{}' in {}.", name, category);
                }
                sync_and_report(&engine, &category).await
            }
        }
    }

    async fn toggle(
        &self,
        api: &ApiClient,
        config: &Config,
        name: &str,
        category: &str,
        list: Option<Uuid>,
        checked: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let list_id = resolve_list_id(list, config)?;
        let (engine, _) = open_session(api, list_id).await?;
        let category = Category::from(category.to_string());

        let toggled = edit_category(&engine, &category, |store| {
            store.toggle_item(&category, name, checked)
        });
        if !toggled {
            println!("No item named '{}' in {}.", name, category);
        }
        sync_and_report(&engine, &category).await
    }
}
