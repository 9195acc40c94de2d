//! CLI commands for the packing checklist.
//!
//! Each mutating command is one editing action: fetch the selected list,
//! seed the checklist store, apply a single mutation, then synchronize the
//! affected category and report the resulting status.

pub mod config_cmd;
pub mod item_cmd;
pub mod lists;
pub mod show;
pub mod sync_cmd;

pub use config_cmd::ConfigCommand;
pub use item_cmd::ItemCommand;
pub use lists::ListsCommand;
pub use show::ShowCommand;
pub use sync_cmd::SyncCommand;

use std::sync::{Arc, Mutex};

use uuid::Uuid;

use pack_lightly_core::{
    ApiClient, Category, ChecklistStore, PackingList, SaveStatus, SyncEngine,
};

use crate::config::Config;

/// Resolve the target list from the command line or the configured default.
pub(crate) fn resolve_list_id(
    arg: Option<Uuid>,
    config: &Config,
) -> Result<Uuid, Box<dyn std::error::Error>> {
    arg.or(config.default_list).ok_or_else(|| {
        "No packing list selected. Pass --list <id> or set default_list in config.".into()
    })
}

/// Fetch the list document and build a seeded engine for this invocation.
pub(crate) async fn open_session(
    api: &ApiClient,
    list_id: Uuid,
) -> Result<(SyncEngine, PackingList), Box<dyn std::error::Error>> {
    let list = api.fetch_packing_list(list_id).await?;
    tracing::debug!("loaded list '{}' with {} item(s)", list.title, list.item_count());
    let store = Arc::new(Mutex::new(ChecklistStore::new()));
    let engine = SyncEngine::new(store, Arc::new(api.clone()), list_id);
    engine.seed(&list);
    Ok((engine, list))
}

/// Focus a category and run one mutation against the shared store.
pub(crate) fn edit_category<R>(
    engine: &SyncEngine,
    category: &Category,
    mutate: impl FnOnce(&mut ChecklistStore) -> R,
) -> R {
    let store = engine.store();
    let mut store = store.lock().unwrap();
    store.set_active_category(Some(category.clone()));
    mutate(&mut store)
}

/// Synchronize one category and translate the resulting status for the
/// terminal. The engine swallows failures into the status flag, so a
/// short-lived process has to look at the flag to know whether to exit
/// nonzero.
pub(crate) async fn sync_and_report(
    engine: &SyncEngine,
    category: &Category,
) -> Result<(), Box<dyn std::error::Error>> {
    engine.sync_category(category.clone()).await?;
    match engine.status(category) {
        Some(SaveStatus::Error) => Err(format!("Failed to save category '{}'", category).into()),
        _ => {
            println!("Saved {}.", category);
            Ok(())
        }
    }
}

/// Categories of a list in display order: the standard six first, then
/// custom categories alphabetically.
pub(crate) fn display_order(categories: &[Category]) -> Vec<Category> {
    let mut ordered: Vec<Category> = Category::STANDARD
        .iter()
        .filter(|c| categories.contains(*c))
        .cloned()
        .collect();
    let mut custom: Vec<Category> = categories
        .iter()
        .filter(|c| !Category::STANDARD.contains(*c))
        .cloned()
        .collect();
    custom.sort_by(|a, b| a.name().to_lowercase().cmp(&b.name().to_lowercase()));
    ordered.extend(custom);
    ordered
}
