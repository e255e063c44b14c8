use tracing::debug;

use crate::common::{IntakeError, ValidationError};
use crate::domains::quests::models::QuestCatalog;
use crate::kernel::ServerDeps;

/// Configured categories, in panel order.
pub fn list_categories(deps: &ServerDeps) -> &[String] {
    &deps.settings.categories
}

/// Load a category's catalog worksheet. Not cached; reviewers edit the sheet live.
pub async fn load_catalog(category: &str, deps: &ServerDeps) -> Result<QuestCatalog, IntakeError> {
    if !list_categories(deps).iter().any(|c| c == category) {
        return Err(ValidationError::UnknownCategory(category.to_string()).into());
    }

    let column = deps.sheets.first_column(category).await?;
    let catalog = QuestCatalog::from_column(category, column)?;
    debug!(category, quests = catalog.entries.len(), "Loaded quest catalog");
    Ok(catalog)
}

pub async fn list_quests(category: &str, deps: &ServerDeps) -> Result<Vec<String>, IntakeError> {
    Ok(load_catalog(category, deps).await?.titles())
}

/// Resolve a dropdown selection back to the full quest title.
pub async fn quest_at(category: &str, index: usize, deps: &ServerDeps) -> Result<String, IntakeError> {
    let catalog = load_catalog(category, deps).await?;
    catalog
        .get(index)
        .map(|e| e.quest_title.clone())
        .ok_or_else(|| {
            ValidationError::UnknownQuest {
                category: category.to_string(),
                quest: format!("#{}", index),
            }
            .into()
        })
}
