use crate::common::ValidationError;

/// One quest title in a category's catalog worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestCatalogEntry {
    pub category: String,
    pub quest_title: String,
    /// 0-based position below the header; carried as the dropdown value
    pub sequence_index: usize,
}

/// Quests of one category, in worksheet order, header excluded.
#[derive(Debug, Clone)]
pub struct QuestCatalog {
    pub category: String,
    pub entries: Vec<QuestCatalogEntry>,
}

impl QuestCatalog {
    /// Build from the worksheet's first column (header included).
    ///
    /// Fewer than two rows means there is no quest below the header.
    pub fn from_column(category: &str, column: Vec<String>) -> Result<Self, ValidationError> {
        if column.len() < 2 {
            return Err(ValidationError::EmptyCatalog(category.to_string()));
        }

        let entries = column
            .into_iter()
            .skip(1)
            .enumerate()
            .map(|(sequence_index, quest_title)| QuestCatalogEntry {
                category: category.to_string(),
                quest_title,
                sequence_index,
            })
            .collect();

        Ok(Self {
            category: category.to_string(),
            entries,
        })
    }

    pub fn titles(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.quest_title.clone()).collect()
    }

    pub fn get(&self, index: usize) -> Option<&QuestCatalogEntry> {
        self.entries.get(index)
    }

    /// Exact, untruncated title match.
    pub fn contains(&self, quest_title: &str) -> bool {
        self.entries.iter().any(|e| e.quest_title == quest_title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_header_is_excluded() {
        let catalog =
            QuestCatalog::from_column("BeginnerQuests", column(&["Quest", "No_1", "No_2"])).unwrap();
        assert_eq!(catalog.titles(), vec!["No_1", "No_2"]);
        assert_eq!(catalog.get(1).unwrap().sequence_index, 1);
    }

    #[test]
    fn test_header_only_is_empty_catalog() {
        let err = QuestCatalog::from_column("BeginnerQuests", column(&["Quest"])).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyCatalog(c) if c == "BeginnerQuests"));
        assert!(QuestCatalog::from_column("BeginnerQuests", vec![]).is_err());
    }

    #[test]
    fn test_contains_uses_full_title() {
        let long = "x".repeat(150);
        let catalog = QuestCatalog::from_column("C", vec!["Quest".into(), long.clone()]).unwrap();
        assert!(catalog.contains(&long));
        assert!(!catalog.contains(&long[..100]));
    }
}
