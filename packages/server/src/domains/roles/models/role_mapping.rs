use crate::common::RoleId;

/// Matching key for a quest title: everything before the first `(`, trimmed.
///
/// `"No_3 (collect 10 herbs)"` and `"No_3"` share the key `"No_3"`.
pub fn normalize_quest_key(raw: &str) -> &str {
    raw.split('(').next().unwrap_or_default().trim()
}

/// A validated `{key, roleId}` pair from a lookup sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMapping {
    /// Lookup sheet the row came from (tiers are identified by sheet)
    pub sheet: String,
    pub quest_key: String,
    pub role_id: RoleId,
}

/// A lookup row whose key is present but whose role id is unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRow {
    pub sheet: String,
    /// 1-based row number as shown in the spreadsheet
    pub row: usize,
    pub quest_key: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupEntry {
    Mapped(RoleMapping),
    Malformed(MalformedRow),
}

impl LookupEntry {
    pub fn quest_key(&self) -> &str {
        match self {
            Self::Mapped(m) => &m.quest_key,
            Self::Malformed(m) => &m.quest_key,
        }
    }
}

/// One lookup sheet loaded into typed entries, in row order.
#[derive(Debug, Clone)]
pub struct LookupSheet {
    pub title: String,
    pub entries: Vec<LookupEntry>,
}

impl LookupSheet {
    /// Parse raw rows (header first). Rows with a blank key are skipped.
    pub fn parse(title: &str, rows: &[Vec<String>]) -> Self {
        let entries = rows
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(idx, row)| {
                let quest_key = normalize_quest_key(row.first().map(String::as_str).unwrap_or(""));
                if quest_key.is_empty() {
                    return None;
                }

                let malformed = |reason: String| {
                    LookupEntry::Malformed(MalformedRow {
                        sheet: title.to_string(),
                        row: idx + 1,
                        quest_key: quest_key.to_string(),
                        reason,
                    })
                };

                let entry = match row.get(1).map(|c| c.trim()) {
                    None | Some("") => malformed("missing role id".to_string()),
                    Some(raw) => match RoleId::parse(raw) {
                        Ok(role_id) => LookupEntry::Mapped(RoleMapping {
                            sheet: title.to_string(),
                            quest_key: quest_key.to_string(),
                            role_id,
                        }),
                        Err(_) => malformed(format!("role id `{}` is not numeric", raw)),
                    },
                };
                Some(entry)
            })
            .collect();

        Self {
            title: title.to_string(),
            entries,
        }
    }

    /// First entry whose key equals the normalized quest title.
    pub fn find(&self, quest_title: &str) -> Option<&LookupEntry> {
        let key = normalize_quest_key(quest_title);
        self.entries.iter().find(|e| e.quest_key() == key)
    }

    pub fn mappings(&self) -> impl Iterator<Item = &RoleMapping> {
        self.entries.iter().filter_map(|e| match e {
            LookupEntry::Mapped(m) => Some(m),
            LookupEntry::Malformed(_) => None,
        })
    }

    pub fn malformed(&self) -> impl Iterator<Item = &MalformedRow> {
        self.entries.iter().filter_map(|e| match e {
            LookupEntry::Malformed(m) => Some(m),
            LookupEntry::Mapped(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_normalize_strips_annotation_and_whitespace() {
        assert_eq!(normalize_quest_key("No_3 (collect herbs)"), "No_3");
        assert_eq!(normalize_quest_key("  No_3  "), "No_3");
        assert_eq!(normalize_quest_key("Mine (a) (b)"), "Mine");
        assert_eq!(normalize_quest_key("(only annotation)"), "");
    }

    #[test]
    fn test_parse_skips_header_and_blank_keys() {
        let sheet = LookupSheet::parse(
            "Role_Beginner",
            &rows(&[&["Quest", "RoleId"], &["No_1 (intro)", "11"], &[""], &["No_2", "12"]]),
        );

        let keys: Vec<_> = sheet.mappings().map(|m| m.quest_key.as_str()).collect();
        assert_eq!(keys, vec!["No_1", "No_2"]);
        assert_eq!(sheet.mappings().next().unwrap().role_id, RoleId::new(11));
    }

    #[test]
    fn test_parse_reports_malformed_rows_with_sheet_row_numbers() {
        let sheet = LookupSheet::parse(
            "Role_Beginner",
            &rows(&[&["Quest", "RoleId"], &["No_1", "abc"], &["No_2"]]),
        );

        let bad: Vec<_> = sheet.malformed().collect();
        assert_eq!(bad.len(), 2);
        assert_eq!(bad[0].row, 2);
        assert!(bad[0].reason.contains("abc"));
        assert_eq!(bad[1].row, 3);
        assert_eq!(bad[1].reason, "missing role id");
    }

    #[test]
    fn test_find_matches_on_normalized_key() {
        let sheet = LookupSheet::parse(
            "Role_Beginner",
            &rows(&[&["Quest", "RoleId"], &["No_3 (herbs)", "13"]]),
        );

        assert!(matches!(
            sheet.find("No_3 (anything else)"),
            Some(LookupEntry::Mapped(m)) if m.role_id == RoleId::new(13)
        ));
        assert!(sheet.find("No_4").is_none());
    }
}
