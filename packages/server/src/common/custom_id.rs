//! Component custom ids.
//!
//! Every button, select and modal we post carries a custom id that routes the
//! resulting interaction back to an action:
//!
//! | custom id                | origin                         |
//! |--------------------------|--------------------------------|
//! | `category:<name>`        | intake panel button            |
//! | `quest:<name>`           | quest dropdown (value = index) |
//! | `intake:<name>:<index>`  | player-name modal              |
//! | `approve:<submission>`   | review surface button          |
//! | `reject:<submission>`    | review surface button          |

use std::fmt::{self, Display};

use super::SubmissionId;

pub const CATEGORY_PREFIX: &str = "category:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentAction {
    Category(String),
    QuestSelect(String),
    Intake { category: String, index: usize },
    Approve(SubmissionId),
    Reject(SubmissionId),
}

impl ComponentAction {
    /// Parse a custom id. Unknown or malformed ids yield `None`.
    pub fn parse(custom_id: &str) -> Option<Self> {
        let (kind, rest) = custom_id.split_once(':')?;
        match kind {
            "category" if !rest.is_empty() => Some(Self::Category(rest.to_string())),
            "quest" if !rest.is_empty() => Some(Self::QuestSelect(rest.to_string())),
            "intake" => {
                // Category names may contain ':'; the index never does
                let (category, index) = rest.rsplit_once(':')?;
                if category.is_empty() {
                    return None;
                }
                Some(Self::Intake {
                    category: category.to_string(),
                    index: index.parse().ok()?,
                })
            }
            "approve" => rest.parse().ok().map(Self::Approve),
            "reject" => rest.parse().ok().map(Self::Reject),
            _ => None,
        }
    }
}

impl Display for ComponentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(name) => write!(f, "{}{}", CATEGORY_PREFIX, name),
            Self::QuestSelect(name) => write!(f, "quest:{}", name),
            Self::Intake { category, index } => write!(f, "intake:{}:{}", category, index),
            Self::Approve(id) => write!(f, "approve:{}", id),
            Self::Reject(id) => write!(f, "reject:{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_what_we_format() {
        let id = SubmissionId::new();
        let actions = [
            ComponentAction::Category("MOONLOCK Lv.1".into()),
            ComponentAction::QuestSelect("BeginnerQuests".into()),
            ComponentAction::Intake {
                category: "BeginnerQuests".into(),
                index: 12,
            },
            ComponentAction::Approve(id),
            ComponentAction::Reject(id),
        ];
        for action in actions {
            assert_eq!(ComponentAction::parse(&action.to_string()), Some(action));
        }
    }

    #[test]
    fn test_intake_category_may_contain_colons() {
        assert_eq!(
            ComponentAction::parse("intake:Event: Winter:3"),
            Some(ComponentAction::Intake {
                category: "Event: Winter".into(),
                index: 3
            })
        );
    }

    #[test]
    fn test_rejects_malformed_ids() {
        assert_eq!(ComponentAction::parse("approve:not-a-uuid"), None);
        assert_eq!(ComponentAction::parse("intake:BeginnerQuests:x"), None);
        assert_eq!(ComponentAction::parse("category:"), None);
        assert_eq!(ComponentAction::parse("sheet_BeginnerQuests"), None);
    }
}
