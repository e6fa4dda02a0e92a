//! Yes/no confirmation shared by single and bulk delete.

use crate::FileId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteOne { id: FileId, name: String },
    DeleteMany { ids: Vec<FileId> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub action: ConfirmAction,
}

impl ConfirmDialog {
    pub fn delete_one(id: FileId, name: &str) -> Self {
        Self {
            title: "Delete File".to_string(),
            message: format!("Are you sure you want to delete \"{}\"?", name),
            action: ConfirmAction::DeleteOne {
                id,
                name: name.to_string(),
            },
        }
    }

    pub fn delete_many(ids: Vec<FileId>) -> Self {
        Self {
            title: "Delete Files".to_string(),
            message: format!(
                "Are you sure you want to delete {}?",
                pluralize_files(ids.len())
            ),
            action: ConfirmAction::DeleteMany { ids },
        }
    }
}

/// `1 file`, `3 files`.
pub fn pluralize_files(count: usize) -> String {
    if count == 1 {
        "1 file".to_string()
    } else {
        format!("{} files", count)
    }
}
