//! Row model of the file list.
//!
//! Rows are rebuilt from scratch on every render, in the order the service
//! returned the records.

use crate::format::{file_type_label, format_date, format_file_size};
use crate::selection::Selection;
use crate::{FileId, FileRecord};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRow {
    pub id: FileId,
    pub name: String,
    pub type_label: String,
    pub size_label: String,
    pub date_label: String,
    pub checked: bool,
}

impl FileRow {
    pub fn new(record: &FileRecord, checked: bool) -> Self {
        Self {
            id: record.id.clone(),
            name: record.file_name.clone(),
            type_label: file_type_label(record.file_type.as_deref()),
            size_label: format_file_size(record.file_size),
            date_label: format_date(&record.upload_date_time),
            checked,
        }
    }
}

/// Everything the files panel needs to draw itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub rows: Vec<FileRow>,
    pub all_checked: bool,
    pub selected: usize,
}

impl Listing {
    pub fn build(files: &[FileRecord], selection: &Selection) -> Self {
        Self {
            rows: files
                .iter()
                .map(|record| FileRow::new(record, selection.contains(&record.id)))
                .collect(),
            all_checked: selection.is_all_checked(),
            selected: selection.size(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn bulk_delete_visible(&self) -> bool {
        self.selected > 0
    }

    pub fn bulk_delete_label(&self) -> String {
        format!("Delete Selected ({})", self.selected)
    }
}
