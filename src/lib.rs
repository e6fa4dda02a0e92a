use std::fmt;

use serde::{Deserialize, Serialize};

pub mod config;
pub mod controller;
pub mod dialog;
pub mod error;
pub mod format;
pub mod listing;
pub mod runtime;
pub mod selection;
pub mod toast;
pub mod transfer;
pub mod upload;
pub mod view;

/// Server-assigned identifier of a stored file.
///
/// The REST service sends numeric ids, but any JSON string is accepted as well.
/// An id serializes back in the JSON form it was read from, so `"7"` and `7` differ.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFileId", into = "RawFileId")]
pub struct FileId(RawFileId);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            RawFileId::Number(n) => write!(f, "{}", n),
            RawFileId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for FileId {
    fn from(id: u64) -> Self {
        Self(RawFileId::Number(id))
    }
}

impl From<&str> for FileId {
    fn from(id: &str) -> Self {
        Self(RawFileId::Text(id.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
enum RawFileId {
    Number(u64),
    Text(String),
}

impl TryFrom<RawFileId> for FileId {
    type Error = String;

    fn try_from(raw: RawFileId) -> Result<Self, Self::Error> {
        match raw {
            RawFileId::Text(s) if s.is_empty() => Err("file id must not be empty".to_string()),
            raw => Ok(FileId(raw)),
        }
    }
}

impl From<FileId> for RawFileId {
    fn from(id: FileId) -> Self {
        id.0
    }
}

/// Metadata entry for one stored file, as listed by `GET {base}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: FileId,
    pub file_name: String,
    #[serde(default)]
    pub file_type: Option<String>,
    pub file_size: u64,
    #[serde(default)]
    pub upload_date_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

/// JSON body the service sends with a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub error: String,
    pub message: String,
}

#[cfg(feature = "frontend")]
pub mod frontend;

#[cfg(feature = "frontend")]
pub use frontend::run;

#[cfg(feature = "server")]
pub mod server;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn file_record_parses_service_listing() {
        let json = r#"[{"id":1,"fileName":"a.txt","fileType":"text/plain","fileSize":0,
            "downloadUrl":"http://localhost:8080/api/files/1",
            "uploadDateTime":"2024-01-01T00:00:00Z"}]"#;
        let records: Vec<FileRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(
            records,
            vec![FileRecord {
                id: FileId::from(1),
                file_name: "a.txt".to_string(),
                file_type: Some("text/plain".to_string()),
                file_size: 0,
                upload_date_time: "2024-01-01T00:00:00Z".to_string(),
                download_url: Some("http://localhost:8080/api/files/1".to_string()),
            }]
        );
    }

    #[test]
    fn file_record_tolerates_missing_type_and_string_ids() {
        let json = r#"{"id":"abc","fileName":"x","fileType":null,"fileSize":5}"#;
        let record: FileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, FileId::from("abc"));
        assert_eq!(record.file_type, None);
        assert_eq!(record.upload_date_time, "");
    }

    #[test]
    fn numeric_ids_serialize_back_as_numbers() {
        let value = serde_json::to_value(FileId::from(42)).unwrap();
        assert_eq!(value, serde_json::json!(42));
        let value = serde_json::to_value(FileId::from("k-9")).unwrap();
        assert_eq!(value, serde_json::json!("k-9"));
    }

    #[test]
    fn numeric_looking_string_ids_stay_strings() {
        let id: FileId = serde_json::from_str(r#""007""#).unwrap();
        assert_eq!(id.to_string(), "007");
        assert_ne!(id, FileId::from(7));
        assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("007"));
    }

    #[test]
    fn empty_string_id_is_rejected() {
        assert!(serde_json::from_str::<FileId>(r#""""#).is_err());
    }
}
