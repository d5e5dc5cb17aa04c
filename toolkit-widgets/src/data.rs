//! Searchable view of the toolkit's persisted data.
//!
//! The host stores one JSON document; only the fields the widgets read are
//! modelled here. Import/export keep the document as a raw
//! [`serde_json::Value`] so unmodelled sections (photos, settings) survive.

use crate::error::{WidgetError, WidgetResult};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Item identifier. The web app writes both timestamps and strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl Default for ItemId {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    pub id: ItemId,
    pub title: String,
    /// Rich-text HTML body.
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub id: ItemId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Password entry metadata. The secret itself is never read by the widgets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordEntry {
    pub id: ItemId,
    pub service: String,
    pub username: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlEntry {
    pub id: ItemId,
    pub title: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitData {
    pub notes: Vec<Note>,
    pub contacts: Vec<Contact>,
    pub passwords: Vec<PasswordEntry>,
    pub urls: Vec<UrlEntry>,
}

impl ToolkitData {
    pub fn from_value(value: &serde_json::Value) -> WidgetResult<Self> {
        Ok(Self::deserialize(value)?)
    }

    /// Parses an imported document. Anything that is not a toolkit data
    /// document is an [`WidgetError::InvalidBackup`].
    pub fn from_json(json: &str) -> WidgetResult<Self> {
        serde_json::from_str(json).map_err(WidgetError::InvalidBackup)
    }

    pub fn to_json(&self) -> WidgetResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
            && self.contacts.is_empty()
            && self.passwords.is_empty()
            && self.urls.is_empty()
    }
}

/// Validates an imported backup, returning the document to persist verbatim.
pub fn parse_backup(json: &str) -> WidgetResult<serde_json::Value> {
    serde_json::from_str(json).map_err(WidgetError::InvalidBackup)
}

/// Serializes a stored document for download. `None` means there is nothing to export.
pub fn export_backup(document: Option<&serde_json::Value>) -> WidgetResult<Option<String>> {
    document
        .map(serde_json::to_string)
        .transpose()
        .map_err(WidgetError::from)
}

/// File name offered for a backup taken on `date`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("toolkit-backup-{}.json", date.format("%Y-%m-%d"))
}

/// File name for a backup taken now (UTC date).
pub fn backup_file_name_now() -> String {
    backup_file_name(Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_accept_numbers_and_strings() {
        let data = ToolkitData::from_value(&json!({
            "notes": [
                {"id": 1700000000000_i64, "title": "a", "content": ""},
                {"id": "n-2", "title": "b", "content": ""}
            ]
        }))
        .unwrap();
        assert_eq!(data.notes[0].id, ItemId::Number(1_700_000_000_000));
        assert_eq!(data.notes[1].id, ItemId::from("n-2"));
        assert_eq!(data.notes[0].id.to_string(), "1700000000000");
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let data = ToolkitData::from_json("{}").unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let data = ToolkitData::from_value(&json!({
            "passwords": [{"id": 1, "service": "mail", "username": "me", "password": "x", "notes": "y"}],
            "photos": [{"id": 9}],
            "settings": {"theme": "dark"}
        }))
        .unwrap();
        assert_eq!(data.passwords.len(), 1);
        assert_eq!(data.passwords[0].service, "mail");
    }

    #[test]
    fn contact_optional_fields() {
        let data = ToolkitData::from_value(&json!({
            "contacts": [{"id": 1, "name": "Ann"}]
        }))
        .unwrap();
        assert_eq!(data.contacts[0].email, None);
        assert_eq!(data.contacts[0].phone, None);
    }

    #[test]
    fn invalid_backup_rejected() {
        assert!(matches!(
            parse_backup("{ not json"),
            Err(WidgetError::InvalidBackup(_))
        ));
    }

    #[test]
    fn from_json_rejects_invalid_document() {
        assert!(matches!(
            ToolkitData::from_json("{ not json"),
            Err(WidgetError::InvalidBackup(_))
        ));
        assert!(matches!(
            ToolkitData::from_json(r#"{"notes": "nope"}"#),
            Err(WidgetError::InvalidBackup(_))
        ));
    }

    #[test]
    fn to_json_round_trips() {
        let data = ToolkitData {
            notes: vec![Note {
                id: ItemId::Number(1),
                title: "Groceries".into(),
                content: "<p>Milk</p>".into(),
            }],
            contacts: vec![Contact {
                id: ItemId::from("c1"),
                name: "Ada".into(),
                email: Some("ada@example.com".into()),
                phone: None,
            }],
            ..Default::default()
        };
        let json = data.to_json().unwrap();
        assert_eq!(ToolkitData::from_json(&json).unwrap(), data);
    }

    #[test]
    fn backup_keeps_unmodelled_sections() {
        let doc = parse_backup(r#"{"photos":[{"id":1}],"notes":[]}"#).unwrap();
        let exported = export_backup(Some(&doc)).unwrap().unwrap();
        assert_eq!(parse_backup(&exported).unwrap(), doc);
    }

    #[test]
    fn nothing_to_export() {
        assert_eq!(export_backup(None).unwrap(), None);
    }

    #[test]
    fn backup_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(backup_file_name(date), "toolkit-backup-2024-03-07.json");
        assert!(backup_file_name_now().starts_with("toolkit-backup-"));
    }
}
