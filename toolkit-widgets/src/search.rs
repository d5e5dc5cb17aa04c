//! Global search across notes, contacts, passwords and bookmarked URLs.

use crate::action::{Action, App};
use crate::data::ToolkitData;
use crate::selection::{NavKey, Selection};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Queries shorter than this (in UTF-16 units) return nothing.
pub const MIN_QUERY_LEN: usize = 2;

/// Maximum characters of note text shown under a result.
pub const PREVIEW_LEN: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Note,
    Contact,
    Password,
    Url,
}

impl ResultKind {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Note => "file-text",
            Self::Contact => "user",
            Self::Password => "key",
            Self::Url => "link",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Note => "note",
            Self::Contact => "contact",
            Self::Password => "password",
            Self::Url => "url",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub kind: ResultKind,
    pub icon: String,
    pub title: String,
    pub preview: String,
    pub action: Action,
}

impl SearchResult {
    fn new(kind: ResultKind, title: &str, preview: String, action: Action) -> Self {
        Self {
            kind,
            icon: kind.icon().to_string(),
            title: title.to_string(),
            preview,
            action,
        }
    }
}

/// Extracts the text content of an HTML fragment as a single line.
///
/// Parsing follows the HTML5 tokenizer, so a `<` that does not open a tag
/// stays in the text. Whitespace runs (including block breaks) collapse to
/// one space. This is for previews only; it is not a sanitizer.
pub fn strip_html(html: &str) -> String {
    let width = html.len().saturating_add(80);
    match html2text::config::plain_no_decorate().string_from_read(html.as_bytes(), width) {
        Ok(text) => text.split_whitespace().collect::<Vec<_>>().join(" "),
        Err(e) => {
            debug!("html preview failed: {e}");
            String::new()
        }
    }
}

fn preview_of(text: &str) -> String {
    text.chars().take(PREVIEW_LEN).collect()
}

/// Finds every item in `data` matching `query`.
///
/// Matching is a case-insensitive substring test, except phone numbers
/// which compare against the query as typed.
pub fn search_data(query: &str, data: &ToolkitData) -> Vec<SearchResult> {
    if query.encode_utf16().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    let lower = query.to_lowercase();
    let hit = |field: &str| field.to_lowercase().contains(&lower);
    let mut results = Vec::new();

    for note in &data.notes {
        if hit(&note.title) || hit(&note.content) {
            results.push(SearchResult::new(
                ResultKind::Note,
                &note.title,
                preview_of(&strip_html(&note.content)),
                Action::OpenNote(note.id.clone()),
            ));
        }
    }

    for contact in &data.contacts {
        let email_hit = contact.email.as_deref().is_some_and(hit);
        let phone_hit = contact.phone.as_deref().is_some_and(|p| p.contains(query));
        if hit(&contact.name) || email_hit || phone_hit {
            let preview = contact
                .email
                .as_deref()
                .filter(|e| !e.is_empty())
                .or(contact.phone.as_deref())
                .unwrap_or_default();
            results.push(SearchResult::new(
                ResultKind::Contact,
                &contact.name,
                preview.to_string(),
                Action::OpenContact(contact.id.clone()),
            ));
        }
    }

    for entry in &data.passwords {
        if hit(&entry.service) || hit(&entry.username) {
            results.push(SearchResult::new(
                ResultKind::Password,
                &entry.service,
                entry.username.clone(),
                Action::SwitchApp(App::Passwords),
            ));
        }
    }

    for url in &data.urls {
        if hit(&url.title) || hit(&url.url) {
            results.push(SearchResult::new(
                ResultKind::Url,
                &url.title,
                url.url.clone(),
                Action::SwitchApp(App::Urls),
            ));
        }
    }

    debug!(results = results.len(), "global search");
    results
}

/// Search overlay state.
#[derive(Debug, Default)]
pub struct GlobalSearch {
    results: Vec<SearchResult>,
    selection: Selection,
    open: bool,
}

impl GlobalSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.results.clear();
        self.selection.reset();
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn search(&mut self, query: &str, data: &ToolkitData) {
        self.results = search_data(query, data);
        self.selection.reset();
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn selected_index(&self) -> usize {
        self.selection.index()
    }

    pub fn selected(&self) -> Option<&SearchResult> {
        self.results.get(self.selection.index())
    }

    pub fn handle_key(&mut self, key: NavKey) -> Option<Action> {
        if !self.open {
            return None;
        }
        match key {
            NavKey::ArrowDown => {
                self.selection.down(self.results.len());
                None
            }
            NavKey::ArrowUp => {
                self.selection.up();
                None
            }
            NavKey::Enter => self.execute(self.selection.index()),
        }
    }

    /// Runs the result at `position`, closing the overlay.
    pub fn execute(&mut self, position: usize) -> Option<Action> {
        let result = self.results.get(position)?;
        let action = result.action.clone();
        info!(kind = %result.kind, "opened search result");
        self.close();
        Some(action)
    }
}
