//! Keyboard shortcut registry.
//!
//! Shortcuts are keyed by a normalised combo string such as `ctrl+k`.
//! Mac command/meta modifiers fold into `ctrl` so one binding serves both
//! platforms.

use crate::action::{Action, App};
use crate::error::{WidgetError, WidgetResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_CATEGORY: &str = "General";

/// The parts of a DOM `KeyboardEvent` the registry looks at.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
    /// Event target is an input, textarea or contenteditable element.
    pub editable_target: bool,
}

impl KeyEvent {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    pub fn ctrl(key: &str) -> Self {
        Self {
            ctrl: true,
            ..Self::new(key)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    /// Combo as registered, e.g. `Ctrl+K`. Used for display.
    pub key: String,
    pub description: String,
    pub category: String,
    pub action: Action,
}

impl Shortcut {
    /// Upper-cased key caps for display: `Ctrl+K` gives `["CTRL", "K"]`.
    pub fn key_caps(&self) -> Vec<String> {
        self.key.split('+').map(str::to_uppercase).collect()
    }
}

/// Lower-cases a combo and maps the first `cmd`, `command` and `meta` to `ctrl`.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
        .replacen("cmd", "ctrl", 1)
        .replacen("command", "ctrl", 1)
        .replacen("meta", "ctrl", 1)
}

/// Builds the normalised combo string for a key event.
pub fn key_for_event(event: &KeyEvent) -> String {
    let mut combo = String::new();
    if event.ctrl || event.meta {
        combo.push_str("ctrl+");
    }
    if event.alt {
        combo.push_str("alt+");
    }
    // Printable keys already reflect shift ("?" rather than "/").
    if event.shift && event.key.encode_utf16().count() > 1 {
        combo.push_str("shift+");
    }
    combo.push_str(&event.key.to_lowercase());
    combo
}

#[derive(Debug, PartialEq, Eq)]
pub struct ShortcutGroup<'a> {
    pub category: &'a str,
    pub shortcuts: Vec<&'a Shortcut>,
}

#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    /// `(normalised combo, shortcut)` in registration order.
    shortcuts: Vec<(String, Shortcut)>,
    help_open: bool,
}

impl ShortcutRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the toolkit's standard bindings.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        let mut bind = |key: &str, action, description: &str, category: &str| {
            // Keys below are literals and always valid.
            let _ = self.register(key, action, description, Some(category));
        };

        for (n, app) in App::ALL.iter().enumerate() {
            bind(
                &format!("Ctrl+{}", n + 1),
                Action::SwitchApp(*app),
                &format!("Go to {}", app.title()),
                "Navigation",
            );
        }

        bind("Ctrl+K", Action::ToggleCommandPalette, "Open Command Palette", "Global");
        bind("Ctrl+F", Action::ToggleGlobalSearch, "Global Search", "Global");
        bind("?", Action::ShowShortcuts, "Show Keyboard Shortcuts", "Global");
        bind("Ctrl+/", Action::ToggleTheme, "Toggle Theme", "Global");
        bind("Ctrl+N", Action::NewItemInCurrentApp, "New Item (context-aware)", "Actions");
    }

    /// Binds `key` to `action`. Re-binding a combo replaces it in place.
    pub fn register(
        &mut self,
        key: &str,
        action: Action,
        description: &str,
        category: Option<&str>,
    ) -> WidgetResult<()> {
        if key.trim().is_empty() {
            return Err(WidgetError::InvalidShortcut(key.to_string()));
        }

        let normalized = normalize_key(key);
        let shortcut = Shortcut {
            key: key.to_string(),
            description: description.to_string(),
            category: category.unwrap_or(DEFAULT_CATEGORY).to_string(),
            action,
        };

        match self.shortcuts.iter_mut().find(|(k, _)| *k == normalized) {
            Some(slot) => slot.1 = shortcut,
            None => self.shortcuts.push((normalized, shortcut)),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Shortcut> {
        let normalized = normalize_key(key);
        self.shortcuts
            .iter()
            .find(|(k, _)| *k == normalized)
            .map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }

    pub fn is_help_open(&self) -> bool {
        self.help_open
    }

    pub fn show_help(&mut self) {
        self.help_open = true;
    }

    pub fn close_help(&mut self) {
        self.help_open = false;
    }

    /// Resolves a key press to its bound action.
    ///
    /// Presses aimed at editable elements are left alone so typing is never
    /// hijacked. Escape closes the help overlay when it is showing.
    pub fn handle_key_press(&mut self, event: &KeyEvent) -> Option<Action> {
        if event.editable_target {
            return None;
        }
        if event.key == "Escape" && self.help_open {
            self.close_help();
            return None;
        }

        let combo = key_for_event(event);
        let shortcut = self.shortcuts.iter().find(|(k, _)| *k == combo).map(|(_, s)| s)?;
        let action = shortcut.action.clone();
        debug!(combo = %combo, "shortcut triggered");

        if action == Action::ShowShortcuts {
            if self.help_open {
                return None;
            }
            self.show_help();
        }
        Some(action)
    }

    /// Shortcuts grouped by category, in registration order, for the help overlay.
    pub fn grouped(&self) -> Vec<ShortcutGroup<'_>> {
        let mut groups: Vec<ShortcutGroup<'_>> = Vec::new();
        for (_, shortcut) in &self.shortcuts {
            match groups.iter_mut().find(|g| g.category == shortcut.category) {
                Some(group) => group.shortcuts.push(shortcut),
                None => groups.push(ShortcutGroup {
                    category: &shortcut.category,
                    shortcuts: vec![shortcut],
                }),
            }
        }
        groups
    }
}
