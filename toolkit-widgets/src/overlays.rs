//! Routes global key presses between the palette, search and shortcut help.

use crate::action::Action;
use crate::data::ToolkitData;
use crate::palette::CommandPalette;
use crate::search::GlobalSearch;
use crate::selection::NavKey;
use crate::shortcuts::{KeyEvent, ShortcutRegistry};

/// All keyboard-driven overlays of the toolkit.
///
/// Overlay toggles are handled here; every other action is returned for the
/// host to perform.
#[derive(Debug)]
pub struct Overlays {
    pub palette: CommandPalette,
    pub search: GlobalSearch,
    pub shortcuts: ShortcutRegistry,
}

impl Default for Overlays {
    fn default() -> Self {
        Self {
            palette: CommandPalette::new(),
            search: GlobalSearch::new(),
            shortcuts: ShortcutRegistry::with_defaults(),
        }
    }
}

impl Overlays {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn any_open(&self) -> bool {
        self.palette.is_open() || self.search.is_open() || self.shortcuts.is_help_open()
    }

    /// Feeds text typed into whichever overlay input is focused.
    pub fn input(&mut self, text: &str, data: &ToolkitData) {
        if self.palette.is_open() {
            self.palette.search(text);
        } else if self.search.is_open() {
            self.search.search(text, data);
        }
    }

    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<Action> {
        if event.key == "Escape" && self.any_open() {
            self.palette.close();
            self.search.close();
            self.shortcuts.close_help();
            return None;
        }

        if let Some(nav) = NavKey::from_key(&event.key) {
            if self.palette.is_open() {
                return self.palette.handle_key(nav);
            }
            if self.search.is_open() {
                return self.search.handle_key(nav);
            }
        }

        // Overlay toggles work even while an input has focus.
        let combo = crate::shortcuts::key_for_event(event);
        let action = match combo.as_str() {
            "ctrl+k" => Some(Action::ToggleCommandPalette),
            "ctrl+f" => Some(Action::ToggleGlobalSearch),
            _ => self.shortcuts.handle_key_press(event),
        }?;
        self.apply(action)
    }

    fn apply(&mut self, action: Action) -> Option<Action> {
        match action {
            Action::ToggleCommandPalette => {
                self.search.close();
                self.palette.toggle();
                None
            }
            Action::ToggleGlobalSearch => {
                self.palette.close();
                self.search.toggle();
                None
            }
            Action::ShowShortcuts => {
                self.shortcuts.show_help();
                None
            }
            other => Some(other),
        }
    }
}
