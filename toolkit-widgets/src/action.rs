//! Actions the widgets ask the host application to perform.

use crate::data::ItemId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level views of the toolkit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum App {
    Home,
    Notes,
    Photos,
    Passwords,
    Contacts,
    Urls,
    Settings,
    Profile,
}

impl App {
    pub const ALL: [App; 8] = [
        App::Home,
        App::Notes,
        App::Photos,
        App::Passwords,
        App::Contacts,
        App::Urls,
        App::Settings,
        App::Profile,
    ];

    /// Human-readable name used in command and shortcut labels.
    pub fn title(self) -> &'static str {
        match self {
            App::Home => "Home",
            App::Notes => "Notes",
            App::Photos => "Photos",
            App::Passwords => "Passwords",
            App::Contacts => "Contacts",
            App::Urls => "URLs",
            App::Settings => "Settings",
            App::Profile => "Profile",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            App::Home => "home",
            App::Notes => "notes",
            App::Photos => "photos",
            App::Passwords => "passwords",
            App::Contacts => "contacts",
            App::Urls => "urls",
            App::Settings => "settings",
            App::Profile => "profile",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            App::Home => "home",
            App::Notes => "file-text",
            App::Photos => "image",
            App::Passwords => "key",
            App::Contacts => "users",
            App::Urls => "link",
            App::Settings => "settings",
            App::Profile => "user",
        }
    }
}

impl fmt::Display for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    Auto,
}

/// Something for the host to do. Widgets never touch views directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "target", rename_all = "snake_case")]
pub enum Action {
    SwitchApp(App),
    OpenNote(ItemId),
    OpenContact(ItemId),
    /// Switch to the app and open its "new item" editor.
    CreateItem(App),
    /// Create an item in whichever app is current.
    NewItemInCurrentApp,
    UploadPhotos,
    SetTheme(Theme),
    ToggleTheme,
    ExportData,
    ImportData,
    /// Host must confirm with the user before clearing.
    ClearData,
    ToggleCommandPalette,
    ToggleGlobalSearch,
    ShowShortcuts,
}
