//! Command palette: a filterable list of named actions.

use crate::action::{Action, App, Theme};
use crate::error::{WidgetError, WidgetResult};
use crate::selection::{NavKey, Selection};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub category: String,
    pub action: Action,
}

impl Command {
    pub fn new(id: &str, name: &str, icon: &str, category: &str, action: Action) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            category: category.to_string(),
            action,
        }
    }

    fn matches(&self, lower_query: &str) -> bool {
        self.name.to_lowercase().contains(lower_query)
            || self.category.to_lowercase().contains(lower_query)
    }
}

/// Built-in commands: navigation, item creation, theme and data management.
pub fn default_commands() -> Vec<Command> {
    let mut commands: Vec<Command> = App::ALL
        .iter()
        .map(|app| {
            Command::new(
                &format!("nav-{}", app.id()),
                &format!("Go to {}", app.title()),
                app.icon(),
                "Navigation",
                Action::SwitchApp(*app),
            )
        })
        .collect();

    commands.extend([
        Command::new("new-note", "Create New Note", "file-plus", "Actions", Action::CreateItem(App::Notes)),
        Command::new("new-contact", "Add New Contact", "user-plus", "Actions", Action::CreateItem(App::Contacts)),
        Command::new("new-password", "Add New Password", "key", "Actions", Action::CreateItem(App::Passwords)),
        Command::new("new-url", "Add New URL", "link", "Actions", Action::CreateItem(App::Urls)),
        Command::new("upload-photo", "Upload Photos", "upload", "Actions", Action::UploadPhotos),
        Command::new("theme-dark", "Switch to Dark Theme", "moon", "Theme", Action::SetTheme(Theme::Dark)),
        Command::new("theme-light", "Switch to Light Theme", "sun", "Theme", Action::SetTheme(Theme::Light)),
        Command::new("theme-auto", "Auto Theme", "monitor", "Theme", Action::SetTheme(Theme::Auto)),
        Command::new("export-data", "Export All Data", "download", "Data", Action::ExportData),
        Command::new("import-data", "Import Data", "upload", "Data", Action::ImportData),
        Command::new("clear-data", "Clear All Data", "trash-2", "Data", Action::ClearData),
    ]);
    commands
}

/// Commands sharing a category, in the order they were first filtered in.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandGroup<'a> {
    pub category: &'a str,
    /// `(position in the filtered list, command)` pairs.
    pub commands: Vec<(usize, &'a Command)>,
}

#[derive(Debug)]
pub struct CommandPalette {
    commands: Vec<Command>,
    /// Indices into `commands` matching the current query.
    filtered: Vec<usize>,
    query: String,
    selection: Selection,
    open: bool,
}

impl Default for CommandPalette {
    fn default() -> Self {
        Self::with_commands(default_commands())
    }
}

impl CommandPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commands(commands: Vec<Command>) -> Self {
        let filtered = (0..commands.len()).collect();
        Self {
            commands,
            filtered,
            query: String::new(),
            selection: Selection::default(),
            open: false,
        }
    }

    /// Adds a command. Ids must be unique.
    pub fn register(&mut self, command: Command) -> WidgetResult<()> {
        if self.commands.iter().any(|c| c.id == command.id) {
            return Err(WidgetError::DuplicateCommand(command.id));
        }
        self.commands.push(command);
        let query = std::mem::take(&mut self.query);
        self.search(&query);
        Ok(())
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Opens the palette showing every command.
    pub fn open(&mut self) {
        self.open = true;
        self.search("");
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.selection.reset();
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Filters by case-insensitive substring of name or category.
    pub fn search(&mut self, query: &str) {
        let lower = query.to_lowercase();
        self.filtered = self
            .commands
            .iter()
            .enumerate()
            .filter(|(_, cmd)| cmd.matches(&lower))
            .map(|(i, _)| i)
            .collect();
        self.query = query.to_string();
        self.selection.reset();
    }

    pub fn filtered(&self) -> Vec<&Command> {
        self.filtered.iter().map(|&i| &self.commands[i]).collect()
    }

    pub fn selected_index(&self) -> usize {
        self.selection.index()
    }

    pub fn selected(&self) -> Option<&Command> {
        self.filtered
            .get(self.selection.index())
            .map(|&i| &self.commands[i])
    }

    /// Filtered commands grouped by category for rendering.
    pub fn grouped(&self) -> Vec<CommandGroup<'_>> {
        let mut groups: Vec<CommandGroup<'_>> = Vec::new();
        for (pos, &i) in self.filtered.iter().enumerate() {
            let cmd = &self.commands[i];
            match groups.iter_mut().find(|g| g.category == cmd.category) {
                Some(group) => group.commands.push((pos, cmd)),
                None => groups.push(CommandGroup {
                    category: &cmd.category,
                    commands: vec![(pos, cmd)],
                }),
            }
        }
        groups
    }

    /// Handles a navigation key while open. Enter runs the highlighted command.
    pub fn handle_key(&mut self, key: NavKey) -> Option<Action> {
        if !self.open {
            return None;
        }
        match key {
            NavKey::ArrowDown => {
                self.selection.down(self.filtered.len());
                None
            }
            NavKey::ArrowUp => {
                self.selection.up();
                None
            }
            NavKey::Enter => self.execute(self.selection.index()),
        }
    }

    /// Runs the command at `position` in the filtered list, closing the palette.
    pub fn execute(&mut self, position: usize) -> Option<Action> {
        let cmd = self.filtered.get(position).map(|&i| &self.commands[i])?;
        let action = cmd.action.clone();
        info!(command = %cmd.id, "executed: {}", cmd.name);
        self.close();
        Some(action)
    }
}
