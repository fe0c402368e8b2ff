//! Shell command handlers
//!
//! Executes parsed commands against the navigation engine. Every failure is
//! turned into a message; nothing here panics or exits the process.

use log::{info, warn};
use std::path::PathBuf;

use crate::bookmarks::BookmarkStore;
use crate::config::{EngineConfig, home_dir};
use crate::devices::list_devices;
use crate::error::{
    AstrumError, ErrorKind, NavigateError, StorageError, error_kind, handle_error,
    storage_error_kind,
};
use crate::navigate::{
    NavigationController, NavigationOutcome, NavigationState, normalize, resolve,
};
use crate::permissions::{Access, Classification, EscalationPolicy, PermissionGate};
use crate::shell::parser::Command;
use crate::storage::{
    self, BatchResult, DeleteOutcome, Launcher, create_directory, create_file,
    delete_many_with_policy,
};

pub const HELP: &str = "\
pwd                  show the current location
cd <path>            go to a directory (files are opened instead)
yes | no             accept or decline an escalation offer
mkdir <name>         create a directory here
touch <name>         create an empty file here (truncates an existing one)
rm <name>...         delete entries here, directories recursively
                     (quote names that contain spaces)
stat <name>          show properties
bookmarks            list bookmarks
bookmark <name>      bookmark the current location
unbookmark <name>    remove a bookmark
devices              list mounted devices
open <name>          open with the default application
sudo-open <name>     open with elevated rights
quit                 leave";

/// Outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(ErrorKind),
    Exit,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

impl CommandResult {
    fn success(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Success,
            message: Some(message.into()),
        }
    }

    fn failure(err: AstrumError) -> Self {
        handle_error(&err);
        Self {
            status: CommandStatus::Failure(error_kind(&err)),
            message: Some(err.to_string()),
        }
    }
}

pub struct Session {
    controller: NavigationController,
    store: BookmarkStore,
    launcher: Launcher,
    mount_table: PathBuf,
    device_prefix: String,
    delete_policy: EscalationPolicy,
}

impl Session {
    /// Builds a session from configuration, starting in the home directory.
    pub fn new(config: &EngineConfig) -> Result<Self, AstrumError> {
        let gate = PermissionGate::host(&config.escalation_helper);
        let home = home_dir();
        let controller =
            NavigationController::new(gate, config.opener.clone(), &home.to_string_lossy())?;

        let store = BookmarkStore::new(config.bookmarks_path());
        if let Err(e) = store.ensure() {
            warn!("Bookmark store unavailable: {}", e);
        }

        Ok(Self::with_parts(
            controller,
            store,
            Launcher::new(config.opener.clone()),
            config,
        ))
    }

    pub fn with_parts(
        controller: NavigationController,
        store: BookmarkStore,
        launcher: Launcher,
        config: &EngineConfig,
    ) -> Self {
        Self {
            controller,
            store,
            launcher,
            mount_table: config.mount_table_path(),
            device_prefix: config.device_prefix.clone(),
            delete_policy: config.delete_escalation,
        }
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    pub fn prompt(&self) -> String {
        match self.controller.state() {
            NavigationState::Idle => format!("{}> ", self.controller.current().path().display()),
            NavigationState::AwaitingEscalationDecision { pending } => {
                format!("open {} as root? [yes/no] ", pending.path().display())
            }
        }
    }

    /// Handle a single command
    pub fn handle_command(&mut self, command: Command) -> CommandResult {
        match command {
            Command::Quit => CommandResult {
                status: CommandStatus::Exit,
                message: None,
            },
            Command::Help => CommandResult::success(HELP),
            Command::Pwd => {
                CommandResult::success(self.controller.current().path().display().to_string())
            }
            Command::Cd(arg) => self.handle_cd(&arg),
            Command::Yes => self.handle_accept(),
            Command::No => match self.controller.decline() {
                Ok(()) => CommandResult::success("Declined"),
                Err(e) => CommandResult::failure(e.into()),
            },
            Command::Mkdir(name) => self.handle_create(&name, true),
            Command::Touch(name) => self.handle_create(&name, false),
            Command::Rm(names) => self.handle_rm(&names),
            Command::Stat(arg) => self.handle_stat(&arg),
            Command::Bookmarks => self.handle_bookmarks(),
            Command::Bookmark(name) => self.handle_bookmark(&name),
            Command::Unbookmark(name) => self.handle_unbookmark(&name),
            Command::Devices => self.handle_devices(),
            Command::Open(arg) => match self.launcher.open(&self.target(&arg)) {
                Ok(()) => CommandResult::success(format!("Opened {}", arg)),
                Err(e) => CommandResult::failure(e.into()),
            },
            Command::OpenRoot(arg) => self.handle_open_root(&arg),
            Command::Unknown(raw) => CommandResult {
                status: CommandStatus::Failure(ErrorKind::NotFound),
                message: Some(format!("Unknown command: {:?} (try `help`)", raw)),
            },
        }
    }

    fn target(&self, arg: &str) -> PathBuf {
        self.controller.current().path().join(arg)
    }

    fn handle_cd(&mut self, arg: &str) -> CommandResult {
        let target = self.target(arg);
        let raw = target.to_string_lossy();

        // Files are handed to the opener rather than entered.
        if let Ok(location) = resolve(&raw, self.controller.gate().probe()) {
            if !location.is_dir() {
                return match self.launcher.open(location.path()) {
                    Ok(()) => CommandResult::success(format!("Opened {}", location.path().display())),
                    Err(e) => CommandResult::failure(e.into()),
                };
            }
        }

        match self.controller.navigate(&raw) {
            Ok(NavigationOutcome::Entered(location)) => {
                CommandResult::success(location.path().display().to_string())
            }
            Ok(NavigationOutcome::EscalationOffered(location)) => CommandResult::success(format!(
                "Access to {} is denied. Open it as root? [yes/no]",
                location.path().display()
            )),
            Err(e) => CommandResult::failure(e.into()),
        }
    }

    fn handle_accept(&mut self) -> CommandResult {
        match self.controller.accept() {
            Ok(_) => CommandResult::success("Opened with elevated rights"),
            Err(e @ NavigateError::EscalationFailed(_)) => {
                let mut result = CommandResult::failure(e.into());
                if let Some(msg) = result.message.as_mut() {
                    msg.push_str(" (yes to retry, no to cancel)");
                }
                result
            }
            Err(e) => CommandResult::failure(e.into()),
        }
    }

    fn handle_create(&mut self, name: &str, directory: bool) -> CommandResult {
        let here = self.controller.current().path().to_path_buf();
        if self.controller.gate().classify(&here, Access::Write) != Classification::Granted {
            return CommandResult::failure(NavigateError::PermissionDenied(here).into());
        }

        let created = if directory {
            create_directory(&here, name)
        } else {
            create_file(&here, name)
        };

        match created {
            Ok(path) => CommandResult::success(format!("Created {}", path.display())),
            Err(e) => CommandResult::failure(e.into()),
        }
    }

    fn handle_rm(&mut self, names: &[String]) -> CommandResult {
        let here = self.controller.current().path().to_path_buf();

        // `.`, `..` and anything else that contains the current location
        // are refused per item; the rest go through the batch delete.
        let checked: Vec<(PathBuf, Option<StorageError>)> = names
            .iter()
            .map(|name| {
                let target = normalize(&here.join(name));
                let refusal = here
                    .starts_with(&target)
                    .then(|| StorageError::InvalidName(name.clone()));
                (target, refusal)
            })
            .collect();
        let allowed: Vec<&PathBuf> = checked
            .iter()
            .filter(|(_, refusal)| refusal.is_none())
            .map(|(target, _)| target)
            .collect();
        info!("Deleting {} of {} item(s)", allowed.len(), checked.len());

        let mut deleted =
            delete_many_with_policy(&allowed, self.controller.gate(), self.delete_policy)
                .outcomes
                .into_iter();
        let mut batch = BatchResult::default();
        for (target, refusal) in checked {
            match refusal {
                Some(e) => {
                    warn!("Refusing to delete {}: contains {}", target.display(), here.display());
                    batch.outcomes.push((target, DeleteOutcome::Failed(e)));
                }
                None => batch.outcomes.extend(deleted.next()),
            }
        }

        let lines: Vec<String> = batch
            .outcomes
            .iter()
            .map(|(path, outcome)| match outcome {
                DeleteOutcome::Deleted => format!("deleted {}", path.display()),
                DeleteOutcome::Failed(e) => format!("could not delete {}: {}", path.display(), e),
            })
            .collect();

        let status = match batch.failures().next() {
            None => CommandStatus::Success,
            Some((_, e)) => CommandStatus::Failure(storage_error_kind(e)),
        };

        CommandResult {
            status,
            message: Some(lines.join("\n")),
        }
    }

    fn handle_stat(&mut self, arg: &str) -> CommandResult {
        match storage::read_properties(&self.target(arg)) {
            Ok(props) => {
                let lines: Vec<String> = props
                    .rows()
                    .into_iter()
                    .map(|(label, value)| format!("{:<12}{}", format!("{}:", label), value))
                    .collect();
                CommandResult::success(lines.join("\n"))
            }
            Err(e) => CommandResult::failure(e.into()),
        }
    }

    fn handle_bookmarks(&mut self) -> CommandResult {
        match self.store.load() {
            Ok(report) => {
                let mut lines: Vec<String> = report
                    .bookmarks
                    .iter()
                    .map(|b| format!("{} -> {}", b.name, b.path))
                    .collect();
                if lines.is_empty() {
                    lines.push("No bookmarks".to_string());
                }
                if !report.malformed.is_empty() {
                    lines.push(format!("({} unreadable record(s) skipped)", report.malformed.len()));
                }
                CommandResult::success(lines.join("\n"))
            }
            Err(e) => CommandResult::failure(e.into()),
        }
    }

    fn handle_bookmark(&mut self, name: &str) -> CommandResult {
        let path = self.controller.current().path().to_string_lossy().into_owned();
        match self.store.append(name, &path) {
            Ok(b) => CommandResult::success(format!("Bookmarked {} -> {}", b.name, b.path)),
            Err(e) => CommandResult::failure(e.into()),
        }
    }

    fn handle_unbookmark(&mut self, name: &str) -> CommandResult {
        let report = match self.store.load() {
            Ok(report) => report,
            Err(e) => return CommandResult::failure(e.into()),
        };

        // Stale records are still in the file, so they can be removed too.
        let found = report
            .bookmarks
            .into_iter()
            .chain(report.stale)
            .find(|b| b.name == name);
        let Some(bookmark) = found else {
            return CommandResult {
                status: CommandStatus::Failure(ErrorKind::NotFound),
                message: Some(format!("No bookmark named {:?}", name)),
            };
        };

        match self.store.remove(&bookmark) {
            Ok(_) => CommandResult::success(format!("Removed bookmark {}", name)),
            Err(e) => CommandResult::failure(e.into()),
        }
    }

    fn handle_devices(&mut self) -> CommandResult {
        let devices = list_devices(&self.mount_table, &self.device_prefix);
        if devices.is_empty() {
            return CommandResult::success("No devices");
        }
        let lines: Vec<String> = devices
            .iter()
            .map(|d| format!("{} -> {}", d.label, d.mount_path))
            .collect();
        CommandResult::success(lines.join("\n"))
    }

    fn handle_open_root(&mut self, arg: &str) -> CommandResult {
        let target = self.target(arg);
        let location = match resolve(&target.to_string_lossy(), self.controller.gate().probe()) {
            Ok(location) => location,
            Err(e) => return CommandResult::failure(e.into()),
        };

        match self.controller.open_elevated(&location) {
            Ok(_) => CommandResult::success(format!(
                "Opened {} with elevated rights",
                location.path().display()
            )),
            Err(e) => CommandResult::failure(e.into()),
        }
    }
}
