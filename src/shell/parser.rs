//! Shell command parsing
//!
//! Turns one input line into a [`Command`]. Commands that need an argument
//! parse as `Unknown` when it is missing.

#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Help,
    Pwd,
    Cd(String),     // Navigate, relative to the current location
    Yes,            // Accept a pending escalation offer
    No,             // Decline it
    Mkdir(String),  // Create a directory here
    Touch(String),  // Create (or truncate) a file here
    Rm(Vec<String>), // Delete one or more entries here
    Stat(String),   // Show properties
    Bookmarks,
    Bookmark(String),   // Bookmark the current location
    Unbookmark(String), // Remove the first bookmark with this name
    Devices,
    Open(String),     // Open with the default application
    OpenRoot(String), // Open elevated
    Unknown(String),
}

pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_lowercase();
    let arg = parts.next().unwrap_or("").trim();

    match cmd.as_str() {
        "quit" | "q" | "exit" => Command::Quit,
        "help" | "?" => Command::Help,
        "pwd" => Command::Pwd,
        "cd" if !arg.is_empty() => Command::Cd(arg.to_string()),
        "yes" | "y" => Command::Yes,
        "no" | "n" => Command::No,
        "mkdir" if !arg.is_empty() => Command::Mkdir(arg.to_string()),
        "touch" if !arg.is_empty() => Command::Touch(arg.to_string()),
        "rm" if !arg.is_empty() => Command::Rm(split_names(arg)),
        "stat" if !arg.is_empty() => Command::Stat(arg.to_string()),
        "bookmarks" => Command::Bookmarks,
        "bookmark" if !arg.is_empty() => Command::Bookmark(arg.to_string()),
        "unbookmark" if !arg.is_empty() => Command::Unbookmark(arg.to_string()),
        "devices" => Command::Devices,
        "open" if !arg.is_empty() => Command::Open(arg.to_string()),
        "sudo-open" if !arg.is_empty() => Command::OpenRoot(arg.to_string()),
        _ => Command::Unknown(trimmed.to_string()),
    }
}

/// Splits on whitespace. Single or double quotes keep a name with spaces
/// together; an unterminated quote runs to the end of the line.
fn split_names(arg: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_name = false;

    for c in arg.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_name = true;
            }
            None if c.is_whitespace() => {
                if in_name {
                    names.push(std::mem::take(&mut current));
                    in_name = false;
                }
            }
            None => {
                current.push(c);
                in_name = true;
            }
        }
    }
    if in_name {
        names.push(current);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_command("quit"), Command::Quit);
        assert_eq!(parse_command("Q"), Command::Quit);
        assert_eq!(parse_command("PWD"), Command::Pwd);
        assert_eq!(parse_command("y"), Command::Yes);
        assert_eq!(parse_command("no"), Command::No);
        assert_eq!(parse_command("devices"), Command::Devices);
    }

    #[test]
    fn test_parse_commands_with_args() {
        assert_eq!(
            parse_command("cd /var/log"),
            Command::Cd("/var/log".to_string())
        );
        assert_eq!(
            parse_command("mkdir  My Photos "),
            Command::Mkdir("My Photos".to_string())
        );
        assert_eq!(
            parse_command("rm a.txt  b.txt"),
            Command::Rm(vec!["a.txt".to_string(), "b.txt".to_string()])
        );
        assert_eq!(
            parse_command("bookmark Work stuff"),
            Command::Bookmark("Work stuff".to_string())
        );
    }

    #[test]
    fn test_rm_quoted_names_keep_spaces() {
        assert_eq!(
            parse_command("rm \"My Photos\" notes.txt"),
            Command::Rm(vec!["My Photos".to_string(), "notes.txt".to_string()])
        );
        assert_eq!(
            parse_command("rm 'old  drafts'"),
            Command::Rm(vec!["old  drafts".to_string()])
        );
        assert_eq!(
            parse_command("rm \"half open"),
            Command::Rm(vec!["half open".to_string()])
        );
    }

    #[test]
    fn test_missing_argument_is_unknown() {
        assert_eq!(parse_command("cd"), Command::Unknown("cd".to_string()));
        assert_eq!(parse_command("rm   "), Command::Unknown("rm".to_string()));
        assert_eq!(parse_command(""), Command::Unknown("".to_string()));
    }
}
