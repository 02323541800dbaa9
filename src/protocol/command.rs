//! Decoded request types.

use std::fmt;

/// The name of a decoded command.
///
/// Matching is case-insensitive; anything that is not a known command
/// (including an empty request) is kept verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandName {
    Get,
    Set,
    Delete,
    /// Explicit request to close the connection
    Exit,
    Unknown(String),
}

impl CommandName {
    /// Parses a command name token.
    pub fn parse(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "get" => CommandName::Get,
            "set" => CommandName::Set,
            "delete" => CommandName::Delete,
            "exit" => CommandName::Exit,
            _ => CommandName::Unknown(token.to_string()),
        }
    }

    /// Returns the canonical lower-case name.
    pub fn as_str(&self) -> &str {
        match self {
            CommandName::Get => "get",
            CommandName::Set => "set",
            CommandName::Delete => "delete",
            CommandName::Exit => "exit",
            CommandName::Unknown(name) => name,
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded request: a command name plus its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: CommandName,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(name: CommandName, args: Vec<String>) -> Self {
        Self { name, args }
    }

    /// An empty request, treated as an unrecognized command.
    pub fn empty() -> Self {
        Self::new(CommandName::Unknown(String::new()), Vec::new())
    }

    /// Returns true if this command asks to close the connection.
    pub fn is_exit(&self) -> bool {
        self.name == CommandName::Exit
    }
}
