//! Command Executor
//!
//! Maps a decoded [`Command`] onto a [`Store`] operation and formats the
//! response string the client sees.
//!
//! | command  | args | success                              | edge                            |
//! |----------|------|--------------------------------------|---------------------------------|
//! | `get`    | 1    | the stored value                     | `null` if missing               |
//! | `set`    | 2    | `<key>:<value> stored successfully`  | `<key>:<value> error storing`   |
//! | `delete` | 1    | `<key> deleted`                      | `<key> does not exist`          |
//! | other    | -    |                                      | `Unrecognized Command`          |
//!
//! A recognized command with the wrong number of arguments gets
//! `<COMMAND>: Incorrect Usage! Specify <N> argument(s)` and never reaches
//! the store.

use crate::protocol::{Command, CommandName};
use crate::storage::{Store, StoreError};
use tracing::error;

/// Response sent for a `get` on a missing key.
pub const NULL_RESPONSE: &str = "null";

/// Response sent for anything that is not a known command.
pub const UNRECOGNIZED_RESPONSE: &str = "Unrecognized Command";

/// What the connection should do after a command has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Send this string back to the client
    Text(String),
    /// Close the connection without responding
    Close,
}

impl Reply {
    pub fn text(s: impl Into<String>) -> Self {
        Reply::Text(s.into())
    }

    /// Returns the response string, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text(s) => Some(s.as_str()),
            Reply::Close => None,
        }
    }
}

/// Runs `command` against `store`.
///
/// The caller must hold exclusive access to the store for the duration of
/// the call.
pub fn execute(store: &mut Store, command: &Command) -> Reply {
    let args = command.args.as_slice();

    match &command.name {
        CommandName::Get => cmd_get(store, args),
        CommandName::Set => cmd_set(store, args),
        CommandName::Delete => cmd_delete(store, args),
        CommandName::Exit => Reply::Close,
        CommandName::Unknown(_) => Reply::text(UNRECOGNIZED_RESPONSE),
    }
}

/// GET key
fn cmd_get(store: &Store, args: &[String]) -> Reply {
    let [key] = args else {
        return usage(&CommandName::Get, 1);
    };

    match store.get(key) {
        Some(value) => Reply::text(value),
        None => Reply::text(NULL_RESPONSE),
    }
}

/// SET key value
fn cmd_set(store: &mut Store, args: &[String]) -> Reply {
    let [key, value] = args else {
        return usage(&CommandName::Set, 2);
    };

    let result = store.set(key.as_str(), value.as_str());
    set_reply(key, value, result)
}

/// DELETE key
fn cmd_delete(store: &mut Store, args: &[String]) -> Reply {
    let [key] = args else {
        return usage(&CommandName::Delete, 1);
    };

    if store.delete(key) {
        Reply::text(format!("{} deleted", key))
    } else {
        Reply::text(format!("{} does not exist", key))
    }
}

/// Formats the outcome of a store write.
fn set_reply(key: &str, value: &str, result: Result<(), StoreError>) -> Reply {
    match result {
        Ok(()) => Reply::text(format!("{}:{} stored successfully", key, value)),
        Err(e) => {
            error!(key = %key, value = %value, error = %e, "SET failed");
            Reply::text(format!("{}:{} error storing", key, value))
        }
    }
}

/// Usage error for a recognized command called with the wrong arity.
fn usage(name: &CommandName, expected: usize) -> Reply {
    let noun = if expected == 1 { "argument" } else { "arguments" };
    Reply::text(format!(
        "{}: Incorrect Usage! Specify {} {}",
        name.as_str().to_uppercase(),
        expected,
        noun
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::decode;

    fn run(store: &mut Store, request: &str) -> String {
        let command = decode(request.as_bytes()).unwrap();
        match execute(store, &command) {
            Reply::Text(s) => s,
            Reply::Close => panic!("unexpected close for {:?}", request),
        }
    }

    #[test]
    fn test_get_missing_key() {
        let mut store = Store::new();
        assert_eq!(run(&mut store, "get a"), "null");
    }

    #[test]
    fn test_set_then_get() {
        let mut store = Store::new();

        assert_eq!(run(&mut store, "set hello world"), "hello:world stored successfully");
        assert_eq!(run(&mut store, "get hello"), "world");
    }

    #[test]
    fn test_delete() {
        let mut store = Store::new();

        assert_eq!(run(&mut store, "delete a"), "a does not exist");
        run(&mut store, "set a b");
        assert_eq!(run(&mut store, "delete a"), "a deleted");
        assert_eq!(run(&mut store, "delete a"), "a does not exist");
        assert_eq!(run(&mut store, "get a"), "null");
    }

    #[test]
    fn test_full_session() {
        let mut store = Store::new();

        assert_eq!(run(&mut store, "get a"), "null");
        assert_eq!(run(&mut store, "set a 2"), "a:2 stored successfully");
        assert_eq!(run(&mut store, "get a"), "2");
        assert_eq!(run(&mut store, "delete a"), "a deleted");
        assert_eq!(run(&mut store, "delete a"), "a does not exist");
        assert_eq!(run(&mut store, "get a"), "null");
        assert_eq!(run(&mut store, "bogus x"), "Unrecognized Command");
    }

    #[test]
    fn test_command_name_case_insensitive() {
        let mut store = Store::new();

        assert_eq!(run(&mut store, "SeT Key Value"), "Key:Value stored successfully");
        assert_eq!(run(&mut store, "GET Key"), "Value");
        assert_eq!(run(&mut store, "get key"), "null");
        assert_eq!(run(&mut store, "DELETE Key"), "Key deleted");
    }

    #[test]
    fn test_wrong_argument_counts() {
        let mut store = Store::new();

        assert_eq!(run(&mut store, "get"), "GET: Incorrect Usage! Specify 1 argument");
        assert_eq!(run(&mut store, "get a b"), "GET: Incorrect Usage! Specify 1 argument");
        assert_eq!(run(&mut store, "set a"), "SET: Incorrect Usage! Specify 2 arguments");
        assert_eq!(
            run(&mut store, "set a b c"),
            "SET: Incorrect Usage! Specify 2 arguments"
        );
        assert_eq!(
            run(&mut store, "delete"),
            "DELETE: Incorrect Usage! Specify 1 argument"
        );
        assert_eq!(
            run(&mut store, "Delete a b"),
            "DELETE: Incorrect Usage! Specify 1 argument"
        );

        assert!(store.is_empty());
    }

    #[test]
    fn test_usage_error_does_not_touch_store() {
        let mut store = Store::new();
        run(&mut store, "set a 1");

        run(&mut store, "set a 2 3");
        run(&mut store, "delete a b");

        assert_eq!(store.get("a"), Some("1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unrecognized_commands_do_not_mutate() {
        let mut store = Store::new();
        run(&mut store, "set a 1");

        assert_eq!(run(&mut store, "del a"), "Unrecognized Command");
        assert_eq!(run(&mut store, "put b 2"), "Unrecognized Command");
        assert_eq!(run(&mut store, ""), "Unrecognized Command");

        assert_eq!(store.get("a"), Some("1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_exit_closes() {
        let mut store = Store::new();
        let command = decode(b"EXIT").unwrap();
        assert_eq!(execute(&mut store, &command), Reply::Close);
    }

    #[test]
    fn test_set_reply_on_store_fault() {
        let mut map: std::collections::HashMap<String, String> = Default::default();
        let fault = map.try_reserve(usize::MAX).unwrap_err();

        let reply = set_reply("k", "v", Err(StoreError::from(fault)));
        assert_eq!(reply.as_text(), Some("k:v error storing"));
    }
}
