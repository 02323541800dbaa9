//! Plain-Text Protocol Implementation
//!
//! This module translates between raw socket bytes and structured commands.
//!
//! ## Modules
//!
//! - `command`: Defines the `Command` and `CommandName` types
//! - `codec`: Stateless `decode`/`encode` pair
//!
//! ## Example
//!
//! ```
//! use tinykv::protocol::{decode, encode, CommandName};
//!
//! let command = decode(b"SET name Ariz").unwrap();
//! assert_eq!(command.name, CommandName::Set);
//! assert_eq!(command.args, vec!["name", "Ariz"]);
//!
//! let bytes = encode("name:Ariz stored successfully");
//! assert_eq!(&bytes[..], b"name:Ariz stored successfully");
//! ```

pub mod codec;
pub mod command;

// Re-export commonly used types for convenience
pub use codec::{decode, encode, CodecError};
pub use command::{Command, CommandName};
