//! # Skirmish Content
//!
//! Character data for the combat core: the built-in prototype roster and a
//! JSON loader for custom rosters and battle configs.
//!
//! ```
//! use skirmish_content::{prototype, Roster};
//!
//! let roster = Roster::prototype();
//! let warrior = roster.get("warrior").unwrap();
//! assert_eq!(warrior.abilities.len(), 4);
//! assert_eq!(prototype::demon().base_stats.max_hp, 15);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod loader;
pub mod prototype;

pub use error::ContentError;
pub use loader::{load_battle_config, Roster};
