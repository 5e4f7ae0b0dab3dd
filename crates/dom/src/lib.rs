//! DOM tree model and queries
//!
//! Arena-backed node storage with predicate-based traversal, built for
//! pulling structured data out of already-parsed markup.
//!
//! ## Core Design
//!
//! ```text
//! parser JSON → DomLoader → DomArena (owned) → query::* → NodeId (u32)
//!                                                  ↓
//!                                           text::* → String
//! ```
//!
//! Queries return `NodeId`s rather than copies, so a matched subtree can
//! be edited in place through [`DomArena::get_mut`].

pub mod arena;
pub mod error;
pub mod loader;
pub mod query;
pub mod text;
pub mod types;
pub mod utils;

pub use arena::DomArena;
pub use error::{DomError, Result};
pub use loader::{DomLoader, LoaderConfig};
pub use query::{and, by_attribute, by_class_name, by_id, by_tag, not, or};
pub use types::*;
