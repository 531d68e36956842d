//! Album domain types.
//!
//! These are OUR types: the identifier bag callers resolve from, the source
//! tags a request can be restricted to, and the sparse record every provider
//! response is normalized into. External API shapes never leak past the
//! provider adapters.

pub mod identifiers;
pub mod record;
pub mod source;

pub use identifiers::{AlbumIdentifiers, InvalidIdentifiers};
pub use record::{AlbumRecord, is_empty_value, keys};
pub use source::{Source, SourceSet, UnknownSource};
