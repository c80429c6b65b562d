//! Variable and property override tables, and the sources they are loaded from.

mod builder;
mod env;
mod error;
mod file;
mod interpolate;
mod pairs;
mod source;
mod table;

pub use builder::{Overrides, OverridesBuilder};
pub use error::OverridesError;
pub use source::OverrideScope;
pub use table::OverrideTable;
