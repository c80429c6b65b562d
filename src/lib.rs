pub mod context;
pub mod extension;
pub mod overrides;
pub mod resolver;
mod error;

pub use context::{BuildContext, BuildContextBuilder};
pub use extension::{Extension, ExtensionHandler, HandlerError};
pub use overrides::{OverrideScope, OverrideTable, Overrides, OverridesError};
pub use resolver::FeatureResolver;
pub use error::Error;
