use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::ExtensionHandler;

/// Shared reference to a registered extension handler.
pub type SharedHandler<F> = Arc<dyn ExtensionHandler<F>>;

/// Immutable point-in-time view of the registered handlers, in registration order.
pub type HandlerSnapshot<F> = Arc<Vec<SharedHandler<F>>>;

/// Append-only, copy-on-write list of extension handlers.
///
/// Every registration publishes a new list; readers holding an older
/// snapshot keep iterating it undisturbed.
pub(crate) struct HandlerRegistry<F> {
    handlers: ArcSwap<Vec<SharedHandler<F>>>,
}

impl<F> HandlerRegistry<F> {
    pub(crate) fn new() -> Self {
        Self {
            handlers: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Appends `added` after the current handlers, keeping their relative order.
    ///
    /// Concurrent appends are retried until they land, so none is lost.
    pub(crate) fn append(&self, added: &[SharedHandler<F>]) {
        if added.is_empty() {
            return;
        }
        self.handlers.rcu(|current| {
            current
                .iter()
                .chain(added)
                .cloned()
                .collect::<Vec<_>>()
        });
    }

    pub(crate) fn snapshot(&self) -> HandlerSnapshot<F> {
        self.handlers.load_full()
    }

    /// Creates an independent registry starting from the current handlers.
    pub(crate) fn fork(&self) -> Self {
        Self {
            handlers: ArcSwap::new(self.snapshot()),
        }
    }
}

impl<F> fmt::Debug for HandlerRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("len", &self.handlers.load().len())
            .finish()
    }
}
