//! Build context carrying shared configuration through a feature merge.

mod handlers;

use std::fmt;
use std::sync::Arc;

use crate::{
    Error, Extension, ExtensionHandler, FeatureResolver, HandlerError, OverrideTable, Overrides,
};

use handlers::HandlerRegistry;
pub use handlers::{HandlerSnapshot, SharedHandler};

const MISSING_RESOLVER: &str = "feature resolver must not be absent";

/// Configuration shared by every step of a feature merge.
///
/// A context holds the resolver for included features, the variable and
/// property overrides, and the extension handlers. It is generic over the
/// feature type `F` produced by the resolver.
///
/// Overrides are fixed once the context is built. Handlers can be added at any
/// time through a shared reference, including concurrently from several threads.
/// The resolver can only be changed by deriving a new context with
/// [`clone_with`](Self::clone_with).
///
/// ## Example
///
/// ```
/// use feature_builder::{BuildContext, OverrideScope, Overrides};
///
/// let overrides = Overrides::builder()
///     .with_pairs(OverrideScope::Variables, ["version=1.2.0"])
///     .build()?;
///
/// let ctx: BuildContext<String> = BuildContext::builder()
///     .with_resolver(|id: &str| Some(format!("resolved {id}")))
///     .with_overrides(overrides)
///     .build()?;
///
/// assert_eq!(ctx.variables().get("version"), Some("1.2.0"));
/// assert!(ctx.handlers().is_empty());
/// # Ok::<(), feature_builder::Error>(())
/// ```
pub struct BuildContext<F> {
    resolver: Arc<dyn FeatureResolver<F>>,
    variables: Arc<OverrideTable>,
    properties: Arc<OverrideTable>,
    handlers: HandlerRegistry<F>,
}

impl<F> BuildContext<F> {
    /// Creates a new builder for constructing a `BuildContext`.
    pub fn builder() -> BuildContextBuilder<F> {
        BuildContextBuilder {
            resolver: None,
            variables: OverrideTable::new(),
            properties: OverrideTable::new(),
        }
    }

    fn from_parts(
        resolver: Option<Arc<dyn FeatureResolver<F>>>,
        variables: Arc<OverrideTable>,
        properties: Arc<OverrideTable>,
        handlers: HandlerRegistry<F>,
    ) -> Result<Self, Error> {
        let resolver = resolver.ok_or(Error::InvalidArgument(MISSING_RESOLVER))?;
        Ok(Self {
            resolver,
            variables,
            properties,
            handlers,
        })
    }

    /// Registers an extension handler after those already registered.
    ///
    /// Returns `self` so registrations can be chained.
    pub fn add(&self, handler: impl ExtensionHandler<F> + 'static) -> &Self {
        self.add_all([Arc::new(handler) as SharedHandler<F>])
    }

    /// Registers several handlers, keeping their relative order.
    pub fn add_all(&self, handlers: impl IntoIterator<Item = SharedHandler<F>>) -> &Self {
        let handlers: Vec<_> = handlers.into_iter().collect();
        tracing::debug!(count = handlers.len(), "registering extension handlers");
        self.handlers.append(&handlers);
        self
    }

    /// Returns the variable overrides.
    pub fn variables(&self) -> &OverrideTable {
        &self.variables
    }

    /// Returns the framework property overrides.
    pub fn properties(&self) -> &OverrideTable {
        &self.properties
    }

    /// Returns the resolver for included features.
    pub fn resolver(&self) -> &Arc<dyn FeatureResolver<F>> {
        &self.resolver
    }

    /// Returns the handlers registered so far, in registration order.
    ///
    /// Handlers added after this call are not part of the returned snapshot.
    pub fn handlers(&self) -> HandlerSnapshot<F> {
        self.handlers.snapshot()
    }

    /// Returns the first registered handler that claims `extension`.
    pub fn handler_for(&self, extension: &Extension) -> Option<SharedHandler<F>> {
        let handler = self
            .handlers
            .snapshot()
            .iter()
            .find(|handler| handler.can_handle(extension))
            .cloned();
        if handler.is_none() {
            tracing::trace!(extension = %extension.name, "no handler claims extension");
        }
        handler
    }

    /// Merges `source` into `target` with the first handler claiming `source`.
    ///
    /// Returns `None` if no handler claims it, leaving the caller to apply its
    /// own default.
    pub fn merge_extension(
        &self,
        target: Option<&Extension>,
        source: &Extension,
    ) -> Option<Result<Extension, HandlerError>> {
        let handler = self.handler_for(source)?;
        tracing::debug!(extension = %source.name, "merging extension with registered handler");
        Some(handler.merge(self, target, source))
    }

    /// Derives a context bound to `resolver`.
    ///
    /// The new context shares this context's override tables and starts with a
    /// copy of its current handlers. Handlers added to either context afterwards
    /// are not seen by the other.
    ///
    /// Fails with [`Error::InvalidArgument`] if `resolver` is `None`; `self` is
    /// left untouched either way.
    pub fn clone_with(
        &self,
        resolver: Option<Arc<dyn FeatureResolver<F>>>,
    ) -> Result<Self, Error> {
        let ctx = Self::from_parts(
            resolver,
            Arc::clone(&self.variables),
            Arc::clone(&self.properties),
            self.handlers.fork(),
        )?;
        tracing::debug!(
            handlers = ctx.handlers.snapshot().len(),
            "derived build context with new resolver"
        );
        Ok(ctx)
    }
}

impl<F> fmt::Debug for BuildContext<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("variables", &self.variables)
            .field("properties", &self.properties)
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a [`BuildContext`].
///
/// A resolver is required; [`build`](Self::build) fails without one.
#[must_use = "builders do nothing until .build() is called"]
pub struct BuildContextBuilder<F> {
    resolver: Option<Arc<dyn FeatureResolver<F>>>,
    variables: OverrideTable,
    properties: OverrideTable,
}

impl<F> BuildContextBuilder<F> {
    /// Sets the resolver for included features.
    pub fn with_resolver(self, resolver: impl FeatureResolver<F> + 'static) -> Self {
        let resolver: Arc<dyn FeatureResolver<F>> = Arc::new(resolver);
        self.with_shared_resolver(Some(resolver))
    }

    /// Sets an already shared resolver, or clears it with `None`.
    pub fn with_shared_resolver(mut self, resolver: Option<Arc<dyn FeatureResolver<F>>>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Copies `variables` into the variable overrides, replacing existing keys.
    pub fn with_variables<I, K, V>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.variables.import(variables);
        self
    }

    /// Copies `properties` into the property overrides, replacing existing keys.
    pub fn with_properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.properties.import(properties);
        self
    }

    /// Copies loaded [`Overrides`] into both tables.
    pub fn with_overrides(self, overrides: Overrides) -> Self {
        self.with_variables(&overrides.variables)
            .with_properties(&overrides.properties)
    }

    /// Builds the `BuildContext`.
    ///
    /// Returns [`Error::InvalidArgument`] if no resolver was provided.
    pub fn build(self) -> Result<BuildContext<F>, Error> {
        let ctx = BuildContext::from_parts(
            self.resolver,
            Arc::new(self.variables),
            Arc::new(self.properties),
            HandlerRegistry::new(),
        )?;
        tracing::debug!(
            variables = ctx.variables.len(),
            properties = ctx.properties.len(),
            "created build context"
        );
        Ok(ctx)
    }
}

impl<F> fmt::Debug for BuildContextBuilder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContextBuilder")
            .field("has_resolver", &self.resolver.is_some())
            .field("variables", &self.variables)
            .field("properties", &self.properties)
            .finish()
    }
}
