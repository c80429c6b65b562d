//! Feature resolution contract.

/// Looks up included features by identifier.
///
/// The build context only carries a resolver; it is the merge algorithm that
/// calls [`resolve`](Self::resolve) when it meets an included feature.
///
/// Any `Fn(&str) -> Option<F>` closure is a resolver:
///
/// ```
/// use feature_builder::FeatureResolver;
///
/// let resolver = |id: &str| (id == "org:base:1.0").then(|| id.to_string());
/// assert_eq!(resolver.resolve("org:base:1.0").as_deref(), Some("org:base:1.0"));
/// assert!(resolver.resolve("org:other:1.0").is_none());
/// ```
pub trait FeatureResolver<F>: Send + Sync {
    /// Returns the fully materialized feature for `id`, or `None` if it cannot be found.
    fn resolve(&self, id: &str) -> Option<F>;
}

impl<F, T> FeatureResolver<F> for T
where
    T: Fn(&str) -> Option<F> + Send + Sync,
{
    fn resolve(&self, id: &str) -> Option<F> {
        self(id)
    }
}
