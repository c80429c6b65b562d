use std::sync::Arc;

use feature_builder::{
    BuildContext, Extension, ExtensionHandler, FeatureResolver, HandlerError, OverrideScope,
    Overrides,
};

#[derive(Debug, Clone)]
#[allow(dead_code)]
struct Feature {
    id: String,
}

/// Joins `repoinit` script fragments, substituting build variables.
struct RepoinitHandler;

impl ExtensionHandler<Feature> for RepoinitHandler {
    fn can_handle(&self, extension: &Extension) -> bool {
        extension.name == "repoinit"
    }

    fn merge(
        &self,
        context: &BuildContext<Feature>,
        target: Option<&Extension>,
        source: &Extension,
    ) -> Result<Extension, HandlerError> {
        let script = source.content.as_str().ok_or("repoinit must be text")?;
        let script = context.variables().interpolate(script)?;
        let merged = match target.and_then(|t| t.content.as_str()) {
            Some(existing) => format!("{existing}\n{script}"),
            None => script,
        };
        Ok(Extension::new("repoinit", merged))
    }
}

fn main() -> Result<(), HandlerError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let overrides = Overrides::builder()
        .with_file("demos/build.toml", false)
        .with_env("FEATURE_BUILD", "__")
        .with_pairs(OverrideScope::Variables, ["content.root=/content/demo"])
        .build()?;

    let ctx: BuildContext<Feature> = BuildContext::builder()
        .with_resolver(|id: &str| Some(Feature { id: id.to_string() }))
        .with_overrides(overrides)
        .build()?;
    ctx.add(RepoinitHandler);

    let base = Extension::new("repoinit", "create service user demo");
    let merged = ctx
        .merge_extension(
            Some(&base),
            &Extension::new("repoinit", "create path ${content.root}"),
        )
        .transpose()?;
    println!("merged: {merged:?}");

    // An included feature is resolved in its own scope.
    let included: Arc<dyn FeatureResolver<Feature>> =
        Arc::new(|id: &str| Some(Feature { id: format!("included/{id}") }));
    let child = ctx.clone_with(Some(included))?;
    println!("resolved: {:?}", child.resolver().resolve("org.example:base:1.0.0"));
    println!("child handlers: {}", child.handlers().len());

    Ok(())
}
