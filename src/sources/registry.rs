//! Explicit source registry.
//!
//! The host owns a [`SourceRegistry`] and wires template providers into it;
//! nothing is registered through process-global state. A factory closure
//! fetches the base template from its provider at creation time, so a
//! registry entry stays cheap until a source is actually constructed.

use crate::core::{SourceError, SpectralSource};
use crate::sources::dm15::Dm15Source;
use crate::template::TemplateGrid;

/// Supplies the base template grid at model-construction time.
pub trait TemplateProvider {
    fn template(&self) -> Result<TemplateGrid, SourceError>;
}

/// Builds a boxed source on demand.
pub type SourceFactory = Box<dyn Fn() -> Result<Box<dyn SpectralSource>, SourceError>>;

struct Entry {
    name: String,
    version: String,
    factory: SourceFactory,
}

/// Name/version keyed factories for named source construction.
#[derive(Default)]
pub struct SourceRegistry {
    entries: Vec<Entry>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers a factory under (name, version). Re-registering the same
    /// pair is an error; a new version of an existing name shadows older
    /// versions for [`create`](Self::create).
    pub fn register(
        &mut self,
        name: impl Into<String>,
        version: impl Into<String>,
        factory: SourceFactory,
    ) -> Result<(), SourceError> {
        let name = name.into();
        let version = version.into();
        if self
            .entries
            .iter()
            .any(|e| e.name == name && e.version == version)
        {
            return Err(SourceError::DuplicateSource(format!("{name} v{version}")));
        }
        self.entries.push(Entry {
            name,
            version,
            factory,
        });
        Ok(())
    }

    /// Instantiates the most recently registered version of `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn SpectralSource>, SourceError> {
        let entry = self
            .entries
            .iter()
            .rev()
            .find(|e| e.name == name)
            .ok_or_else(|| SourceError::UnknownSource(name.to_string()))?;
        (entry.factory)()
    }

    /// Registered names, in first-registration order, without duplicates.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !names.contains(&entry.name.as_str()) {
                names.push(&entry.name);
            }
        }
        names
    }
}

/// Registers the dm15 source; its factory pulls the base template from
/// `provider` each time a source is created, mirroring how the reference
/// loader fetches the canonical template arrays.
pub fn register_dm15<P>(registry: &mut SourceRegistry, provider: P) -> Result<(), SourceError>
where
    P: TemplateProvider + 'static,
{
    registry.register(
        "dm15",
        "1.0",
        Box::new(move || {
            let grid = provider.template()?;
            let source = Dm15Source::new(grid, "dm15", Some("1.0"))?;
            Ok(Box::new(source) as Box<dyn SpectralSource>)
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    #[derive(Clone)]
    struct FixedProvider;

    impl TemplateProvider for FixedProvider {
        fn template(&self) -> Result<TemplateGrid, SourceError> {
            let phase = vec![-5.0, 0.0, 5.0, 10.0];
            let wavelength = vec![3000.0, 5000.0, 7000.0, 9000.0];
            let flux = DMatrix::from_element(4, 4, 1.0);
            Ok(TemplateGrid::new(phase, wavelength, flux)?)
        }
    }

    struct FailingProvider;

    impl TemplateProvider for FailingProvider {
        fn template(&self) -> Result<TemplateGrid, SourceError> {
            Err(SourceError::TemplateUnavailable(
                "template archive offline".to_string(),
            ))
        }
    }

    #[test]
    fn registers_and_creates_dm15() {
        let mut registry = SourceRegistry::new();
        register_dm15(&mut registry, FixedProvider).unwrap();

        assert_eq!(registry.names(), vec!["dm15"]);

        let source = registry.create("dm15").unwrap();
        assert_eq!(source.name(), "dm15");
        assert_eq!(source.version(), Some("1.0"));
        assert_eq!(source.param_values(), &[1.0, 1.1]);
    }

    #[test]
    fn unknown_name_errors() {
        let registry = SourceRegistry::new();
        assert!(matches!(
            registry.create("salt2"),
            Err(SourceError::UnknownSource(_))
        ));
    }

    #[test]
    fn duplicate_name_version_errors() {
        let mut registry = SourceRegistry::new();
        register_dm15(&mut registry, FixedProvider).unwrap();
        assert!(matches!(
            register_dm15(&mut registry, FixedProvider),
            Err(SourceError::DuplicateSource(_))
        ));
    }

    #[test]
    fn provider_failure_surfaces_at_create_time() {
        let mut registry = SourceRegistry::new();
        register_dm15(&mut registry, FailingProvider).unwrap();
        assert!(matches!(
            registry.create("dm15"),
            Err(SourceError::TemplateUnavailable(_))
        ));
    }
}
