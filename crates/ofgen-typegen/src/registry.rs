//! Registry of code generation backends.

use crate::traits::Backend;

/// The set of available targets.
///
/// Built explicitly by the caller; there is no process-wide registry.
#[derive(Default)]
pub struct BackendRegistry {
    backends: Vec<Box<dyn Backend>>,
}

impl BackendRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every backend enabled at compile time.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        #[cfg(feature = "backend-go")]
        registry.register(Box::new(crate::output::go::GoBackend));

        #[cfg(feature = "backend-csharp")]
        registry.register(Box::new(crate::output::csharp::CSharpBackend));

        #[cfg(feature = "backend-java")]
        registry.register(Box::new(crate::output::java::JavaBackend));

        #[cfg(feature = "backend-python")]
        registry.register(Box::new(crate::output::python::PythonBackend));

        #[cfg(feature = "backend-nodejs")]
        registry.register(Box::new(crate::output::nodejs::NodeJsBackend));

        #[cfg(feature = "backend-react")]
        registry.register(Box::new(crate::output::react::ReactBackend));

        #[cfg(feature = "backend-nestjs")]
        registry.register(Box::new(crate::output::nestjs::NestJsBackend));

        registry
    }

    /// Add a backend. A backend with the same name replaces the earlier one.
    pub fn register(&mut self, backend: Box<dyn Backend>) {
        self.backends.retain(|b| b.name() != backend.name());
        self.backends.push(backend);
        self.backends.sort_by_key(|b| b.name());
    }

    /// Look up a backend by target name.
    pub fn get(&self, name: &str) -> Option<&dyn Backend> {
        self.backends
            .iter()
            .find(|b| b.name() == name)
            .map(|b| &**b)
    }

    /// All backends, sorted by name.
    pub fn backends(&self) -> impl Iterator<Item = &dyn Backend> {
        self.backends.iter().map(|b| &**b)
    }

    /// All backend names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Backends targeting a language, matched case-insensitively.
    pub fn for_language(&self, language: &str) -> Vec<&dyn Backend> {
        self.backends()
            .filter(|b| b.language().eq_ignore_ascii_case(language))
            .collect()
    }
}
