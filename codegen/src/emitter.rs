use std::collections::HashMap;

use crate::{cs::CSharpEmitter, error::Error, model::CodeUnit};

/// A pluggable backend turning the code model into source text for one
/// target language.
pub trait Emitter {
    fn file_extension(&self) -> &str;
    fn emit(&self, unit: &CodeUnit) -> String;
}

impl std::fmt::Debug for dyn Emitter + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("file_extension", &self.file_extension())
            .finish()
    }
}

/// Name-keyed registry of emitters, populated at startup. Lookup is
/// case-insensitive.
pub struct EmitterRegistry {
    emitters: HashMap<String, Box<dyn Emitter>>,
}

impl EmitterRegistry {
    /// An empty registry, for callers supplying their own emitters.
    pub fn new() -> Self {
        Self {
            emitters: HashMap::new(),
        }
    }

    /// A registry holding the built-in emitters.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("CS", Box::new(CSharpEmitter));
        registry
    }

    pub fn register(&mut self, language: &str, emitter: Box<dyn Emitter>) {
        self.emitters.insert(language.to_uppercase(), emitter);
    }

    pub fn get(&self, language: &str) -> Result<&dyn Emitter, Error> {
        self.emitters
            .get(&language.to_uppercase())
            .map(|emitter| emitter.as_ref())
            .ok_or_else(|| Error::UnsupportedLanguage(language.to_owned()))
    }
}

impl Default for EmitterRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
