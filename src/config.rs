//! Analyzer configuration.

use smol_str::SmolStr;

/// Collection name every registry starts with.
pub const DEFAULT_SEED_COLLECTION: &str = "mi_coleccion";

/// Field names considered declared.
pub const DEFAULT_KNOWN_FIELDS: [&str; 3] = ["id", "nombre", "edad"];

/// Configuration for an [`Analyzer`](crate::Analyzer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Collections known before the first query is checked.
    pub seed_collections: Vec<SmolStr>,

    /// The fixed set of known field names.
    pub known_fields: Vec<SmolStr>,

    /// Run the stateless stages of a batch on the rayon pool.
    pub parallel: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            seed_collections: vec![SmolStr::new_static(DEFAULT_SEED_COLLECTION)],
            known_fields: DEFAULT_KNOWN_FIELDS
                .into_iter()
                .map(SmolStr::new_static)
                .collect(),
            parallel: true,
        }
    }
}

impl AnalyzerConfig {
    /// Replaces the seed collections.
    pub fn with_seed_collections<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.seed_collections = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the known field names.
    pub fn with_known_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.known_fields = names.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables parallel batch stages.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
