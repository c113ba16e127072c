//! Search configuration.
//!
//! ```
//! use subiso_common::{Config, VertexId};
//! let cfg = Config::builder().match_limit(10).root(VertexId::new(2)).build();
//! assert_eq!(cfg.match_limit, 10);
//! ```

use crate::VertexId;

/// Parameters of one matching run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Stop after this many embeddings. `usize::MAX` disables the cap.
    pub match_limit: usize,
    /// Query vertex the DAG is rooted at.
    pub root: VertexId,
    /// Check every embedding against the original candidates before it is emitted.
    pub verify: bool,
}

impl Config {
    /// Default embedding cap.
    pub const DEFAULT_MATCH_LIMIT: usize = 100_000;

    /// Starts a builder from the default configuration.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Whether the embedding cap is disabled.
    #[must_use]
    pub const fn is_unlimited(&self) -> bool {
        self.match_limit == usize::MAX
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            match_limit: Self::DEFAULT_MATCH_LIMIT,
            root: VertexId::new(0),
            verify: false,
        }
    }
}

/// Builder for [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Sets the embedding cap.
    #[must_use]
    pub const fn match_limit(mut self, limit: usize) -> Self {
        self.config.match_limit = limit;
        self
    }

    /// Removes the embedding cap.
    #[must_use]
    pub const fn unlimited(self) -> Self {
        self.match_limit(usize::MAX)
    }

    /// Sets the DAG root.
    #[must_use]
    pub const fn root(mut self, root: VertexId) -> Self {
        self.config.root = root;
        self
    }

    /// Enables or disables per-embedding verification.
    #[must_use]
    pub const fn verify(mut self, verify: bool) -> Self {
        self.config.verify = verify;
        self
    }

    /// Finishes the configuration.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}
