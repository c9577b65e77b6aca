//! Ordered evaluation of lookup sources.
//!
//! # Responsibilities
//! - Hold the sources in their configured precedence order
//! - Resolve a path by asking each source in turn, first match wins
//!
//! # Design Decisions
//! - An explicit list evaluated by one loop, not nested fallback closures;
//!   the chain is inspectable and testable as plain data
//! - Immutable after construction (thread-safe without locks)
//! - A miss in every source is the expected fallthrough, reported as `None`
//!   and logged at debug level only

use std::sync::Arc;

use crate::resolver::source::LookupSource;

/// A successful resolution: the destination URL and which source matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub url: String,
    pub source: String,
}

/// Ordered list of lookup sources, fixed at startup.
pub struct ResolverChain {
    sources: Vec<Arc<dyn LookupSource>>,
}

impl ResolverChain {
    pub fn new(sources: Vec<Arc<dyn LookupSource>>) -> Self {
        Self { sources }
    }

    /// Resolve `path` against each source in order; first match wins.
    pub fn resolve(&self, path: &str) -> Option<Resolution> {
        for source in &self.sources {
            if let Some(url) = source.resolve(path) {
                tracing::debug!(path, source = source.name(), url = %url, "path resolved");
                return Some(Resolution {
                    url,
                    source: source.name().to_string(),
                });
            }
        }

        tracing::debug!(path, "no source matched");
        None
    }

    /// Source names in evaluation order.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::source::StaticSource;
    use crate::sources::Mapping;
    use std::collections::HashMap;

    /// In-memory stand-in for the persistent store.
    struct FakeStore(HashMap<String, String>);

    impl LookupSource for FakeStore {
        fn name(&self) -> &str {
            "store"
        }

        fn resolve(&self, path: &str) -> Option<String> {
            self.0.get(path).cloned()
        }
    }

    fn chain() -> ResolverChain {
        let store = FakeStore(HashMap::from([(
            "/s".to_string(),
            "http://store".to_string(),
        )]));
        let yaml = StaticSource::new(
            "yaml",
            Mapping::from([("/y".to_string(), "http://yaml".to_string())]),
        );
        let json = StaticSource::new(
            "json",
            Mapping::from([
                ("/j".to_string(), "http://json".to_string()),
                ("/s".to_string(), "http://json-shadowed".to_string()),
            ]),
        );
        ResolverChain::new(vec![Arc::new(store), Arc::new(yaml), Arc::new(json)])
    }

    #[test]
    fn earlier_source_wins_over_later_one() {
        let resolution = chain().resolve("/s").unwrap();

        assert_eq!(resolution.url, "http://store");
        assert_eq!(resolution.source, "store");
    }

    #[test]
    fn miss_falls_through_to_later_sources_unchanged() {
        let chain = chain();

        let yaml = chain.resolve("/y").unwrap();
        assert_eq!(yaml.url, "http://yaml");
        assert_eq!(yaml.source, "yaml");

        let json = chain.resolve("/j").unwrap();
        assert_eq!(json.url, "http://json");
        assert_eq!(json.source, "json");
    }

    #[test]
    fn miss_in_every_source_is_none() {
        assert_eq!(chain().resolve("/unknown"), None);
    }

    #[test]
    fn empty_chain_never_resolves() {
        let chain = ResolverChain::new(Vec::new());
        assert_eq!(chain.resolve("/anything"), None);
    }

    #[test]
    fn source_names_follow_evaluation_order() {
        assert_eq!(chain().source_names(), vec!["store", "yaml", "json"]);
    }
}
