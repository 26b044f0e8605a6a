//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Revalidating cache keys (hits, revalidations, full refreshes)
//! - Catalog API requests (by endpoint and cache-hit-ness)
//! - Resolver strategy outcomes (which rung of the ladder matched)

use once_cell::sync::Lazy;
use prometheus::{IntCounterVec, Opts};

// =============================================================================
// Cache Metrics
// =============================================================================

/// Revalidating cache outcomes per key.
///
/// A "revalidated" outcome is a successful hit that cost exactly one
/// network request for validation — it is not a content miss.
pub static REVALIDATION_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "animusub_revalidation_outcomes_total",
            "Revalidating cache read outcomes",
        ),
        // outcome: "content_hit", "revalidated", "refresh", "stale_served", "error"
        &["key", "outcome"],
    )
    .unwrap()
});

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Catalog API requests by endpoint and source.
pub static CATALOG_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "animusub_catalog_requests_total",
            "Catalog API requests by endpoint",
        ),
        &["endpoint", "source"], // endpoint: "search", "files"; source: "cache", "remote"
    )
    .unwrap()
});

// =============================================================================
// Resolver Metrics
// =============================================================================

/// Which strategy rung produced the entries for a query.
pub static RESOLVER_STRATEGY_HITS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "animusub_resolver_strategy_hits_total",
            "Winning search strategy per resolver query",
        ),
        &["strategy"], // "anilist", "tmdb", "query", "none"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(REVALIDATION_OUTCOMES.clone()),
        Box::new(CATALOG_REQUESTS.clone()),
        Box::new(RESOLVER_STRATEGY_HITS.clone()),
    ]
}

/// Register all core metrics with the given registry.
pub fn register_metrics(registry: &prometheus::Registry) -> Result<(), prometheus::Error> {
    for metric in all_metrics() {
        registry.register(metric)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_metrics() {
        let registry = prometheus::Registry::new();
        register_metrics(&registry).unwrap();

        RESOLVER_STRATEGY_HITS.with_label_values(&["anilist"]).inc();
        let families = registry.gather();
        assert!(families
            .iter()
            .any(|f| f.get_name() == "animusub_resolver_strategy_hits_total"));
    }
}
