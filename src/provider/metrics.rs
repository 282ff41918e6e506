//! Pool metrics and observability.
//!
//! Counters cover cache behavior of the per-locale kind cache, how often the
//! fallback machinery runs and how often providers break their contract.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared by a pool and all of its registries.
#[derive(Debug, Default)]
pub struct PoolMetrics {
    /// Resolutions that went straight to the built-in adapter
    fast_path_resolutions: AtomicUsize,

    /// Candidate chains computed
    fallback_chains: AtomicUsize,

    /// Candidate locales examined against an availability set
    candidates_examined: AtomicUsize,

    /// Kind lists served from the per-locale cache
    kinds_cache_hits: AtomicUsize,

    /// Kind lists computed because the locale was not cached yet
    kinds_cache_misses: AtomicUsize,

    /// Available-locale sets computed
    availability_computations: AtomicUsize,

    /// Object lookups where an adapter returned nothing
    contract_violations: AtomicUsize,

    /// Locales whose extensions could only be removed by dropping the script
    degraded_normalizations: AtomicUsize,

    /// Resolutions that exhausted every candidate
    not_found: AtomicUsize,
}

impl PoolMetrics {
    /// Create a set of counters, all at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolution served directly by the built-in adapter.
    pub fn record_fast_path(&self) {
        self.fast_path_resolutions.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a computed candidate chain.
    pub fn record_fallback_chain(&self) {
        self.fallback_chains.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one candidate locale checked for availability.
    pub fn record_candidate_examined(&self) {
        self.candidates_examined.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a kind list served from the cache.
    pub fn record_kinds_cache_hit(&self) {
        self.kinds_cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a kind list computed for an uncached locale.
    pub fn record_kinds_cache_miss(&self) {
        self.kinds_cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an available-locale set being computed.
    pub fn record_availability_computation(&self) {
        self.availability_computations
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record an object lookup where an adapter returned nothing.
    pub fn record_contract_violation(&self) {
        self.contract_violations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup normalization that fell back to dropping the script.
    pub fn record_degraded_normalization(&self) {
        self.degraded_normalizations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a resolution that exhausted every candidate.
    pub fn record_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Get fast-path resolution count.
    pub fn fast_path_resolutions(&self) -> usize {
        self.fast_path_resolutions.load(Ordering::Relaxed)
    }

    /// Get computed candidate chain count.
    pub fn fallback_chains(&self) -> usize {
        self.fallback_chains.load(Ordering::Relaxed)
    }

    /// Get examined candidate count.
    pub fn candidates_examined(&self) -> usize {
        self.candidates_examined.load(Ordering::Relaxed)
    }

    /// Get kind cache hit count.
    pub fn kinds_cache_hits(&self) -> usize {
        self.kinds_cache_hits.load(Ordering::Relaxed)
    }

    /// Get kind cache miss count.
    pub fn kinds_cache_misses(&self) -> usize {
        self.kinds_cache_misses.load(Ordering::Relaxed)
    }

    /// Get available-locale computation count.
    pub fn availability_computations(&self) -> usize {
        self.availability_computations.load(Ordering::Relaxed)
    }

    /// Get contract violation count.
    pub fn contract_violations(&self) -> usize {
        self.contract_violations.load(Ordering::Relaxed)
    }

    /// Get degraded normalization count.
    pub fn degraded_normalizations(&self) -> usize {
        self.degraded_normalizations.load(Ordering::Relaxed)
    }

    /// Get not-found resolution count.
    pub fn not_found(&self) -> usize {
        self.not_found.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.kinds_cache_hits();
        let misses = self.kinds_cache_misses();
        let total_queries = hits + misses;
        let kinds_cache_hit_rate = if total_queries > 0 {
            (hits as f64 / total_queries as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            fast_path_resolutions: self.fast_path_resolutions(),
            fallback_chains: self.fallback_chains(),
            candidates_examined: self.candidates_examined(),
            kinds_cache_hits: hits,
            kinds_cache_misses: misses,
            kinds_cache_hit_rate,
            availability_computations: self.availability_computations(),
            contract_violations: self.contract_violations(),
            degraded_normalizations: self.degraded_normalizations(),
            not_found: self.not_found(),
        }
    }
}

/// Snapshot of a pool's counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub fast_path_resolutions: usize,
    pub fallback_chains: usize,
    pub candidates_examined: usize,
    pub kinds_cache_hits: usize,
    pub kinds_cache_misses: usize,

    /// Kind cache hit rate as a percentage (0-100)
    pub kinds_cache_hit_rate: f64,

    pub availability_computations: usize,
    pub contract_violations: usize,
    pub degraded_normalizations: usize,
    pub not_found: usize,
}
