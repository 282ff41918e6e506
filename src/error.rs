//! Error types surfaced by the provider pool.

use thiserror::Error;

/// Failures reported to callers of the pool.
///
/// Only argument errors reach callers. Contract violations and degraded
/// normalization are logged and absorbed, and not finding a provider is the
/// normal `Resolution::NotFound` outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// An adapter kind name that does not match any known kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown locale provider adapter: {0:?}")]
pub struct UnknownAdapterKind(pub String);
