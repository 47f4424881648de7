use crate::discovery::{Discovery, ScanContext};
use crate::error::Result;
use async_trait::async_trait;

/// A pluggable discovery heuristic: maps one target to zero or more typed
/// discoveries. Implementations may perform resolver I/O but must not mutate
/// engine state; results are communicated purely via the return value.
///
/// A strategy returns an empty vec when the target does not match its
/// applicability precondition, when nothing was found, or when every lookup
/// came back negative. `Err` is reserved for genuine faults; the engine
/// absorbs those and carries on with the next strategy.
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Stable human-readable identifier, used only for diagnostics.
    fn name(&self) -> &'static str;

    async fn discover(&self, target: &str, ctx: &ScanContext<'_>) -> Result<Vec<Discovery>>;
}

/// Caller-supplied exclusion set. A candidate matches when it contains any of
/// the configured substrings, e.g. "cloudfront.net" suppresses
/// "d111.cloudfront.net". Every strategy applies this before emitting a
/// discovery; the engine re-checks at the merge boundary.
#[derive(Debug, Clone, Default)]
pub struct ExcludeList {
    patterns: Vec<String>,
}

impl ExcludeList {
    pub fn new(patterns: impl IntoIterator<Item = String>) -> Self {
        Self {
            patterns: patterns.into_iter().collect(),
        }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|p| candidate.contains(p.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Appends a discovery unless an identical one is already present,
/// preserving first-seen order within a single `discover` call.
pub(crate) fn push_unique(results: &mut Vec<Discovery>, discovery: Discovery) {
    if !results.contains(&discovery) {
        results.push(discovery);
    }
}
