use crate::discovery::{
    AdjacencyEntry, Discovery, DiscoveryKind, Relationship, ResultGraph, ScanContext,
};
use crate::strategy::{ExcludeList, Strategy};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Called once per expanded target with (depth, target).
pub type ProgressCallback = Arc<dyn Fn(usize, &str) + Send + Sync>;

/// Drives bounded depth-first expansion of the target graph: runs every
/// strategy against each target in declaration order, merges the discoveries
/// into the result graph, then recurses into values not yet visited.
///
/// The engine exclusively owns the visited set and the graph for the
/// duration of one run; strategies only ever see a read-only view. A target
/// is expanded at most once per run no matter how many parents reach it,
/// which is what bounds the traversal even in the presence of cycles.
pub struct DiscoveryEngine {
    strategies: Vec<Box<dyn Strategy>>,
    max_depth: usize,
    exclude: ExcludeList,
    progress_callback: Option<ProgressCallback>,
    visited: HashSet<String>,
    graph: ResultGraph,
}

impl DiscoveryEngine {
    pub fn new(strategies: Vec<Box<dyn Strategy>>, max_depth: usize) -> Self {
        Self {
            strategies,
            max_depth,
            exclude: ExcludeList::default(),
            progress_callback: None,
            visited: HashSet::new(),
            graph: ResultGraph::new(""),
        }
    }

    pub fn with_exclude(mut self, exclude: ExcludeList) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Runs one full analysis from a seed target. All run-scoped state is
    /// reset at entry, so the engine is reusable and consecutive runs are
    /// fully isolated. Never returns an error: unreachable or invalid
    /// targets simply yield no discoveries.
    pub async fn analyze(&mut self, initial: &str) -> ResultGraph {
        info!("Starting analysis of {}", initial);

        self.visited.clear();
        self.graph = ResultGraph::new(initial);

        self.expand(initial.to_string(), 0, None).await;

        let stats = self.graph.stats();
        info!(
            "Analysis of {} complete: {} domains, {} ips, {} relationships",
            initial, stats.total_domains, stats.total_ips, stats.total_relationships
        );

        self.graph.clone()
    }

    fn expand(
        &mut self,
        target: String,
        depth: usize,
        parent: Option<String>,
    ) -> BoxFuture<'_, ()> {
        async move {
            // Depth bound: no path from the root exceeds max_depth edges.
            if depth > self.max_depth {
                return;
            }

            // Cycle breaking: first-reached-wins, at most one expansion per
            // target per run.
            if self.visited.contains(&target) {
                return;
            }
            self.visited.insert(target.clone());

            if let Some(ref callback) = self.progress_callback {
                callback(depth, &target);
            }
            debug!("[depth {}] expanding {}", depth, target);

            let mut discovered: Vec<String> = Vec::new();

            for i in 0..self.strategies.len() {
                let ctx = ScanContext {
                    depth,
                    parent: parent.as_deref(),
                    visited: &self.visited,
                };

                let results = match self.strategies[i].discover(&target, &ctx).await {
                    Ok(results) => results,
                    Err(e) => {
                        // One broken heuristic must not abort the analysis:
                        // report and move on to the next strategy.
                        warn!(
                            "Strategy {} failed on {}: {}",
                            self.strategies[i].name(),
                            target,
                            e
                        );
                        continue;
                    }
                };

                for discovery in results {
                    self.merge(&target, depth, discovery, &mut discovered);
                }
            }

            // Recurse only after every strategy for this target has run, in
            // the order the values were discovered.
            for value in discovered {
                if !self.visited.contains(&value) {
                    self.expand(value, depth + 1, Some(target.clone())).await;
                }
            }
        }
        .boxed()
    }

    /// Normalizes one discovery into the graph: vertex set by kind,
    /// relationship log entry, adjacency entry, recursion candidate.
    fn merge(
        &mut self,
        target: &str,
        depth: usize,
        discovery: Discovery,
        discovered: &mut Vec<String>,
    ) {
        // Strategies filter excluded candidates themselves, but the
        // invariant must not depend on every strategy author remembering to.
        if self.exclude.matches(&discovery.value) {
            debug!(
                "Dropping excluded discovery {} (from {})",
                discovery.value, target
            );
            return;
        }

        match discovery.kind {
            DiscoveryKind::Domain => {
                self.graph.domains.insert(discovery.value.clone());
            }
            DiscoveryKind::Ip => {
                self.graph.ips.insert(discovery.value.clone());
            }
        }

        self.graph.relationships.push(Relationship {
            from: target.to_string(),
            to: discovery.value.clone(),
            kind: discovery.kind,
            source: discovery.source.clone(),
            depth,
        });

        self.graph
            .adjacency
            .entry(target.to_string())
            .or_default()
            .push(AdjacencyEntry {
                value: discovery.value.clone(),
                kind: discovery.kind,
                source: discovery.source,
            });

        discovered.push(discovery.value);
    }
}
