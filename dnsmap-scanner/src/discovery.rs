use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// What kind of value a discovery or relationship points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryKind {
    Domain,
    Ip,
}

/// A single typed finding produced by a strategy: the canonical record shape
/// every strategy returns. Two discoveries with identical kind, value, source
/// and metadata compare equal and hash equally, so duplicates collapse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Discovery {
    pub kind: DiscoveryKind,
    pub value: String,
    pub source: String,
    pub metadata: Vec<(String, String)>,
}

impl Discovery {
    pub fn new(
        kind: DiscoveryKind,
        value: impl Into<String>,
        source: impl Into<String>,
        mut metadata: Vec<(String, String)>,
    ) -> Self {
        // Metadata is kept sorted by key so equal discoveries hash equally
        // whatever order the strategy assembled them in.
        metadata.sort();
        Self {
            kind,
            value: value.into(),
            source: source.into(),
            metadata,
        }
    }

    pub fn domain(
        value: impl Into<String>,
        source: impl Into<String>,
        metadata: Vec<(String, String)>,
    ) -> Self {
        Self::new(DiscoveryKind::Domain, value, source, metadata)
    }

    pub fn ip(
        value: impl Into<String>,
        source: impl Into<String>,
        metadata: Vec<(String, String)>,
    ) -> Self {
        Self::new(DiscoveryKind::Ip, value, source, metadata)
    }
}

/// A directed edge recording that expanding `from` produced `to`. Appended
/// once per occurrence and never deduplicated: repeated edges at different
/// depths are distinct log entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    pub kind: DiscoveryKind,
    pub source: String,
    pub depth: usize,
}

/// One outgoing edge in the adjacency view of the result graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyEntry {
    pub value: String,
    pub kind: DiscoveryKind,
    pub source: String,
}

/// Summary counts derived from the final graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub total_domains: usize,
    pub total_ips: usize,
    pub total_relationships: usize,
}

/// The accumulated output of one `analyze` run: deduplicated vertex sets,
/// the append-only relationship log in discovery order, and an adjacency
/// mapping for tree-style rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultGraph {
    pub initial: String,
    pub domains: BTreeSet<String>,
    pub ips: BTreeSet<String>,
    pub relationships: Vec<Relationship>,
    pub adjacency: HashMap<String, Vec<AdjacencyEntry>>,
}

impl ResultGraph {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            initial: initial.into(),
            domains: BTreeSet::new(),
            ips: BTreeSet::new(),
            relationships: Vec::new(),
            adjacency: HashMap::new(),
        }
    }

    pub fn stats(&self) -> ScanStats {
        ScanStats {
            total_domains: self.domains.len(),
            total_ips: self.ips.len(),
            total_relationships: self.relationships.len(),
        }
    }
}

/// Read-only view of the traversal state handed to a strategy for one
/// `discover` call. Strategies can inspect the visited set for optional
/// self-filtering but can never mutate engine-owned state through it.
#[derive(Debug, Clone, Copy)]
pub struct ScanContext<'a> {
    pub depth: usize,
    pub parent: Option<&'a str>,
    pub visited: &'a HashSet<String>,
}
