// Report generation from a result graph

use dnsmap_scanner::{DiscoveryKind, ResultGraph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Dot,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "markdown" | "md" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "dot" | "graphviz" => Some(ReportFormat::Dot),
            _ => None,
        }
    }
}

const DOMAIN_LIMIT_PER_SOURCE: usize = 10;
const IP_LIMIT: usize = 20;
const TREE_DEPTH: usize = 2;
const TREE_CHILDREN: usize = 5;
const EDGE_LIMIT: usize = 200;

pub fn generate_text_report(graph: &ResultGraph) -> String {
    let mut report = String::new();
    let bar = "=".repeat(80);

    // Header
    report.push_str(&bar);
    report.push('\n');
    report.push_str(&format!("DNS ANALYSIS REPORT - {}\n", graph.initial));
    report.push_str(&bar);
    report.push_str("\n\n");

    // Statistics
    let stats = graph.stats();
    report.push_str("## Statistics\n\n");
    report.push_str(&format!("- **Domains discovered**: {}\n", stats.total_domains));
    report.push_str(&format!("- **IP addresses discovered**: {}\n", stats.total_ips));
    report.push_str(&format!(
        "- **Relationships discovered**: {}\n",
        stats.total_relationships
    ));
    report.push('\n');

    // Domains grouped by how they were found
    report.push_str("## Discovered domains\n\n");

    let mut by_source: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for rel in &graph.relationships {
        if rel.kind == DiscoveryKind::Domain {
            by_source.entry(&rel.source).or_default().insert(&rel.to);
        }
    }

    for (source, domains) in &by_source {
        report.push_str(&format!("### Via {}\n", source));
        for domain in domains.iter().take(DOMAIN_LIMIT_PER_SOURCE) {
            report.push_str(&format!("  - {}\n", domain));
        }
        if domains.len() > DOMAIN_LIMIT_PER_SOURCE {
            report.push_str(&format!(
                "  - ... and {} more\n",
                domains.len() - DOMAIN_LIMIT_PER_SOURCE
            ));
        }
        report.push('\n');
    }

    // IPs split by family
    report.push_str("## IP addresses\n\n");

    let ipv4: Vec<&String> = graph.ips.iter().filter(|ip| !ip.contains(':')).collect();
    let ipv6: Vec<&String> = graph.ips.iter().filter(|ip| ip.contains(':')).collect();

    if !ipv4.is_empty() {
        report.push_str("### IPv4\n");
        for ip in ipv4.iter().take(IP_LIMIT) {
            report.push_str(&format!("  - {}\n", ip));
        }
        if ipv4.len() > IP_LIMIT {
            report.push_str(&format!("  - ... and {} more\n", ipv4.len() - IP_LIMIT));
        }
        report.push('\n');
    }

    if !ipv6.is_empty() {
        report.push_str("### IPv6\n");
        for ip in ipv6.iter().take(IP_LIMIT) {
            report.push_str(&format!("  - {}\n", ip));
        }
        if ipv6.len() > IP_LIMIT {
            report.push_str(&format!("  - ... and {} more\n", ipv6.len() - IP_LIMIT));
        }
        report.push('\n');
    }

    // Relationship tree extract
    report.push_str("## Relationship tree (extract)\n\n");
    let mut visited = HashSet::new();
    report.push_str(&build_tree(graph, &graph.initial, "", 0, &mut visited));
    report.push('\n');

    report.push('\n');
    report.push_str(&bar);
    report.push('\n');

    report
}

/// Renders a bounded extract of the adjacency as a text tree. Depth and
/// fan-out are capped so a large graph still fits in a readable report;
/// the visited set keeps cycles from rendering twice.
fn build_tree(
    graph: &ResultGraph,
    node: &str,
    indent: &str,
    current_depth: usize,
    visited: &mut HashSet<String>,
) -> String {
    if current_depth >= TREE_DEPTH || visited.contains(node) {
        return String::new();
    }
    visited.insert(node.to_string());

    let mut lines = vec![format!("{}├─ {}", indent, node)];

    if let Some(children) = graph.adjacency.get(node) {
        let shown = &children[..children.len().min(TREE_CHILDREN)];
        for (i, child) in shown.iter().enumerate() {
            let is_last = i == shown.len() - 1;
            let child_indent = format!("{}{}", indent, if is_last { "   " } else { "│  " });
            let subtree = build_tree(graph, &child.value, &child_indent, current_depth + 1, visited);
            if !subtree.is_empty() {
                lines.push(subtree);
            }
        }
        if children.len() > TREE_CHILDREN {
            lines.push(format!(
                "{}│  └─ ... and {} more",
                indent,
                children.len() - TREE_CHILDREN
            ));
        }
    }

    lines.join("\n")
}

pub fn generate_dot_graph(graph: &ResultGraph) -> String {
    let mut output = Vec::new();

    output.push("digraph dns_map {".to_string());
    output.push("  rankdir=LR;".to_string());
    output.push("  node [shape=box, style=rounded];".to_string());
    output.push("  edge [color=gray];".to_string());
    output.push(String::new());

    // Root node
    output.push(format!(
        "  \"{}\" [fillcolor=lightblue, style=\"rounded,filled\"];",
        graph.initial
    ));
    output.push(String::new());

    output.push("  // Domains".to_string());
    for domain in &graph.domains {
        // Keep the root's color even when it shows up as a discovery too.
        if domain == &graph.initial {
            continue;
        }
        output.push(format!(
            "  \"{}\" [fillcolor=lightgreen, style=\"rounded,filled\"];",
            domain
        ));
    }
    output.push(String::new());

    output.push("  // IP addresses".to_string());
    for ip in &graph.ips {
        output.push(format!(
            "  \"{}\" [fillcolor=lightyellow, style=\"rounded,filled\", shape=ellipse];",
            ip
        ));
    }
    output.push(String::new());

    output.push("  // Relationships".to_string());
    let mut seen_edges: HashSet<(&str, &str)> = HashSet::new();
    for rel in graph.relationships.iter().take(EDGE_LIMIT) {
        let edge = (rel.from.as_str(), rel.to.as_str());
        if seen_edges.insert(edge) {
            let label = rel.source.split(' ').next().unwrap_or("");
            output.push(format!(
                "  \"{}\" -> \"{}\" [label=\"{}\"];",
                rel.from, rel.to, label
            ));
        }
    }

    output.push("}".to_string());

    output.join("\n")
}

pub fn generate_json_report(graph: &ResultGraph) -> Result<String, serde_json::Error> {
    let stats = graph.stats();
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "dnsmap",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "target": graph.initial,
            "summary": {
                "total_domains": stats.total_domains,
                "total_ips": stats.total_ips,
                "total_relationships": stats.total_relationships
            },
            "domains": graph.domains,
            "ips": graph.ips,
            "relationships": graph.relationships
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
