//! Walks a domain's label hierarchy up toward the TLD to discover parent
//! domains, e.g. sub.team.example.co.uk -> team.example.co.uk ->
//! example.co.uk. Each candidate is only emitted if it actually resolves.

use crate::discovery::{Discovery, ScanContext};
use crate::error::Result;
use crate::resolver::{RecordType, Resolver};
use crate::strategy::{push_unique, ExcludeList, Strategy};
use crate::target::is_valid_domain;
use async_trait::async_trait;
use std::sync::Arc;

/// Plain single-label TLDs the crawler recognizes.
const SIMPLE_TLDS: &[&str] = &[
    "com", "org", "net", "edu", "gov", "mil", "int", "fr", "de", "uk", "it", "es", "nl", "be",
    "ch", "ca", "au", "jp", "cn", "in", "br", "ru",
];

/// Two-label TLDs (country code plus category).
const COMPOUND_TLDS: &[&str] = &[
    "co.uk", "gouv.fr", "ac.uk", "gov.uk", "com.au", "co.jp", "ne.jp", "or.jp", "go.jp",
];

/// Record types that count as proof of existence for a candidate parent.
const EXISTENCE_RECORDS: &[RecordType] = &[
    RecordType::A,
    RecordType::Aaaa,
    RecordType::Mx,
    RecordType::Ns,
    RecordType::Soa,
];

/// Known approximation: an unlisted compound TLD (say "co.il") falls back to
/// treating the last label alone as the TLD, so a second-level registry
/// domain can be emitted as if it were an organization's parent domain. This
/// mirrors the reference behavior rather than fixing it.
pub struct TldCrawler {
    resolver: Arc<dyn Resolver>,
    exclude: ExcludeList,
}

impl TldCrawler {
    pub fn new(resolver: Arc<dyn Resolver>, exclude: ExcludeList) -> Self {
        Self { resolver, exclude }
    }

    /// Index of the first label of the TLD span. Compound TLDs win over
    /// simple ones; an unrecognized ending falls back to the last label.
    fn find_tld_index(labels: &[&str]) -> usize {
        if labels.len() >= 2 {
            let two_part = format!("{}.{}", labels[labels.len() - 2], labels[labels.len() - 1]);
            if COMPOUND_TLDS.contains(&two_part.as_str()) {
                return labels.len() - 2;
            }
        }
        if SIMPLE_TLDS.contains(&labels[labels.len() - 1]) {
            return labels.len() - 1;
        }
        labels.len() - 1
    }

    fn is_tld(candidate: &str) -> bool {
        COMPOUND_TLDS.contains(&candidate) || SIMPLE_TLDS.contains(&candidate)
    }

    async fn domain_exists(&self, domain: &str) -> bool {
        for record_type in EXISTENCE_RECORDS {
            if !self
                .resolver
                .query_records(domain, *record_type)
                .await
                .is_empty()
            {
                return true;
            }
        }
        false
    }
}

#[async_trait]
impl Strategy for TldCrawler {
    fn name(&self) -> &'static str {
        "TLD Crawler"
    }

    async fn discover(&self, target: &str, _ctx: &ScanContext<'_>) -> Result<Vec<Discovery>> {
        let mut results = Vec::new();

        let domain = target.to_lowercase();
        let domain = domain.trim_end_matches('.');
        if !is_valid_domain(domain) {
            return Ok(results);
        }

        let labels: Vec<&str> = domain.split('.').collect();
        let tld_index = Self::find_tld_index(&labels);

        // Walk inward from just below the full name, one label at a time,
        // stopping before we would emit the TLD itself.
        for levels_up in 1..labels.len() {
            let candidate = labels[levels_up..].join(".");

            if levels_up >= tld_index || Self::is_tld(&candidate) {
                break;
            }

            if self.domain_exists(&candidate).await && !self.exclude.matches(&candidate) {
                push_unique(
                    &mut results,
                    Discovery::domain(
                        candidate,
                        format!("Parent domain of {}", target),
                        vec![
                            ("relationship".to_string(), "parent".to_string()),
                            ("levels_up".to_string(), levels_up.to_string()),
                        ],
                    ),
                );
            }
        }

        Ok(results)
    }
}
