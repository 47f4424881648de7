//! Extracts domains and IP addresses mentioned in TXT records. TXT is a
//! goldmine for footprinting: SPF includes, verification tokens and ad-hoc
//! notes routinely leak other hosts of the same organization.

use crate::discovery::{Discovery, ScanContext};
use crate::error::Result;
use crate::resolver::{RecordType, Resolver};
use crate::strategy::{push_unique, ExcludeList, Strategy};
use crate::target::{is_valid_domain, is_valid_ip};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

lazy_static! {
    static ref DOMAIN_PATTERN: Regex =
        Regex::new(r"(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}").unwrap();
    static ref IPV4_PATTERN: Regex = Regex::new(
        r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b"
    )
    .unwrap();
    static ref IPV6_PATTERN: Regex = Regex::new(
        r"(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}|::(?:[0-9a-fA-F]{1,4}:){0,6}[0-9a-fA-F]{1,4}"
    )
    .unwrap();
}

pub struct TxtParser {
    resolver: Arc<dyn Resolver>,
    exclude: ExcludeList,
}

impl TxtParser {
    pub fn new(resolver: Arc<dyn Resolver>, exclude: ExcludeList) -> Self {
        Self { resolver, exclude }
    }
}

#[async_trait]
impl Strategy for TxtParser {
    fn name(&self) -> &'static str {
        "TXT Parser"
    }

    async fn discover(&self, target: &str, _ctx: &ScanContext<'_>) -> Result<Vec<Discovery>> {
        let mut results = Vec::new();

        let txt_records = self.resolver.query_records(target, RecordType::Txt).await;
        if txt_records.is_empty() {
            return Ok(results);
        }

        for record in txt_records {
            let clean = record.trim_matches('"').trim_matches('\'');
            let excerpt = excerpt(clean);

            for m in DOMAIN_PATTERN.find_iter(clean) {
                let domain = m.as_str().to_lowercase();
                let domain = domain.trim_end_matches('.');
                if is_valid_domain(domain) && !self.exclude.matches(domain) {
                    push_unique(
                        &mut results,
                        Discovery::domain(
                            domain,
                            format!("TXT record of {}", target),
                            vec![("txt_content".to_string(), excerpt.clone())],
                        ),
                    );
                }
            }

            for m in IPV4_PATTERN.find_iter(clean) {
                let ip = m.as_str();
                if is_valid_ip(ip) {
                    push_unique(
                        &mut results,
                        Discovery::ip(
                            ip,
                            format!("TXT record of {}", target),
                            vec![
                                ("version".to_string(), "v4".to_string()),
                                ("txt_content".to_string(), excerpt.clone()),
                            ],
                        ),
                    );
                }
            }

            for m in IPV6_PATTERN.find_iter(clean) {
                let ip = m.as_str();
                if is_valid_ip(ip) {
                    push_unique(
                        &mut results,
                        Discovery::ip(
                            ip,
                            format!("TXT record of {}", target),
                            vec![
                                ("version".to_string(), "v6".to_string()),
                                ("txt_content".to_string(), excerpt.clone()),
                            ],
                        ),
                    );
                }
            }
        }

        Ok(results)
    }
}

// First 100 chars of the record, kept in metadata for readability.
fn excerpt(record: &str) -> String {
    record.chars().take(100).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::DiscoveryKind;
    use crate::test_util::StubResolver;
    use std::collections::HashSet;

    fn ctx(visited: &HashSet<String>) -> ScanContext<'_> {
        ScanContext {
            depth: 0,
            parent: None,
            visited,
        }
    }

    #[tokio::test]
    async fn test_extracts_domains_and_ips_from_spf() {
        let resolver = StubResolver::new().with_records(
            "example.com",
            RecordType::Txt,
            &["v=spf1 include:mail.partner.org ip4:203.0.113.9 -all"],
        );
        let strategy = TxtParser::new(Arc::new(resolver), ExcludeList::default());

        let visited = HashSet::new();
        let results = strategy
            .discover("example.com", &ctx(&visited))
            .await
            .unwrap();

        let values: Vec<_> = results.iter().map(|d| d.value.as_str()).collect();
        assert!(values.contains(&"mail.partner.org"));
        assert!(values.contains(&"203.0.113.9"));

        let ip = results.iter().find(|d| d.value == "203.0.113.9").unwrap();
        assert_eq!(ip.kind, DiscoveryKind::Ip);
        assert!(ip
            .metadata
            .contains(&("version".to_string(), "v4".to_string())));
    }

    #[tokio::test]
    async fn test_extracts_ipv6() {
        let resolver = StubResolver::new().with_records(
            "example.com",
            RecordType::Txt,
            &["v=spf1 ip6:2001:db8:0:0:0:0:0:1 -all"],
        );
        let strategy = TxtParser::new(Arc::new(resolver), ExcludeList::default());

        let visited = HashSet::new();
        let results = strategy
            .discover("example.com", &ctx(&visited))
            .await
            .unwrap();

        let ip = results
            .iter()
            .find(|d| d.kind == DiscoveryKind::Ip)
            .expect("should find the IPv6 address");
        assert_eq!(ip.value, "2001:db8:0:0:0:0:0:1");
        assert!(ip
            .metadata
            .contains(&("version".to_string(), "v6".to_string())));
    }

    #[tokio::test]
    async fn test_excluded_domain_is_suppressed() {
        let resolver = StubResolver::new().with_records(
            "example.com",
            RecordType::Txt,
            &["canonical=d111.cloudfront.net also=keep.example.org"],
        );
        let strategy = TxtParser::new(
            Arc::new(resolver),
            ExcludeList::new(vec!["cloudfront.net".to_string()]),
        );

        let visited = HashSet::new();
        let results = strategy
            .discover("example.com", &ctx(&visited))
            .await
            .unwrap();

        assert!(results.iter().all(|d| d.value != "d111.cloudfront.net"));
        assert!(results.iter().any(|d| d.value == "keep.example.org"));
    }

    #[tokio::test]
    async fn test_no_txt_records_yields_nothing() {
        let resolver = StubResolver::new();
        let strategy = TxtParser::new(Arc::new(resolver), ExcludeList::default());

        let visited = HashSet::new();
        let results = strategy
            .discover("example.com", &ctx(&visited))
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_mentions_collapse() {
        let resolver = StubResolver::new().with_records(
            "example.com",
            RecordType::Txt,
            &["host=dup.example.org host=dup.example.org"],
        );
        let strategy = TxtParser::new(Arc::new(resolver), ExcludeList::default());

        let visited = HashSet::new();
        let results = strategy
            .discover("example.com", &ctx(&visited))
            .await
            .unwrap();

        let dup_count = results.iter().filter(|d| d.value == "dup.example.org").count();
        assert_eq!(dup_count, 1);
    }
}
