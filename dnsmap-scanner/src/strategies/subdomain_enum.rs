//! Brute-forces a fixed wordlist of common subdomain labels against the
//! target and records the ones that resolve, along with their CNAME targets.

use crate::discovery::{Discovery, ScanContext};
use crate::error::Result;
use crate::resolver::{RecordType, Resolver};
use crate::strategy::{push_unique, ExcludeList, Strategy};
use crate::target::is_valid_domain;
use async_trait::async_trait;
use std::sync::Arc;

const COMMON_SUBDOMAINS: &[&str] = &[
    "www", "mail", "ftp", "smtp", "pop", "imap",
    "webmail", "admin", "test", "dev", "staging",
    "preprod", "prod", "api", "app", "mobile",
    "blog", "shop", "store", "forum", "support",
    "help", "docs", "cdn", "static", "assets",
    "img", "images", "video", "media", "download",
    "vpn", "remote", "ssh", "sftp",
    "git", "gitlab", "jenkins", "ci", "cd",
    "status", "monitor", "grafana", "prometheus",
    "cloud", "portal", "intranet", "extranet",
    "owa", "exchange", "autodiscover", "lyncdiscover",
    "sip", "voip", "conference", "meet", "zoom",
    "ns1", "ns2", "ns3", "dns1", "dns2",
    "mx1", "mx2", "relay", "gateway",
    "localhost", "demo", "sandbox", "beta",
    "old", "new", "legacy", "v2", "v3",
    "secure", "ssl", "tls",
    "news", "events", "community", "jobs",
    "careers", "about", "contact", "service",
];

/// Record types whose presence counts as "this subdomain exists".
const EXISTENCE_RECORDS: &[RecordType] =
    &[RecordType::A, RecordType::Aaaa, RecordType::Cname];

pub struct SubdomainEnum {
    resolver: Arc<dyn Resolver>,
    exclude: ExcludeList,
}

impl SubdomainEnum {
    pub fn new(resolver: Arc<dyn Resolver>, exclude: ExcludeList) -> Self {
        Self { resolver, exclude }
    }

    async fn subdomain_exists(&self, domain: &str) -> bool {
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
impl Strategy for SubdomainEnum {
    fn name(&self) -> &'static str {
        "Subdomain Enum"
    }

    async fn discover(&self, target: &str, _ctx: &ScanContext<'_>) -> Result<Vec<Discovery>> {
        let mut results = Vec::new();

        if !is_valid_domain(target) {
            return Ok(results);
        }

        for label in COMMON_SUBDOMAINS {
            let candidate = format!("{}.{}", label, target);

            if !self.subdomain_exists(&candidate).await {
                continue;
            }

            if !self.exclude.matches(&candidate) {
                push_unique(
                    &mut results,
                    Discovery::domain(
                        candidate.clone(),
                        format!("Subdomain enumeration of {}", target),
                        vec![
                            ("subdomain".to_string(), label.to_string()),
                            ("method".to_string(), "bruteforce".to_string()),
                        ],
                    ),
                );
            }

            let cnames = self.resolver.query_records(&candidate, RecordType::Cname).await;
            for cname in cnames {
                let cname = cname.trim_end_matches('.');
                if is_valid_domain(cname) && !self.exclude.matches(cname) {
                    push_unique(
                        &mut results,
                        Discovery::domain(
                            cname,
                            format!("CNAME of {}", candidate),
                            vec![("cname_source".to_string(), candidate.clone())],
                        ),
                    );
                }
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    async fn test_resolving_subdomains_found() {
        let resolver = StubResolver::new()
            .with_records("www.tf1.fr", RecordType::A, &["192.0.2.20"])
            .with_records("mail.tf1.fr", RecordType::Aaaa, &["2001:db8::20"]);
        let strategy = SubdomainEnum::new(Arc::new(resolver), ExcludeList::default());

        let visited = HashSet::new();
        let results = strategy.discover("tf1.fr", &ctx(&visited)).await.unwrap();

        let values: Vec<_> = results.iter().map(|d| d.value.as_str()).collect();
        assert_eq!(values, vec!["www.tf1.fr", "mail.tf1.fr"]);
        assert!(results[0]
            .metadata
            .contains(&("method".to_string(), "bruteforce".to_string())));
    }

    #[tokio::test]
    async fn test_cname_target_also_emitted() {
        let resolver = StubResolver::new()
            .with_records("cdn.example.com", RecordType::Cname, &["edge.fastly.example."]);
        let strategy = SubdomainEnum::new(Arc::new(resolver), ExcludeList::default());

        let visited = HashSet::new();
        let results = strategy
            .discover("example.com", &ctx(&visited))
            .await
            .unwrap();

        let values: Vec<_> = results.iter().map(|d| d.value.as_str()).collect();
        assert_eq!(values, vec!["cdn.example.com", "edge.fastly.example"]);
        assert_eq!(results[1].source, "CNAME of cdn.example.com");
    }

    #[tokio::test]
    async fn test_nothing_resolves_yields_nothing() {
        let strategy = SubdomainEnum::new(Arc::new(StubResolver::new()), ExcludeList::default());
        let visited = HashSet::new();
        let results = strategy
            .discover("example.com", &ctx(&visited))
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_excluded_candidate_suppressed_cname_kept() {
        // The brute-forced name itself is excluded, but its CNAME target is
        // not, matching the per-candidate filtering contract.
        let resolver = StubResolver::new()
            .with_records("www.bad.example", RecordType::Cname, &["ok.example.org."]);
        let strategy = SubdomainEnum::new(
            Arc::new(resolver),
            ExcludeList::new(vec!["www.bad.example".to_string()]),
        );

        let visited = HashSet::new();
        let results = strategy
            .discover("bad.example", &ctx(&visited))
            .await
            .unwrap();

        let values: Vec<_> = results.iter().map(|d| d.value.as_str()).collect();
        assert_eq!(values, vec!["ok.example.org"]);
    }

    #[tokio::test]
    async fn test_ip_target_yields_nothing() {
        let strategy = SubdomainEnum::new(Arc::new(StubResolver::new()), ExcludeList::default());
        let visited = HashSet::new();
        let results = strategy.discover("1.2.3.4", &ctx(&visited)).await.unwrap();
        assert!(results.is_empty());
    }
}
