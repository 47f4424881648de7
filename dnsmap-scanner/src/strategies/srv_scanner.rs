//! Probes a fixed catalog of well-known SRV service/protocol pairs
//! (RFC 2782 naming) and emits the target hosts they point at, e.g.
//! _sip._tcp.example.com -> sipdir.online.lync.com.

use crate::discovery::{Discovery, ScanContext};
use crate::error::Result;
use crate::resolver::{RecordType, Resolver};
use crate::strategy::{push_unique, ExcludeList, Strategy};
use crate::target::is_valid_domain;
use async_trait::async_trait;
use std::sync::Arc;

const COMMON_SERVICES: &[(&str, &str)] = &[
    // SIP / VoIP
    ("_sip", "_tcp"),
    ("_sip", "_udp"),
    ("_sips", "_tcp"),
    // XMPP / Jabber
    ("_xmpp-client", "_tcp"),
    ("_xmpp-server", "_tcp"),
    ("_jabber", "_tcp"),
    // Email
    ("_submission", "_tcp"),
    ("_imap", "_tcp"),
    ("_imaps", "_tcp"),
    ("_pop3", "_tcp"),
    ("_pop3s", "_tcp"),
    // LDAP
    ("_ldap", "_tcp"),
    ("_ldaps", "_tcp"),
    ("_gc", "_tcp"),
    // Kerberos
    ("_kerberos", "_tcp"),
    ("_kerberos", "_udp"),
    ("_kerberos-master", "_tcp"),
    ("_kerberos-master", "_udp"),
    ("_kpasswd", "_tcp"),
    ("_kpasswd", "_udp"),
    // CalDAV / CardDAV
    ("_caldav", "_tcp"),
    ("_caldavs", "_tcp"),
    ("_carddav", "_tcp"),
    ("_carddavs", "_tcp"),
    // Microsoft services
    ("_sipfederationtls", "_tcp"),
    ("_autodiscover", "_tcp"),
    // Misc
    ("_matrix", "_tcp"),
    ("_minecraft", "_tcp"),
    ("_teamspeak", "_udp"),
];

pub struct SrvScanner {
    resolver: Arc<dyn Resolver>,
    exclude: ExcludeList,
}

impl SrvScanner {
    pub fn new(resolver: Arc<dyn Resolver>, exclude: ExcludeList) -> Self {
        Self { resolver, exclude }
    }
}

#[async_trait]
impl Strategy for SrvScanner {
    fn name(&self) -> &'static str {
        "SRV Scanner"
    }

    async fn discover(&self, target: &str, _ctx: &ScanContext<'_>) -> Result<Vec<Discovery>> {
        let mut results = Vec::new();

        if !is_valid_domain(target) {
            return Ok(results);
        }

        for (service, protocol) in COMMON_SERVICES {
            let srv_query = format!("{}.{}.{}", service, protocol, target);
            let srv_records = self.resolver.query_records(&srv_query, RecordType::Srv).await;

            for record in srv_records {
                // SRV answer format: "priority weight port target"
                let parts: Vec<&str> = record.split_whitespace().collect();
                if parts.len() < 4 {
                    continue;
                }

                let srv_target = parts[3].trim_end_matches('.');
                if is_valid_domain(srv_target) && !self.exclude.matches(srv_target) {
                    push_unique(
                        &mut results,
                        Discovery::domain(
                            srv_target,
                            format!("SRV record {}", srv_query),
                            vec![
                                ("service".to_string(), service.to_string()),
                                ("protocol".to_string(), protocol.to_string()),
                                ("priority".to_string(), parts[0].to_string()),
                                ("weight".to_string(), parts[1].to_string()),
                                ("port".to_string(), parts[2].to_string()),
                            ],
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
    async fn test_srv_target_extracted() {
        let resolver = StubResolver::new().with_records(
            "_sip._tcp.example.com",
            RecordType::Srv,
            &["0 0 443 sipdir.online.lync.com."],
        );
        let strategy = SrvScanner::new(Arc::new(resolver), ExcludeList::default());

        let visited = HashSet::new();
        let results = strategy
            .discover("example.com", &ctx(&visited))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].value, "sipdir.online.lync.com");
        assert_eq!(results[0].source, "SRV record _sip._tcp.example.com");
        assert!(results[0]
            .metadata
            .contains(&("port".to_string(), "443".to_string())));
        assert!(results[0]
            .metadata
            .contains(&("service".to_string(), "_sip".to_string())));
    }

    #[tokio::test]
    async fn test_malformed_srv_answer_skipped() {
        let resolver = StubResolver::new().with_records(
            "_ldap._tcp.example.com",
            RecordType::Srv,
            &["0 100", "garbage"],
        );
        let strategy = SrvScanner::new(Arc::new(resolver), ExcludeList::default());

        let visited = HashSet::new();
        let results = strategy
            .discover("example.com", &ctx(&visited))
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_excluded_srv_target_suppressed() {
        let resolver = StubResolver::new().with_records(
            "_autodiscover._tcp.example.com",
            RecordType::Srv,
            &["0 0 443 autodiscover.outlook.com."],
        );
        let strategy = SrvScanner::new(
            Arc::new(resolver),
            ExcludeList::new(vec!["outlook.com".to_string()]),
        );

        let visited = HashSet::new();
        let results = strategy
            .discover("example.com", &ctx(&visited))
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_ip_target_yields_nothing() {
        let strategy = SrvScanner::new(Arc::new(StubResolver::new()), ExcludeList::default());
        let visited = HashSet::new();
        let results = strategy.discover("1.2.3.4", &ctx(&visited)).await.unwrap();
        assert!(results.is_empty());
    }
}
