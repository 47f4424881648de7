//! Resolves a domain to its A/AAAA addresses and walks each one back through
//! PTR; given an IP directly, just does the PTR lookup. Reverse records
//! frequently expose hosting providers or sibling infrastructure.

use crate::discovery::{Discovery, ScanContext};
use crate::error::Result;
use crate::resolver::{RecordType, Resolver};
use crate::strategy::{push_unique, ExcludeList, Strategy};
use crate::target::{is_valid_domain, is_valid_ip};
use async_trait::async_trait;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;

pub struct ReverseDns {
    resolver: Arc<dyn Resolver>,
    exclude: ExcludeList,
}

impl ReverseDns {
    pub fn new(resolver: Arc<dyn Resolver>, exclude: ExcludeList) -> Self {
        Self { resolver, exclude }
    }
}

#[async_trait]
impl Strategy for ReverseDns {
    fn name(&self) -> &'static str {
        "Reverse DNS"
    }

    async fn discover(&self, target: &str, _ctx: &ScanContext<'_>) -> Result<Vec<Discovery>> {
        let mut results = Vec::new();

        // IP target: straight to the PTR lookup.
        if let Ok(ip) = IpAddr::from_str(target) {
            if let Some(ptr_domain) = self.resolver.reverse_lookup(ip).await {
                if !self.exclude.matches(&ptr_domain) {
                    push_unique(
                        &mut results,
                        Discovery::domain(
                            ptr_domain,
                            format!("Reverse DNS of {}", target),
                            vec![("ip".to_string(), target.to_string())],
                        ),
                    );
                }
            }
            return Ok(results);
        }

        if !is_valid_domain(target) {
            return Ok(results);
        }

        let mut ips = self.resolver.query_records(target, RecordType::A).await;
        ips.extend(self.resolver.query_records(target, RecordType::Aaaa).await);

        for ip_str in ips {
            let ip_str = ip_str.trim();
            if !is_valid_ip(ip_str) {
                continue;
            }

            let version = if ip_str.contains(':') { "v6" } else { "v4" };
            push_unique(
                &mut results,
                Discovery::ip(
                    ip_str,
                    format!("A/AAAA record of {}", target),
                    vec![("version".to_string(), version.to_string())],
                ),
            );

            let ip = match IpAddr::from_str(ip_str) {
                Ok(ip) => ip,
                Err(_) => continue,
            };
            if let Some(ptr_domain) = self.resolver.reverse_lookup(ip).await {
                if !self.exclude.matches(&ptr_domain) {
                    push_unique(
                        &mut results,
                        Discovery::domain(
                            ptr_domain,
                            format!("Reverse DNS of {} (from {})", ip_str, target),
                            vec![
                                ("ip".to_string(), ip_str.to_string()),
                                ("original_domain".to_string(), target.to_string()),
                            ],
                        ),
                    );
                }
            }
        }

        Ok(results)
    }
}
