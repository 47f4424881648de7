//! Scans the addresses immediately around an IP target. Small organizations
//! often sit on contiguous ranges, so the PTR records of ±N neighbors are a
//! cheap way to find sibling hosts.

use crate::discovery::{Discovery, ScanContext};
use crate::error::Result;
use crate::resolver::Resolver;
use crate::strategy::{push_unique, ExcludeList, Strategy};
use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_SCAN_RANGE: u32 = 5;

pub struct IpNeighbors {
    resolver: Arc<dyn Resolver>,
    exclude: ExcludeList,
    scan_range: u32,
}

impl IpNeighbors {
    pub fn new(resolver: Arc<dyn Resolver>, exclude: ExcludeList) -> Self {
        Self::with_range(resolver, exclude, DEFAULT_SCAN_RANGE)
    }

    pub fn with_range(resolver: Arc<dyn Resolver>, exclude: ExcludeList, scan_range: u32) -> Self {
        Self {
            resolver,
            exclude,
            scan_range,
        }
    }
}

/// Address at `offset` from `ip`, or `None` when the arithmetic would leave
/// the address space (e.g. 255.255.255.255 + 1).
fn offset_ip(ip: IpAddr, offset: i64) -> Option<IpAddr> {
    match ip {
        IpAddr::V4(v4) => {
            let shifted = u32::from(v4) as i64 + offset;
            if (0..=u32::MAX as i64).contains(&shifted) {
                Some(IpAddr::V4(Ipv4Addr::from(shifted as u32)))
            } else {
                None
            }
        }
        IpAddr::V6(v6) => {
            let base = u128::from(v6);
            let shifted = if offset >= 0 {
                base.checked_add(offset as u128)
            } else {
                base.checked_sub(offset.unsigned_abs() as u128)
            }?;
            Some(IpAddr::V6(Ipv6Addr::from(shifted)))
        }
    }
}

#[async_trait]
impl Strategy for IpNeighbors {
    fn name(&self) -> &'static str {
        "IP Neighbors"
    }

    async fn discover(&self, target: &str, _ctx: &ScanContext<'_>) -> Result<Vec<Discovery>> {
        let mut results = Vec::new();

        let ip = match IpAddr::from_str(target) {
            Ok(ip) => ip,
            Err(_) => return Ok(results),
        };

        let range = self.scan_range as i64;
        for offset in -range..=range {
            if offset == 0 {
                continue;
            }

            let neighbor = match offset_ip(ip, offset) {
                Some(neighbor) => neighbor,
                None => continue,
            };
            let neighbor_str = neighbor.to_string();

            push_unique(
                &mut results,
                Discovery::ip(
                    neighbor_str.clone(),
                    format!("Neighbor of {}", target),
                    vec![
                        ("offset".to_string(), offset.to_string()),
                        ("distance".to_string(), offset.unsigned_abs().to_string()),
                    ],
                ),
            );

            if let Some(ptr_domain) = self.resolver.reverse_lookup(neighbor).await {
                if !self.exclude.matches(&ptr_domain) {
                    push_unique(
                        &mut results,
                        Discovery::domain(
                            ptr_domain,
                            format!("Reverse DNS of neighbor {}", neighbor_str),
                            vec![
                                ("neighbor_ip".to_string(), neighbor_str.clone()),
                                ("offset".to_string(), offset.to_string()),
                            ],
                        ),
                    );
                }
            }
        }

        Ok(results)
    }
}
