//! The DNS resolution capability consumed by strategies. Negative conditions
//! (NXDOMAIN, no answer, timeout, server failure) are never surfaced as
//! errors: they collapse to an empty answer set, per the lookup contract.

use async_trait::async_trait;
use std::net::IpAddr;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::proto::rr::{RData, RecordType as DnsRecordType};
use trust_dns_resolver::TokioAsyncResolver;

/// Record types the scanner knows how to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Aaaa,
    Txt,
    Mx,
    Srv,
    Ns,
    Soa,
    Cname,
    Ptr,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Txt => "TXT",
            RecordType::Mx => "MX",
            RecordType::Srv => "SRV",
            RecordType::Ns => "NS",
            RecordType::Soa => "SOA",
            RecordType::Cname => "CNAME",
            RecordType::Ptr => "PTR",
        }
    }

    fn to_dns(self) -> DnsRecordType {
        match self {
            RecordType::A => DnsRecordType::A,
            RecordType::Aaaa => DnsRecordType::AAAA,
            RecordType::Txt => DnsRecordType::TXT,
            RecordType::Mx => DnsRecordType::MX,
            RecordType::Srv => DnsRecordType::SRV,
            RecordType::Ns => DnsRecordType::NS,
            RecordType::Soa => DnsRecordType::SOA,
            RecordType::Cname => DnsRecordType::CNAME,
            RecordType::Ptr => DnsRecordType::PTR,
        }
    }
}

/// Forward/reverse DNS queries as an injectable capability, so strategies can
/// be exercised against a stub in tests.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Answer strings for one query, empty on any negative condition.
    /// Name answers keep their trailing dot; callers strip it where needed.
    async fn query_records(&self, name: &str, record_type: RecordType) -> Vec<String>;

    /// PTR lookup for an address, `None` on any failure.
    async fn reverse_lookup(&self, ip: IpAddr) -> Option<String>;
}

/// Production resolver backed by the system DNS configuration.
pub struct SystemResolver {
    inner: TokioAsyncResolver,
}

impl SystemResolver {
    pub fn new() -> Self {
        let inner = TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());
        Self { inner }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Resolver for SystemResolver {
    async fn query_records(&self, name: &str, record_type: RecordType) -> Vec<String> {
        let lookup = match self.inner.lookup(name, record_type.to_dns()).await {
            Ok(lookup) => lookup,
            Err(e) => {
                debug!("{} lookup for {} returned nothing: {}", record_type.as_str(), name, e);
                return Vec::new();
            }
        };

        lookup.iter().filter_map(render_rdata).collect()
    }

    async fn reverse_lookup(&self, ip: IpAddr) -> Option<String> {
        match self.inner.reverse_lookup(ip).await {
            Ok(ptr) => ptr
                .iter()
                .next()
                .map(|name| name.to_string().trim_end_matches('.').to_string()),
            Err(e) => {
                debug!("PTR lookup for {} returned nothing: {}", ip, e);
                None
            }
        }
    }
}

fn render_rdata(rdata: &RData) -> Option<String> {
    match rdata {
        RData::A(a) => Some(a.to_string()),
        RData::AAAA(aaaa) => Some(aaaa.to_string()),
        RData::CNAME(cname) => Some(cname.to_string()),
        RData::NS(ns) => Some(ns.to_string()),
        RData::PTR(ptr) => Some(ptr.to_string()),
        RData::MX(mx) => Some(format!("{} {}", mx.preference(), mx.exchange())),
        RData::SRV(srv) => Some(format!(
            "{} {} {} {}",
            srv.priority(),
            srv.weight(),
            srv.port(),
            srv.target()
        )),
        RData::SOA(soa) => Some(format!("{} {}", soa.mname(), soa.rname())),
        RData::TXT(txt) => {
            let text: String = txt
                .txt_data()
                .iter()
                .map(|part| String::from_utf8_lossy(part).into_owned())
                .collect();
            Some(text)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_type_as_str() {
        assert_eq!(RecordType::A.as_str(), "A");
        assert_eq!(RecordType::Aaaa.as_str(), "AAAA");
        assert_eq!(RecordType::Srv.as_str(), "SRV");
        assert_eq!(RecordType::Ptr.as_str(), "PTR");
    }

    #[test]
    fn test_record_type_mapping() {
        assert_eq!(RecordType::A.to_dns(), DnsRecordType::A);
        assert_eq!(RecordType::Cname.to_dns(), DnsRecordType::CNAME);
        assert_eq!(RecordType::Soa.to_dns(), DnsRecordType::SOA);
    }
}
