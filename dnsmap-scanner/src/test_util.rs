//! In-crate stub resolver for strategy unit tests: answers come from fixed
//! tables instead of the network.

use crate::resolver::{RecordType, Resolver};
use async_trait::async_trait;
use std::collections::HashMap;
use std::net::IpAddr;
use std::str::FromStr;

#[derive(Default)]
pub struct StubResolver {
    records: HashMap<(String, RecordType), Vec<String>>,
    reverse: HashMap<IpAddr, String>,
}

impl StubResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, name: &str, record_type: RecordType, answers: &[&str]) -> Self {
        self.records.insert(
            (name.to_string(), record_type),
            answers.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn with_reverse(mut self, ip: &str, domain: &str) -> Self {
        let ip = IpAddr::from_str(ip).expect("stub reverse entry needs a valid IP");
        self.reverse.insert(ip, domain.to_string());
        self
    }
}

#[async_trait]
impl Resolver for StubResolver {
    async fn query_records(&self, name: &str, record_type: RecordType) -> Vec<String> {
        self.records
            .get(&(name.to_string(), record_type))
            .cloned()
            .unwrap_or_default()
    }

    async fn reverse_lookup(&self, ip: IpAddr) -> Option<String> {
        self.reverse.get(&ip).cloned()
    }
}
