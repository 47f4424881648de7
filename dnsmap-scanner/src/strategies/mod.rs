//! The built-in discovery strategies. Each one is a standalone heuristic
//! behind the [`Strategy`](crate::strategy::Strategy) trait; the engine does
//! not know or care which ones are configured.

pub mod ip_neighbors;
pub mod reverse_dns;
pub mod srv_scanner;
pub mod subdomain_enum;
pub mod tld_crawler;
pub mod txt_parser;

pub use ip_neighbors::IpNeighbors;
pub use reverse_dns::ReverseDns;
pub use srv_scanner::SrvScanner;
pub use subdomain_enum::SubdomainEnum;
pub use tld_crawler::TldCrawler;
pub use txt_parser::TxtParser;
