use dnsmap_scanner::strategies::{
    IpNeighbors, ReverseDns, SrvScanner, SubdomainEnum, TldCrawler, TxtParser,
};
use dnsmap_scanner::target;
use dnsmap_scanner::{
    DiscoveryEngine, ExcludeList, ProgressCallback, Resolver, ResultGraph, Strategy,
    SystemResolver,
};
use std::sync::Arc;
use tracing::debug;

/// Options for configuring a scan operation
pub struct ScanOptions {
    pub target: String,
    pub max_depth: usize,
    pub exclude: Vec<String>,
    pub neighbor_range: u32,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            target: String::new(),
            max_depth: 3,
            exclude: Vec::new(),
            neighbor_range: 5,
        }
    }
}

/// The full strategy roster in the order the engine runs them. Ordering
/// matters: it fixes the discovery order and therefore the traversal.
pub fn default_strategies(
    resolver: Arc<dyn Resolver>,
    exclude: ExcludeList,
    neighbor_range: u32,
) -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(TxtParser::new(resolver.clone(), exclude.clone())),
        Box::new(TldCrawler::new(resolver.clone(), exclude.clone())),
        Box::new(SrvScanner::new(resolver.clone(), exclude.clone())),
        Box::new(ReverseDns::new(resolver.clone(), exclude.clone())),
        Box::new(IpNeighbors::with_range(
            resolver.clone(),
            exclude.clone(),
            neighbor_range,
        )),
        Box::new(SubdomainEnum::new(resolver, exclude)),
    ]
}

/// Execute a scan with the given options against the system resolver.
/// Returns the result graph
pub async fn execute_scan(
    options: ScanOptions,
    progress_callback: Option<ProgressCallback>,
) -> Result<ResultGraph, String> {
    let resolver = Arc::new(SystemResolver::new());
    execute_scan_with_resolver(options, resolver, progress_callback).await
}

/// Same as `execute_scan` but with an injected resolver.
pub async fn execute_scan_with_resolver(
    options: ScanOptions,
    resolver: Arc<dyn Resolver>,
    progress_callback: Option<ProgressCallback>,
) -> Result<ResultGraph, String> {
    let ScanOptions {
        target,
        max_depth,
        exclude,
        neighbor_range,
    } = options;

    if target::classify(&target).is_none() {
        return Err(format!(
            "'{}' is neither a valid domain name nor an IP address",
            target
        ));
    }

    debug!(
        "Scanning {} (max_depth {}, neighbor_range {}, {} exclusion patterns)",
        target,
        max_depth,
        neighbor_range,
        exclude.len()
    );
    let exclude = ExcludeList::new(exclude);

    let strategies = default_strategies(resolver, exclude.clone(), neighbor_range);
    let mut engine = DiscoveryEngine::new(strategies, max_depth).with_exclude(exclude);

    if let Some(callback) = progress_callback {
        engine = engine.with_progress_callback(callback);
    }

    Ok(engine.analyze(&target).await)
}
