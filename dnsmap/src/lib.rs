// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{expand_output_path, parse_exclude_list};

// Re-export scan and report functionality from dnsmap-core
pub use dnsmap_core::report::{
    generate_dot_graph, generate_json_report, generate_text_report, save_report, ReportFormat,
};
pub use dnsmap_core::scan::{execute_scan, ScanOptions};
