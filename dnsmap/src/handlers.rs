use clap::ArgMatches;
use colored::Colorize;
use dnsmap_core::report::{
    generate_dot_graph, generate_json_report, generate_text_report, save_report, ReportFormat,
};
use dnsmap_core::scan::{execute_scan, ScanOptions};
use dnsmap_scanner::ProgressCallback;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

// Helper functions for the scan handler

/// Flatten repeated and comma-separated --exclude arguments into one
/// pattern list
pub fn parse_exclude_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|pattern| !pattern.is_empty())
        .map(String::from)
        .collect()
}

/// Expand a leading ~ in an output path
pub fn expand_output_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

pub async fn handle_scan(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let target = sub_matches.get_one::<String>("DOMAIN").unwrap();
    let max_depth = *sub_matches.get_one::<usize>("depth").unwrap_or(&3);
    let neighbor_range = *sub_matches.get_one::<u32>("neighbor-range").unwrap_or(&5);
    let format_arg = sub_matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let output = sub_matches.get_one::<PathBuf>("output");

    let exclude_args: Vec<String> = sub_matches
        .get_many::<String>("exclude")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let exclude = parse_exclude_list(&exclude_args);

    // Print scan configuration
    println!("\n🌐 Mapping {}", target);
    println!("Max depth: {}", max_depth);
    println!("Neighbor range: ±{}", neighbor_range);
    if !exclude.is_empty() {
        println!("Exclusions: {}", exclude.join(", "));
    }
    println!();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Starting analysis...");

    let spinner_clone = spinner.clone();
    let progress_callback: ProgressCallback = Arc::new(move |depth: usize, current: &str| {
        spinner_clone.set_message(format!("depth {}: {}", depth, current));
    });

    let options = ScanOptions {
        target: target.clone(),
        max_depth,
        exclude,
        neighbor_range,
    };

    let graph = match execute_scan(options, Some(progress_callback)).await {
        Ok(graph) => graph,
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("✗ Scan failed: {}", e);
            std::process::exit(1);
        }
    };

    spinner.finish_and_clear();
    println!("{} Analysis complete!\n", "✓".green().bold());

    let stats = graph.stats();
    println!("  Domains:       {}", stats.total_domains.to_string().cyan());
    println!("  IP addresses:  {}", stats.total_ips.to_string().cyan());
    println!(
        "  Relationships: {}",
        stats.total_relationships.to_string().cyan()
    );
    println!();

    let format = ReportFormat::from_str(format_arg).unwrap_or(ReportFormat::Text);
    let content = match format {
        ReportFormat::Text => generate_text_report(&graph),
        ReportFormat::Dot => generate_dot_graph(&graph),
        ReportFormat::Json => match generate_json_report(&graph) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("✗ Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        },
    };

    match output {
        Some(path) => {
            let path = expand_output_path(&path.to_string_lossy());
            if let Err(e) = save_report(&content, &path) {
                eprintln!("✗ Failed to write report to {}: {}", path.display(), e);
                std::process::exit(1);
            }
            println!(
                "{} Report saved to {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
            if format == ReportFormat::Dot {
                println!("  Render it with: dot -Tpng {} -o map.png", path.display());
            }
        }
        None => print!("{}", content),
    }
}
