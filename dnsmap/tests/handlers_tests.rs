use dnsmap::handlers::*;
use dnsmap::ReportFormat;

#[test]
fn test_parse_exclude_list_single_pattern() {
    let result = parse_exclude_list(&["cloudfront.net".to_string()]);
    assert_eq!(result, vec!["cloudfront.net"]);
}

#[test]
fn test_parse_exclude_list_repeated_arguments() {
    let result = parse_exclude_list(&[
        "cloudfront.net".to_string(),
        "akamai.com".to_string(),
    ]);
    assert_eq!(result, vec!["cloudfront.net", "akamai.com"]);
}

#[test]
fn test_parse_exclude_list_comma_separated() {
    let result = parse_exclude_list(&["cloudfront.net,akamai.com, fastly.net".to_string()]);
    assert_eq!(result, vec!["cloudfront.net", "akamai.com", "fastly.net"]);
}

#[test]
fn test_parse_exclude_list_drops_empty_entries() {
    let result = parse_exclude_list(&["cloudfront.net,,  ,akamai.com".to_string()]);
    assert_eq!(result, vec!["cloudfront.net", "akamai.com"]);
}

#[test]
fn test_parse_exclude_list_empty_input() {
    let result = parse_exclude_list(&[]);
    assert!(result.is_empty());
}

#[test]
fn test_expand_output_path_tilde() {
    let expanded = expand_output_path("~/reports/map.dot");
    assert!(!expanded.to_string_lossy().starts_with('~'));
    assert!(expanded.to_string_lossy().ends_with("reports/map.dot"));
}

#[test]
fn test_expand_output_path_plain() {
    let expanded = expand_output_path("/tmp/report.md");
    assert_eq!(expanded.to_string_lossy(), "/tmp/report.md");
}

#[test]
fn test_report_format_reexport_round_trip() {
    assert!(matches!(
        ReportFormat::from_str("dot"),
        Some(ReportFormat::Dot)
    ));
    assert!(ReportFormat::from_str("html").is_none());
}
