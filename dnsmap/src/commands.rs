use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("dnsmap")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("dnsmap")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("scan")
                .about(
                    "Recursively map the DNS/IP footprint around a domain or IP address. Every \
                discovery is fed back into the analysis until the depth limit is reached.",
                )
                .arg(
                    arg!([DOMAIN])
                        .required(true)
                        .help("The domain name or IP address to start from"),
                )
                .arg(
                    arg!(-d --"depth" <LEVELS>)
                        .required(false)
                        .help("Maximum recursion depth")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("3"),
                )
                .arg(
                    arg!(-e --"exclude" <PATTERN>)
                        .required(false)
                        .help(
                            "Skip discoveries whose value contains this pattern (repeatable, \
                        comma-separated lists accepted)",
                        )
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(-r --"neighbor-range" <N>)
                        .required(false)
                        .help("How many addresses to probe on each side of a discovered IP")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("5"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, dot")
                        .value_parser(["text", "json", "dot"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
}
