pub mod report;
pub mod scan;

use colored::Colorize;

pub fn print_banner() {
    println!();
    println!("  {}", r"     _                                ".cyan());
    println!("  {}", r"  __| |_ __  ___ _ __ ___   __ _ _ __ ".cyan());
    println!("  {}", r" / _` | '_ \/ __| '_ ` _ \ / _` | '_ \".cyan());
    println!("  {}", r"| (_| | | | \__ \ | | | | | (_| | |_) |".cyan());
    println!("  {}", r" \__,_|_| |_|___/_| |_| |_|\__,_| .__/ ".cyan());
    println!("  {}", r"                                |_|    ".cyan());
    println!(
        "  {} {}",
        "recursive DNS/IP footprint mapper".bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("  {}", "For authorized security testing only.".dimmed());
    println!();
}
