//! Run header and summary output
//!
//! The per-file lines are the dispatcher's primary output and go straight to
//! stdout; this module only frames them with a styled header and a final
//! summary block.

use crate::dispatch::DispatchStats;
use console::style;

/// Print a header at the start of the run
pub fn print_header(endpoint: &str, path: &str, active_jobs: usize) {
    println!();
    println!(
        "{} {}",
        style("distload").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Cluster:").bold(), endpoint);
    println!("  {} {}", style("Path:").bold(), path);
    println!("  {} {}", style("Active jobs:").bold(), active_jobs);
    println!();
}

/// Print a summary of the run results
pub fn print_summary(stats: &DispatchStats) {
    println!();
    println!("{}", style("Load Complete").green().bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Queued:").bold(), format_number(stats.queued));
    println!(
        "  {} {}",
        style("Already loaded:").bold(),
        format_number(stats.skipped)
    );
    println!(
        "  {} {}",
        style("Completed:").bold(),
        format_number(stats.completed)
    );
    if stats.abandoned > 0 {
        println!(
            "  {} {}",
            style("Abandoned:").yellow().bold(),
            format_number(stats.abandoned)
        );
    }
    println!(
        "  {} {:.1}s",
        style("Duration:").bold(),
        stats.duration.as_secs_f64()
    );
    println!();
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| {
            chunk
                .iter()
                .rev()
                .map(|&b| b as char)
                .collect::<String>()
        })
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }
}
