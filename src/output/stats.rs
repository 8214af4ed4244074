//! Statistics reporting.

use console::style;

use crate::download::DownloadState;

/// Print statistics for a finished run.
pub fn print_run_stats(state: &DownloadState) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!(
        "{}",
        style(format!(
            "Statistics ({} mode):",
            state.mode.unwrap_or("unknown")
        ))
        .bold()
    );
    println!("  Posts:    {}", state.posts_downloaded);
    println!("  Written:  {} files", state.files_written());
    println!("  Skipped:  {} (already present)", state.files_skipped());
    if state.failed_count() > 0 {
        println!("  Failed:   {}", style(state.failed_count()).red());
        for item in &state.failed {
            println!("    {} {}", style(&item.shortcode).yellow(), item.reason);
        }
    }
    println!("{}", style("═".repeat(50)).dim());
}
