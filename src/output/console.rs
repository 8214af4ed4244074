//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Instagram Downloader                              ║
║     Posts, reels and profiles to shortcode folders    ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).magenta());
}

/// Print the run summary before downloading starts.
pub fn print_run_summary(request: &str, account: Option<&str>, download_dir: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Download: {}", request);
    println!("  Account:  {}", account.unwrap_or("anonymous"));
    println!("  Directory: {}", download_dir);
    println!();
}
