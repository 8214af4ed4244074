//! Instagram Downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use instagram_downloader::{
    api::{login, InstagramApi, Session, SessionStore},
    cli::{read_password, Args},
    config::{validate_config, validate_username, Config, DownloadRequest},
    download::dispatch,
    error::{exit_codes, Error, Result},
    output::{
        print_banner, print_error, print_info, print_run_stats, print_run_summary,
        print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    tokio::select! {
        biased;

        _ = tokio::signal::ctrl_c() => {
            println!();
            print_warning("Download interrupted by user");
            // A pending password prompt holds a blocking thread that runtime
            // shutdown would wait on.
            std::process::exit(exit_codes::INTERRUPTED);
        }
        result = run() => match result {
            Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
            Err(e) => {
                print_error(&format!("{}", e));
                if matches!(e, Error::Usage(_)) {
                    print_info("Run with --help for usage.");
                }
                ExitCode::from(e.exit_code() as u8)
            }
        },
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Validate the request before anything touches the network
    let request = DownloadRequest::from_inputs(args.request_inputs())?;

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        tracing::debug!(
            "Configuration file not found: {}, using defaults",
            config_path.display()
        );
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    validate_config(&config)?;

    print_run_summary(
        &request.to_string(),
        config.account.username.as_deref(),
        &config.download_directory().display().to_string(),
    );

    let api = InstagramApi::new(&config.options)?;

    let session = match &config.account.username {
        Some(username) => {
            let username = validate_username("username", username)?;
            let store = match &config.account.session_file {
                Some(path) => SessionStore::new(path.clone()),
                None => SessionStore::for_user(&username)?,
            };

            let session = login(&api, &store, &username, read_password).await?;
            print_success(&format!("Successfully logged in as {}", username));
            session
        }
        None => Session::anonymous(),
    };

    let state = dispatch(&api, &session, &config, &request).await?;

    print_run_stats(&state);

    Ok(())
}
