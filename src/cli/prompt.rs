//! Interactive prompts.

use crate::error::{Error, Result};

/// Read the account password from the terminal without echoing it.
///
/// The terminal read runs on a blocking thread so Ctrl-C stays responsive
/// while the prompt is open.
pub async fn read_password(username: String) -> Result<String> {
    run_blocking(move || prompt_password(&username)).await
}

fn prompt_password(username: &str) -> Result<String> {
    let password = rpassword::prompt_password(format!("Enter password for {}: ", username))
        .map_err(|e| Error::Authentication(format!("Failed to read password: {}", e)))?;

    if password.is_empty() {
        return Err(Error::Authentication("Password cannot be empty".to_string()));
    }

    Ok(password)
}

async fn run_blocking<F>(prompt: F) -> Result<String>
where
    F: FnOnce() -> Result<String> + Send + 'static,
{
    tokio::task::spawn_blocking(prompt)
        .await
        .map_err(|e| Error::Authentication(format!("Password prompt failed: {}", e)))?
}
