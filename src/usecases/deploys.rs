use crate::adapters::discord;
use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult};
use crate::common::signatures::validate_github_payload;
use crate::settings::AppSettings;
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{error, info, warn};

pub fn verify_push<C: Context>(ctx: &C, body: &[u8], signature: Option<&str>) -> ServiceResult<()> {
    let secret = ctx.settings().password.as_bytes();
    match validate_github_payload(secret, body, signature) {
        true => Ok(()),
        false => {
            warn!("Rejected unsigned or mis-signed push webhook");
            Err(AppError::HooksInvalidSignature)
        }
    }
}

/// Runs the restart in the background; the caller does not wait for it.
pub fn spawn_restart<C: Context + 'static>(ctx: C) {
    tokio::spawn(async move { restart(&ctx).await });
}

async fn restart<C: Context>(ctx: &C) {
    let settings = ctx.settings();
    let _ = discord::server_updating(ctx.webhook(), &settings.domain).await;
    let _ = discord::server_stopped(ctx.webhook(), &settings.domain).await;

    info!(command = %settings.restart_command, "Pulling and restarting");
    match run_restart_command(settings).await {
        Ok(status) if status.success() => info!("Restart command finished"),
        Ok(status) => warn!(%status, "Restart command failed"),
        Err(e) => error!("Failed to run restart command: {e:?}"),
    }
}

async fn run_restart_command(settings: &AppSettings) -> anyhow::Result<ExitStatus> {
    let mut child = Command::new("sudo")
        .args(["-S", "sh", "-c", &settings.restart_command])
        .stdin(Stdio::piped())
        .spawn()?;
    // sudo -S reads the password from stdin
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(format!("{}\n", settings.password).as_bytes())
            .await?;
    }
    Ok(child.wait().await?)
}
