//! `fetch-day decrypt`: restore plain data files from encrypted copies.

use tracing::{info, instrument};

use fetchday_adapters::{AesGcmCipher, LocalFilesystem};
use fetchday_core::application::DecryptService;

use crate::{
    cli::DecryptArgs,
    commands::{AES_KEY_VAR, require_env},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: DecryptArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    if let Some(dir) = args.data_dir.as_deref().filter(|d| !d.is_dir()) {
        return Err(CliError::InvalidInput {
            message: format!("--data-dir {} is not a directory", dir.display()),
            source: None,
        });
    }

    let key = require_env(AES_KEY_VAR, "decrypt the data files")?;
    let cipher = AesGcmCipher::from_text(&key)?;

    let data_dir = args.data_dir.unwrap_or_else(|| config.workspace().data_dir);
    info!(data_dir = %data_dir.display(), "Decrypting data files");

    let service = DecryptService::new(Box::new(LocalFilesystem::new()), Box::new(cipher), &data_dir);
    let written = service.decrypt_all()?;

    if output.is_json() {
        output.json(&written)?;
        return Ok(());
    }

    if written.is_empty() {
        output.warning(&format!(
            "No encrypted data files found in {}",
            data_dir.display()
        ))?;
        return Ok(());
    }

    for path in &written {
        output.print(&format!("  {}", path.display()))?;
    }
    output.success(&format!("Decrypted {} data file(s)", written.len()))?;

    Ok(())
}
