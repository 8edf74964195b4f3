//! Clipboard helper for copy-section and copy-payload commands
//!
//! Uses `arboard` for cross-platform access. The clipboard handle is opened
//! per copy so nothing is held between commands.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Put `text` on the system clipboard
///
/// Fails without a display server (headless Linux) or when access is denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    tracing::debug!(bytes = text.len(), "copied to clipboard");
    Ok(())
}
