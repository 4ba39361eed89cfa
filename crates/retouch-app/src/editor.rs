//! External editor handoff.
//!
//! The working image goes out to a temporary PNG, a fixed platform editor
//! runs against it while the event loop blocks, and whatever is on disk
//! afterwards comes back as the new committed image. If the user quits the
//! editor without saving, the reload simply reads the unchanged file.

use std::process::Command;

use image::DynamicImage;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

use retouch_core::io::{load_image, save_image};

#[cfg(target_os = "windows")]
pub const EDITOR_COMMAND: &str = "mspaint";
#[cfg(not(target_os = "windows"))]
pub const EDITOR_COMMAND: &str = "gimp";

/// Editor name as shown on the button.
#[cfg(target_os = "windows")]
pub const EDITOR_NAME: &str = "Paint";
#[cfg(not(target_os = "windows"))]
pub const EDITOR_NAME: &str = "GIMP";

/// Errors during external editing
#[derive(Error, Debug)]
pub enum EditorError {
    /// Could not stage the image to a temporary file
    #[error("failed to stage temp file: {0}")]
    Stage(String),
    /// The editor process could not be started
    #[error("failed to launch editor: {0}")]
    Launch(String),
    /// The editor ran but reported failure
    #[error("editor exited with {0}")]
    Editor(std::process::ExitStatus),
    /// The edited file could not be read back
    #[error("failed to reload edited file: {0}")]
    Reload(String),
}

/// Hand the image to the platform's editor and return the edited result.
///
/// Blocks until the editor exits. The temporary file is removed on every
/// path, including errors.
pub fn edit_externally(image: &DynamicImage) -> Result<DynamicImage, EditorError> {
    roundtrip_with(EDITOR_COMMAND, image)
}

fn roundtrip_with(command: &str, image: &DynamicImage) -> Result<DynamicImage, EditorError> {
    let staged = NamedTempFile::with_suffix(".png").map_err(|e| EditorError::Stage(e.to_string()))?;
    // TempPath keeps RAII deletion without holding the file open, so the
    // editor can rewrite it in place
    let temp_path = staged.into_temp_path();
    save_image(image, &temp_path).map_err(|e| EditorError::Stage(e.to_string()))?;

    info!("Handing {} to {}", temp_path.display(), command);
    let status = Command::new(command)
        .arg(temp_path.as_os_str())
        .status()
        .map_err(|e| EditorError::Launch(e.to_string()))?;
    if !status.success() {
        return Err(EditorError::Editor(status));
    }

    let edited = load_image(&temp_path).map_err(|e| EditorError::Reload(e.to_string()))?;
    // Explicit close so a deletion failure is observable rather than
    // swallowed by Drop
    temp_path.close().map_err(|e| EditorError::Stage(e.to_string()))?;
    Ok(edited)
}
