//! Install and uninstall handlers.
//!
//! One-time bootstrapping: installation creates the databoxes folder
//! under the given root. Uninstallation leaves user data in place.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::store::{DataBoxStore, StoreError};

/// Name of the folder holding the databox definitions.
pub const DATABOXES_FOLDER: &str = "databoxes";

/// Run the install handler: create the databoxes folder if missing and
/// open the store. Idempotent.
pub fn install(root: &Path) -> Result<DataBoxStore, StoreError> {
    info!("DataBox setup handler [BEGIN]");
    let folder = databoxes_folder(root);
    if !folder.is_dir() {
        info!("Adding DataBox folder at {}", folder.display());
        fs::create_dir_all(&folder)?;
    }
    let store = DataBoxStore::open(folder)?;
    info!("DataBox setup handler [DONE]");
    Ok(store)
}

/// Run the uninstall handler. Stored definitions are kept.
pub fn uninstall(root: &Path) {
    info!("DataBox uninstall handler [BEGIN]");
    let folder = databoxes_folder(root);
    if folder.is_dir() {
        info!("Keeping DataBox folder at {}", folder.display());
    }
    info!("DataBox uninstall handler [DONE]");
}

/// The databoxes folder under a root directory.
pub fn databoxes_folder(root: &Path) -> PathBuf {
    root.join(DATABOXES_FOLDER)
}
