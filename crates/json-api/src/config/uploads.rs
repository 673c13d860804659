//! Uploads Config

use std::path::PathBuf;

use clap::Args;

/// Uploaded image storage settings.
#[derive(Debug, Args)]
pub struct UploadsConfig {
    /// Directory where uploaded product images are stored and served from
    #[arg(long, env = "UPLOADS_DIR", default_value = "uploads")]
    pub uploads_dir: PathBuf,
}
