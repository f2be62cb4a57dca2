use std::path::PathBuf;

use image::ImageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Certificate template not found: {0}")]
    TemplateNotFound(PathBuf),
    #[error("Can't read certificate template {path}")]
    TemplateUnreadable {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("Can't create output folder {path}")]
    OutputFolderCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Can't save certificate {path}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}
