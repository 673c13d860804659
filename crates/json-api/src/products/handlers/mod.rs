//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

use salvo::http::form::FilePart;

use storefront_app::domain::products::models::ImageUpload;

/// Turn the request's uploaded files into staged images for the service.
pub(crate) fn staged_images(files: Option<&Vec<FilePart>>) -> Vec<ImageUpload> {
    files
        .map(|files| {
            files
                .iter()
                .map(|file| ImageUpload {
                    source_path: file.path().to_path_buf(),
                    file_name: file.name().unwrap_or("upload").to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}
