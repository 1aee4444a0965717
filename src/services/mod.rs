pub mod catalog_service;
pub mod upload_service;

pub use upload_service::{ImageFolder, UploadService, UploadedFile};
