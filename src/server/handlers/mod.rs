//! HTTP request handlers for the web server.

mod api;
mod compare_api;
mod pages;
mod static_files;

// Re-export handlers for use by the router
pub use api::{api_status, health};
pub use compare_api::api_compare;
pub use pages::{
    clear_document, compare_documents, index, upload_document, NO_FILE_SELECTED,
    WRONG_UPLOAD_TYPE,
};
pub use static_files::serve_css;
