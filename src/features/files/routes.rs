use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::features::files::handlers::{
    delete_file, get_file, list_file_metadata, list_files, list_files_by_date_range,
    list_recycle_bin, restore_file, search_files_by_name, soft_delete_file, update_file,
    upload_file,
};
use crate::features::files::services::FileService;

/// Create routes for the files feature
pub fn routes(file_service: Arc<FileService>) -> Router {
    Router::new()
        .route("/files/upload", post(upload_file))
        .route("/files/getall", get(list_files))
        .route("/files/search", get(search_files_by_name))
        .route("/files/date-range", get(list_files_by_date_range))
        .route("/files/metadata", get(list_file_metadata))
        .route("/files/recycle-bin", get(list_recycle_bin))
        .route(
            "/files/{id}",
            get(get_file).put(update_file).delete(delete_file),
        )
        .route("/files/{id}/soft-delete", patch(soft_delete_file))
        .route("/files/{id}/restore", patch(restore_file))
        .with_state(file_service)
}
