use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::files::dtos::{FileMetadataDto, FileRequestDto, FileResponseDto};
use crate::features::files::repositories::FileRepository;
use crate::shared::validation::DateRange;

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("File with id {} not found", id))
}

pub struct FileService {
    repository: Arc<dyn FileRepository>,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService").finish_non_exhaustive()
    }
}

impl FileService {
    pub fn new(repository: Arc<dyn FileRepository>) -> Self {
        Self { repository }
    }

    /// Store a new file. The id is generated here (UUID v7, time-ordered).
    pub async fn upload(&self, dto: FileRequestDto) -> Result<FileResponseDto> {
        let id = Uuid::now_v7();
        let file = self.repository.create(id, dto.into()).await?;

        tracing::info!(file_id = %file.id, filename = %file.filename, "File uploaded");
        Ok(FileResponseDto::from(file))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<FileResponseDto> {
        let file = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        Ok(FileResponseDto::from(file))
    }

    /// All files outside the recycle bin, newest first. Not paginated.
    pub async fn list_all(&self) -> Result<Vec<FileResponseDto>> {
        let files = self.repository.list_active().await?;
        tracing::debug!(count = files.len(), "Listed files");
        Ok(files.into_iter().map(FileResponseDto::from).collect())
    }

    pub async fn search_by_filename(&self, query: &str) -> Result<Vec<FileResponseDto>> {
        let files = self.repository.search_by_filename(query).await?;
        tracing::debug!(query = %query, count = files.len(), "Filename search");
        Ok(files.into_iter().map(FileResponseDto::from).collect())
    }

    pub async fn list_by_date_range(&self, range: DateRange) -> Result<Vec<FileResponseDto>> {
        let files = self.repository.list_by_date_range(range).await?;
        tracing::debug!(
            start = %range.start,
            end = %range.end,
            count = files.len(),
            "Date range listing"
        );
        Ok(files.into_iter().map(FileResponseDto::from).collect())
    }

    pub async fn list_metadata(&self) -> Result<Vec<FileMetadataDto>> {
        let metadata = self.repository.list_metadata().await?;
        Ok(metadata.into_iter().map(FileMetadataDto::from).collect())
    }

    /// Replace filename, content and embedding
    pub async fn update(&self, id: Uuid, dto: FileRequestDto) -> Result<FileResponseDto> {
        let file = self
            .repository
            .update(id, dto.into())
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(file_id = %id, "File updated");
        Ok(FileResponseDto::from(file))
    }

    /// Permanently delete. Irreversible.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        tracing::info!(file_id = %id, "File permanently deleted");
        Ok(())
    }

    /// Move to the recycle bin. Succeeds even if the file is already there.
    pub async fn soft_delete(&self, id: Uuid) -> Result<()> {
        if !self.repository.set_deleted(id, true).await? {
            return Err(not_found(id));
        }

        tracing::info!(file_id = %id, "File moved to recycle bin");
        Ok(())
    }

    /// Take out of the recycle bin. Succeeds even if the file is already active.
    pub async fn restore(&self, id: Uuid) -> Result<()> {
        if !self.repository.set_deleted(id, false).await? {
            return Err(not_found(id));
        }

        tracing::info!(file_id = %id, "File restored");
        Ok(())
    }

    pub async fn list_recycle_bin(&self) -> Result<Vec<FileResponseDto>> {
        let files = self.repository.list_deleted().await?;
        Ok(files.into_iter().map(FileResponseDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::files::repositories::InMemoryFileRepository;
    use crate::shared::test_helpers::{sample_request, TEST_DIMENSION};
    use crate::shared::types::ErrorKind;

    fn service() -> (FileService, Arc<InMemoryFileRepository>) {
        let repo = Arc::new(InMemoryFileRepository::new(TEST_DIMENSION));
        (FileService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_upload_then_get_round_trips() {
        let (service, _) = service();
        let request = sample_request("notes.txt", vec![0.25, -1.5, 3.0]);

        let created = service.upload(request.clone()).await.unwrap();
        let fetched = service.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched.filename, request.filename);
        assert_eq!(fetched.content, request.content);
        let expected = request.embedding.unwrap();
        for (a, b) in fetched.embedding.iter().zip(&expected) {
            assert!((a - b).abs() < f32::EPSILON);
        }
        assert!(!fetched.deleted);
    }

    #[tokio::test]
    async fn test_upload_accepts_empty_strings() {
        let (service, _) = service();
        let request = FileRequestDto {
            filename: String::new(),
            content: String::new(),
            embedding: Some(vec![1.0, 0.0, 0.0]),
        };

        let created = service.upload(request).await.unwrap();
        assert_eq!(created.filename, "");
    }

    #[tokio::test]
    async fn test_upload_wrong_dimension_is_storage_error() {
        let (service, _) = service();
        let err = service
            .upload(sample_request("a.txt", vec![1.0]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[tokio::test]
    async fn test_absent_id_is_not_found_everywhere() {
        let (service, _) = service();
        let id = Uuid::now_v7();

        let errors = [
            service.get_by_id(id).await.unwrap_err(),
            service
                .update(id, sample_request("x", vec![1.0, 1.0, 1.0]))
                .await
                .unwrap_err(),
            service.delete(id).await.unwrap_err(),
            service.soft_delete(id).await.unwrap_err(),
            service.restore(id).await.unwrap_err(),
        ];

        for err in errors {
            assert_eq!(err.kind(), ErrorKind::NotFound, "{err}");
        }
    }

    #[tokio::test]
    async fn test_soft_delete_and_restore_are_idempotent() {
        let (service, _) = service();
        let id = service
            .upload(sample_request("a.txt", vec![1.0, 2.0, 3.0]))
            .await
            .unwrap()
            .id;

        service.soft_delete(id).await.unwrap();
        service.soft_delete(id).await.unwrap();
        assert!(service.get_by_id(id).await.unwrap().deleted);

        service.restore(id).await.unwrap();
        service.restore(id).await.unwrap();
        assert!(!service.get_by_id(id).await.unwrap().deleted);
    }

    #[tokio::test]
    async fn test_soft_deleted_files_move_to_recycle_bin() {
        let (service, _) = service();
        let kept = service
            .upload(sample_request("kept.txt", vec![1.0, 0.0, 0.0]))
            .await
            .unwrap();
        let binned = service
            .upload(sample_request("binned.txt", vec![0.0, 1.0, 0.0]))
            .await
            .unwrap();

        service.soft_delete(binned.id).await.unwrap();

        let active: Vec<Uuid> = service.list_all().await.unwrap().iter().map(|f| f.id).collect();
        let bin: Vec<Uuid> = service
            .list_recycle_bin()
            .await
            .unwrap()
            .iter()
            .map(|f| f.id)
            .collect();
        let metadata = service.list_metadata().await.unwrap();

        assert_eq!(active, vec![kept.id]);
        assert_eq!(bin, vec![binned.id]);
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata[0].id, kept.id);
    }

    #[tokio::test]
    async fn test_hard_delete_is_terminal() {
        let (service, _) = service();
        let id = service
            .upload(sample_request("gone.txt", vec![1.0, 1.0, 1.0]))
            .await
            .unwrap()
            .id;
        service.soft_delete(id).await.unwrap();

        service.delete(id).await.unwrap();

        assert_eq!(
            service.restore(id).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert!(service.list_recycle_bin().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let (service, _) = service();
        let created = service
            .upload(sample_request("old.txt", vec![1.0, 0.0, 0.0]))
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                FileRequestDto {
                    filename: "new.txt".to_string(),
                    content: "new content".to_string(),
                    embedding: Some(vec![0.0, 0.0, 1.0]),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.filename, "new.txt");
        assert_eq!(updated.content, "new content");
        assert_eq!(updated.embedding, vec![0.0, 0.0, 1.0]);
    }
}
