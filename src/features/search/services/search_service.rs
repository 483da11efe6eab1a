use std::sync::Arc;

use crate::core::error::Result;
use crate::features::files::repositories::FileRepository;
use crate::features::search::dtos::{SearchRequestDto, SearchResultDto};

/// Vector-similarity lookup over stored embeddings.
///
/// Ranking is delegated to the database's ivfflat index, so results are the
/// approximate nearest neighbours rather than the exact top-k.
pub struct SearchService {
    repository: Arc<dyn FileRepository>,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService").finish_non_exhaustive()
    }
}

impl SearchService {
    pub fn new(repository: Arc<dyn FileRepository>) -> Self {
        Self { repository }
    }

    /// Up to `limit` files ordered by ascending cosine distance.
    ///
    /// Rows stored with a zero embedding get a NaN distance from the database
    /// and are dropped, so a response may hold fewer than `limit` results.
    pub async fn search(&self, dto: SearchRequestDto) -> Result<Vec<SearchResultDto>> {
        let dimension = dto.query_embedding.len();
        let matches = self
            .repository
            .search_similar(dto.query_embedding.into(), dto.limit)
            .await?;

        let found = matches.len();
        let results: Vec<SearchResultDto> = matches
            .into_iter()
            .filter(|m| m.distance.is_finite())
            .map(SearchResultDto::from)
            .collect();

        tracing::debug!(
            dimension,
            limit = dto.limit,
            count = results.len(),
            skipped = found - results.len(),
            "Similarity search"
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::files::repositories::InMemoryFileRepository;
    use crate::features::files::FileService;
    use crate::shared::test_helpers::{sample_request, TEST_DIMENSION};
    use crate::shared::types::ErrorKind;

    async fn seeded() -> (SearchService, FileService) {
        let repo = Arc::new(InMemoryFileRepository::new(TEST_DIMENSION));
        let files = FileService::new(repo.clone());
        for (name, embedding) in [
            ("east.txt", vec![1.0, 0.0, 0.0]),
            ("north-east.txt", vec![1.0, 1.0, 0.0]),
            ("north.txt", vec![0.0, 1.0, 0.0]),
            ("west.txt", vec![-1.0, 0.0, 0.0]),
        ] {
            files.upload(sample_request(name, embedding)).await.unwrap();
        }
        (SearchService::new(repo), files)
    }

    #[tokio::test]
    async fn test_results_ordered_by_distance_and_limited() {
        let (search, _) = seeded().await;

        let results = search
            .search(SearchRequestDto {
                query_embedding: vec![1.0, 0.1, 0.0],
                limit: 3,
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].filename, "east.txt");
        assert!(results
            .windows(2)
            .all(|pair| pair[0].distance <= pair[1].distance));
    }

    #[tokio::test]
    async fn test_limit_larger_than_collection_returns_all() {
        let (search, _) = seeded().await;

        let results = search
            .search(SearchRequestDto {
                query_embedding: vec![0.0, 0.0, 1.0],
                limit: 50,
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 4);
    }

    #[tokio::test]
    async fn test_recycle_bin_files_are_not_matched() {
        let (search, files) = seeded().await;
        let east = files
            .search_by_filename("east.txt")
            .await
            .unwrap()
            .into_iter()
            .find(|f| f.filename == "east.txt")
            .unwrap();
        files.soft_delete(east.id).await.unwrap();

        let results = search
            .search(SearchRequestDto {
                query_embedding: vec![1.0, 0.0, 0.0],
                limit: 10,
            })
            .await
            .unwrap();

        assert!(results.iter().all(|r| r.id != east.id));
    }

    #[tokio::test]
    async fn test_zero_embedding_rows_are_skipped() {
        let (search, files) = seeded().await;
        files
            .upload(sample_request("blank.txt", vec![0.0, 0.0, 0.0]))
            .await
            .unwrap();

        let results = search
            .search(SearchRequestDto {
                query_embedding: vec![1.0, 0.0, 0.0],
                limit: 10,
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.filename != "blank.txt"));
        assert!(results.iter().all(|r| r.distance.is_finite()));
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_storage_error() {
        let (search, _) = seeded().await;

        let err = search
            .search(SearchRequestDto {
                query_embedding: vec![1.0, 0.0],
                limit: 3,
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Storage);
    }
}
