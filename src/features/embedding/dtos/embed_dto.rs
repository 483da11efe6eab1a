use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Text to embed. Only an exactly-empty string is rejected.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EmbedRequestDto {
    #[validate(length(min = 1, message = "No text provided"))]
    #[schema(example = "Quarterly revenue grew by twelve percent.")]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmbedResponseDto {
    /// 384 floats from all-MiniLM-L6-v2
    pub embedding: Vec<f32>,
}
