pub mod embed_dto;

pub use embed_dto::{EmbedRequestDto, EmbedResponseDto};
