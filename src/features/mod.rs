pub mod embedding;
pub mod files;
pub mod search;
