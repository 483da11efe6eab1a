pub mod embed_handler;

pub use embed_handler::*;
