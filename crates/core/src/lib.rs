pub mod cache;
pub mod document;
pub mod membership;
pub mod serde;
pub mod storage;
