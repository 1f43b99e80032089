pub mod codec;
pub mod metadata;
pub mod store;
pub mod types;
