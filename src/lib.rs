pub mod batch;
pub mod config;
pub mod document;
pub mod errors;
pub mod export;
pub mod formatters;
pub mod mapping;
pub mod media_kind;
pub mod probe;
pub mod raw_store;
