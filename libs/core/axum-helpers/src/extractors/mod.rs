//! Extractors whose rejections render as [`crate::ErrorResponse`] bodies.

pub mod json_body;
pub mod uuid_path;

pub use json_body::JsonBody;
pub use uuid_path::UuidPath;
