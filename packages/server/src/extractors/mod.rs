//! Request extractors whose rejections are rendered as [`ErrorBody`](crate::error::ErrorBody).

pub mod json;
pub mod path;
