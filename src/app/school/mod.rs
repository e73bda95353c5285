//! 学校名录：模型、存储、搜索和 JSON API

pub mod filter;
pub mod handler;
pub mod model;
pub mod store;
