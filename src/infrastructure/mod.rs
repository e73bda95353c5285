//! 基础设施层

pub mod logger;
pub mod storage;
