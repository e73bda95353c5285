//! 应用层

pub mod pages;
pub mod school;

use std::sync::Arc;

use crate::config::UiConfig;
use crate::core::error::CoreError;
use school::store::SchoolStore;

/// 所有处理器共享的状态
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SchoolStore>,
    pub ui: Arc<UiConfig>,
}

impl AppState {
    pub fn new(store: SchoolStore, ui: UiConfig) -> Self {
        Self {
            store: Arc::new(store),
            ui: Arc::new(ui),
        }
    }

    /// 在阻塞线程池上执行存储操作，文件后端做的是同步 IO
    pub async fn with_store<F, T>(&self, op: F) -> Result<T, CoreError>
    where
        F: FnOnce(&SchoolStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| CoreError::InternalServerError(format!("存储任务失败: {}", e)))
    }
}
