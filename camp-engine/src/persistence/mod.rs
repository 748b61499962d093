//! 持久化模块
//!
//! - [`ResortSnapshot`] - 存储文档格式
//! - [`SnapshotStore`] - 本地 / 远端 / 镜像存储
//! - [`SaveWorker`] - 防抖存档
//! - 备份汇出与还原

pub mod backup;
pub mod snapshot;
pub mod store;
pub mod worker;

pub use backup::{BACKUP_VERSION, BackupError, RestoreSummary};
pub use snapshot::ResortSnapshot;
pub use store::{BasketStore, FileStore, MirroredStore, SnapshotStore, StoreError, store_from_config};
pub use worker::{SaveWorker, save_snapshot};

use crate::core::ResortState;

/// 启动时载入状态；没有快照或读取失败时使用默认值
pub async fn load_or_default(store: &dyn SnapshotStore, key: &str, default_blanket_stock: u32) -> ResortState {
    let document = match store.load(key).await {
        Ok(Some(document)) => document,
        Ok(None) => {
            tracing::info!(store = store.name(), key = %key, "No snapshot found, starting from defaults");
            return ResortState::with_defaults(default_blanket_stock);
        }
        Err(e) => {
            tracing::error!(store = store.name(), key = %key, error = %e, "Snapshot load failed, starting from defaults");
            return ResortState::with_defaults(default_blanket_stock);
        }
    };

    match ResortSnapshot::from_value(document) {
        Ok(snapshot) => {
            tracing::info!(last_updated = ?snapshot.last_updated, "Snapshot loaded");
            snapshot.into_state(default_blanket_stock)
        }
        Err(e) => {
            tracing::error!(error = %e, "Snapshot has an unexpected shape, starting from defaults");
            ResortState::with_defaults(default_blanket_stock)
        }
    }
}
