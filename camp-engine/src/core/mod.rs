//! 核心模块 - 配置、状态和后台任务
//!
//! - [`Config`] - 引擎配置
//! - [`ResortState`] - 营运状态（纯数据）
//! - [`Resort`] - 单写者控制器
//! - [`BackgroundTasks`] - 后台任务管理

pub mod config;
pub mod state;
pub mod tasks;

pub use config::Config;
pub use state::{ChangeEvent, Clock, Resort, ResortState};
pub use tasks::{BackgroundTasks, TaskKind};
