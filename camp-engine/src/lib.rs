//! Camp Engine - 豪華露營營運引擎
//!
//! # 架构概述
//!
//! 单进程、单写者的营运状态机：
//!
//! - **房态** (`rooms`): 房号正规化、快捷指令、状态转换、换房、自动退房
//! - **电热毯** (`equipment`): 房间与仓库共享的电热毯账本
//! - **厨房** (`kitchen`): 食材库存、异动纪录、餐数统计
//! - **入住纪录** (`history`): 只增不改的入住历史
//! - **会员** (`members`): 会员资料与 AI 笔记分析合并
//! - **汇入** (`import`): 订房报表比对与确认
//! - **语音** (`voice`): 语音助理的房态路由
//! - **持久化** (`persistence`): 快照、本地/远端存储、防抖存档
//! - **控制台** (`console`): 逐行指令
//!
//! # 模块结构
//!
//! ```text
//! camp-engine/src/
//! ├── core/          # 配置、状态、后台任务
//! ├── rooms/         # 房态引擎
//! ├── equipment/     # 电热毯账本
//! ├── kitchen/       # 厨房库存
//! ├── persistence/   # 快照存储
//! └── utils/         # 日志、时间、校验
//! ```

pub mod console;
pub mod core;
pub mod equipment;
pub mod history;
pub mod import;
pub mod kitchen;
pub mod members;
pub mod persistence;
pub mod rooms;
pub mod stats;
pub mod utils;
pub mod voice;

// Re-export 公共类型
pub use core::{ChangeEvent, Clock, Config, Resort, ResortState};
pub use utils::time::OpContext;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境：载入 .env、建立工作目录、初始化日志
pub fn setup_environment() -> std::io::Result<Config> {
    // .env is optional
    let _ = dotenv::dotenv();
    let config = Config::from_env();

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;
    std::fs::create_dir_all(config.snapshot_dir())?;
    init_logger_with_file(Some(config.log_level.as_str()), Some(log_dir.as_path()));
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   ______
  / ____/___ _____ ___  ____
 / /   / __ `/ __ `__ \/ __ \
/ /___/ /_/ / / / / / / /_/ /
\____/\__,_/_/ /_/ /_/ .___/
                   /_/
    "#
    );
}
