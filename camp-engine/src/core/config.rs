use chrono_tz::Tz;
use std::path::PathBuf;

/// 引擎配置 - 营运引擎的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录（本地快照、日志） |
/// | LOG_LEVEL | info | 日志级别 |
/// | TIMEZONE | Asia/Taipei | 业务时区 |
/// | CHECKOUT_HOUR | 11 | 自动退房时间（时） |
/// | SWEEP_INTERVAL_SECS | 60 | 自动退房扫描间隔（秒） |
/// | SAVE_DEBOUNCE_MS | 1000 | 存档防抖窗口（毫秒） |
/// | BASKET_URL | (无) | 远端存储地址，未设置则只写本地 |
/// | BASKET_NAME | glamping_data_v1 | 远端存储 basket 名称 |
/// | GEMINI_API_KEY | (无) | AI 服务金钥 |
/// | GEMINI_MODEL | gemini-2.5-flash | 报表辨识模型 |
/// | DEFAULT_BLANKET_STOCK | 35 | 首次启动的电热毯总库存 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/camp CHECKOUT_HOUR=12 cargo run -p camp-engine
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储本地快照、日志
    pub work_dir: String,
    /// 日志级别
    pub log_level: String,
    /// 业务时区
    pub timezone: Tz,
    /// 自动退房时间（0-23 时）
    pub checkout_hour: u32,
    /// 自动退房扫描间隔（秒）
    pub sweep_interval_secs: u64,
    /// 存档防抖窗口（毫秒）
    pub save_debounce_ms: u64,
    /// 远端 basket 地址
    pub basket_url: Option<String>,
    /// 远端 basket 名称（同时作为本地快照文件名）
    pub basket_name: String,
    /// AI 服务金钥
    pub gemini_api_key: Option<String>,
    /// 报表辨识模型
    pub gemini_model: String,
    /// 首次启动的电热毯总库存
    pub default_blanket_stock: u32,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(chrono_tz::Asia::Taipei),
            checkout_hour: std::env::var("CHECKOUT_HOUR")
                .ok()
                .and_then(|h| h.parse().ok())
                .filter(|h| *h < 24)
                .unwrap_or(11),
            sweep_interval_secs: std::env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|s| *s > 0)
                .unwrap_or(60),
            save_debounce_ms: std::env::var("SAVE_DEBOUNCE_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1000),
            basket_url: std::env::var("BASKET_URL").ok().filter(|s| !s.is_empty()),
            basket_name: std::env::var("BASKET_NAME")
                .unwrap_or_else(|_| "glamping_data_v1".into()),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty()),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".into()),
            default_blanket_stock: std::env::var("DEFAULT_BLANKET_STOCK")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(35),
        }
    }

    /// 使用自定义工作目录覆盖
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.basket_url = None;
        config
    }

    /// 日志目录
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 本地快照目录
    pub fn snapshot_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("snapshots")
    }

    /// 是否启用远端存储
    pub fn has_remote_store(&self) -> bool {
        self.basket_url.is_some()
    }

    /// 转换为协作方客户端配置
    pub fn client_config(&self) -> camp_client::ClientConfig {
        let mut client = camp_client::ClientConfig::default();
        client.basket_url = self.basket_url.clone();
        client.gemini_api_key = self.gemini_api_key.clone();
        client.vision_model = self.gemini_model.clone();
        client
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
