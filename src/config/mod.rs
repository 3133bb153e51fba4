// ==========================================
// 燃料月报汇总 - 配置层
// ==========================================
// 职责: 报表配置（输入目录/输出文件/扩展名/列清单），支持文件与环境变量覆写
// ==========================================

pub mod config_manager;

pub use config_manager::{
    apply_env_overrides, env_keys, ConfigError, ConfigManager, ConfigResult, ReportConfig,
    ReportSettings,
};
