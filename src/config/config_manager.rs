// ==========================================
// 燃料月报汇总 - 配置管理器
// ==========================================
// 职责: 配置加载（JSON 文件 + 环境变量覆写）、默认值写出、输入目录初始化
// 优先级: 环境变量 > 配置文件 > 内置默认值
// ==========================================

use crate::domain::ReportKind;
use crate::importer::{SchemaManifest, EXCEL_EXTENSIONS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}: {message}")]
    Io { path: String, message: String },

    #[error("配置文件格式错误: {path}: {message}")]
    Parse { path: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// 配置结构
// ==========================================

/// 单类报表的配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// 输入目录
    pub input_dir: PathBuf,
    /// 主工作簿文件名
    pub primary_output: String,
    /// 分类工作簿文件名
    pub classified_output: String,
    /// 接受的扩展名（大小写不敏感）
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// 列清单覆写（缺省使用内置清单）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<SchemaManifest>,
}

fn default_extensions() -> Vec<String> {
    EXCEL_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

impl ReportSettings {
    pub fn assay_default() -> Self {
        Self {
            input_dir: PathBuf::from("无人值守化验月报"),
            primary_output: "化验月报汇总.xlsx".to_string(),
            classified_output: "化验月报汇总分类.xlsx".to_string(),
            extensions: default_extensions(),
            manifest: None,
        }
    }

    pub fn weighing_default() -> Self {
        Self {
            input_dir: PathBuf::from("无人值守称重月报"),
            primary_output: "称重月报汇总.xlsx".to_string(),
            classified_output: "称重月报汇总分类.xlsx".to_string(),
            extensions: default_extensions(),
            manifest: None,
        }
    }

    /// 生效的列清单
    pub fn manifest_for(&self, kind: ReportKind) -> SchemaManifest {
        match (&self.manifest, kind) {
            (Some(m), _) => m.clone(),
            (None, ReportKind::Assay) => SchemaManifest::assay(),
            (None, ReportKind::Weighing) => SchemaManifest::weighing(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// 输出目录（默认当前工作目录）
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "ReportSettings::assay_default")]
    pub assay: ReportSettings,
    #[serde(default = "ReportSettings::weighing_default")]
    pub weighing: ReportSettings,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            assay: ReportSettings::assay_default(),
            weighing: ReportSettings::weighing_default(),
        }
    }
}

impl ReportConfig {
    pub fn settings(&self, kind: ReportKind) -> &ReportSettings {
        match kind {
            ReportKind::Assay => &self.assay,
            ReportKind::Weighing => &self.weighing,
        }
    }

    pub fn primary_output_path(&self, kind: ReportKind) -> PathBuf {
        self.output_dir.join(&self.settings(kind).primary_output)
    }

    pub fn classified_output_path(&self, kind: ReportKind) -> PathBuf {
        self.output_dir.join(&self.settings(kind).classified_output)
    }

    /// 预览使用的工作簿: 化验 → 主工作簿，称重 → 分类工作簿
    pub fn preview_path(&self, kind: ReportKind) -> PathBuf {
        match kind {
            ReportKind::Assay => self.primary_output_path(kind),
            ReportKind::Weighing => self.classified_output_path(kind),
        }
    }

    /// 创建缺失的输入目录，返回新建的目录
    pub fn ensure_input_dirs(&self) -> std::io::Result<Vec<PathBuf>> {
        let mut created = Vec::new();
        for kind in ReportKind::ALL {
            let dir = &self.settings(kind).input_dir;
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
                info!(kind = %kind, dir = %dir.display(), "已创建输入目录");
                created.push(dir.clone());
            }
        }
        Ok(created)
    }
}

// ==========================================
// 环境变量键
// ==========================================
pub mod env_keys {
    pub const OUTPUT_DIR: &str = "FUEL_REPORT_OUTPUT_DIR";
    pub const ASSAY_DIR: &str = "FUEL_REPORT_ASSAY_DIR";
    pub const WEIGHING_DIR: &str = "FUEL_REPORT_WEIGHING_DIR";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    config: ReportConfig,
}

impl ConfigManager {
    /// 加载配置
    ///
    /// # 参数
    /// - path: 配置文件路径；None 时使用内置默认值
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(p) => Self::read_file(p)?,
            None => ReportConfig::default(),
        };
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());

        debug!(source = ?path, output_dir = %config.output_dir.display(), "配置加载完成");
        Ok(Self { config })
    }

    fn read_file(path: &Path) -> ConfigResult<ReportConfig> {
        let path_str = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path_str.clone(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path_str,
            message: e.to_string(),
        })
    }

    pub fn into_config(self) -> ReportConfig {
        self.config
    }

    /// 写出默认配置文件
    pub fn write_defaults(path: &Path) -> ConfigResult<()> {
        let path_str = path.display().to_string();
        let json = serde_json::to_string_pretty(&ReportConfig::default()).map_err(|e| {
            ConfigError::Parse {
                path: path_str.clone(),
                message: e.to_string(),
            }
        })?;
        std::fs::write(path, json).map_err(|e| ConfigError::Io {
            path: path_str.clone(),
            message: e.to_string(),
        })?;
        info!(path = %path_str, "默认配置已写出");
        Ok(())
    }
}

/// 应用环境变量覆写（空值忽略）
pub fn apply_env_overrides<F>(config: &mut ReportConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get(env_keys::OUTPUT_DIR) {
        config.output_dir = PathBuf::from(v);
    }
    if let Some(v) = get(env_keys::ASSAY_DIR) {
        config.assay.input_dir = PathBuf::from(v);
    }
    if let Some(v) = get(env_keys::WEIGHING_DIR) {
        config.weighing.input_dir = PathBuf::from(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.assay.input_dir, PathBuf::from("无人值守化验月报"));
        assert_eq!(
            config.primary_output_path(ReportKind::Weighing),
            PathBuf::from("./称重月报汇总.xlsx")
        );
        assert_eq!(
            config.preview_path(ReportKind::Weighing),
            PathBuf::from("./称重月报汇总分类.xlsx")
        );
        assert_eq!(config.assay.extensions, vec!["xls", "xlsx"]);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ReportConfig = serde_json::from_str(r#"{"output_dir": "out"}"#).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.weighing, ReportSettings::weighing_default());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (env_keys::OUTPUT_DIR, "/tmp/out"),
            (env_keys::ASSAY_DIR, "  "),
            (env_keys::WEIGHING_DIR, "/data/cz"),
        ]
        .into_iter()
        .collect();

        let mut config = ReportConfig::default();
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.assay.input_dir, PathBuf::from("无人值守化验月报"));
        assert_eq!(config.weighing.input_dir, PathBuf::from("/data/cz"));
    }

    #[test]
    fn test_write_defaults_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fuel-report.json");
        ConfigManager::write_defaults(&path).unwrap();

        let config: ReportConfig =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(config, ReportConfig::default());

        let loaded = ConfigManager::load(Some(&path)).unwrap().into_config();
        assert_eq!(loaded.assay, ReportSettings::assay_default());
        assert_eq!(loaded.weighing, ReportSettings::weighing_default());
    }

    #[test]
    fn test_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            ConfigManager::load(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_ensure_input_dirs() {
        let dir = TempDir::new().unwrap();
        let mut config = ReportConfig::default();
        config.assay.input_dir = dir.path().join("hy");
        config.weighing.input_dir = dir.path().join("cz");

        let created = config.ensure_input_dirs().unwrap();
        assert_eq!(created.len(), 2);
        assert!(config.assay.input_dir.is_dir());
        assert!(config.ensure_input_dirs().unwrap().is_empty());
    }
}
