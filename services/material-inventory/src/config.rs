//! 库存服务配置（`[inventory]` 配置段）

use config::ConfigError;
use serde::{Deserialize, Serialize};

use crate::domain::rules::RuleBook;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// 启动时确保存在的仓储位置
    pub storage_locations: Vec<String>,
    /// 全部校验边界
    pub rules: RuleBook,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            storage_locations: (1..=3).map(|n| format!("Warehouse {n}")).collect(),
            rules: RuleBook::default(),
        }
    }
}

impl InventoryConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        config::load_section(config_dir, "inventory")
    }
}
