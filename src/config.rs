use crate::error::{OrderFormError, Result};
use order_form_common::company::{builtin_companies, load_companies};
use order_form_common::Company;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 会社リストJSON（未設定なら組み込みリスト）
    pub companies_path: Option<PathBuf>,
    /// 添付画像の長辺上限(px)。0なら縮小しない
    pub max_image_size: u32,
    /// 送信時に注文JSONを書き出す先
    pub default_output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            companies_path: None,
            max_image_size: 1600,
            default_output: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| OrderFormError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("order-form").join("config.json"))
    }

    /// 会社リスト: 引数 > 設定 > 組み込み
    pub fn companies(&self, override_path: Option<&Path>) -> Result<Vec<Company>> {
        match override_path.or(self.companies_path.as_deref()) {
            Some(path) => {
                if !path.exists() {
                    return Err(OrderFormError::FileNotFound(path.display().to_string()));
                }
                Ok(load_companies(path)?)
            }
            None => Ok(builtin_companies()),
        }
    }

    pub fn set_companies_path(&mut self, path: PathBuf) -> Result<()> {
        if !path.exists() {
            return Err(OrderFormError::FileNotFound(path.display().to_string()));
        }
        self.companies_path = Some(path);
        self.save()
    }

    pub fn set_max_image_size(&mut self, px: u32) -> Result<()> {
        self.max_image_size = px;
        self.save()
    }
}
