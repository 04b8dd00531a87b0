use std::{env, path::PathBuf};

use anyhow::Result;
use config::{Config as config_config, File as config_file};
use serde::{Deserialize, Serialize};

use crate::logging;

const CONFIG_PATH: &str = "app.json";

/// 啟動時建立一次，之後以參數傳給每個請求的處理函式
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct App {
    #[serde(default)]
    pub news_api: NewsApi,
    #[serde(default)]
    pub alpha_vantage: AlphaVantage,
    #[serde(default)]
    pub system: System,
}

const NEWS_API_KEY: &str = "NEWS_API_KEY";
const NEWS_API_BASE_URL: &str = "NEWS_API_BASE_URL";

/// https://newsapi.org
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewsApi {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "NewsApi::default_base_url")]
    pub base_url: String,
}

impl NewsApi {
    fn default_base_url() -> String {
        "https://newsapi.org".to_string()
    }
}

impl Default for NewsApi {
    fn default() -> Self {
        NewsApi {
            api_key: String::new(),
            base_url: Self::default_base_url(),
        }
    }
}

const ALPHA_VANTAGE_API_KEY: &str = "ALPHA_VANTAGE_API_KEY";
const ALPHA_VANTAGE_BASE_URL: &str = "ALPHA_VANTAGE_BASE_URL";

/// https://www.alphavantage.co
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AlphaVantage {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "AlphaVantage::default_base_url")]
    pub base_url: String,
}

impl AlphaVantage {
    fn default_base_url() -> String {
        "https://www.alphavantage.co".to_string()
    }
}

impl Default for AlphaVantage {
    fn default() -> Self {
        AlphaVantage {
            api_key: String::new(),
            base_url: Self::default_base_url(),
        }
    }
}

const SERVER_HOST: &str = "SERVER_HOST";
const SERVER_PORT: &str = "SERVER_PORT";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct System {
    #[serde(default = "System::default_host")]
    pub host: String,
    #[serde(default = "System::default_port")]
    pub port: u16,
}

impl System {
    fn default_host() -> String {
        "127.0.0.1".to_string()
    }

    fn default_port() -> u16 {
        5000
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for System {
    fn default() -> Self {
        System {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl App {
    /// 讀取 app.json（若存在），再以環境變數覆蓋
    pub fn get() -> Result<Self> {
        let config_path = config_path();
        let app = if config_path.exists() {
            config_config::builder()
                .add_source(config_file::from(config_path))
                .build()?
                .try_deserialize::<App>()?
        } else {
            App::default()
        };

        let app = app.override_with_env();
        app.warn_missing_keys();

        Ok(app)
    }

    /// 將來至於 env 的設定值覆蓋掉 json 上的設定值
    fn override_with_env(self) -> Self {
        self.override_with(|key| env::var(key).ok())
    }

    fn override_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(NEWS_API_KEY) {
            self.news_api.api_key = key;
        }

        if let Some(url) = lookup(NEWS_API_BASE_URL) {
            self.news_api.base_url = url;
        }

        if let Some(key) = lookup(ALPHA_VANTAGE_API_KEY) {
            self.alpha_vantage.api_key = key;
        }

        if let Some(url) = lookup(ALPHA_VANTAGE_BASE_URL) {
            self.alpha_vantage.base_url = url;
        }

        if let Some(host) = lookup(SERVER_HOST) {
            self.system.host = host;
        }

        if let Some(port) = lookup(SERVER_PORT) {
            match port.parse::<u16>() {
                Ok(port) => self.system.port = port,
                Err(why) => logging::error_file_async(format!(
                    "Ignore {}={} because {:?}",
                    SERVER_PORT, port, why
                )),
            }
        }

        self
    }

    /// 金鑰沒設定時服務照樣啟動，只是對應的外部資料會拿不到
    fn warn_missing_keys(&self) {
        if self.news_api.api_key.is_empty() {
            logging::warn_file_async(format!("{} is not set", NEWS_API_KEY));
        }

        if self.alpha_vantage.api_key.is_empty() {
            logging::warn_file_async(format!("{} is not set", ALPHA_VANTAGE_API_KEY));
        }
    }
}

/// 回傳設定檔的路徑
fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}
