use crate::adapters::rpc::MAINNET_ENDPOINT;
use crate::config::{
    DEFAULT_BATCH_DELAY_MS, DEFAULT_BATCH_SIZE, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_PATH,
};
use crate::core::ConfigProvider;
use crate::domain::model::Commitment;
use crate::utils::error::{CheckError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub rpc: RpcConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub batching: BatchingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub commitment: Commitment,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_input_file")]
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchingConfig {
    #[serde(default = "default_batch_size")]
    pub size: usize,
    #[serde(default = "default_batch_delay_ms")]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default)]
    pub write_failures: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_endpoint() -> String {
    MAINNET_ENDPOINT.to_string()
}

fn default_input_file() -> String {
    DEFAULT_INPUT_FILE.to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_batch_delay_ms() -> u64 {
    DEFAULT_BATCH_DELAY_MS
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            commitment: Commitment::default(),
            timeout_seconds: None,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            file: default_input_file(),
        }
    }
}

impl Default for BatchingConfig {
    fn default() -> Self {
        Self {
            size: default_batch_size(),
            delay_ms: default_batch_delay_ms(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            write_failures: false,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CheckError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CheckError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HELIUS_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CheckError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("rpc.endpoint", &self.rpc.endpoint)?;
        crate::utils::validation::validate_path("input.file", &self.input.file)?;
        crate::utils::validation::validate_path("output.path", &self.output.path)?;
        crate::utils::validation::validate_positive_number("batching.size", self.batching.size, 1)?;

        if let Some(timeout) = self.rpc.timeout_seconds {
            crate::utils::validation::validate_range("rpc.timeout_seconds", timeout, 1, 600)?;
        }

        Ok(())
    }

    /// 取得監控設定
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn rpc_endpoint(&self) -> &str {
        &self.rpc.endpoint
    }

    fn commitment(&self) -> Commitment {
        self.rpc.commitment
    }

    fn input_file(&self) -> &str {
        &self.input.file
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn batch_size(&self) -> usize {
        self.batching.size
    }

    fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batching.delay_ms)
    }

    fn write_failures(&self) -> bool {
        self.output.write_failures
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.rpc.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
