use crate::domain::pubkey::PubkeyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("RPC request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("RPC error {code}: {message}")]
    RpcError { code: i64, message: String },

    #[error("RPC endpoint returned HTTP {status}")]
    HttpStatusError { status: u16 },

    #[error("Malformed RPC response: {message}")]
    MalformedResponseError { message: String },

    #[error("Invalid address: {0}")]
    InvalidAddressError(#[from] PubkeyError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Storage,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CheckError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CheckError::ApiError(_)
            | CheckError::RpcError { .. }
            | CheckError::HttpStatusError { .. }
            | CheckError::MalformedResponseError { .. } => ErrorCategory::Network,
            CheckError::InvalidAddressError(_)
            | CheckError::CsvError(_)
            | CheckError::SerializationError(_) => ErrorCategory::Data,
            CheckError::IoError(_) => ErrorCategory::Storage,
            CheckError::ConfigError { .. }
            | CheckError::ConfigValidationError { .. }
            | CheckError::InvalidConfigValueError { .. }
            | CheckError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CheckError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 單一地址的網路錯誤不會中斷整批處理
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CheckError::ApiError(_) => "Check network connectivity and the RPC endpoint URL",
            CheckError::RpcError { .. } => "Inspect the RPC error; the endpoint may be rate limiting",
            CheckError::HttpStatusError { status } if *status == 429 => {
                "Increase --batch-delay-ms or lower --batch-size"
            }
            CheckError::HttpStatusError { .. } => "Verify the RPC endpoint is reachable and healthy",
            CheckError::MalformedResponseError { .. } => {
                "Make sure the endpoint speaks Solana JSON-RPC"
            }
            CheckError::InvalidAddressError(_) => "Remove or fix the address in the input file",
            CheckError::CsvError(_) | CheckError::SerializationError(_) => {
                "Check the data being written for unexpected content"
            }
            CheckError::IoError(_) => "Check that the input file exists and the output path is writable",
            CheckError::ConfigError { .. }
            | CheckError::ConfigValidationError { .. }
            | CheckError::InvalidConfigValueError { .. }
            | CheckError::MissingConfigError { .. } => "Review the command line flags or TOML configuration",
            CheckError::ProcessingError { .. } => "Re-run with --verbose for more details",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the Solana RPC endpoint: {}", self),
            ErrorCategory::Data => format!("Invalid data encountered: {}", self),
            ErrorCategory::Storage => format!("File access failed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Processing => format!("Balance check failed: {}", self),
        }
    }

    /// 依嚴重程度決定程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
