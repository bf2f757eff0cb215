use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("HTTP error! status: {status} ({url})")]
    HttpStatus { status: u16, url: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("CSV parse error: {message}")]
    ParseError { message: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session required for {operation}")]
    SessionRequired { operation: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ErrorCategory {
    Network,
    Parse,
    Credential,
    Session,
    Configuration,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DashError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashError::HttpStatus { .. } | DashError::Transport(_) | DashError::IoError(_) => {
                ErrorCategory::Network
            }
            DashError::CsvError(_) | DashError::ParseError { .. } => ErrorCategory::Parse,
            DashError::InvalidCredentials => ErrorCategory::Credential,
            DashError::SessionRequired { .. } => ErrorCategory::Session,
            DashError::SerializationError(_) => ErrorCategory::Serialization,
            DashError::ConfigValidationError { .. }
            | DashError::InvalidConfigValueError { .. }
            | DashError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Credential => ErrorSeverity::Low,
            ErrorCategory::Serialization => ErrorSeverity::Medium,
            ErrorCategory::Network | ErrorCategory::Parse | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::Session => ErrorSeverity::Critical,
        }
    }

    /// 登入失敗可以立即重試，其餘錯誤對本次載入都是終結性的
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DashError::InvalidCredentials)
    }

    /// 程式結束碼：可重試為 2，High 為 1，Critical 為 3
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DashError::HttpStatus { status, .. } if *status == 404 => {
                "Make sure Sheet1.csv is served at the configured source".to_string()
            }
            DashError::HttpStatus { .. } | DashError::Transport(_) => {
                "Check the source URL and that the server is reachable, then restart".to_string()
            }
            DashError::IoError(_) => "Check that the CSV file exists and is readable".to_string(),
            DashError::CsvError(_) | DashError::ParseError { .. } => {
                "Check that the file is UTF-8 CSV with a header row".to_string()
            }
            DashError::InvalidCredentials => "Use demo/demo to login".to_string(),
            DashError::SessionRequired { .. } => {
                "Log in before opening the dashboard".to_string()
            }
            DashError::SerializationError(_) => "Retry without --json".to_string(),
            DashError::ConfigValidationError { field, .. }
            | DashError::InvalidConfigValueError { field, .. }
            | DashError::MissingConfigError { field } => {
                format!("Fix the '{}' setting and run again", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Error loading CSV file: {}", self),
            ErrorCategory::Parse => format!("Error parsing CSV file: {}", self),
            ErrorCategory::Credential => {
                "Invalid credentials. Use demo/demo to login".to_string()
            }
            ErrorCategory::Session => format!("Internal error: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Serialization => format!("Could not format output: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
