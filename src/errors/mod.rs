use std::error::Error as StdError;
use std::fmt;
use serde::{Deserialize, Serialize};
use crate::enums::ai_provider_error::AiProviderError;
use crate::services::github_client::GithubError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SmartIssuesError {
    // Configuration errors
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },

    // Cache errors (writes only; reads degrade to misses)
    CacheError {
        operation: String,
        reason: String,
    },

    // Issue tracker errors
    GithubError {
        operation: String,
        reason: String,
        recoverable: bool,
    },

    // Language model errors
    ProviderError {
        reason: String,
        recoverable: bool,
    },

    // Analysis errors
    AnalysisError {
        issue_number: Option<u64>,
        stage: String,
        reason: String,
    },

    // Parser errors
    ParseError {
        content_type: String,
        line_number: Option<usize>,
        reason: String,
    },

    // File operation errors
    FileOperationError {
        file_path: String,
        operation: String,
        reason: String,
    },

    // User input errors
    UserInputError {
        input: String,
        expected: String,
        suggestion: String,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },
}

impl SmartIssuesError {
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn cache_error(operation: &str, reason: &str) -> Self {
        Self::CacheError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn file_error(file_path: &str, operation: &str, reason: &str) -> Self {
        Self::FileOperationError {
            file_path: file_path.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn analysis_error(issue_number: Option<u64>, stage: &str, reason: &str) -> Self {
        Self::AnalysisError {
            issue_number,
            stage: stage.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::GithubError { recoverable, .. } => *recoverable,
            Self::ProviderError { recoverable, .. } => *recoverable,
            Self::AnalysisError { .. } => true,
            Self::UserInputError { .. } => true,
            Self::ConfigurationError { .. } => true,
            Self::CacheError { .. } => true,
            Self::ParseError { .. } => false,
            Self::FileOperationError { .. } => false,
            Self::SystemError { .. } => false,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SystemError { .. } => ErrorSeverity::Critical,
            Self::FileOperationError { .. } => ErrorSeverity::High,
            Self::AnalysisError { .. } => ErrorSeverity::High,
            Self::ProviderError { .. } => ErrorSeverity::High,
            Self::GithubError { .. } => ErrorSeverity::Medium,
            Self::ParseError { .. } => ErrorSeverity::Medium,
            Self::CacheError { .. } => ErrorSeverity::Low,
            Self::ConfigurationError { .. } => ErrorSeverity::Low,
            Self::UserInputError { .. } => ErrorSeverity::Low,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::CacheError { operation, reason } => {
                format!("Cache error during {}: {}\n💡 Run 'smartissues cache --clear' or pass --no-cache", operation, reason)
            }
            Self::GithubError { operation, reason, .. } => {
                format!("GitHub error during {}: {}\n💡 Check GITHUB_TOKEN and the repository name", operation, reason)
            }
            Self::ProviderError { reason, .. } => {
                format!("AI provider error: {}\n💡 Run 'smartissues check' to verify the API key and model", reason)
            }
            Self::AnalysisError { issue_number, stage, reason } => {
                match issue_number {
                    Some(number) => format!("Analysis of issue #{} failed during {}: {}", number, stage, reason),
                    None => format!("Analysis failed during {}: {}", stage, reason),
                }
            }
            Self::ParseError { content_type, line_number, reason } => {
                let mut msg = format!("Parse error in {}: {}", content_type, reason);
                if let Some(line) = line_number {
                    msg.push_str(&format!(" (line {})", line));
                }
                msg.push_str("\n💡 Check the format and syntax of the input");
                msg
            }
            Self::FileOperationError { file_path, operation, reason } => {
                format!("File operation '{}' failed for '{}': {}\n💡 Check file permissions and path", operation, file_path, reason)
            }
            Self::UserInputError { input, expected, suggestion } => {
                format!("Invalid input '{}': expected {}\n💡 {}", input, expected, suggestion)
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}", operation, reason)
            }
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

impl fmt::Display for SmartIssuesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for SmartIssuesError {}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

pub type SmartIssuesResult<T> = Result<T, SmartIssuesError>;

pub struct ErrorHandler;

impl ErrorHandler {
    /// Logs the technical details and prints the user-facing message.
    pub fn handle_error(error: &SmartIssuesError) {
        let severity = error.severity();

        log::debug!("[{}] {}", severity.name(), error.technical_details());
        eprintln!("{} {}", severity.emoji(), error.user_message());

        if error.is_recoverable() {
            eprintln!("🔄 This error is recoverable - you can retry the operation");
        }
    }
}

impl From<std::io::Error> for SmartIssuesError {
    fn from(error: std::io::Error) -> Self {
        SmartIssuesError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for SmartIssuesError {
    fn from(error: serde_json::Error) -> Self {
        SmartIssuesError::ParseError {
            content_type: "JSON".to_string(),
            line_number: Some(error.line()),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for SmartIssuesError {
    fn from(error: toml::de::Error) -> Self {
        SmartIssuesError::ParseError {
            content_type: "TOML".to_string(),
            line_number: None,
            reason: error.message().to_string(),
        }
    }
}

impl From<handlebars::RenderError> for SmartIssuesError {
    fn from(error: handlebars::RenderError) -> Self {
        SmartIssuesError::SystemError {
            operation: "report rendering".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<handlebars::TemplateError> for SmartIssuesError {
    fn from(error: handlebars::TemplateError) -> Self {
        SmartIssuesError::ParseError {
            content_type: "report template".to_string(),
            line_number: None,
            reason: error.to_string(),
        }
    }
}

impl From<AiProviderError> for SmartIssuesError {
    fn from(error: AiProviderError) -> Self {
        let recoverable = matches!(
            error,
            AiProviderError::NetworkError(_) | AiProviderError::RateLimited(_)
        );
        SmartIssuesError::ProviderError {
            reason: error.to_string(),
            recoverable,
        }
    }
}

impl From<GithubError> for SmartIssuesError {
    fn from(error: GithubError) -> Self {
        let recoverable = matches!(error, GithubError::Network(_) | GithubError::RateLimited(_));
        SmartIssuesError::GithubError {
            operation: "GitHub API request".to_string(),
            reason: error.to_string(),
            recoverable,
        }
    }
}
