//! Build message type
//!
//! Provides rich diagnostic information:
//! - Error code for categorization
//! - Severity level
//! - File and region of the offending text
//! - Fix candidates

use std::fmt;
use std::path::PathBuf;

use super::codes::ErrorCode;
use crate::base::FileRegion;

/// Severity level for build messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Informational note (e.g. deprecated syntax)
    Info,
    /// Suspicious content that still works
    Warning,
    /// Content robot will reject
    #[default]
    Error,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A diagnostic produced while building or post-processing a file model
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildMessage {
    /// Human-readable message
    pub message: String,
    pub code: ErrorCode,
    pub severity: Severity,
    /// File the message refers to
    pub file: Option<PathBuf>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub region: Option<FileRegion>,
    /// Replacement texts a consumer may offer as quick fixes
    pub fixes: Vec<String>,
}

impl BuildMessage {
    /// Create a message with the code's default severity
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            severity: code.default_severity(),
            file: None,
            region: None,
            fixes: Vec::new(),
        }
    }

    /// Create a builder for more complex messages
    pub fn builder(code: ErrorCode) -> BuildMessageBuilder {
        BuildMessageBuilder::new(code)
    }

    pub fn with_region(mut self, region: FileRegion) -> Self {
        self.region = Some(region);
        self
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fixes.push(fix.into());
        self
    }

    pub fn has_fixes(&self) -> bool {
        !self.fixes.is_empty()
    }

    /// Format the message for display
    pub fn format(&self) -> String {
        let mut result = format!("{}: {}", self.code, self.message);
        if let Some(region) = &self.region {
            result = format!("{}:{}: {}", region.start.reported_line(), region.start.column, result);
        }
        if !self.fixes.is_empty() {
            result.push_str(&format!("\n  did you mean: {}", self.fixes.join(", ")));
        }
        result
    }
}

impl fmt::Display for BuildMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity.as_str(), self.format())
    }
}

/// Builder for creating complex build messages
pub struct BuildMessageBuilder {
    code: ErrorCode,
    message: Option<String>,
    severity: Option<Severity>,
    region: Option<FileRegion>,
    file: Option<PathBuf>,
    fixes: Vec<String>,
}

impl BuildMessageBuilder {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            severity: None,
            region: None,
            file: None,
            fixes: Vec::new(),
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn region(mut self, region: FileRegion) -> Self {
        self.region = Some(region);
        self
    }

    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn fix(mut self, fix: impl Into<String>) -> Self {
        self.fixes.push(fix.into());
        self
    }

    /// Build the message, falling back to the code's defaults
    pub fn build(self) -> BuildMessage {
        BuildMessage {
            message: self
                .message
                .unwrap_or_else(|| self.code.default_message().to_string()),
            code: self.code,
            severity: self.severity.unwrap_or_else(|| self.code.default_severity()),
            file: self.file,
            region: self.region,
            fixes: self.fixes,
        }
    }
}
