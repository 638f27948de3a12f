// Notices
// Short user-facing messages raised by studio operations

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A transient message for the UI shell to show and discard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Warning notice carrying an error's display text
    pub fn rejected(err: &impl fmt::Display) -> Self {
        Notice::warning(err.to_string())
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_uses_error_text() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let notice = Notice::rejected(&err);
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "disk full");
    }

    #[test]
    fn test_serializes_lowercase_level() {
        let json = serde_json::to_value(Notice::error("Gist save failed")).unwrap();
        assert_eq!(json["level"], "error");
        assert_eq!(json["message"], "Gist save failed");
    }
}
