//! Subject keyword detection

/// Keyword used when none is configured
pub const DEFAULT_KEYWORD: &str = "meeting";

/// Whether the subject mentions a meeting (case-insensitive substring match)
pub fn is_meeting(subject: &str) -> bool {
    MeetingDetector::default().is_meeting(subject)
}

/// Case-insensitive substring matcher for a configured keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingDetector {
    /// Stored lowercased
    keyword: String,
}

impl MeetingDetector {
    pub fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn is_meeting(&self, subject: &str) -> bool {
        subject.to_lowercase().contains(&self.keyword)
    }
}

impl Default for MeetingDetector {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORD)
    }
}
