use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type SessionId = String;
pub type UserId = String;
/// Milliseconds since the unix epoch.
pub type Timestamp = i64;

pub const MAX_USERS_PER_SESSION: usize = 10;
pub const DEFAULT_CODE: &str = "// Start coding here\nconsole.log(\"Hello, World!\");";

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Python => "python",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::JavaScript
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "javascript" => Ok(Self::JavaScript),
            "typescript" => Ok(Self::TypeScript),
            "python" => Ok(Self::Python),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub color: String,
    pub joined_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub code: String,
    pub language: Language,
    pub users: Vec<User>,
    pub created_at: Timestamp,
    pub status: SessionStatus,
}

impl Session {
    pub fn new(id: SessionId, language: Language, code: String, created_at: Timestamp) -> Self {
        Self {
            id,
            code,
            language,
            users: Vec::new(),
            created_at,
            status: SessionStatus::Active,
        }
    }

    pub fn is_full(&self) -> bool {
        self.users.len() >= MAX_USERS_PER_SESSION
    }

    pub fn has_user(&self, user_id: &str) -> bool {
        self.users.iter().any(|u| u.id == user_id)
    }

    pub fn colors_in_use(&self) -> Vec<&str> {
        self.users.iter().map(|u| u.color.as_str()).collect()
    }

    pub fn apply(&mut self, update: SessionUpdate) {
        if let Some(code) = update.code {
            self.code = code;
        }
        if let Some(language) = update.language {
            self.language = language;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// Partial update of a session. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUpdate {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub status: Option<SessionStatus>,
}

impl SessionUpdate {
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.language.is_none() && self.status.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub output: String,
    pub error: Option<String>,
    /// Wall-clock milliseconds.
    pub execution_time: f64,
}

impl ExecutionResult {
    pub fn unsupported(language: &str) -> Self {
        Self {
            output: String::new(),
            error: Some(format!("Unsupported language: {}", language)),
            execution_time: 0.0,
        }
    }

    pub fn failed(error: String, execution_time: f64) -> Self {
        Self {
            output: String::new(),
            error: Some(error),
            execution_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_serialize_session_in_camel_case() {
        let session = Session::new("abcdef1234".into(), Language::Python, "x = 1".into(), 42);
        let value = serde_json::to_value(&session).expect("");
        assert_eq!(value["createdAt"], 42);
        assert_eq!(value["language"], "python");
        assert_eq!(value["status"], "active");
        assert!(value["users"].as_array().expect("").is_empty());
    }

    #[test]
    fn it_should_apply_only_present_fields() {
        let mut session = Session::new("abcdef1234".into(), Language::JavaScript, "a".into(), 0);
        session.apply(SessionUpdate {
            status: Some(SessionStatus::Completed),
            ..Default::default()
        });
        assert_eq!(session.code, "a");
        assert_eq!(session.language, Language::JavaScript);
        assert_eq!(session.status, SessionStatus::Completed);
    }

    #[test]
    fn it_should_parse_language_tags() {
        assert_eq!("typescript".parse::<Language>(), Ok(Language::TypeScript));
        assert_eq!(
            "ruby".parse::<Language>(),
            Err(UnknownLanguage("ruby".into()))
        );
    }

    #[test]
    fn it_should_treat_update_without_fields_as_empty() {
        let update: SessionUpdate = serde_json::from_str("{}").expect("");
        assert!(update.is_empty());
    }
}
