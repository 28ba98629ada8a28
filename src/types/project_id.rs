use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Project identifier as the backend hands it out: usually an integer
/// primary key, but any string key is passed through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Number(i64),
    Key(String),
}

impl ProjectId {
    /// Numeric only when the integer prints back as the same text, so
    /// `007` or `+5` stay string keys and reach the backend unchanged.
    pub fn parse(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => ProjectId::Number(n),
            _ => ProjectId::Key(s.to_string()),
        }
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Number(n) => write!(f, "{n}"),
            ProjectId::Key(k) => f.write_str(k),
        }
    }
}

impl FromStr for ProjectId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ProjectId::parse(s))
    }
}

impl From<i32> for ProjectId {
    fn from(value: i32) -> Self {
        ProjectId::Number(value.into())
    }
}

impl From<i64> for ProjectId {
    fn from(value: i64) -> Self {
        ProjectId::Number(value)
    }
}

impl From<u32> for ProjectId {
    fn from(value: u32) -> Self {
        ProjectId::Number(value.into())
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        ProjectId::Key(value.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(value: String) -> Self {
        ProjectId::Key(value)
    }
}

impl From<&ProjectId> for ProjectId {
    fn from(value: &ProjectId) -> Self {
        value.clone()
    }
}
