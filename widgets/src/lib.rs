use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub mod bank;
pub mod contact;

/// User-facing result of an action: a flag plus a message to show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub success: bool,
    pub message: String,
}

impl Feedback {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl<T: Display, E: Display> From<Result<T, E>> for Feedback {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(message) => Self::ok(message.to_string()),
            Err(err) => Self::error(err.to_string()),
        }
    }
}
