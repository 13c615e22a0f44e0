//! Messages: a resolved resource plus level and positional arguments.
//!
//! Formatting the template with its arguments is left to the caller.

use crate::resource::StringResource;
use msgres_common::Result;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

/// Severity of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    /// Informational
    Info,
    /// Warning
    Warn,
    /// Error
    Error,
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// One positional argument of a message
#[derive(Debug, Clone, PartialEq)]
pub enum MessageArg {
    /// Plain text
    Text(String),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Another message, rendered in place by the formatter
    Message(Box<Message>),
}

impl From<&str> for MessageArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MessageArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for MessageArg {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for MessageArg {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for MessageArg {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for MessageArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Message> for MessageArg {
    fn from(value: Message) -> Self {
        Self::Message(Box::new(value))
    }
}

/// A resolved message awaiting formatting
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    level: MessageLevel,
    resource: Arc<StringResource>,
    args: Vec<MessageArg>,
}

impl Message {
    /// Create a message
    pub fn new(level: MessageLevel, resource: Arc<StringResource>, args: Vec<MessageArg>) -> Self {
        Self {
            level,
            resource,
            args,
        }
    }

    /// Severity
    pub const fn level(&self) -> MessageLevel {
        self.level
    }

    /// Id of the underlying resource
    pub fn message_id(&self) -> &str {
        self.resource.id()
    }

    /// The resolved resource
    pub fn resource(&self) -> &StringResource {
        &self.resource
    }

    /// Positional arguments in order
    pub fn args(&self) -> &[MessageArg] {
        &self.args
    }

    /// Unformatted template for the locale's language
    pub fn template(&self, locale: &LanguageIdentifier) -> Result<&str> {
        self.resource.text(locale)
    }
}

/// Build a `Vec<MessageArg>` from heterogeneous values
#[macro_export]
macro_rules! msg_args {
    () => {
        ::std::vec::Vec::<$crate::message::MessageArg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::message::MessageArg::from($arg)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource() -> Arc<StringResource> {
        Arc::new(StringResource::new(
            "errors.maxLength",
            [("ja", "{0}は{1}文字以下で入力してください。"), ("en", "{0} must be {1} characters or less.")],
        ))
    }

    #[test]
    fn test_message_accessors() {
        let message = Message::new(MessageLevel::Error, resource(), msg_args!["name", 10]);

        assert_eq!(message.level(), MessageLevel::Error);
        assert_eq!(message.message_id(), "errors.maxLength");
        assert_eq!(
            message.args(),
            &[MessageArg::Text("name".to_string()), MessageArg::Integer(10)]
        );
        assert_eq!(
            message.template(&"en-US".parse().unwrap()).unwrap(),
            "{0} must be {1} characters or less."
        );
        assert!(message.template(&"fr".parse().unwrap()).unwrap_err().is_unsupported_locale());
    }

    #[test]
    fn test_nested_message_argument() {
        let field = Message::new(
            MessageLevel::Info,
            Arc::new(StringResource::new("field.name", [("en", "Name")])),
            msg_args![],
        );
        let message = Message::new(MessageLevel::Warn, resource(), msg_args![field, 2.5]);

        match &message.args()[0] {
            MessageArg::Message(inner) => assert_eq!(inner.message_id(), "field.name"),
            other => panic!("unexpected argument {other:?}"),
        }
        assert_eq!(message.args()[1], MessageArg::Float(2.5));
    }

    #[test]
    fn test_level_display() {
        assert_eq!(MessageLevel::Info.to_string(), "INFO");
        assert_eq!(MessageLevel::Warn.to_string(), "WARN");
        assert_eq!(MessageLevel::Error.to_string(), "ERROR");
    }
}
