//! Notices attached to functions and logged whenever they are called

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::function::{Function, Value};
use crate::logger::Logger;

/// Placeholder in debug notice messages replaced by the call's output
pub const OUTPUT_PLACEHOLDER: &str = "$out";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Deprecated,
    Debug,
}

#[derive(Debug, Clone, PartialEq, Eq, Builder, Deserialize, Serialize)]
pub struct FunctionNotice {
    pub kind: NoticeKind,
    #[builder(default)]
    #[serde(default)]
    pub functions: Vec<String>,
    #[builder(into)]
    pub message: String,
}

impl FunctionNotice {
    pub fn info(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::single(NoticeKind::Info, function, message)
    }

    pub fn deprecated(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::single(NoticeKind::Deprecated, function, message)
    }

    pub fn debug(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::single(NoticeKind::Debug, function, message)
    }

    fn single(kind: NoticeKind, function: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            functions: vec![function.into()],
            message: message.into(),
        }
    }

    /// Emit this notice for a call to `function` that produced `output`
    pub fn log(&self, logger: &Logger, function: &str, output: &Value) {
        logger.in_scope(|| match self.kind {
            NoticeKind::Info => {
                tracing::info!(function, "[INFO NOTICE] `{}` {}", function, self.message);
            }
            NoticeKind::Deprecated => {
                tracing::warn!(
                    function,
                    "[DEPRECATION NOTICE] `{}` is deprecated: {}",
                    function,
                    self.message
                );
            }
            NoticeKind::Debug => {
                let message = self
                    .message
                    .replace(OUTPUT_PLACEHOLDER, &output.to_string());
                tracing::debug!(function, "[DEBUG NOTICE] `{}` {}", function, message);
            }
        });
    }

    /// Wrap `inner` so every call logs this notice
    pub(crate) fn wrap(&self, logger: &Logger, name: &str, inner: Function) -> Function {
        let notice = self.clone();
        let logger = logger.clone();
        let name = name.to_string();
        Function::new(move |args| {
            let result = inner.call(args);
            let output = result.as_ref().cloned().unwrap_or(Value::Null);
            notice.log(&logger, &name, &output);
            result
        })
    }
}
