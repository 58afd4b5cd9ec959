//! Named, dynamically-typed functions for template engines
//!
//! A [`DefaultHandler`] loads [`registry::Registry`] instances, decorates their
//! functions with aliases, notices and safe variants, and builds the flat
//! [`FunctionMap`] a template engine consumes. Handlers are configured with
//! functional options and always own a [`Logger`].

pub mod config;
pub mod function;
pub mod handlers;
pub mod logger;
pub mod notice;
pub mod registry;

pub use function::{Function, FunctionAliasMap, FunctionError, FunctionMap, Value};
pub use handlers::{DefaultHandler, Handler, HandlerError, HandlerOption, new};
pub use logger::Logger;
pub use notice::{FunctionNotice, NoticeKind};
