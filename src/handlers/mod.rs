//! Function handlers
//!
//! A handler owns a [`Logger`](crate::Logger), loads [`Registry`](crate::registry::Registry)
//! instances and builds the flat function map handed to a template engine.
//!
//! ## Key Components
//!
//! - [`Handler`] - Trait implemented by function handlers
//! - [`DefaultHandler`] - Built-in handler configured through options
//! - [`HandlerOption`] - Functional option applied at construction
//!
//! ## Example
//!
//! ```rust,ignore
//! use sprout::handlers::{self, Handler, with_registries, with_safe_funcs};
//! use sprout::registry::StdRegistry;
//!
//! let handler = handlers::new([
//!     with_registries(vec![Box::new(StdRegistry::new())]),
//!     with_safe_funcs(true),
//! ]);
//! let functions = handler.build();
//! ```

mod default;
mod options;
mod traits;

pub use default::DefaultHandler;
pub use options::{
    HandlerOption, with_alias, with_aliases, with_handler, with_logger, with_notices,
    with_registries, with_safe_funcs, with_settings,
};
pub use traits::{Handler, HandlerError};

/// Build a [`DefaultHandler`], applying `options` in order
pub fn new(options: impl IntoIterator<Item = HandlerOption<DefaultHandler>>) -> DefaultHandler {
    DefaultHandler::new(options)
}
