use super::default::DefaultHandler;
use super::traits::Handler;
use crate::config::Settings;
use crate::function::FunctionAliasMap;
use crate::logger::Logger;
use crate::notice::FunctionNotice;
use crate::registry::{self, Registry};

/// Functional option applied to a handler at construction time
///
/// Options run in the order given; a later option overrides what an
/// earlier one set.
pub type HandlerOption<H> = Box<dyn FnOnce(&mut H)>;

/// Replace the handler's logger
pub fn with_logger(logger: Logger) -> HandlerOption<DefaultHandler> {
    Box::new(move |handler: &mut DefaultHandler| handler.logger = logger)
}

/// Replace the whole handler; `None` leaves the target untouched
pub fn with_handler<H: 'static>(replacement: Option<H>) -> HandlerOption<H> {
    Box::new(move |handler: &mut H| {
        if let Some(replacement) = replacement {
            *handler = replacement;
        }
    })
}

/// Load registries; failures are logged and the remaining registries skipped
pub fn with_registries(registries: Vec<Box<dyn Registry>>) -> HandlerOption<DefaultHandler> {
    Box::new(move |handler: &mut DefaultHandler| {
        if let Err(e) = handler.add_registries(registries) {
            handler
                .logger
                .in_scope(|| tracing::warn!(error = %e, "Failed to add registries"));
        }
    })
}

/// Make `original` reachable under each of `aliases` as well
pub fn with_alias(
    original: impl Into<String>,
    aliases: impl IntoIterator<Item = impl Into<String>>,
) -> HandlerOption<DefaultHandler> {
    let original = original.into();
    let aliases: Vec<String> = aliases.into_iter().map(Into::into).collect();
    Box::new(move |handler: &mut DefaultHandler| {
        handler.add_aliases(FunctionAliasMap::from([(original, aliases)]));
    })
}

pub fn with_aliases(aliases: FunctionAliasMap) -> HandlerOption<DefaultHandler> {
    Box::new(move |handler: &mut DefaultHandler| handler.add_aliases(aliases))
}

pub fn with_notices(notices: Vec<FunctionNotice>) -> HandlerOption<DefaultHandler> {
    Box::new(move |handler: &mut DefaultHandler| handler.notices.extend(notices))
}

/// Toggle generation of `safeXxx` variants in [`Handler::build`]
pub fn with_safe_funcs(enabled: bool) -> HandlerOption<DefaultHandler> {
    Box::new(move |handler: &mut DefaultHandler| handler.safe_functions = enabled)
}

/// Apply loaded [`Settings`]: registries, safe flag, aliases and notices
///
/// The safe flag is overwritten, so whichever of this and
/// [`with_safe_funcs`] comes last wins. Registries, aliases and notices are
/// appended to what earlier options set.
pub fn with_settings(settings: Settings) -> HandlerOption<DefaultHandler> {
    Box::new(move |handler: &mut DefaultHandler| {
        for name in &settings.registries {
            let added = registry::builtin(name)
                .map_err(Into::into)
                .and_then(|registry| handler.add_registry(registry));
            if let Err(e) = added {
                handler
                    .logger
                    .in_scope(|| tracing::warn!(registry = %name, error = %e, "Skipping registry"));
            }
        }
        handler.safe_functions = settings.safe_functions;
        handler.add_aliases(settings.aliases);
        handler.notices.extend(settings.notices);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::{Function, FunctionMap, Value};
    use crate::logger::test_utils::capturing_logger;
    use crate::registry::{RegistryError, StdRegistry, StringsRegistry};
    use serde_json::json;

    #[test]
    fn test_new_function_handler_default_values() {
        let (logger, logs) = capturing_logger();

        let handler = tracing::dispatcher::with_default(logger.dispatch(), DefaultHandler::default);

        handler.logger().in_scope(|| tracing::info!("reaches the ambient subscriber"));
        assert!(logs.contents().contains("reaches the ambient subscriber"));
        assert!(handler.functions().is_empty());
        assert!(!handler.safe_functions());
    }

    #[test]
    fn test_safe_flag_last_write_wins_with_settings() {
        let settings = Settings {
            registries: Vec::new(),
            ..Settings::default()
        };
        let handler = DefaultHandler::new([
            with_logger(Logger::discard()),
            with_safe_funcs(true),
            with_settings(settings.clone()),
        ]);
        assert!(!handler.safe_functions());

        let handler = DefaultHandler::new([
            with_logger(Logger::discard()),
            with_settings(settings),
            with_safe_funcs(true),
        ]);
        assert!(handler.safe_functions());
    }

    #[test]
    fn test_new_function_handler_custom_values() {
        let logger = Logger::stdout();
        let handler = DefaultHandler::new([with_logger(logger.clone())]);

        assert!(handler.logger().same_as(&logger));
        assert_eq!(handler.logger(), &logger);
    }

    #[test]
    fn test_with_logger() {
        let logger = Logger::stdout();
        let option = with_logger(logger.clone());

        let mut handler = DefaultHandler::default();
        option(&mut handler);

        assert_eq!(handler.logger(), &logger);
    }

    #[test]
    fn test_with_handler_replaces() {
        let replacement = DefaultHandler::new([with_logger(Logger::stdout()), with_safe_funcs(true)]);
        let expected_logger = replacement.logger().clone();
        let option = with_handler(Some(replacement));

        let mut handler = DefaultHandler::default();
        option(&mut handler);

        assert_eq!(handler.logger(), &expected_logger);
        assert!(handler.safe_functions());
    }

    #[test]
    fn test_with_nil_handler() {
        let logger = Logger::stdout();
        let mut handler = DefaultHandler::new([with_logger(logger.clone())]);
        let option = with_handler::<DefaultHandler>(None);

        option(&mut handler);

        assert_eq!(handler, DefaultHandler::new([with_logger(logger)]));
    }

    #[test]
    fn test_last_option_wins() {
        let first = Logger::stdout();
        let second = Logger::discard();
        let handler = DefaultHandler::new([
            with_logger(first),
            with_safe_funcs(true),
            with_logger(second.clone()),
            with_safe_funcs(false),
        ]);

        assert_eq!(handler.logger(), &second);
        assert!(!handler.safe_functions());
    }

    #[test]
    fn test_registries_link_with_logger_set_before_them() {
        let logger = Logger::discard();
        let handler = DefaultHandler::new([
            with_logger(logger),
            with_registries(vec![Box::new(StdRegistry::new()), Box::new(StringsRegistry::new())]),
        ]);

        assert_eq!(handler.registry_uids(), vec!["sprout.std", "sprout.strings"]);
    }

    struct BrokenRegistry;

    impl Registry for BrokenRegistry {
        fn uid(&self) -> &str {
            "test.broken"
        }

        fn link_handler(&mut self, _handler: &dyn Handler) -> Result<(), RegistryError> {
            Err(RegistryError::Link {
                uid: self.uid().to_string(),
                reason: "no handler for you".into(),
            })
        }

        fn register_functions(&self, functions: &mut FunctionMap) -> Result<(), RegistryError> {
            functions.insert("never".into(), Function::new(|_| Ok(Value::Null)));
            Ok(())
        }
    }

    #[test]
    fn test_with_registries_logs_failures() {
        let (logger, logs) = capturing_logger();
        let handler = DefaultHandler::new([
            with_logger(logger),
            with_registries(vec![
                Box::new(StdRegistry::new()),
                Box::new(BrokenRegistry),
                Box::new(StringsRegistry::new()),
            ]),
        ]);

        assert_eq!(handler.registry_uids(), vec!["sprout.std"]);
        assert!(!handler.functions().contains_key("never"));
        assert!(logs.contents().contains("Failed to add registries"));
        assert!(logs.contents().contains("no handler for you"));
    }

    #[test]
    fn test_alias_options_merge() {
        let handler = DefaultHandler::new([
            with_logger(Logger::discard()),
            with_alias("hello", ["hi"]),
            with_aliases(FunctionAliasMap::from([("hello".to_string(), vec!["hey".to_string()])])),
        ]);

        assert_eq!(handler.aliases()["hello"], vec!["hi", "hey"]);
    }

    #[test]
    fn test_with_settings() {
        let settings = Settings {
            registries: vec!["std".into()],
            safe_functions: true,
            aliases: FunctionAliasMap::from([("hello".to_string(), vec!["hi".to_string()])]),
            notices: vec![FunctionNotice::info("hello", "greets")],
        };
        let handler = DefaultHandler::new([with_logger(Logger::discard()), with_settings(settings)]);

        assert_eq!(handler.registry_uids(), vec!["sprout.std"]);
        assert!(handler.safe_functions());
        assert_eq!(handler.notices().len(), 1);

        let built = handler.build();
        assert_eq!(built["safeHi"].call(&[]).unwrap(), json!("Hello!"));
    }

    #[test]
    fn test_with_settings_skips_unknown_registry() {
        let (logger, logs) = capturing_logger();
        let settings = Settings {
            registries: vec!["nope".into(), "strings".into()],
            ..Settings::default()
        };
        let handler = DefaultHandler::new([with_logger(logger), with_settings(settings)]);

        assert_eq!(handler.registry_uids(), vec!["sprout.strings"]);
        assert!(logs.contents().contains("Skipping registry"));
    }
}
