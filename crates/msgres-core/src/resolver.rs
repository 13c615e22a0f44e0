//! Resolution entry point: registry lookup with a built-in default holder

use crate::cache::BasicStaticDataCache;
use crate::holder::StringResourceHolder;
use crate::loader::{BundledStringResourceLoader, StaticDataLoader};
use crate::locale::runtime_language;
use crate::message::{Message, MessageArg, MessageLevel};
use crate::registry::{ComponentRegistry, STRING_RESOURCE_HOLDER_NAME};
use crate::resource::StringResource;
use msgres_common::Result;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Base unit shipped with the crate; the default holder never reads the
/// filesystem.
const BUILTIN_MESSAGES: &str = include_str!("../resources/messages.properties");

static DEFAULT_HOLDER: Lazy<StringResourceHolder> = Lazy::new(|| {
    let loader: Arc<dyn StaticDataLoader<StringResource>> =
        Arc::new(BundledStringResourceLoader::new().with_unit(
            "messages.properties",
            runtime_language(),
            BUILTIN_MESSAGES,
        ));
    StringResourceHolder::new(Arc::new(BasicStaticDataCache::on_demand(loader)))
});

/// Process-wide fallback holder.
///
/// Built once on first use: an on-demand cache over the crate's
/// `resources/messages.properties`, embedded at compile time and read in the
/// runtime default language.
pub fn default_holder() -> &'static StringResourceHolder {
    &DEFAULT_HOLDER
}

/// Resolves message ids through an optional registry.
///
/// When the registry has a [`StringResourceHolder`] under
/// [`STRING_RESOURCE_HOLDER_NAME`] that holder answers; otherwise the
/// [`default_holder`] does.
#[derive(Clone, Default)]
pub struct MessageResolver {
    registry: Option<Arc<dyn ComponentRegistry>>,
}

impl fmt::Debug for MessageResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageResolver")
            .field("has_registry", &self.registry.is_some())
            .finish()
    }
}

impl MessageResolver {
    /// Resolver backed only by the default holder
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver consulting `registry` first
    pub fn with_registry(registry: Arc<dyn ComponentRegistry>) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    /// The holder currently in effect
    pub fn holder(&self) -> StringResourceHolder {
        let Some(component) = self
            .registry
            .as_ref()
            .and_then(|registry| registry.get_object(STRING_RESOURCE_HOLDER_NAME))
        else {
            return default_holder().clone();
        };

        match component.downcast::<StringResourceHolder>() {
            Ok(holder) => StringResourceHolder::clone(&holder),
            Err(_) => {
                warn!(
                    "Component '{}' is not a string resource holder, using the default",
                    STRING_RESOURCE_HOLDER_NAME
                );
                default_holder().clone()
            }
        }
    }

    /// Resource for `id` from the holder in effect
    pub fn string_resource(&self, id: &str) -> Result<Arc<StringResource>> {
        self.holder().get(id)
    }

    /// Resolve `id` and wrap it with a level and positional arguments
    pub fn create_message(
        &self,
        level: MessageLevel,
        id: &str,
        args: Vec<MessageArg>,
    ) -> Result<Message> {
        Ok(Message::new(level, self.string_resource(id)?, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{ResourceRow, TableStringResourceLoader, VecRowSource};
    use crate::registry::InMemoryRegistry;
    use msgres_config::PopulationMode;

    fn table_holder() -> StringResourceHolder {
        let source = VecRowSource::new(
            "MESSAGE",
            vec![
                ResourceRow::new("10001", "ja", "メッセージ001"),
                ResourceRow::new("10001", "en", "Message001"),
            ],
        );
        StringResourceHolder::from_loader(TableStringResourceLoader::new(source), PopulationMode::OnDemand)
            .unwrap()
    }

    #[test]
    fn test_registered_holder_wins() {
        let registry = Arc::new(InMemoryRegistry::with_holder(table_holder()));
        let resolver = MessageResolver::with_registry(registry);

        let resource = resolver.string_resource("10001").unwrap();
        assert_eq!(resource.text_for_language("ja").unwrap(), "メッセージ001");
    }

    #[test]
    fn test_registry_swap_is_observed() {
        let registry = Arc::new(InMemoryRegistry::new());
        let resolver = MessageResolver::with_registry(registry.clone());
        assert!(resolver.string_resource("10001").unwrap_err().is_not_found());

        registry.register(STRING_RESOURCE_HOLDER_NAME, Arc::new(table_holder()));
        assert!(resolver.string_resource("10001").is_ok());
    }

    #[test]
    fn test_wrong_component_type_falls_back() {
        let registry = Arc::new(InMemoryRegistry::new());
        registry.register(STRING_RESOURCE_HOLDER_NAME, Arc::new("not a holder"));
        let resolver = MessageResolver::with_registry(registry);

        let resource = resolver.string_resource("default.key").unwrap();
        assert_eq!(resource.id(), "default.key");
    }

    #[test]
    fn test_create_message() {
        let registry = Arc::new(InMemoryRegistry::with_holder(table_holder()));
        let resolver = MessageResolver::with_registry(registry);

        let message = resolver
            .create_message(MessageLevel::Error, "10001", crate::msg_args!["field"])
            .unwrap();
        assert_eq!(message.level(), MessageLevel::Error);
        assert_eq!(message.message_id(), "10001");
        assert_eq!(message.args().len(), 1);

        assert!(resolver
            .create_message(MessageLevel::Info, "", Vec::new())
            .unwrap_err()
            .is_invalid_identifier());
    }
}
