//! String resources read from a tabular `(id, lang, text)` source

use super::StaticDataLoader;
use crate::resource::{ResourceSetBuilder, StringResource};
use msgres_common::Result;
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One row of a message table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRow {
    /// Message id
    pub id: String,
    /// Language code of `text`
    pub lang: String,
    /// Text template
    pub text: String,
}

impl ResourceRow {
    /// Build a row
    pub fn new(id: impl Into<String>, lang: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lang: lang.into(),
            text: text.into(),
        }
    }
}

/// Anything that can hand over every row of a message table at once.
///
/// Implementations report read failures as
/// [`ResourceError::ConfigurationLoad`](msgres_common::ResourceError::ConfigurationLoad)
/// naming the table.
pub trait RowSource: Send + Sync {
    /// Table name used in logs and errors
    fn table_name(&self) -> &str;

    /// Every row of the table, in any order
    fn fetch_rows(&self) -> Result<Vec<ResourceRow>>;
}

/// Rows held in memory
#[derive(Debug, Clone, Default)]
pub struct VecRowSource {
    name: String,
    rows: Vec<ResourceRow>,
}

impl VecRowSource {
    /// Wrap rows under a table name
    pub fn new(name: impl Into<String>, rows: Vec<ResourceRow>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

impl RowSource for VecRowSource {
    fn table_name(&self) -> &str {
        &self.name
    }

    fn fetch_rows(&self) -> Result<Vec<ResourceRow>> {
        Ok(self.rows.clone())
    }
}

/// Loads [`StringResource`]s by grouping table rows by id
#[derive(Debug)]
pub struct TableStringResourceLoader<S> {
    source: S,
    messages: OnceCell<BTreeMap<String, Arc<StringResource>>>,
    load_passes: AtomicUsize,
}

impl<S: RowSource> TableStringResourceLoader<S> {
    /// Create a loader; the table is not read until the first lookup
    pub fn new(source: S) -> Self {
        Self {
            source,
            messages: OnceCell::new(),
            load_passes: AtomicUsize::new(0),
        }
    }

    /// Number of full load passes started so far
    pub fn load_passes(&self) -> usize {
        self.load_passes.load(Ordering::SeqCst)
    }

    fn messages(&self) -> Result<&BTreeMap<String, Arc<StringResource>>> {
        self.messages.get_or_try_init(|| {
            self.load_passes.fetch_add(1, Ordering::SeqCst);
            debug!("Reading message table {}", self.source.table_name());

            let rows = self.source.fetch_rows()?;
            let row_count = rows.len();
            let mut builder = ResourceSetBuilder::new();
            for row in rows {
                if row.id.is_empty() {
                    warn!("Skipping row without id in table {}", self.source.table_name());
                    continue;
                }
                if builder.insert(row.id.as_str(), row.lang.as_str(), row.text).is_some() {
                    warn!(
                        "Duplicate row for id '{}' and language {} in table {}",
                        row.id,
                        row.lang,
                        self.source.table_name()
                    );
                }
            }

            let resources = builder.build();
            info!(
                "Loaded {} string resources from {} rows of table {}",
                resources.len(),
                row_count,
                self.source.table_name()
            );
            Ok(resources)
        })
    }
}

impl<S: RowSource> StaticDataLoader<StringResource> for TableStringResourceLoader<S> {
    fn load_value(&self, id: &str) -> Result<Option<Arc<StringResource>>> {
        Ok(self.messages()?.get(id).cloned())
    }

    fn load_all(&self) -> Result<Vec<Arc<StringResource>>> {
        Ok(self.messages()?.values().cloned().collect())
    }

    fn id_of(&self, value: &StringResource) -> String {
        value.id().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgres_common::ResourceError;

    fn message_table() -> VecRowSource {
        VecRowSource::new(
            "MESSAGE",
            vec![
                ResourceRow::new("10001", "ja", "メッセージ001"),
                ResourceRow::new("10002", "ja", "メッセージ002"),
                ResourceRow::new("10001", "en", "Message001"),
                ResourceRow::new("10002", "en", "Message002"),
            ],
        )
    }

    struct FailingSource;

    impl RowSource for FailingSource {
        fn table_name(&self) -> &str {
            "BROKEN"
        }

        fn fetch_rows(&self) -> Result<Vec<ResourceRow>> {
            Err(ResourceError::load(
                self.table_name(),
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "down"),
            ))
        }
    }

    #[test]
    fn test_rows_grouped_by_id() {
        let loader = TableStringResourceLoader::new(message_table());

        let resource = loader.load_value("10001").unwrap().unwrap();
        assert_eq!(resource.text_for_language("ja").unwrap(), "メッセージ001");
        assert_eq!(resource.text_for_language("en").unwrap(), "Message001");

        let all = loader.load_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].text_for_language("en").unwrap(), "Message002");
        assert_eq!(loader.load_passes(), 1);
    }

    #[test]
    fn test_unknown_id_is_absent() {
        let loader = TableStringResourceLoader::new(message_table());
        assert!(loader.load_value("99999").unwrap().is_none());
    }

    #[test]
    fn test_rows_without_id_are_skipped() {
        let source = VecRowSource::new(
            "MESSAGE",
            vec![ResourceRow::new("", "ja", "x"), ResourceRow::new("1", "ja", "y")],
        );
        let loader = TableStringResourceLoader::new(source);
        assert_eq!(loader.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_fetch_failure_propagates_and_retries() {
        let loader = TableStringResourceLoader::new(FailingSource);

        let err = loader.load_all().unwrap_err();
        assert!(err.is_configuration_load());
        assert!(err.to_string().contains("[BROKEN]"));

        assert!(loader.load_value("1").is_err());
        assert_eq!(loader.load_passes(), 2);
    }
}
