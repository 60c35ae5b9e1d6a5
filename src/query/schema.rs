//! Schema reporting

use crate::Result;
use crate::storage::ReadOnlyStore;

/// Reads table definitions from the store catalog
pub struct SchemaReporter<'a> {
    store: &'a ReadOnlyStore,
}

impl<'a> SchemaReporter<'a> {
    pub fn new(store: &'a ReadOnlyStore) -> Self {
        Self { store }
    }

    /// `CREATE` statements for every table-type catalog entry.
    ///
    /// Catalog order is kept as-is; entries without SQL text are skipped.
    pub fn definitions(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .store
            .connection()
            .prepare("SELECT sql FROM sqlite_master WHERE type='table'")?;

        let definitions = stmt
            .query_map([], |row| row.get::<_, Option<String>>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .filter(|sql| !sql.is_empty())
            .collect();

        Ok(definitions)
    }

    /// All definitions newline-joined; empty for a store without tables
    pub fn report(&self) -> Result<String> {
        Ok(self.definitions()?.join("\n"))
    }
}
