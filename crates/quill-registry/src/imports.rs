//! Per-namespace import table.
//!
//! Maps simple names (`StringBuilder`) to the host types imported under them.
//! The table belongs to the compilation context; `import` forms add to it.

use rustc_hash::FxHashMap;

use quill_core::{HostTypeEntry, RegistrationError, TypeHash};

#[derive(Debug, Default, Clone)]
pub struct ImportTable {
    aliases: FxHashMap<String, (TypeHash, String)>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import a type under its simple name.
    pub fn import(&mut self, entry: &HostTypeEntry) -> Result<(), RegistrationError> {
        self.import_as(&entry.name, entry)
    }

    /// Import a type under an explicit alias.
    ///
    /// Re-importing the same type is a no-op; binding the alias to a
    /// different type is an error.
    pub fn import_as(&mut self, alias: &str, entry: &HostTypeEntry) -> Result<(), RegistrationError> {
        if let Some((existing, existing_name)) = self.aliases.get(alias) {
            if *existing == entry.type_hash {
                return Ok(());
            }
            return Err(RegistrationError::ConflictingImport {
                alias: alias.to_string(),
                existing: existing_name.clone(),
            });
        }
        self.aliases.insert(
            alias.to_string(),
            (entry.type_hash, entry.qualified_name.clone()),
        );
        Ok(())
    }

    pub fn resolve(&self, alias: &str) -> Option<TypeHash> {
        self.aliases.get(alias).map(|(hash, _)| *hash)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
