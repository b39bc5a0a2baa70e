use crate::types::TypeMapping;
use std::collections::BTreeMap;

///
/// TypeMappingSource
///
/// External resolver for store type mappings.
///

pub trait TypeMappingSource {
    fn find_by_store_type(&self, store_type: &str) -> Option<TypeMapping>;

    fn find_by_clr_type(&self, clr_type: &str) -> Option<TypeMapping>;

    /// Prefer the configured store type, then fall back to the CLR type.
    fn resolve(&self, store_type: Option<&str>, clr_type: &str) -> Option<TypeMapping> {
        store_type
            .and_then(|store_type| self.find_by_store_type(store_type))
            .or_else(|| self.find_by_clr_type(clr_type))
    }
}

///
/// MappingTable
///
/// Fixed lookup table keyed both ways. The first mapping registered for a
/// store type wins the reverse lookup.
///

#[derive(Clone, Debug, Default)]
pub struct MappingTable {
    by_clr: BTreeMap<String, TypeMapping>,
    by_store: BTreeMap<String, TypeMapping>,
}

impl MappingTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, mapping: TypeMapping) -> Self {
        self.insert(mapping);
        self
    }

    pub fn insert(&mut self, mapping: TypeMapping) {
        self.by_store
            .entry(mapping.store_type.clone())
            .or_insert_with(|| mapping.clone());
        self.by_clr.insert(mapping.clr_type.clone(), mapping);
    }
}

impl TypeMappingSource for MappingTable {
    fn find_by_store_type(&self, store_type: &str) -> Option<TypeMapping> {
        self.by_store.get(store_type).cloned()
    }

    fn find_by_clr_type(&self, clr_type: &str) -> Option<TypeMapping> {
        self.by_clr.get(clr_type).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MappingTable {
        MappingTable::new()
            .with(TypeMapping::new("System.Int32", "int"))
            .with(TypeMapping::new("System.String", "nvarchar(max)"))
            .with(TypeMapping::new("System.Decimal", "decimal(18,2)"))
    }

    #[test]
    fn resolve_prefers_store_type() {
        let mapping = table()
            .resolve(Some("int"), "System.String")
            .expect("store type mapping");

        assert_eq!(mapping.clr_type, "System.Int32");
    }

    #[test]
    fn resolve_falls_back_to_clr_type() {
        let mapping = table()
            .resolve(Some("xml"), "System.Decimal")
            .expect("clr type mapping");

        assert_eq!(mapping.store_type, "decimal(18,2)");
        assert!(table().resolve(None, "System.Guid").is_none());
    }
}
