use std::collections::HashMap;

use crate::models::ModelDescriptor;
use crate::MigrationError;

/// Source interface name to target interface name, fixed for one migration
/// run. Pairing is strictly by ascending index within each shared role, so
/// the same pair of models always yields the same mapping.
#[derive(Debug)]
pub struct InterfaceMapping {
    entries: HashMap<String, String>,
    pairs: Vec<(String, String)>,
}

impl InterfaceMapping {
    pub fn get(&self, source_name: &str) -> Option<&str> {
        self.entries.get(source_name).map(String::as_str)
    }

    /// Mapped pairs in deterministic order (role order, then index).
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Build the interface mapping between two models.
///
/// Excess source slots of a role stay unmapped; excess target slots stay
/// unused. Fails only when the models share no interface role at all.
pub fn build_mapping(
    source: &ModelDescriptor,
    target: &ModelDescriptor,
) -> Result<InterfaceMapping, MigrationError> {
    let mut entries = HashMap::new();
    let mut pairs = Vec::new();

    for role in source.roles() {
        let from = source.slots_of(role);
        let to = target.slots_of(role);
        for (src, tgt) in from.iter().zip(to.iter()) {
            entries.insert(src.name.clone(), tgt.name.clone());
            pairs.push((src.name.clone(), tgt.name.clone()));
        }
    }

    if pairs.is_empty() && !source.slots.is_empty() {
        return Err(MigrationError::IncompatiblePortProfile {
            source_model: source.id.to_string(),
            target_model: target.id.to_string(),
        });
    }

    Ok(InterfaceMapping { entries, pairs })
}
