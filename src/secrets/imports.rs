//! Secret import resolution.
//!
//! A listing returns the secrets of the requested scope plus the secret sets
//! it imports, lowest precedence first. Resolution layers them: local values
//! win, then the import nearest the local scope, down to the farthest one.
//!
//! What counts as "already set":
//! - a secret present with an empty string value is set; imports do not override it
//! - a secret whose value is absent or `null` is unset and falls through to the imports
//!
//! A key still unset after every import is kept with an empty value.

use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::models::{ImportedSecrets, ListSecretsResponse, SecretRecord};
use super::types::SecretString;

/// A key with its final, wrapped value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSecret {
    pub key: String,
    pub value: SecretString,
}

/// Merges local secrets with their imports.
///
/// Output order is first-seen key order: local keys as listed, then keys that
/// only exist in imports, nearest import first.
pub fn resolve_imports(secrets: &[SecretRecord], imports: &[ImportedSecrets]) -> Vec<ResolvedSecret> {
    let mut order: Vec<&str> = Vec::with_capacity(secrets.len());
    let mut values: HashMap<&str, Option<&SecretString>> = HashMap::with_capacity(secrets.len());

    // Duplicate local keys: the later entry wins, the first position is kept.
    for secret in secrets {
        let key = secret.secret_key.as_str();
        match values.entry(key) {
            Entry::Occupied(mut slot) => {
                slot.insert(secret.secret_value.as_ref());
            }
            Entry::Vacant(slot) => {
                order.push(key);
                slot.insert(secret.secret_value.as_ref());
            }
        }
    }

    for import in imports.iter().rev() {
        for secret in &import.secrets {
            let key = secret.secret_key.as_str();
            match values.entry(key) {
                Entry::Occupied(mut slot) => {
                    if slot.get().is_none() {
                        slot.insert(secret.secret_value.as_ref());
                    }
                }
                Entry::Vacant(slot) => {
                    order.push(key);
                    slot.insert(secret.secret_value.as_ref());
                }
            }
        }
    }

    order
        .into_iter()
        .map(|key| ResolvedSecret {
            key: key.to_string(),
            value: values.get(key).copied().flatten().cloned().unwrap_or_default(),
        })
        .collect()
}

impl ListSecretsResponse {
    /// Applies [`resolve_imports`] to this response.
    pub fn resolve(&self) -> Vec<ResolvedSecret> {
        resolve_imports(&self.secrets, &self.imports)
    }
}
