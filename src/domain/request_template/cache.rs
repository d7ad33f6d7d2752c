// Compile-once cache of templates keyed by their spec

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::TemplateError;

use super::Template;

/// Thread-safe cache so each distinct spec is compiled only once.
///
/// Specs are keyed by their compact JSON serialization. Key order is part of
/// the key because it decides resolver order.
///
/// Entries are never evicted, only dropped all at once by [`clear`]. Use it
/// for a bounded set of specs, such as the ones loaded from configuration,
/// and not for specs taken from incoming requests.
///
/// [`clear`]: TemplateCache::clear
#[derive(Debug, Default)]
pub struct TemplateCache {
    templates: RwLock<HashMap<String, Arc<Template>>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached template for `spec`, compiling it on first use.
    ///
    /// Compile errors are returned and nothing is cached for that spec.
    pub fn get_or_compile(&self, spec: &Value) -> Result<Arc<Template>, TemplateError> {
        let key = spec.to_string();

        {
            let templates = self.templates.read().unwrap_or_else(|e| e.into_inner());
            if let Some(template) = templates.get(&key) {
                return Ok(Arc::clone(template));
            }
        }

        let compiled = Arc::new(Template::compile(spec)?);
        let mut templates = self.templates.write().unwrap_or_else(|e| e.into_inner());
        // Another thread may have won the race; keep the first one
        let template = templates.entry(key).or_insert(compiled);
        Ok(Arc::clone(template))
    }

    pub fn len(&self) -> usize {
        self.templates.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.templates.write().unwrap_or_else(|e| e.into_inner()).clear();
    }
}
