use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::{config::yml_settings::TemplateSettings, domain::Template};

pub const DEFAULT_CONFIG_FILE: &str = "templates.yml";

/// A compiled template together with its configured description
#[derive(Debug)]
pub struct NamedTemplate {
    pub description: Option<String>,
    pub template: Template,
}

/// Named templates loaded from YAML, each compiled exactly once at load time
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, NamedTemplate>,
    // Declaration order, for listing
    names: Vec<String>,
}

impl TemplateRegistry {
    pub fn from_settings(settings: Vec<TemplateSettings>) -> Result<Self> {
        let mut registry = Self::default();
        for setting in settings {
            registry.insert(setting)?;
        }
        Ok(registry)
    }

    pub fn from_yaml_str(yml: &str) -> Result<Self> {
        let settings: Vec<TemplateSettings> =
            serde_yaml::from_str(yml).context("Invalid yaml configuration")?;
        Self::from_settings(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yml = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read file {}", path.display()))?;
        Self::from_yaml_str(&yml).with_context(|| format!("Failed to load {}", path.display()))
    }

    fn insert(&mut self, setting: TemplateSettings) -> Result<()> {
        if self.templates.contains_key(&setting.name) {
            bail!("Duplicate template name: {}", setting.name);
        }

        let template = Template::compile(&setting.request)
            .with_context(|| format!("Failed to compile template '{}'", setting.name))?;
        tracing::debug!(name = %setting.name, resolvers = template.len(), "registered template");

        self.names.push(setting.name.clone());
        self.templates.insert(
            setting.name,
            NamedTemplate {
                description: setting.description,
                template,
            },
        );
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name).map(|named| &named.template)
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.templates
            .get(name)
            .and_then(|named| named.description.as_deref())
    }

    /// Template names in the order they were declared
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Evaluate the named template, `None` if no such template exists
    pub fn evaluate(&self, name: &str, context: &Value) -> Option<Value> {
        self.get(name).map(|template| template.evaluate(context))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn setting(name: &str, request: Value) -> TemplateSettings {
        TemplateSettings {
            name: name.to_string(),
            description: None,
            request,
        }
    }

    #[test]
    fn test_valid_registry() {
        let registry = TemplateRegistry::from_settings(vec![
            setting("a", json!({ "method": "get" })),
            setting("b", json!({ "body": "{$.request.body}" })),
        ])
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(registry.get("a").is_some());
        assert!(registry.get("c").is_none());
    }

    #[test]
    fn test_duplicate_names_fail() {
        let result = TemplateRegistry::from_settings(vec![
            setting("a", json!({ "method": "get" })),
            setting("a", json!({ "method": "put" })),
        ]);
        assert!(result.unwrap_err().to_string().contains("Duplicate template name: a"));
    }

    #[test]
    fn test_compile_error_names_template() {
        let result = TemplateRegistry::from_settings(vec![setting(
            "broken",
            json!({ "body": { "a": "{a..b}" } }),
        )]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to compile template 'broken'"));
        assert!(format!("{:#}", err).contains("Invalid template a..b"));
    }

    #[test]
    fn test_evaluate_by_name() {
        let registry =
            TemplateRegistry::from_settings(vec![setting("a", json!({ "method": "get" }))]).unwrap();
        let ctx = json!({ "request": { "method": "post" } });
        assert_eq!(registry.evaluate("a", &ctx), Some(json!({ "method": "get" })));
        assert_eq!(registry.evaluate("missing", &ctx), None);
    }
}
