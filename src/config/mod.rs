pub mod templates;
pub mod yml_settings;

pub use templates::{NamedTemplate, TemplateRegistry, DEFAULT_CONFIG_FILE};
pub use yml_settings::TemplateSettings;
