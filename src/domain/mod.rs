// Domain model for request templating

pub mod expression;
pub mod request_template;
pub mod uri_template;

pub use request_template::{Template, TemplateCache};
