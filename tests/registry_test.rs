// Tests for loading named templates from YAML

use reqtemplate::TemplateRegistry;
use serde_json::json;
use std::io::Write;

mod common;

const TEMPLATES_YML: &str = r#"
- name: create-page
  description: Store a page on the backend
  request:
    method: put
    uri: /{domain}/sys/pages/{title}
    headers:
      content-type: "{content-type}"
      x-request-id: "{$.request.headers.x-request-id}"
    body:
      html: "{$.request.body.html}"
      tags:
        - "{$.request.body.tags}"
        - imported
- name: passthrough
  request:
    uri: "{$.request.uri}"
    body: "{$.request.body}"
"#;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file_and_evaluate() {
    let file = write_config(TEMPLATES_YML);
    let registry = TemplateRegistry::from_file(file.path()).unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.names().collect::<Vec<_>>(),
        vec!["create-page", "passthrough"]
    );
    assert_eq!(
        registry.description("create-page"),
        Some("Store a page on the backend")
    );
    assert_eq!(registry.description("passthrough"), None);

    let out = registry
        .evaluate("create-page", &common::full_context())
        .unwrap();
    assert_eq!(
        out,
        json!({
            "method": "put",
            "uri": "/en.wikipedia.org/sys/pages/Main%20Page",
            "headers": {
                "content-type": "application/json",
                "x-request-id": "abc-123"
            },
            "body": {
                "html": "<p>hi</p>",
                "tags": [["a", "b"], "imported"]
            }
        })
    );
}

#[test]
fn test_passthrough_template() {
    let registry = TemplateRegistry::from_yaml_str(TEMPLATES_YML).unwrap();
    let ctx = common::full_context();
    let out = registry.evaluate("passthrough", &ctx).unwrap();

    assert_eq!(out["method"], json!("post"));
    assert_eq!(out["uri"], json!("/v1/pages/Main_Page"));
    assert_eq!(out["body"], ctx["request"]["body"]);
    assert!(out.get("headers").is_none());
}

#[test]
fn test_missing_file_fails() {
    let result = TemplateRegistry::from_file("/nonexistent/templates.yml");
    assert!(result.unwrap_err().to_string().contains("Could not read file"));
}

#[test]
fn test_invalid_yaml_fails() {
    let file = write_config("name: [not, a, list");
    let err = TemplateRegistry::from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid yaml configuration"));
}

#[test]
fn test_invalid_placeholder_fails_loading() {
    let yml = r#"
- name: broken
  request:
    body:
      a: "{$.request..bad}"
"#;
    let err = TemplateRegistry::from_yaml_str(yml).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Failed to compile template 'broken'"));
    assert!(message.contains("Invalid template $.request..bad"));
}

#[test]
fn test_duplicate_names_fail_loading() {
    let yml = r#"
- name: a
  request: { method: get }
- name: a
  request: { method: put }
"#;
    let err = TemplateRegistry::from_yaml_str(yml).unwrap_err();
    assert!(err.to_string().contains("Duplicate template name: a"));
}
