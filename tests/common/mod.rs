// Common test utilities shared across test files

use reqtemplate::Template;
use serde_json::{json, Value};

/// Wrap a request object into an evaluation context
#[allow(dead_code)]
pub fn context(request: Value) -> Value {
    json!({ "request": request })
}

/// Compile a spec that is expected to be valid
#[allow(dead_code)]
pub fn compile(spec: Value) -> Template {
    Template::compile(&spec).expect("spec should compile")
}

/// A context exercising every request part
#[allow(dead_code)]
pub fn full_context() -> Value {
    context(json!({
        "method": "post",
        "uri": "/v1/pages/Main_Page",
        "params": { "domain": "en.wikipedia.org", "title": "Main Page" },
        "headers": { "content-type": "application/json", "x-request-id": "abc-123" },
        "query": { "redirect": false, "rev": 42 },
        "body": { "html": "<p>hi</p>", "tags": ["a", "b"], "meta": { "x-y": { "z": 1 } } }
    }))
}
