// Writes a resolved value at a path of the output request

use serde_json::{Map, Value};
use std::fmt;

use super::spec_node::is_falsy;
use crate::error::TemplateError;

/// Kind of container created for a missing intermediate position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Object,
    Array,
}

impl Container {
    fn empty(self) -> Value {
        match self {
            Container::Object => Value::Object(Map::new()),
            Container::Array => Value::Array(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Key {
    Field(String),
    Index(usize),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Field(name) => f.write_str(name),
            Key::Index(idx) => write!(f, "{}", idx),
        }
    }
}

#[derive(Debug, Clone)]
struct Step {
    key: Key,
    /// What to create at this position when a deeper step needs it
    container: Container,
}

/// A pre-parsed target path such as `body.a.0.c`.
///
/// Container kinds are taken from the spec at compile time, so a segment
/// like `0` is only treated as an array index when the spec declares an
/// array at that position.
#[derive(Debug, Clone)]
pub struct PathSetter {
    path: String,
    steps: Vec<Step>,
}

impl PathSetter {
    /// Compile a dotted path against the template spec
    pub fn compile(path: &str, spec: &Value) -> Result<Self, TemplateError> {
        let segments: Vec<&str> = path.split('.').collect();
        Self::from_segments(segments.as_slice(), spec)
    }

    pub fn from_segments<S: AsRef<str>>(segments: &[S], spec: &Value) -> Result<Self, TemplateError> {
        let path = segments
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(".");
        let invalid = |reason: String| TemplateError::InvalidPath {
            path: path.clone(),
            reason,
        };

        if segments.is_empty() {
            return Err(invalid("path is empty".to_string()));
        }

        let mut steps = Vec::with_capacity(segments.len());
        let mut subspec = Some(spec);

        for segment in segments {
            let segment = segment.as_ref();
            if segment.is_empty() {
                return Err(invalid("empty segment".to_string()));
            }

            let (key, child) = match subspec {
                Some(Value::Array(items)) => {
                    let idx: usize = segment
                        .parse()
                        .map_err(|_| invalid(format!("'{}' is not an array index", segment)))?;
                    // Indices stay inside the spec array, which bounds padding on write
                    if idx >= items.len() {
                        return Err(invalid(format!(
                            "index {} is out of range for an array of {}",
                            idx,
                            items.len()
                        )));
                    }
                    (Key::Index(idx), items.get(idx))
                }
                Some(Value::Object(map)) => (Key::Field(segment.to_string()), map.get(segment)),
                _ => (Key::Field(segment.to_string()), None),
            };

            let container = if matches!(child, Some(Value::Array(_))) {
                Container::Array
            } else {
                Container::Object
            };

            steps.push(Step { key, container });
            subspec = child;
        }

        Ok(Self { path, steps })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Write `value` at the path, creating missing containers on the way.
    ///
    /// `None` leaves the output untouched. A falsy intermediate (`null`,
    /// `false`, `0`, `""`) is replaced by a container; any other scalar in
    /// the way drops the write.
    pub fn set(&self, root: &mut Map<String, Value>, value: Option<Value>) {
        let Some(value) = value else {
            return;
        };

        let mut steps = self.steps.iter();
        let Some(first) = steps.next() else {
            return;
        };

        let mut slot = root.entry(first.key.to_string()).or_insert(Value::Null);
        let mut container = first.container;

        for step in steps {
            if is_falsy(slot) {
                *slot = container.empty();
            }
            slot = match child_slot(slot, &step.key) {
                Some(child) => child,
                None => {
                    tracing::trace!(path = %self.path, "cannot write through a non-container value");
                    return;
                }
            };
            container = step.container;
        }

        *slot = value;
    }
}

fn child_slot<'v>(parent: &'v mut Value, key: &Key) -> Option<&'v mut Value> {
    match (parent, key) {
        (Value::Object(map), key) => Some(map.entry(key.to_string()).or_insert(Value::Null)),
        (Value::Array(items), Key::Index(idx)) => {
            if items.len() <= *idx {
                items.resize(idx + 1, Value::Null);
            }
            items.get_mut(*idx)
        }
        _ => None,
    }
}
