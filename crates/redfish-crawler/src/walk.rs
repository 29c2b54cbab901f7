//! Link extraction from one JSON payload
//!
//! A transport-free traversal over the serde_json value variants (object,
//! array, scalar) yielding every `@odata.id` link reachable from the
//! payload, each tagged with a hierarchical underscore-joined key. The walk
//! is internal iteration (a visitor, in the shape of the classic tree-walk
//! callback) so each array keeps its own discovery-order counter; the
//! collected sequence is finite and produced in a single pass.

use serde_json::{Map, Value};

/// One discovered link: the hierarchical key, the target URI, and whether
/// discovery passed beneath a `Members` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub key: String,
    pub uri: String,
    pub via_members: bool,
}

/// Extract every link from `payload`, prefixing keys with `parent_key`.
///
/// Top-level keys containing `Oem` or `JsonSchemas` are never followed
/// (vendor and self-referential subtrees). Non-object payloads yield
/// nothing.
pub fn walk_links(payload: &Value, parent_key: &str) -> Vec<Link> {
    let mut links = Vec::new();
    if let Value::Object(map) = payload {
        for (name, value) in map {
            if name.contains("Oem") || name.contains("JsonSchemas") {
                continue;
            }
            visit(
                &format!("{parent_key}_{name}"),
                name,
                value,
                false,
                &mut |link| links.push(link),
            );
        }
    }
    links
}

/// The string value of a directly carried `@odata.id`, if any.
fn direct_id(map: &Map<String, Value>) -> Option<&str> {
    map.get("@odata.id").and_then(Value::as_str)
}

fn visit(key: &str, name: &str, value: &Value, via_members: bool, sink: &mut dyn FnMut(Link)) {
    match value {
        Value::Object(map) => {
            if let Some(uri) = direct_id(map) {
                sink(Link {
                    key: key.to_string(),
                    uri: uri.to_string(),
                    via_members,
                });
            } else {
                for (child_name, child) in map {
                    visit(
                        &format!("{key}_{child_name}"),
                        child_name,
                        child,
                        via_members,
                        sink,
                    );
                }
            }
        }
        Value::Array(items) => {
            let via = via_members || name == "Members";
            // 1-based suffix per array, assigned in discovery order.
            let mut discovered = 0usize;
            for item in items {
                let Value::Object(map) = item else { continue };
                if let Some(uri) = direct_id(map) {
                    discovered += 1;
                    sink(Link {
                        key: format!("{key}_{discovered}"),
                        uri: uri.to_string(),
                        via_members: via,
                    });
                } else {
                    let mut suffixed = |link: Link| {
                        discovered += 1;
                        sink(Link {
                            key: format!("{}_{}", link.key, discovered),
                            ..link
                        });
                    };
                    for (child_name, child) in map {
                        visit(
                            &format!("{key}_{child_name}"),
                            child_name,
                            child,
                            via,
                            &mut suffixed,
                        );
                    }
                }
            }
        }
        // Scalars carry no links.
        _ => {}
    }
}
