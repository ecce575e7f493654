//! Hierarchy builder: nested name/children/value records into a [`SkillTree`].
//!
//! The input is display data, so parsing is forgiving: a `children` field
//! that is not an array demotes the node to a leaf instead of failing, and
//! missing names or values fall back to defaults. Only top-level JSON that
//! cannot describe a node at all is an error.

use serde_json::Value;
use thiserror::Error;

use crate::model::{NodeId, SkillTree};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dataset root must be an object or a non-empty array")]
    EmptyDataset,
}

/// Parse one dataset whose root is a single record.
pub fn parse_skills(data: &[u8]) -> Result<SkillTree, DataError> {
    let value: Value = serde_json::from_slice(data)?;
    let obj = value.as_object().ok_or(DataError::EmptyDataset)?;

    let mut tree = SkillTree::with_root(name_of(obj));
    tree[tree.root()].weight = weight_of(obj);
    let root = tree.root();
    append_children(&mut tree, root, obj.get("children"));
    Ok(tree)
}

/// Join several record-array datasets under a synthetic root, one branch
/// per section. This mirrors how the site combines its bundled skill files.
pub fn join_sections(
    root_name: &str,
    sections: &[(&str, &[u8])],
) -> Result<SkillTree, DataError> {
    let mut tree = SkillTree::with_root(root_name);
    for (section_name, data) in sections {
        let value: Value = serde_json::from_slice(data)?;
        let records = value.as_array().ok_or(DataError::EmptyDataset)?;
        let root = tree.root();
        let branch = tree.add_child(root, *section_name, 0.0);
        for record in records {
            append_record(&mut tree, branch, record);
        }
    }
    if tree.children(tree.root()).is_empty() {
        return Err(DataError::EmptyDataset);
    }
    Ok(tree)
}

/// The dataset bundled with the crate: three skill sections joined under
/// one root. Used by tests, the terminal browser, and the wasm demo.
pub fn demo_tree() -> SkillTree {
    let sections: [(&str, &[u8]); 3] = [
        ("frontend", include_bytes!("../data/frontend.json")),
        ("backend", include_bytes!("../data/backend.json")),
        ("operations", include_bytes!("../data/operations.json")),
    ];
    // The bundled files are well-formed; an empty tree is still a valid
    // fallback if they are ever edited into nonsense.
    join_sections("skills", &sections).unwrap_or_else(|_| SkillTree::with_root("skills"))
}

fn append_record(tree: &mut SkillTree, parent: NodeId, value: &Value) {
    let Some(obj) = value.as_object() else {
        // Bare strings are accepted as leaf names; anything else is noise.
        if let Some(name) = value.as_str() {
            tree.add_child(parent, name, 0.0);
        }
        return;
    };
    let id = tree.add_child(parent, name_of(obj), weight_of(obj));
    append_children(tree, id, obj.get("children"));
}

fn append_children(tree: &mut SkillTree, parent: NodeId, children: Option<&Value>) {
    // A malformed `children` (string, number, object…) means leaf, not error.
    if let Some(Value::Array(items)) = children {
        for item in items {
            append_record(tree, parent, item);
        }
    }
}

fn name_of(obj: &serde_json::Map<String, Value>) -> String {
    obj.get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn weight_of(obj: &serde_json::Map<String, Value>) -> f64 {
    obj.get("value").and_then(Value::as_f64).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_tree() {
        let data = br#"{"name":"root","children":[
            {"name":"a","children":[{"name":"a1"},{"name":"a2"}]},
            {"name":"b","value":5}
        ]}"#;
        let tree = parse_skills(data).unwrap();
        assert_eq!(tree.len(), 5);
        let kids = tree.children(tree.root());
        assert_eq!(tree[kids[0]].name, "a");
        assert_eq!(tree[kids[1]].name, "b");
        assert_eq!(tree[kids[1]].weight, 5.0);
    }

    #[test]
    fn malformed_children_degrades_to_leaf() {
        let data = br#"{"name":"root","children":[
            {"name":"bad","children":"not-an-array"},
            {"name":"ok","children":[{"name":"leaf"}]}
        ]}"#;
        let tree = parse_skills(data).unwrap();
        let kids = tree.children(tree.root());
        assert!(tree.is_leaf(kids[0]), "non-array children means leaf");
        assert!(!tree.is_leaf(kids[1]));
    }

    #[test]
    fn sibling_names_may_repeat() {
        let data = br#"{"name":"root","children":[{"name":"x"},{"name":"x"}]}"#;
        let tree = parse_skills(data).unwrap();
        assert_eq!(tree.children(tree.root()).len(), 2);
    }

    #[test]
    fn non_object_root_is_an_error() {
        assert!(parse_skills(b"[1,2,3]").is_err());
        assert!(parse_skills(b"not json at all").is_err());
    }

    #[test]
    fn join_sections_builds_branches() {
        let frontend = br#"[{"name":"css"},{"name":"js","children":[{"name":"react"}]}]"#;
        let backend = br#"[{"name":"rust"}]"#;
        let tree = join_sections(
            "skills",
            &[("frontend", frontend.as_slice()), ("backend", backend.as_slice())],
        )
        .unwrap();
        let kids = tree.children(tree.root());
        assert_eq!(kids.len(), 2);
        assert_eq!(tree[kids[0]].name, "frontend");
        assert_eq!(tree.children(kids[0]).len(), 2);
    }

    #[test]
    fn demo_tree_has_three_sections() {
        let tree = demo_tree();
        assert_eq!(tree.children(tree.root()).len(), 3);
        assert!(tree.len() > 10);
    }
}
