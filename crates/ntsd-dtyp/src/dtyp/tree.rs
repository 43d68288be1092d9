//! Ordered name/value tree for presenting a decoded descriptor.
//!
//! The tree is plain data; rendering it (text, JSON) is left to the caller.

use serde::Serialize;

use super::core::flags::{self, set_flag_names};
use super::core::{Ace, Acl, Guid, SecurityDescriptor, Sid};

/// Placeholder shown for a component with a zero offset.
pub const ABSENT: &str = "<absent>";

/// One named node of the presentation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    pub value: TreeValue,
}

/// A node's value: a rendered scalar or an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TreeValue {
    Leaf(String),
    Branch(Vec<TreeNode>),
}

impl TreeNode {
    #[must_use]
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: TreeValue::Leaf(value.into()),
        }
    }

    #[must_use]
    pub fn branch(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            value: TreeValue::Branch(children),
        }
    }

    /// Returns the child with the given name, if this is a branch.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        match &self.value {
            TreeValue::Branch(children) => children.iter().find(|c| c.name == name),
            TreeValue::Leaf(_) => None,
        }
    }

    /// Returns the scalar value, if this is a leaf.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match &self.value {
            TreeValue::Leaf(v) => Some(v),
            TreeValue::Branch(_) => None,
        }
    }
}

impl SecurityDescriptor {
    /// Builds the presentation tree: revision, control, owner, group, SACL, DACL.
    #[must_use]
    pub fn to_tree(&self) -> TreeNode {
        TreeNode::branch(
            "security_descriptor",
            vec![
                TreeNode::leaf("revision", self.revision.to_string()),
                TreeNode::leaf(
                    "control",
                    flag_value(
                        format!("0x{:04x}", self.control),
                        &set_flag_names(self.control, flags::control::NAMES),
                    ),
                ),
                sid_node("owner", self.owner.as_ref()),
                sid_node("group", self.group.as_ref()),
                acl_node("sacl", self.system_acl.as_ref()),
                acl_node("dacl", self.discretionary_acl.as_ref()),
            ],
        )
    }
}

impl Acl {
    #[must_use]
    pub fn to_tree(&self, name: &str) -> TreeNode {
        let entries = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, ace)| ace.to_tree(&format!("ace[{i}]")))
            .collect();
        TreeNode::branch(
            name,
            vec![
                TreeNode::leaf("revision", self.revision.to_string()),
                TreeNode::leaf("size", self.encoded_len().to_string()),
                TreeNode::leaf("count", self.entries.len().to_string()),
                TreeNode::branch("entries", entries),
            ],
        )
    }
}

impl Ace {
    #[must_use]
    pub fn to_tree(&self, name: &str) -> TreeNode {
        let mut fields = vec![
            TreeNode::leaf("type", self.ace_type().to_string()),
            TreeNode::leaf(
                "flags",
                flag_value(
                    format!("0x{:02x}", self.flags()),
                    &set_flag_names(self.flags(), flags::ace::NAMES),
                ),
            ),
            TreeNode::leaf("size", self.size().to_string()),
            TreeNode::leaf("access_mask", format!("0x{:08x}", self.access_mask())),
        ];
        if let Some(object_flags) = self.object_flags() {
            fields.push(TreeNode::leaf(
                "object_flags",
                flag_value(
                    format!("0x{object_flags:08x}"),
                    &set_flag_names(object_flags, flags::object::NAMES),
                ),
            ));
            fields.push(guid_node("object_type", self.object_type()));
            fields.push(guid_node(
                "inherited_object_type",
                self.inherited_object_type(),
            ));
        }
        fields.push(TreeNode::leaf("trustee", sid_value(self.trustee())));
        TreeNode::branch(name, fields)
    }
}

fn sid_value(sid: &Sid) -> String {
    match sid.well_known_name() {
        Some(name) => format!("{sid} ({name})"),
        None => sid.to_string(),
    }
}

fn sid_node(name: &str, sid: Option<&Sid>) -> TreeNode {
    TreeNode::leaf(name, sid.map_or_else(|| ABSENT.to_string(), sid_value))
}

fn acl_node(name: &str, acl: Option<&Acl>) -> TreeNode {
    acl.map_or_else(|| TreeNode::leaf(name, ABSENT), |acl| acl.to_tree(name))
}

fn guid_node(name: &str, guid: Option<&Guid>) -> TreeNode {
    let value = guid.map_or_else(|| ABSENT.to_string(), Guid::hyphenated);
    TreeNode::leaf(name, value)
}

fn flag_value(raw: String, names: &[&str]) -> String {
    if names.is_empty() {
        raw
    } else {
        format!("{raw} ({})", names.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtyp::core::{AceType, ObjectAceData};

    fn system() -> Sid {
        "S-1-5-18".parse().expect("valid")
    }

    #[test]
    fn descriptor_tree_order() {
        let sd = SecurityDescriptor::new(system(), system(), Acl::default(), Acl::default());
        let tree = sd.to_tree();
        let TreeValue::Branch(children) = &tree.value else {
            panic!("descriptor tree should be a branch");
        };
        let names: Vec<&str> = children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["revision", "control", "owner", "group", "sacl", "dacl"]
        );
        assert_eq!(
            tree.child("owner").and_then(TreeNode::as_leaf),
            Some("S-1-5-18 (Local System)")
        );
        assert_eq!(
            tree.child("control").and_then(TreeNode::as_leaf),
            Some("0x8014 (SE_DACL_PRESENT | SE_SACL_PRESENT | SE_SELF_RELATIVE)")
        );
    }

    #[test]
    fn absent_components_are_marked() {
        let tree = SecurityDescriptor::default().to_tree();
        assert_eq!(tree.child("sacl").and_then(TreeNode::as_leaf), Some(ABSENT));
        assert_eq!(
            tree.child("owner").and_then(TreeNode::as_leaf),
            Some(ABSENT)
        );
    }

    #[test]
    fn object_ace_lists_guids() {
        let guid: Guid = "bf967aba-0de6-11d0-a285-00aa003049e2"
            .parse()
            .expect("valid");
        let ace = Ace::new_object(
            AceType::AccessAllowedObject,
            0x12,
            0x30,
            ObjectAceData::new(Some(guid), None),
            system(),
        )
        .expect("object");
        let node = ace.to_tree("ace[0]");

        assert_eq!(
            node.child("type").and_then(TreeNode::as_leaf),
            Some("ACCESS_ALLOWED_OBJECT")
        );
        assert_eq!(
            node.child("flags").and_then(TreeNode::as_leaf),
            Some("0x12 (CONTAINER_INHERIT_ACE | INHERITED_ACE)")
        );
        assert_eq!(
            node.child("object_type").and_then(TreeNode::as_leaf),
            Some("bf967aba-0de6-11d0-a285-00aa003049e2")
        );
        assert_eq!(
            node.child("inherited_object_type")
                .and_then(TreeNode::as_leaf),
            Some(ABSENT)
        );
    }

    #[test]
    fn plain_ace_has_no_object_fields() {
        let ace = Ace::new(AceType::AccessDenied, 0, 0x10, system()).expect("plain");
        let node = ace.to_tree("ace[0]");
        assert!(node.child("object_flags").is_none());
        assert_eq!(node.child("size").and_then(TreeNode::as_leaf), Some("20"));
    }

    #[test]
    fn acl_entries_keep_order() {
        let a = Ace::new(AceType::AccessDenied, 0, 1, system()).expect("plain");
        let b = Ace::new(AceType::AccessAllowed, 0, 2, system()).expect("plain");
        let node = Acl::new(2, vec![a, b]).to_tree("dacl");
        let entries = node.child("entries").expect("entries");
        assert_eq!(
            entries
                .child("ace[0]")
                .and_then(|n| n.child("type"))
                .and_then(TreeNode::as_leaf),
            Some("ACCESS_DENIED")
        );
        assert_eq!(
            entries
                .child("ace[1]")
                .and_then(|n| n.child("type"))
                .and_then(TreeNode::as_leaf),
            Some("ACCESS_ALLOWED")
        );
    }

    #[test]
    fn serializes_to_json() {
        let node = TreeNode::branch("x", vec![TreeNode::leaf("a", "1")]);
        let json = serde_json::to_string(&node).expect("serializes");
        assert_eq!(json, r#"{"name":"x","value":[{"name":"a","value":"1"}]}"#);
    }
}
