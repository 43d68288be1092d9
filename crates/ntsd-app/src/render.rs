//! Output formatting for a decoded descriptor.

use ntsd_core::types::OutputFormat;
use ntsd_dtyp::dtyp::{SecurityDescriptor, TreeNode, TreeValue, encode_descriptor};

use crate::error::AppResult;

const INDENT: &str = "  ";

/// ## Summary
/// Renders a descriptor in the requested format.
///
/// ## Errors
/// Returns an error if JSON serialization or re-encoding fails.
pub fn render(sd: &SecurityDescriptor, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(&sd.to_tree())),
        OutputFormat::Json => render_json(&sd.to_tree()),
        OutputFormat::Hex => render_hex(sd),
    }
}

/// Renders a tree as indented `name: value` lines.
#[must_use]
pub fn render_text(node: &TreeNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

fn write_node(out: &mut String, node: &TreeNode, depth: usize) {
    let indent = INDENT.repeat(depth);
    match &node.value {
        TreeValue::Leaf(value) => {
            out.push_str(&format!("{indent}{}: {value}\n", node.name));
        }
        TreeValue::Branch(children) => {
            out.push_str(&format!("{indent}{}:\n", node.name));
            for child in children {
                write_node(out, child, depth + 1);
            }
        }
    }
}

/// ## Summary
/// Renders a tree as pretty-printed JSON.
///
/// ## Errors
/// Returns an error if serialization fails.
pub fn render_json(node: &TreeNode) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(node)?)
}

/// ## Summary
/// Re-encodes the descriptor and renders it as lowercase hex.
///
/// ## Errors
/// Returns an error if the descriptor cannot be encoded.
pub fn render_hex(sd: &SecurityDescriptor) -> AppResult<String> {
    Ok(hex::encode(encode_descriptor(sd)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntsd_dtyp::dtyp::{Ace, AceType, Acl, Sid};

    fn descriptor() -> SecurityDescriptor {
        let system: Sid = "S-1-5-18".parse().expect("valid");
        let allow =
            Ace::new(AceType::AccessAllowed, 0, 0x000F_01FF, system.clone()).expect("plain");
        SecurityDescriptor {
            revision: 1,
            control: 0x8004,
            owner: Some(system),
            group: None,
            system_acl: None,
            discretionary_acl: Some(Acl::new(2, vec![allow])),
        }
    }

    #[test]
    fn text_is_indented_by_depth() {
        let text = render_text(&descriptor().to_tree());
        let expected = "\
security_descriptor:
  revision: 1
  control: 0x8004 (SE_DACL_PRESENT | SE_SELF_RELATIVE)
  owner: S-1-5-18 (Local System)
  group: <absent>
  sacl: <absent>
  dacl:
    revision: 2
    size: 28
    count: 1
    entries:
      ace[0]:
        type: ACCESS_ALLOWED
        flags: 0x00
        size: 20
        access_mask: 0x000f01ff
        trustee: S-1-5-18 (Local System)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn json_keeps_tree_shape() {
        let json = render(&descriptor(), OutputFormat::Json).expect("renders");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(value["name"], "security_descriptor");
        assert_eq!(value["value"][2]["name"], "owner");
        assert_eq!(value["value"][2]["value"], "S-1-5-18 (Local System)");
    }

    #[test]
    fn hex_is_reencoded_descriptor() {
        let sd = descriptor();
        let hex_text = render(&sd, OutputFormat::Hex).expect("renders");
        assert_eq!(hex_text.len(), sd.encoded_len() * 2);
        assert!(hex_text.starts_with("01000480"));
    }
}
