use crate::types::TreeNode;

const MID: &str = "├── ";
const LAST: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";
const DIR_GLYPH: &str = "📁 ";
const FILE_GLYPH: &str = "📄 ";

/// Render a tree as box-drawing text, one node per line
///
/// Vertical bars appear only under ancestors that still have siblings below
/// them. Every line ends with a newline.
pub fn render_tree(nodes: &[TreeNode]) -> String {
    let mut out = String::new();
    render_level(nodes, "", &mut out);
    out
}

fn render_level(nodes: &[TreeNode], prefix: &str, out: &mut String) {
    for (index, node) in nodes.iter().enumerate() {
        let is_last = index + 1 == nodes.len();

        out.push_str(prefix);
        out.push_str(if is_last { LAST } else { MID });
        out.push_str(if node.is_dir() { DIR_GLYPH } else { FILE_GLYPH });
        out.push_str(node.name());
        out.push('\n');

        let children = node.children();
        if !children.is_empty() {
            let child_prefix = format!("{}{}", prefix, if is_last { BLANK } else { PIPE });
            render_level(children, &child_prefix, out);
        }
    }
}
