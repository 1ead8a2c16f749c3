use crate::Node;

/// Renders `node`'s subtree, see [`Node::to_sexp`].
pub(super) fn sexp(node: &Node) -> String {
    let mut out = String::new();
    let mut cursor = node.walk();
    let mut depth = 0usize;
    loop {
        let current = cursor.node();
        let shown = is_shown(&current, depth);
        if shown {
            open(&mut out, &current);
        }
        if cursor.goto_first_child() {
            depth += 1;
            continue;
        }
        if shown {
            out.push(')');
        }
        // climb until there is a sibling to continue with
        loop {
            if depth == 0 {
                return out;
            }
            if cursor.goto_next_sibling() {
                break;
            }
            cursor.goto_parent();
            depth -= 1;
            if is_shown(&cursor.node(), depth) {
                out.push(')');
            }
        }
    }
}

/// Anonymous tokens are omitted, unless they are missing or the subject of the dump.
#[inline]
fn is_shown(node: &Node, depth: usize) -> bool {
    depth == 0 || node.is_named() || node.is_missing()
}

fn open(out: &mut String, node: &Node) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push('(');
    if node.is_missing() {
        out.push_str("MISSING ");
    }
    if node.is_named() {
        out.push_str(node.kind());
    } else {
        out.push('"');
        out.extend(node.kind().escape_debug());
        out.push('"');
    }
}
