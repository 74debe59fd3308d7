use crate::ast::Node;

/// Whether a child counts when matching chains and collapsing branches.
///
/// Whitespace-only text and empty containers (what `{/* comment */}`
/// leaves behind) are ignorable; everything else is significant.
pub fn is_significant(node: &Node) -> bool {
    match node {
        Node::Text(text) => !text.trim().is_empty(),
        Node::Container(container) => !container.is_empty(),
        Node::Element(_) | Node::Fragment(_) => true,
    }
}
