use roxmltree::Node;

/// Drops lines referencing the JATS archive DTDs before parsing. PMC dumps
/// carry external-entity declarations the parser cannot resolve offline.
pub(crate) fn strip_dtd_lines(raw: &str) -> String {
    let mut xml = String::with_capacity(raw.len());
    for line in raw.lines() {
        if line.contains("JATS-archivearticle1.dtd") || line.contains("archivearticle.dtd") {
            continue;
        }
        xml.push_str(line);
        xml.push('\n');
    }
    xml
}

/// Element children with the given local tag name, in document order.
pub(crate) fn children_by_tag<'a, 'input>(
    parent: Node<'a, 'input>,
    name: &str,
) -> Vec<Node<'a, 'input>> {
    parent
        .children()
        .filter(|child| child.is_element() && child.has_tag_name(name))
        .collect()
}

/// Concatenated text of the node and its descendants, trimmed at the ends.
pub(crate) fn node_text(node: Node) -> String {
    let mut out = String::new();
    for descendant in node.descendants() {
        if descendant.is_text()
            && let Some(text) = descendant.text()
        {
            out.push_str(text);
        }
    }
    out.trim().to_string()
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Raw markup of the node, sliced out of the source document by byte range.
pub(crate) fn node_source<'a>(node: Node, source: &'a str) -> &'a str {
    &source[node.range()]
}
