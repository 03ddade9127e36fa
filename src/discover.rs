use roxmltree::{Document, Node};
use tracing::debug;

use crate::grid::build_table_grid;
use crate::model::Table;
use crate::stats::CorpusStats;
use crate::warning::ExtractWarning;
use crate::xml_source::{children_by_tag, node_source, node_text};

pub(crate) const DEFAULT_TABLE_LABEL: &str = "Table without label";

fn read_label(wrap: Node) -> String {
    children_by_tag(wrap, "label")
        .first()
        .map_or_else(|| DEFAULT_TABLE_LABEL.to_string(), |node| node_text(*node))
}

/// Caption lives in a `caption` child; some corpora put the text in a
/// sibling `p` or `title` instead, and the last variant found wins.
fn read_caption(wrap: Node) -> String {
    let mut caption = String::new();
    for tag in ["caption", "p", "title"] {
        if let Some(node) = children_by_tag(wrap, tag).first() {
            caption = node_text(*node);
        }
    }
    caption
}

fn read_footer(wrap: Node) -> String {
    children_by_tag(wrap, "table-wrap-foot")
        .first()
        .map(|node| node_text(*node))
        .unwrap_or_default()
}

/// Lower bound on the logical table count: the sum of embedded tables per
/// wrap region, floored at the region count since an image-only region still
/// yields one placeholder.
pub(crate) fn count_tables(wraps: &[Node]) -> usize {
    let embedded: usize = wraps
        .iter()
        .map(|wrap| children_by_tag(*wrap, "table").len())
        .sum();
    embedded.max(wraps.len())
}

fn table_shell(wrap: Node, source: &str, document_id: &str) -> Table {
    let mut table = Table::new(read_label(wrap));
    table.caption = read_caption(wrap);
    table.footer = read_footer(wrap);
    table.source_xml = node_source(wrap, source).to_string();
    table.document_id = document_id.to_string();
    table
}

/// Walks every `table-wrap` region in document order and materializes its
/// logical tables: one per embedded `<table>` element, or one image-only
/// placeholder when the region has no table markup at all.
pub(crate) fn extract_tables(
    doc: &Document,
    source: &str,
    document_id: &str,
    stats: &mut CorpusStats,
    warnings: &mut Vec<ExtractWarning>,
) -> Vec<Table> {
    let wraps: Vec<Node> = doc
        .descendants()
        .filter(|node| node.has_tag_name("table-wrap"))
        .collect();
    let mut tables = Vec::with_capacity(count_tables(&wraps));

    for wrap in &wraps {
        let embedded = children_by_tag(*wrap, "table");
        for (sub_index, table_node) in embedded.iter().enumerate() {
            stats.add_table();
            let mut table = table_shell(*wrap, source, document_id);
            table.sub_table_index = sub_index;
            build_table_grid(&mut table, *table_node, tables.len(), stats, warnings);
            debug!(
                label = %table.label,
                rows = table.rows(),
                columns = table.columns(),
                "extracted table"
            );
            tables.push(table);
        }

        if embedded.is_empty() {
            stats.add_table();
            stats.add_image_table();
            let mut table = table_shell(*wrap, source, document_id);
            table.no_xml_table = true;
            debug!(label = %table.label, "table-wrap without table markup");
            tables.push(table);
        }
    }

    tables
}
