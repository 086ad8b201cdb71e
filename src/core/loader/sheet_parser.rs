//! Fixed-layout row scanner for relationship sheets
//!
//! Layout (1-indexed columns, row 1 is a header):
//! - column 2: node color
//! - column 3: node id
//! - column 4: node label
//! - columns 5/6, 7/8, ...: `(peer id, relation kind)` pairs
//!
//! Scanning a row stops at the first pair whose relation cell is empty.

use crate::core::models::{Edge, Node, NodeColor, NodeId, SheetData};
use crate::{debug, info, warn};

/// A normalized cell: trimmed text, `None` when empty
pub type Cell = Option<String>;

const COLOR_COLUMN: usize = 1;
const ID_COLUMN: usize = 2;
const TEXT_COLUMN: usize = 3;
const FIRST_PAIR_COLUMN: usize = 4;

/// Build nodes and edges from sheet rows
///
/// The first row is treated as the header and skipped, as are rows with no
/// content at all. Every other row yields exactly one node, in row order.
pub fn parse_rows<I, R>(rows: I) -> SheetData
where
    I: IntoIterator<Item = R>,
    R: AsRef<[Cell]>,
{
    let mut sheet = SheetData::new();
    let mut data_rows = 0usize;

    for (index, row) in rows.into_iter().enumerate().skip(1) {
        let row = row.as_ref();
        if row.iter().all(Option::is_none) {
            continue;
        }
        data_rows += 1;
        parse_row(row, index + 1, &mut sheet);
    }

    info!(
        "Parsed {data_rows} data rows: {} nodes, {} edges",
        sheet.nodes.len(),
        sheet.edges.len()
    );
    sheet
}

/// Add the node of one row and scan its relation pairs
fn parse_row(row: &[Cell], row_number: usize, sheet: &mut SheetData) {
    let node = Node::new(
        NodeColor::parse(text_at(row, COLOR_COLUMN)),
        NodeId::parse(text_at(row, ID_COLUMN)),
        text_at(row, TEXT_COLUMN).to_string(),
    );

    let mut column = FIRST_PAIR_COLUMN;
    loop {
        let Some(relation) = cell_at(row, column + 1) else {
            break;
        };
        let Some(peer) = cell_at(row, column) else {
            warn!(
                "Row {row_number}: relation '{relation}' in column {} has no peer id; skipped",
                column + 2
            );
            column += 2;
            continue;
        };

        let edge = Edge::from_relation(&node.id, &NodeId::parse(peer), relation);
        debug!("Row {row_number}: {edge}");
        if !sheet.add_edge(edge) {
            debug!("Row {row_number}: duplicate relation ignored");
        }
        column += 2;
    }

    sheet.nodes.push(node);
}

fn cell_at(row: &[Cell], column: usize) -> Option<&str> {
    row.get(column)
        .and_then(Option::as_deref)
        .filter(|text| !text.is_empty())
}

fn text_at(row: &[Cell], column: usize) -> &str {
    cell_at(row, column).unwrap_or_default()
}
