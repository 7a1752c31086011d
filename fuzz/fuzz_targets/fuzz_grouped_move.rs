#![no_main]

use std::collections::HashMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vgrid_reorder::{RowModel, grouped_array_move};

#[derive(Debug, Clone)]
struct Row {
    id: String,
    group: Option<String>,
    expanded: bool,
    children: Vec<Row>,
}

struct ByParent;

impl RowModel<Row> for ByParent {
    type Group = Option<String>;

    fn row_id(&self, row: &Row) -> String {
        row.id.clone()
    }

    fn sub_rows<'r>(&self, row: &'r Row) -> &'r [Row] {
        &row.children
    }

    fn group(&self, row: &Row) -> Option<String> {
        row.group.clone()
    }

    fn is_expanded(&self, row: &Row) -> bool {
        row.expanded
    }

    fn with_sub_rows(&self, row: &Row, sub_rows: Vec<Row>) -> Row {
        Row {
            children: sub_rows,
            ..row.clone()
        }
    }
}

/// Tree shape: per node, (expanded, child count). Consumed depth first.
#[derive(Debug, Arbitrary)]
struct Input {
    shape: Vec<(bool, u8)>,
    roots: u8,
    selected: Vec<u8>,
    delta: i8,
}

fn build(
    shape: &mut std::slice::Iter<'_, (bool, u8)>,
    count: usize,
    parent: Option<&str>,
    depth: usize,
    next_id: &mut usize,
) -> Vec<Row> {
    let mut rows = Vec::with_capacity(count);
    for _ in 0..count {
        let (expanded, children) = shape.next().copied().unwrap_or((false, 0));
        let id = format!("n{next_id}");
        *next_id += 1;
        let children = if depth < 3 {
            build(shape, usize::from(children % 4), Some(id.as_str()), depth + 1, next_id)
        } else {
            Vec::new()
        };
        rows.push(Row {
            group: parent.map(str::to_owned),
            id,
            expanded,
            children,
        });
    }
    rows
}

fn visible(rows: &[Row], out: &mut Vec<String>) {
    for row in rows {
        out.push(row.id.clone());
        if row.expanded {
            visible(&row.children, out);
        }
    }
}

fn parents(rows: &[Row], parent: Option<&str>, out: &mut HashMap<String, Option<String>>) {
    for row in rows {
        assert!(
            out.insert(row.id.clone(), parent.map(str::to_owned)).is_none(),
            "row {} appears twice",
            row.id
        );
        parents(&row.children, Some(row.id.as_str()), out);
    }
}

fuzz_target!(|input: Input| {
    let mut shape = input.shape.iter();
    let mut next_id = 0;
    let rows = build(&mut shape, usize::from(input.roots % 8), None, 0, &mut next_id);

    let mut ids = Vec::new();
    visible(&rows, &mut ids);
    if ids.is_empty() {
        return;
    }
    let selected: Vec<&str> = input
        .selected
        .iter()
        .take(6)
        .map(|&pick| ids[usize::from(pick) % ids.len()].as_str())
        .collect();

    let moved = grouped_array_move(&rows, &selected, isize::from(input.delta), &ByParent, &None)
        .expect("visible selection");

    let mut before = HashMap::new();
    parents(&rows, None, &mut before);
    let mut after = HashMap::new();
    parents(&moved, None, &mut after);
    assert_eq!(before, after, "grouped move changed a parent or lost a row");
});
