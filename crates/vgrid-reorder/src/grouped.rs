//! Reorder hierarchical rows (sub-rows, expansion, grouping) by a delta.
//!
//! The delta counts visible rows, so the mover works on the depth-first
//! sequence of expanded rows and translates every flat position back into a
//! `(parent, sibling index)` pair. Rows are never mutated: every ancestor on
//! a changed path is rebuilt through [`RowModel::with_sub_rows`].
//!
//! # Invariants
//!
//! 1. A row only moves next to rows of its own group, except that a row of
//!    the root group dragged to the top of the list lands at position 0.
//! 2. A row never lands beneath one of its own descendants.
//! 3. A selected row whose ancestor is also selected rides along with the
//!    ancestor and is not moved on its own.
//!
//! # Example
//!
//! ```
//! use vgrid_reorder::{RowModel, grouped_array_move};
//!
//! #[derive(Clone)]
//! struct Row {
//!     id: &'static str,
//!     children: Vec<Row>,
//! }
//!
//! struct Ungrouped;
//!
//! impl RowModel<Row> for Ungrouped {
//!     type Group = ();
//!
//!     fn row_id(&self, row: &Row) -> String {
//!         row.id.to_owned()
//!     }
//!     fn sub_rows<'r>(&self, row: &'r Row) -> &'r [Row] {
//!         &row.children
//!     }
//!     fn group(&self, _row: &Row) {}
//!     fn is_expanded(&self, _row: &Row) -> bool {
//!         true
//!     }
//!     fn with_sub_rows(&self, row: &Row, children: Vec<Row>) -> Row {
//!         Row { id: row.id, children }
//!     }
//! }
//!
//! let leaf = |id| Row { id, children: Vec::new() };
//! let rows = vec![leaf("a"), leaf("b"), leaf("c")];
//!
//! let moved = grouped_array_move(&rows, &["a"], 2, &Ungrouped, &())?;
//! let ids: Vec<&str> = moved.iter().map(|row| row.id).collect();
//! assert_eq!(ids, ["b", "c", "a"]);
//! # Ok::<(), vgrid_reorder::ReorderError>(())
//! ```

use crate::error::{ReorderError, Result};
use rustc_hash::{FxHashMap, FxHashSet};

/// Accessors the mover needs from the caller's row type.
pub trait RowModel<T> {
    /// Group identifier. Rows only trade places with rows of equal group.
    type Group: PartialEq + Clone;

    /// Unique id of `row`.
    fn row_id(&self, row: &T) -> String;

    /// Child rows of `row`, in display order.
    fn sub_rows<'r>(&self, row: &'r T) -> &'r [T];

    /// Group of `row`.
    fn group(&self, row: &T) -> Self::Group;

    /// Whether the children of `row` are visible.
    fn is_expanded(&self, row: &T) -> bool;

    /// A copy of `row` with its children replaced by `sub_rows`.
    fn with_sub_rows(&self, row: &T, sub_rows: Vec<T>) -> T;
}

/// Derived facts about one visible row. Rebuilt on every call.
#[derive(Debug, Clone)]
struct RowAttrs<T, G> {
    parent: Option<String>,
    relative_index: usize,
    flat_index: usize,
    group: G,
    /// Latest copy-on-write version of the row.
    row: T,
    has_selected_ancestor: bool,
    ancestry: FxHashSet<String>,
    /// The row plus its visible descendants.
    flat_len: usize,
}

/// Insertion point expressed against the row hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Placement {
    parent: Option<String>,
    relative_index: usize,
}

struct GroupedMove<'m, T, M: RowModel<T>> {
    model: &'m M,
    attrs: FxHashMap<String, RowAttrs<T, M::Group>>,
    /// Ids of the visible rows, depth first.
    flat: Vec<String>,
    roots: Vec<T>,
}

/// Move the `selected` rows by `delta` visible positions.
///
/// `root_group` is the group of rows that belong to no group; only those may
/// be dropped at the very top of the list regardless of their neighbours.
///
/// # Errors
///
/// Returns [`ReorderError::UnknownItem`] when a selected id is not a visible
/// row (unknown, or hidden inside a collapsed parent).
pub fn grouped_array_move<T, M, S>(
    rows: &[T],
    selected: &[S],
    delta: isize,
    model: &M,
    root_group: &M::Group,
) -> Result<Vec<T>>
where
    T: Clone,
    M: RowModel<T>,
    S: AsRef<str>,
{
    if delta == 0 {
        return Ok(rows.to_vec());
    }

    #[cfg(feature = "tracing")]
    let span = tracing::debug_span!(
        "reorder.grouped_move",
        rows = rows.len(),
        selected = selected.len(),
        delta,
        moved = tracing::field::Empty,
    );
    #[cfg(feature = "tracing")]
    let _guard = span.enter();

    let raw_selected: FxHashSet<&str> = selected.iter().map(AsRef::as_ref).collect();
    let mut mover = GroupedMove::new(model, rows, &raw_selected);

    let mut moving: Vec<String> = Vec::with_capacity(selected.len());
    let mut seen = FxHashSet::default();
    for id in selected {
        let id = id.as_ref();
        let attrs = mover
            .attrs
            .get(id)
            .ok_or_else(|| ReorderError::unknown(id))?;
        if attrs.has_selected_ancestor || !seen.insert(id) {
            continue;
        }
        moving.push(id.to_owned());
    }
    moving.sort_by_key(|id| mover.attrs[id].flat_index);

    #[cfg(feature = "tracing")]
    span.record("moved", moving.len());

    let mut spans: FxHashMap<String, Vec<String>> = FxHashMap::default();
    for id in moving.iter().rev() {
        let span_ids = mover.detach(id);
        spans.insert(id.clone(), span_ids);
    }
    for id in &moving {
        let span_ids = spans.remove(id).unwrap_or_default();
        let placement = mover.resolve_placement(id, delta, root_group);
        mover.attach(id, span_ids, placement);
    }

    Ok(mover.roots)
}

impl<'m, T: Clone, M: RowModel<T>> GroupedMove<'m, T, M> {
    fn new(model: &'m M, rows: &[T], selected: &FxHashSet<&str>) -> Self {
        let mut mover = Self {
            model,
            attrs: FxHashMap::default(),
            flat: Vec::new(),
            roots: rows.to_vec(),
        };
        mover.flatten(rows, None, &FxHashSet::default(), false, selected);
        mover
    }

    fn flatten(
        &mut self,
        rows: &[T],
        parent: Option<&str>,
        ancestry: &FxHashSet<String>,
        has_selected_ancestor: bool,
        selected: &FxHashSet<&str>,
    ) {
        let model = self.model;
        for (relative_index, row) in rows.iter().enumerate() {
            let id = model.row_id(row);
            let flat_index = self.flat.len();
            self.flat.push(id.clone());
            for ancestor in ancestry {
                if let Some(attrs) = self.attrs.get_mut(ancestor) {
                    attrs.flat_len += 1;
                }
            }
            self.attrs.insert(
                id.clone(),
                RowAttrs {
                    parent: parent.map(str::to_owned),
                    relative_index,
                    flat_index,
                    group: model.group(row),
                    row: row.clone(),
                    has_selected_ancestor,
                    ancestry: ancestry.clone(),
                    flat_len: 1,
                },
            );
            if model.is_expanded(row) {
                let mut child_ancestry = ancestry.clone();
                child_ancestry.insert(id.clone());
                let child_flag = has_selected_ancestor || selected.contains(id.as_str());
                self.flatten(
                    model.sub_rows(row),
                    Some(id.as_str()),
                    &child_ancestry,
                    child_flag,
                    selected,
                );
            }
        }
    }

    /// Take `id` out of its parent and its span out of the flat sequence.
    ///
    /// Returns the removed span so it can be reinserted as a block. The
    /// row's own `flat_index` is left untouched and keeps pointing at its
    /// original position, which the injection scan starts from.
    fn detach(&mut self, id: &str) -> Vec<String> {
        let (parent, relative_index, flat_index, flat_len) = {
            let attrs = &self.attrs[id];
            (
                attrs.parent.clone(),
                attrs.relative_index,
                attrs.flat_index,
                attrs.flat_len,
            )
        };

        let end = (flat_index + flat_len).min(self.flat.len());
        let span_ids: Vec<String> = self.flat.drain(flat_index..end).collect();
        self.reindex_flat(flat_index);

        let ancestors: Vec<String> = self.attrs[id].ancestry.iter().cloned().collect();
        for ancestor in &ancestors {
            if let Some(attrs) = self.attrs.get_mut(ancestor) {
                attrs.flat_len -= span_ids.len();
            }
        }

        self.edit_siblings(parent.as_deref(), relative_index, |siblings| {
            siblings.remove(relative_index);
        });
        span_ids
    }

    fn resolve_placement(&self, id: &str, delta: isize, root_group: &M::Group) -> Placement {
        let dragged = &self.attrs[id];
        let origin = dragged.flat_index as isize;
        let len = self.flat.len() as isize;
        let step = delta.signum();
        let wanted = delta.unsigned_abs();

        let eligible = |candidate: &str| {
            let attrs = &self.attrs[candidate];
            attrs.group == dragged.group && !attrs.ancestry.contains(id)
        };

        // Forward moves land before the candidate, so the row directly after
        // the gap is passed without being counted.
        let mut last_seen: Option<&str> = None;
        if step > 0 {
            last_seen = self
                .flat
                .get(dragged.flat_index)
                .map(String::as_str)
                .filter(|&candidate| eligible(candidate));
        }

        let mut moved = 0;
        let mut candidate = origin;
        let mut target: Option<&str> = None;
        let mut hit_end = false;
        while moved < wanted {
            candidate += step;
            if candidate < 0 || candidate >= len {
                hit_end = step > 0;
                break;
            }
            if dragged.group == *root_group && candidate == 0 {
                return Placement {
                    parent: None,
                    relative_index: 0,
                };
            }
            let candidate_id = self.flat[candidate as usize].as_str();
            if eligible(candidate_id) {
                target = Some(candidate_id);
                last_seen = Some(candidate_id);
                moved += 1;
            }
        }

        if hit_end {
            if let Some(anchor) = last_seen {
                let anchor = &self.attrs[anchor];
                return Placement {
                    parent: anchor.parent.clone(),
                    relative_index: anchor.relative_index + 1,
                };
            }
        }
        match target {
            Some(anchor) => {
                let anchor = &self.attrs[anchor];
                Placement {
                    parent: anchor.parent.clone(),
                    relative_index: anchor.relative_index,
                }
            }
            None => Placement {
                parent: dragged.parent.clone(),
                relative_index: dragged.relative_index,
            },
        }
    }

    /// Reinsert `id` (and its detached span) at `placement`.
    fn attach(&mut self, id: &str, span_ids: Vec<String>, placement: Placement) {
        let model = self.model;
        let parent = placement.parent.as_deref();

        let (relative_index, flat_at) = {
            let siblings: &[T] = match parent {
                Some(parent_id) => model.sub_rows(&self.attrs[parent_id].row),
                None => &self.roots,
            };
            let relative_index = placement.relative_index.min(siblings.len());
            let flat_at = match relative_index.checked_sub(1) {
                Some(prev) => {
                    let prev = &self.attrs[&model.row_id(&siblings[prev])];
                    prev.flat_index + prev.flat_len
                }
                None => parent.map_or(0, |parent_id| self.attrs[parent_id].flat_index + 1),
            };
            (relative_index, flat_at.min(self.flat.len()))
        };

        let new_ancestry: FxHashSet<String> = match parent {
            Some(parent_id) => {
                let mut ancestry = self.attrs[parent_id].ancestry.clone();
                ancestry.insert(parent_id.to_owned());
                ancestry
            }
            None => FxHashSet::default(),
        };
        for ancestor in &new_ancestry {
            if let Some(attrs) = self.attrs.get_mut(ancestor) {
                attrs.flat_len += span_ids.len();
            }
        }

        let Some(attrs) = self.attrs.get_mut(id) else {
            return;
        };
        attrs.parent = parent.map(str::to_owned);
        let old_ancestry = std::mem::replace(&mut attrs.ancestry, new_ancestry.clone());
        let row = attrs.row.clone();
        for member in span_ids.iter().skip(1) {
            if let Some(attrs) = self.attrs.get_mut(member) {
                attrs.ancestry.retain(|a| !old_ancestry.contains(a));
                attrs.ancestry.extend(new_ancestry.iter().cloned());
            }
        }

        let tail = self.flat.split_off(flat_at);
        self.flat.extend(span_ids);
        self.flat.extend(tail);
        self.reindex_flat(flat_at);

        self.edit_siblings(parent, relative_index, |siblings| {
            siblings.insert(relative_index, row);
        });
    }

    /// Apply `edit` to the children of `parent` (or the roots), refresh the
    /// sibling indices from `from` on, and rebuild the ancestor chain.
    fn edit_siblings(&mut self, parent: Option<&str>, from: usize, edit: impl FnOnce(&mut Vec<T>)) {
        let model = self.model;
        match parent {
            Some(parent_id) => {
                let mut siblings = model.sub_rows(&self.attrs[parent_id].row).to_vec();
                edit(&mut siblings);
                reindex_siblings(&mut self.attrs, model, &siblings, from);
                self.replace_sub_rows(parent_id, siblings);
            }
            None => {
                edit(&mut self.roots);
                reindex_siblings(&mut self.attrs, model, &self.roots, from);
            }
        }
    }

    /// Copy-on-write update of `parent_id`'s children, propagated to the roots.
    fn replace_sub_rows(&mut self, parent_id: &str, sub_rows: Vec<T>) {
        let model = self.model;
        let mut current = parent_id.to_owned();
        let mut sub_rows = sub_rows;
        loop {
            let Some(attrs) = self.attrs.get_mut(&current) else {
                return;
            };
            let rebuilt = model.with_sub_rows(&attrs.row, sub_rows);
            attrs.row = rebuilt.clone();
            let relative_index = attrs.relative_index;
            match attrs.parent.clone() {
                Some(grandparent) => {
                    let mut siblings = model.sub_rows(&self.attrs[&grandparent].row).to_vec();
                    siblings[relative_index] = rebuilt;
                    sub_rows = siblings;
                    current = grandparent;
                }
                None => {
                    self.roots[relative_index] = rebuilt;
                    return;
                }
            }
        }
    }

    fn reindex_flat(&mut self, from: usize) {
        for (flat_index, id) in self.flat.iter().enumerate().skip(from) {
            if let Some(attrs) = self.attrs.get_mut(id) {
                attrs.flat_index = flat_index;
            }
        }
    }
}

fn reindex_siblings<T, M: RowModel<T>>(
    attrs: &mut FxHashMap<String, RowAttrs<T, M::Group>>,
    model: &M,
    siblings: &[T],
    from: usize,
) {
    for (relative_index, row) in siblings.iter().enumerate().skip(from) {
        if let Some(attrs) = attrs.get_mut(&model.row_id(row)) {
            attrs.relative_index = relative_index;
        }
    }
}
