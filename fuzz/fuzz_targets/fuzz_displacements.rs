#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vgrid_reorder::{Item, calculate_displacements, contiguous_items, find_delta_at_position};

#[derive(Debug, Arbitrary)]
struct Input {
    first_index: u8,
    sizes: Vec<u8>,
    selected: Vec<u8>,
    delta: i8,
    pointer: i16,
}

fuzz_target!(|input: Input| {
    let sizes: Vec<f64> = input
        .sizes
        .iter()
        .take(64)
        .map(|&s| f64::from(s.max(1)))
        .collect();
    let window = contiguous_items(usize::from(input.first_index), &sizes);

    let mut selected: Vec<Item> = Vec::new();
    for &pick in input.selected.iter().take(8) {
        let Some(item) = window.get(usize::from(pick) % window.len().max(1)) else {
            continue;
        };
        if !selected.iter().any(|s| s.id == item.id) {
            selected.push(item.clone());
        }
    }

    let delta = isize::from(input.delta);
    let Ok(moved) = calculate_displacements(&window, &selected, delta) else {
        assert!(window.is_empty(), "only an empty window may fail");
        return;
    };

    // Every window item is tracked and no two items share a slot.
    for item in &window {
        assert!(moved.displacements.contains_key(&item.id));
    }
    let mut slots: Vec<isize> = moved.new_indices.values().copied().collect();
    slots.sort_unstable();
    slots.dedup();
    assert_eq!(slots.len(), moved.new_indices.len(), "duplicate provisional index");

    if let Some(dragged) = selected.first() {
        let resolved =
            find_delta_at_position(&dragged.id, &window, &selected, f64::from(input.pointer), delta);
        assert!(resolved.is_ok());
    }
});
