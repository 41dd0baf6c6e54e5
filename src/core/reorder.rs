use crate::domain::model::{Item, OrderWrite};

/// Sorts a freshly fetched collection into display order. Server-side `order`
/// values are not guaranteed unique at rest, so ties fall back to `id`.
pub fn sort_for_display(items: &mut [Item]) {
    items.sort_by_key(|item| (item.order, item.id));
}

/// Classic array move: take the item with `item_id` out of the sequence and
/// reinsert it at `target_index`, shifting everything in between by one.
/// Untouched items keep their relative order.
///
/// `target_index` is clamped to the valid range. An unknown `item_id` leaves
/// the sequence unchanged (a drag event can race a delete from another
/// session, and a stale event must not blow up the editor).
pub fn reorder(items: &[Item], item_id: i64, target_index: usize) -> Vec<Item> {
    let mut result = items.to_vec();

    let Some(from) = result.iter().position(|item| item.id == item_id) else {
        tracing::debug!("reorder request for unknown item {item_id}, ignoring");
        return result;
    };

    let to = target_index.min(result.len().saturating_sub(1));
    if from == to {
        return result;
    }

    let moved = result.remove(from);
    result.insert(to, moved);
    result
}

/// Rewrites `order` to match each item's position, 0-based and contiguous.
pub fn assign_contiguous(items: &mut [Item]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.order = index as i64;
    }
}

/// One write per item whose desired `order` differs from what the server last
/// confirmed. Items that did not move cost nothing; items the server has never
/// seen with this order (including ones missing from `confirmed`) get a write.
pub fn order_diff(desired: &[Item], confirmed: &[Item]) -> Vec<OrderWrite> {
    desired
        .iter()
        .filter(|item| {
            confirmed
                .iter()
                .find(|known| known.id == item.id)
                .map_or(true, |known| known.order != item.order)
        })
        .map(|item| OrderWrite {
            id: item.id,
            order: item.order,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn item(id: i64, order: i64) -> Item {
        Item {
            id,
            order,
            is_active: true,
            fields: HashMap::new(),
        }
    }

    fn ids(items: &[Item]) -> Vec<i64> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_sort_for_display_breaks_order_ties_by_id() {
        let mut items = vec![item(3, 1), item(1, 1), item(2, 0)];
        sort_for_display(&mut items);
        assert_eq!(ids(&items), vec![2, 1, 3]);
    }

    #[test]
    fn test_reorder_moves_item_to_front() {
        let items = vec![item(1, 0), item(2, 1), item(3, 2)];
        let result = reorder(&items, 3, 0);
        assert_eq!(ids(&result), vec![3, 1, 2]);
    }

    #[test]
    fn test_reorder_moves_item_towards_back() {
        let items = vec![item(1, 0), item(2, 1), item(3, 2), item(4, 3)];
        let result = reorder(&items, 1, 2);
        assert_eq!(ids(&result), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_reorder_preserves_id_multiset() {
        let items = vec![item(5, 0), item(9, 1), item(2, 2), item(7, 3)];
        let result = reorder(&items, 9, 3);
        let mut before = ids(&items);
        let mut after = ids(&result);
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn test_reorder_is_idempotent() {
        let items = vec![item(1, 0), item(2, 1), item(3, 2)];
        let once = reorder(&items, 3, 0);
        let twice = reorder(&once, 3, 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_reorder_to_current_index_is_noop() {
        let items = vec![item(1, 0), item(2, 1), item(3, 2)];
        let result = reorder(&items, 1, 0);
        assert_eq!(result, items);
    }

    #[test]
    fn test_reorder_clamps_out_of_range_index() {
        let items = vec![item(1, 0), item(2, 1), item(3, 2)];
        let result = reorder(&items, 1, 99);
        assert_eq!(ids(&result), vec![2, 3, 1]);
    }

    #[test]
    fn test_reorder_unknown_id_leaves_sequence_unchanged() {
        let items = vec![item(1, 0), item(2, 1)];
        let result = reorder(&items, 42, 0);
        assert_eq!(result, items);
    }

    #[test]
    fn test_reorder_empty_sequence() {
        let result = reorder(&[], 1, 0);
        assert!(result.is_empty());
    }

    #[test]
    fn test_assign_contiguous_renumbers_from_zero() {
        let mut items = vec![item(7, 4), item(2, 9), item(5, 1)];
        assign_contiguous(&mut items);
        let orders: Vec<i64> = items.iter().map(|i| i.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_order_diff_writes_only_changed_items() {
        // C moved to the front: every order shifts.
        let confirmed = vec![item(1, 0), item(2, 1), item(3, 2)];
        let mut desired = vec![item(3, 2), item(1, 0), item(2, 1)];
        assign_contiguous(&mut desired);

        let writes = order_diff(&desired, &confirmed);
        assert_eq!(
            writes,
            vec![
                OrderWrite { id: 3, order: 0 },
                OrderWrite { id: 1, order: 1 },
                OrderWrite { id: 2, order: 2 },
            ]
        );
    }

    #[test]
    fn test_order_diff_empty_when_nothing_moved() {
        let confirmed = vec![item(1, 0), item(2, 1), item(3, 2)];
        let writes = order_diff(&confirmed, &confirmed);
        assert!(writes.is_empty());
    }

    #[test]
    fn test_order_diff_tail_unchanged_after_swap_at_front() {
        let confirmed = vec![item(1, 0), item(2, 1), item(3, 2), item(4, 3)];
        let mut desired = vec![item(2, 1), item(1, 0), item(3, 2), item(4, 3)];
        assign_contiguous(&mut desired);

        let writes = order_diff(&desired, &confirmed);
        assert_eq!(
            writes,
            vec![OrderWrite { id: 2, order: 0 }, OrderWrite { id: 1, order: 1 }]
        );
    }

    #[test]
    fn test_order_diff_writes_items_unknown_to_server() {
        let confirmed = vec![item(1, 0)];
        let desired = vec![item(1, 0), item(2, 1)];
        let writes = order_diff(&desired, &confirmed);
        assert_eq!(writes, vec![OrderWrite { id: 2, order: 1 }]);
    }

    #[test]
    fn test_noncontiguous_rest_state_becomes_contiguous_after_assign() {
        // Orders left sparse by a lazy delete.
        let mut items = vec![item(1, 0), item(3, 5), item(4, 9)];
        let moved = reorder(&items, 4, 0);
        items = moved;
        assign_contiguous(&mut items);
        let orders: Vec<i64> = items.iter().map(|i| i.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(ids(&items), vec![4, 1, 3]);
    }
}
