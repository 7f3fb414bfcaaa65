#![forbid(unsafe_code)]

use super::plan::{OrderError, append_position, check_target, plan_move, plan_remove};

/// A record that occupies one slot of a dense ordering.
pub trait Ordered {
    fn id(&self) -> &str;
    fn order(&self) -> i64;
    fn set_order(&mut self, order: i64);
}

/// Places `item` after every existing sibling and returns its order.
pub fn apply_append<T: Ordered>(items: &mut Vec<T>, mut item: T) -> i64 {
    let order = append_position(items.len());
    item.set_order(order);
    items.push(item);
    order
}

/// Moves `id` to slot `to`, returning how many siblings were shifted.
pub fn apply_move<T: Ordered>(items: &mut [T], id: &str, to: i64) -> Result<usize, OrderError> {
    check_target(to, items.len())?;
    let from = items
        .iter()
        .find(|item| item.id() == id)
        .map(Ordered::order)
        .ok_or(OrderError::UnknownItem)?;

    let Some(shift) = plan_move(from, to) else {
        return Ok(0);
    };

    let mut shifted = 0usize;
    for item in items.iter_mut() {
        if item.id() == id {
            item.set_order(to);
        } else if shift.contains(item.order()) {
            item.set_order(item.order() + shift.delta);
            shifted += 1;
        }
    }
    Ok(shifted)
}

/// Removes `id` and closes the gap it leaves behind.
pub fn apply_remove<T: Ordered>(items: &mut Vec<T>, id: &str) -> Result<T, OrderError> {
    let index = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or(OrderError::UnknownItem)?;
    let len_before = items.len();
    let removed = items.remove(index);

    if let Some(shift) = plan_remove(removed.order(), len_before) {
        for item in items.iter_mut().filter(|item| shift.contains(item.order())) {
            item.set_order(item.order() + shift.delta);
        }
    }
    Ok(removed)
}

pub fn sort_by_order<T: Ordered>(items: &mut [T]) {
    items.sort_by(|a, b| a.order().cmp(&b.order()).then_with(|| a.id().cmp(b.id())));
}
