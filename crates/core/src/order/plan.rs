#![forbid(unsafe_code)]

/// Contiguous run of sibling orders `lo..=hi` that moves by `delta` (always +1 or -1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shift {
    pub lo: i64,
    pub hi: i64,
    pub delta: i64,
}

impl Shift {
    pub fn contains(&self, order: i64) -> bool {
        self.lo <= order && order <= self.hi
    }

    pub fn width(&self) -> i64 {
        self.hi - self.lo + 1
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderError {
    Negative { order: i64 },
    OutOfRange { order: i64, len: usize },
    UnknownItem,
}

impl OrderError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Negative { .. } => "order must not be negative",
            Self::OutOfRange { .. } => "order must be lower than the number of siblings",
            Self::UnknownItem => "item is not part of this list",
        }
    }
}

impl std::fmt::Display for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negative { order } => write!(f, "order {order} is negative"),
            Self::OutOfRange { order, len } => {
                write!(f, "order {order} is out of range for {len} siblings")
            }
            Self::UnknownItem => write!(f, "unknown item"),
        }
    }
}

impl std::error::Error for OrderError {}

pub fn append_position(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

/// Valid move targets are the existing slots `0..len`.
pub fn check_target(order: i64, len: usize) -> Result<(), OrderError> {
    if order < 0 {
        return Err(OrderError::Negative { order });
    }
    if order >= append_position(len) {
        return Err(OrderError::OutOfRange { order, len });
    }
    Ok(())
}

/// Siblings displaced when one record goes from `from` to `to`; `None` for a no-op.
pub fn plan_move(from: i64, to: i64) -> Option<Shift> {
    match to.cmp(&from) {
        std::cmp::Ordering::Equal => None,
        std::cmp::Ordering::Greater => Some(Shift {
            lo: from + 1,
            hi: to,
            delta: -1,
        }),
        std::cmp::Ordering::Less => Some(Shift {
            lo: to,
            hi: from - 1,
            delta: 1,
        }),
    }
}

/// Siblings that close the gap left by removing `removed` from a scope of `len_before`.
pub fn plan_remove(removed: i64, len_before: usize) -> Option<Shift> {
    let last = append_position(len_before) - 1;
    if removed >= last {
        return None;
    }
    Some(Shift {
        lo: removed + 1,
        hi: last,
        delta: -1,
    })
}

pub fn is_dense(orders: impl IntoIterator<Item = i64>) -> bool {
    let mut orders = orders.into_iter().collect::<Vec<_>>();
    orders.sort_unstable();
    orders
        .iter()
        .enumerate()
        .all(|(index, order)| i64::try_from(index).is_ok_and(|index| index == *order))
}
