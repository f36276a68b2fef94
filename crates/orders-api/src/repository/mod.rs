mod customer;
mod order;

pub use self::customer::CustomerRepository;
pub use self::order::OrderRepository;

/// Row offset for a 1-based page, computed in `i64` so huge page numbers cannot overflow.
pub(crate) fn page_offset(page: i32, page_size: i32) -> i64 {
    (i64::from(page) - 1).max(0) * i64::from(page_size.max(0))
}

#[cfg(test)]
mod tests {
    use super::page_offset;

    #[test]
    fn offset_starts_at_zero() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(0, 10), 0);
        assert_eq!(page_offset(3, 25), 50);
    }

    #[test]
    fn offset_does_not_overflow_on_max_page() {
        assert_eq!(page_offset(i32::MAX, 100), (i64::from(i32::MAX) - 1) * 100);
    }
}
