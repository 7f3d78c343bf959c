//! Parallel iteration over independent DOF pairs and bodies
//!
//! - `native` feature: rayon parallel iterators
//! - otherwise: sequential iteration
//!
//! Both paths return results in input order, so outputs are identical.

/// Map over `0..count`, in parallel when available
#[cfg(feature = "native")]
pub fn parallel_map_indexed<U, F>(count: usize, f: F) -> Vec<U>
where
    U: Send,
    F: Fn(usize) -> U + Sync + Send,
{
    use rayon::prelude::*;
    (0..count).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "native"))]
pub fn parallel_map_indexed<U, F>(count: usize, f: F) -> Vec<U>
where
    F: Fn(usize) -> U,
{
    (0..count).map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() {
        let out = parallel_map_indexed(64, |i| i * i);
        assert_eq!(out[7], 49);
        assert_eq!(out.len(), 64);
    }
}
