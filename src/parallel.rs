cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::prelude::*;

        /// Maps every item of the slice, spread over the rayon thread pool.
        /// Output order matches input order.
        pub fn opt_par_map<T, R, F>(items: &[T], f: F) -> Vec<R>
        where
            T: Sync,
            R: Send,
            F: Fn(&T) -> R + Sync + Send,
        {
            items.par_iter().map(f).collect()
        }

    } else {
        /// Maps every item of the slice on the current thread.
        pub fn opt_par_map<T, R, F>(items: &[T], f: F) -> Vec<R>
        where
            T: Sync,
            R: Send,
            F: Fn(&T) -> R + Sync + Send,
        {
            items.iter().map(f).collect()
        }
    }
}
