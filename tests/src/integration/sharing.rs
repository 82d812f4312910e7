//! # Shared Filters
//!
//! The filter has no internal locking: writers need `&mut`, so threads that
//! share one wrap it in a lock. Hash derivation itself needs no lock.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use parking_lot::RwLock;
    use salted_bloom::domain::create_hashes;
    use salted_bloom::BloomFilter;

    #[test]
    fn test_writers_behind_lock_lose_no_insertions() {
        let filter = Arc::new(RwLock::new(
            BloomFilter::with_false_positive_rate(0.01, 8_000).unwrap(),
        ));

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let filter = Arc::clone(&filter);
                thread::spawn(move || {
                    for i in 0..1_000 {
                        filter.write().add(&format!("worker-{worker}-{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let filter = filter.read();
        assert_eq!(filter.actual_count(), 8_000);
        for worker in 0..8 {
            for i in 0..1_000 {
                assert!(filter.contains(&format!("worker-{worker}-{i}")));
            }
        }
    }

    #[test]
    fn test_parallel_readers_agree() {
        let mut filter = BloomFilter::with_false_positive_rate(0.01, 1_000).unwrap();
        filter.add_all(0..1_000);
        let filter = Arc::new(filter);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let filter = Arc::clone(&filter);
                thread::spawn(move || filter.contains_all(0..1_000))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[test]
    fn test_concurrent_hashing_is_reproducible() {
        let expected = create_hashes(b"concurrent", 32).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| create_hashes(b"concurrent", 32).unwrap()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
