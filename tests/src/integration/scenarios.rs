//! # Filter Scenarios
//!
//! End-to-end behaviour through the public API only:
//!
//! 1. **Range round trip**: 10,000 integers into a 1%/10,000 filter, zero misses
//! 2. **Sizing**: every constructor agrees with the closed-form formulas
//! 3. **Equality**: insertion history does not affect equality
//! 4. **Escape hatch**: rebuilding a filter from its bits

#[cfg(test)]
mod tests {
    use rand::Rng;
    use salted_bloom::domain::create_hashes;
    use salted_bloom::{BloomFilter, FilterConfig, FilterError, Sizing};

    // =============================================================================
    // RANGE ROUND TRIP
    // =============================================================================

    #[test]
    fn test_integer_range_has_no_misses() {
        let mut filter = BloomFilter::with_false_positive_rate(0.01, 10_000).unwrap();

        for i in 10_000..20_000 {
            filter.add(&i);
        }

        let missing: Vec<i32> = (10_000..20_000).filter(|i| !filter.contains(i)).collect();
        assert!(missing.is_empty(), "Missing elements: {:?}", missing);
        assert_eq!(filter.actual_count(), 10_000);
    }

    #[test]
    fn test_observed_fpr_near_estimate() {
        let mut filter = BloomFilter::with_false_positive_rate(0.01, 10_000).unwrap();
        filter.add_all(10_000..20_000);

        let mut rng = rand::thread_rng();
        let trials = 20_000;
        let false_positives = (0..trials)
            .filter(|_| {
                // Outside the inserted range
                let probe: i64 = rng.gen_range(1_000_000..i64::MAX);
                filter.contains(&probe)
            })
            .count();

        let observed = false_positives as f64 / trials as f64;
        let estimated = filter.estimated_false_positive_probability();
        assert!(
            observed < estimated * 2.0,
            "Observed FPR {} far above estimate {}",
            observed,
            estimated
        );
    }

    // =============================================================================
    // SIZING
    // =============================================================================

    #[test]
    fn test_constructor_sizing_formulas() {
        let fpr = BloomFilter::with_false_positive_rate(0.01, 10_000).unwrap();
        assert_eq!(fpr.hash_count(), 7);
        assert_eq!(fpr.bit_array_size(), 95_851);

        let budget = BloomFilter::with_bit_budget(95_851, 10_000).unwrap();
        assert_eq!(budget.bit_array_size(), 95_851);
        // round(9.5851 * ln 2) = round(6.64) = 7
        assert_eq!(budget.hash_count(), 7);

        let canonical = BloomFilter::new(8.0, 1_000, 3).unwrap();
        assert_eq!(canonical.bit_array_size(), 8_000);
        assert_eq!(canonical.bits_per_element(), 8.0);
    }

    #[test]
    fn test_config_sizing_modes_build_filters() {
        let modes = [
            Sizing::BitsPerElement {
                bits_per_element: 10.0,
                hash_count: 7,
            },
            Sizing::BitBudget { size_bits: 10_000 },
            Sizing::FalsePositiveRate { probability: 0.008 },
        ];

        for sizing in modes {
            let config = FilterConfig::new(1_000, sizing).unwrap();
            let mut filter = BloomFilter::from_config(&config).unwrap();
            filter.add_all(0..1_000);
            assert!(filter.contains_all(0..1_000), "No false negatives for {:?}", sizing);
        }
    }

    #[test]
    fn test_construction_errors_are_typed() {
        let err = BloomFilter::with_false_positive_rate(0.0, 100).unwrap_err();
        assert!(err.is_construction_error());

        let err = BloomFilter::new(8.0, 100, 5_000).unwrap_err();
        assert!(matches!(err, FilterError::HashCountTooLarge { .. }));
    }

    #[test]
    fn test_hash_derivation_is_deterministic() {
        let first = create_hashes(b"determinism", 100).unwrap();
        let second = create_hashes(b"determinism", 100).unwrap();
        assert_eq!(first, second);
    }

    // =============================================================================
    // EQUALITY
    // =============================================================================

    #[test]
    fn test_colliding_insert_keeps_filters_equal() {
        let mut a = BloomFilter::new(2.0, 32, 2).unwrap();
        let mut b = BloomFilter::new(2.0, 32, 2).unwrap();
        a.add_all(0..20);
        b.add_all(0..20);

        // A never-inserted element whose bits are all already set
        let collider = (0..100_000)
            .map(|i| format!("probe-{i}"))
            .find(|probe| a.contains(probe))
            .expect("A crowded 64-bit filter has false positives");

        b.add(&collider);

        assert_eq!(b.actual_count(), a.actual_count() + 1);
        assert_eq!(a, b, "Insertion count must not affect equality");
    }

    #[test]
    fn test_different_contents_are_unequal() {
        let mut a = BloomFilter::with_false_positive_rate(0.01, 100).unwrap();
        let b = a.clone();
        a.add("only-in-a");
        assert_ne!(a, b);
    }

    // =============================================================================
    // ESCAPE HATCH
    // =============================================================================

    #[test]
    fn test_rebuild_from_bits_and_serde() {
        let mut source = BloomFilter::with_false_positive_rate(0.01, 1_000).unwrap();
        source.add_all(["alpha", "beta", "gamma"]);

        let mut rebuilt = BloomFilter::from_params(*source.params()).unwrap();
        for index in 0..source.bit_array_size() {
            if source.get_bit(index).unwrap() {
                rebuilt.set_bit(index, true).unwrap();
            }
        }
        assert_eq!(rebuilt, source);
        assert_eq!(rebuilt.actual_count(), 0, "Bit pokes are not insertions");

        let json = serde_json::to_string(&source).unwrap();
        let restored: BloomFilter = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, source);
        assert_eq!(restored.actual_count(), 3);
    }

    #[test]
    fn test_out_of_range_access_leaves_filter_unchanged() {
        let mut filter = BloomFilter::with_false_positive_rate(0.01, 100).unwrap();
        filter.add("present");
        let before = filter.clone();
        let size = filter.bit_array_size();

        assert!(matches!(
            filter.get_bit(size),
            Err(FilterError::BitIndexOutOfRange { .. })
        ));
        assert!(matches!(
            filter.set_bit(size + 1, true),
            Err(FilterError::BitIndexOutOfRange { .. })
        ));
        assert_eq!(filter, before);
        assert!(filter.contains("present"));
    }
}
