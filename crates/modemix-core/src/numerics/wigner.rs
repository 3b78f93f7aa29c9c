use super::log_factorial::LogFactorialTable;

/// Wigner 3j symbol `(l1 l2 l3; 0 0 0)` for integer multipoles.
///
/// Returns 0 outside the triangle `|l1 - l2| <= l3 <= l1 + l2` and when
/// `l1 + l2 + l3` is odd. The factorial ratio is evaluated as a sum of
/// log-factorials so large multipoles do not overflow.
///
/// `table` must hold at least `l1 + l2 + l3 + 2` entries; indexing is not
/// checked beyond the slice bounds.
pub fn wigner_3j_zero(l1: usize, l2: usize, l3: usize, table: &LogFactorialTable) -> f64 {
    if l1.abs_diff(l2) > l3 || l3 > l1 + l2 {
        return 0.0;
    }

    let total = l1 + l2 + l3;
    if total % 2 == 1 {
        return 0.0;
    }

    let half = total / 2;
    let sign = if half % 2 == 0 { 1.0 } else { -1.0 };

    let term1 = 0.5
        * (table[total - 2 * l1] + table[total - 2 * l2] + table[total - 2 * l3]
            - table[total + 1]);
    let term2 = table[half] - table[half - l1] - table[half - l2] - table[half - l3];

    sign * (term1 + term2).exp()
}

#[cfg(test)]
mod tests {
    use super::wigner_3j_zero;
    use crate::numerics::log_factorial::LogFactorialTable;

    #[test]
    fn selection_rule_violations_vanish() {
        let table = LogFactorialTable::build(64);
        let cases = [
            (1, 1, 3),  // l3 > l1 + l2
            (5, 1, 2),  // |l1 - l2| > l3
            (0, 4, 2),  // |l1 - l2| > l3
            (1, 1, 1),  // odd total
            (2, 3, 4),  // odd total
            (0, 0, 1),  // odd total and outside triangle
        ];

        for (l1, l2, l3) in cases {
            let actual = wigner_3j_zero(l1, l2, l3, &table);
            assert_eq!(actual, 0.0, "({l1},{l2},{l3}) should vanish, got {actual:.16e}");
        }
    }

    #[test]
    fn matches_tabulated_reference_values() {
        let table = LogFactorialTable::build(64);
        let cases = [
            ("(0,0,0)", (0, 0, 0), 1.0),
            ("(1,1,0)", (1, 1, 0), -1.0 / 3.0_f64.sqrt()),
            ("(1,1,2)", (1, 1, 2), (2.0_f64 / 15.0_f64).sqrt()),
            ("(0,2,2)", (0, 2, 2), 0.447_213_595_499_958),
            ("(0,3,3)", (0, 3, 3), -0.377_964_473_009_227_2),
            ("(2,2,2)", (2, 2, 2), -(2.0_f64 / 35.0_f64).sqrt()),
            ("(2,3,3)", (2, 3, 3), (4.0_f64 / 105.0_f64).sqrt()),
        ];

        for (label, (l1, l2, l3), expected) in cases {
            let actual = wigner_3j_zero(l1, l2, l3, &table);
            assert_scalar_close(label, expected, actual, 1.0e-13, 1.0e-12);
        }
    }

    #[test]
    fn monopole_coupling_has_closed_form() {
        let table = LogFactorialTable::build(512);
        for l in 0..200_usize {
            let sign = if l % 2 == 0 { 1.0 } else { -1.0 };
            let expected = sign / ((2 * l + 1) as f64).sqrt();
            let actual = wigner_3j_zero(0, l, l, &table);
            assert_scalar_close(&format!("(0,{l},{l})"), expected, actual, 1.0e-12, 1.0e-10);
        }
    }

    #[test]
    fn symbol_is_invariant_under_permutations() {
        let table = LogFactorialTable::build(256);
        let triples = [(2, 3, 5), (4, 6, 8), (10, 7, 5), (20, 31, 15), (12, 12, 12)];

        for (a, b, c) in triples {
            let reference = wigner_3j_zero(a, b, c, &table);
            let permutations = [(a, c, b), (b, a, c), (b, c, a), (c, a, b), (c, b, a)];
            for (l1, l2, l3) in permutations {
                let actual = wigner_3j_zero(l1, l2, l3, &table);
                assert_scalar_close(
                    &format!("({l1},{l2},{l3}) vs ({a},{b},{c})"),
                    reference,
                    actual,
                    1.0e-14,
                    1.0e-12,
                );
            }
        }
    }

    #[test]
    fn large_multipoles_stay_finite() {
        let table = LogFactorialTable::for_lmax(3000).expect("lmax fits");
        let value = wigner_3j_zero(2999, 2999, 5998, &table);
        assert!(value.is_finite());
        assert!(value != 0.0);
        assert!(value.abs() < 1.0);
    }

    fn assert_scalar_close(label: &str, expected: f64, actual: f64, abs_tol: f64, rel_tol: f64) {
        let abs_diff = (actual - expected).abs();
        let rel_diff = abs_diff / expected.abs().max(1.0);
        assert!(
            abs_diff <= abs_tol || rel_diff <= rel_tol,
            "{label} expected={expected:.15e} actual={actual:.15e} \
             abs_diff={abs_diff:.15e} rel_diff={rel_diff:.15e}",
        );
    }
}
