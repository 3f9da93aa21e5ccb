//! Conversion of the counters reported by the backend during a
//! transfer, push or checkout into a fraction in [0, 1].
//!
//! A transfer counts each object twice, once when received and once
//! when indexed, so the fraction reaches 1.0 only when every object has
//! been both.  Phases with nothing to do report 0.0.

pub fn transfer_fraction(
    received_objects: usize,
    indexed_objects: usize,
    total_objects: usize,
) -> f64 {
    if total_objects == 0 {
        return 0.0;
    }
    (received_objects + indexed_objects) as f64 / (2.0 * total_objects as f64)
}

pub fn checkout_fraction(
    completed_steps: usize,
    total_steps: usize,
) -> f64 {
    if total_steps == 0 {
        return 0.0;
    }
    completed_steps as f64 / total_steps as f64
}

/// Objects written to the remote out of those packed for the push.
pub fn push_fraction(
    current_objects: usize,
    total_objects: usize,
) -> f64 {
    if total_objects == 0 {
        return 0.0;
    }
    current_objects as f64 / total_objects as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_fraction() {
        assert_eq!(transfer_fraction(4, 4, 10), 0.4);
        assert_eq!(transfer_fraction(0, 0, 10), 0.0);
        assert_eq!(transfer_fraction(10, 0, 10), 0.5);
        assert_eq!(transfer_fraction(10, 10, 10), 1.0);
    }

    #[test]
    fn test_transfer_fraction_empty() {
        assert_eq!(transfer_fraction(0, 0, 0), 0.0);
    }

    #[test]
    fn test_push_fraction() {
        assert_eq!(push_fraction(3, 12), 0.25);
        assert_eq!(push_fraction(12, 12), 1.0);
        assert_eq!(push_fraction(0, 0), 0.0);
    }

    #[test]
    fn test_checkout_fraction() {
        assert_eq!(checkout_fraction(1, 4), 0.25);
        assert_eq!(checkout_fraction(4, 4), 1.0);
        assert_eq!(checkout_fraction(0, 0), 0.0);
    }
}
