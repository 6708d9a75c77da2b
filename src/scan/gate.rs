use crate::error::ScanError;
use crate::nutrition::catalog;

/// Minimum confidence for a label recognizable as catalog food.
pub const KNOWN_FOOD_MIN_CONFIDENCE: f64 = 0.30;
/// Minimum confidence for a label the catalog knows nothing about.
pub const UNKNOWN_FOOD_MIN_CONFIDENCE: f64 = 0.60;

/// Admission control for classification results.
///
/// A heuristic surrogate for "is this actually food and do we trust the
/// label" — false positives and negatives are expected, downstream consumers
/// tolerate them. A label counts as known when it is a catalog key or shares
/// substring containment with one in either direction.
pub fn admit(label: &str, confidence: f64) -> Result<(), ScanError> {
    let is_known = catalog::is_known_food(label);
    let min_confidence = if is_known {
        KNOWN_FOOD_MIN_CONFIDENCE
    } else {
        UNKNOWN_FOOD_MIN_CONFIDENCE
    };

    if confidence < min_confidence {
        return Err(if is_known {
            ScanError::NotFood
        } else {
            ScanError::UnknownFood
        });
    }
    Ok(())
}

#[cfg(test)]
mod gate_tests {
    use super::*;

    #[test]
    fn test_known_food_below_threshold_is_rejected() {
        assert!(matches!(
            admit("egg_biryani", 0.29),
            Err(ScanError::NotFood)
        ));
    }

    #[test]
    fn test_known_food_above_threshold_is_accepted() {
        assert!(admit("egg_biryani", 0.31).is_ok());
    }

    #[test]
    fn test_unknown_label_below_threshold_is_rejected() {
        assert!(matches!(
            admit("mystery_object", 0.59),
            Err(ScanError::UnknownFood)
        ));
    }

    #[test]
    fn test_unknown_label_above_threshold_is_accepted() {
        assert!(admit("mystery_object", 0.61).is_ok());
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        assert!(admit("egg_biryani", 0.30).is_ok());
        assert!(admit("mystery_object", 0.60).is_ok());
    }

    #[test]
    fn test_substring_containment_counts_as_known() {
        // Not a catalog key, but contains "biryani"; the 0.30 threshold applies.
        assert!(admit("egg_biryani_special", 0.35).is_ok());
        assert!(matches!(
            admit("egg_biryani_special", 0.25),
            Err(ScanError::NotFood)
        ));
    }
}
