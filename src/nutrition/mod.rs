use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod resolver;

pub use resolver::{NutritionProvider, NutritionResolver, RemoteNutritionProvider};

/// Macro-nutrient values for one food item.
///
/// Catalog records are per 100 g; a remote provider may supply absolute
/// per-serving values instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

impl NutritionRecord {
    /// Fallback when no provider yields a match: a neutral starchy food
    /// (plain cooked rice).
    pub const GENERIC_DEFAULT: NutritionRecord = NutritionRecord {
        calories: 130.0,
        protein: 2.7,
        carbs: 28.0,
        fat: 0.3,
        fiber: 0.4,
    };

    /// Scale per-100g values to a serving of `grams`.
    pub fn scaled(&self, grams: f64) -> NutritionRecord {
        let factor = grams / 100.0;
        NutritionRecord {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
            fiber: self.fiber * factor,
        }
    }
}

#[cfg(test)]
mod nutrition_tests {
    use super::*;

    #[test]
    fn test_scaling_round_trip() {
        let original = catalog::lookup_exact("egg_biryani").unwrap();
        let serving = original.scaled(250.0);
        let back = serving.scaled(100.0 * 100.0 / 250.0);
        assert!((back.calories - original.calories).abs() < 1e-9);
        assert!((back.protein - original.protein).abs() < 1e-9);
        assert!((back.carbs - original.carbs).abs() < 1e-9);
        assert!((back.fat - original.fat).abs() < 1e-9);
        assert!((back.fiber - original.fiber).abs() < 1e-9);
    }
}
