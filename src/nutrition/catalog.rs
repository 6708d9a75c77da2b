//! Static food reference catalog.
//!
//! Values are kcal / grams per 100 g serving. Definition order is
//! load-bearing: fuzzy lookup returns the first key with substring
//! containment, so reordering entries changes which record ambiguous
//! labels resolve to.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::NutritionRecord;

const fn r(calories: f64, protein: f64, carbs: f64, fat: f64, fiber: f64) -> NutritionRecord {
    NutritionRecord {
        calories,
        protein,
        carbs,
        fat,
        fiber,
    }
}

/// Category labels reported by `GET /scan/supported-foods`.
pub static CATEGORIES: &[&str] = &[
    "Indian Foods",
    "Asian Foods (Chinese, Japanese, Thai, Vietnamese, Korean)",
    "Western Foods",
    "Mediterranean Foods",
    "Middle Eastern Foods",
    "African Foods",
    "South American Foods",
    "Soups & Stews",
    "Salads",
    "Snacks & Desserts",
    "Fast Food",
];

pub static FOOD_CATALOG: &[(&str, NutritionRecord)] = &[
    // Indian breads
    ("roti", r(150.0, 4.2, 33.0, 0.7, 1.8)),
    ("chapati", r(120.0, 3.7, 26.0, 0.5, 1.5)),
    ("paratha", r(180.0, 4.2, 30.0, 4.5, 1.2)),
    ("naan", r(262.0, 8.3, 44.0, 6.7, 1.5)),
    ("puri", r(245.0, 4.8, 35.0, 10.0, 1.2)),
    ("dosa", r(168.0, 3.5, 28.0, 5.0, 1.8)),
    ("idli", r(150.0, 3.8, 30.0, 2.0, 0.6)),
    ("bhakri", r(140.0, 2.5, 28.0, 1.5, 3.0)),
    ("appam", r(135.0, 2.0, 28.0, 2.5, 0.8)),
    ("uttapam", r(160.0, 4.0, 32.0, 2.0, 1.0)),
    // Indian rice dishes
    ("biryani", r(240.0, 6.5, 36.0, 7.0, 0.5)),
    ("egg_biryani", r(240.0, 8.5, 35.0, 7.0, 0.5)),
    ("chicken_biryani", r(240.0, 12.0, 34.0, 7.0, 0.5)),
    ("pulao", r(180.0, 5.2, 32.0, 4.0, 0.4)),
    ("basmati_rice", r(130.0, 2.7, 28.0, 0.3, 0.4)),
    ("jeera_rice", r(140.0, 3.0, 30.0, 0.5, 0.5)),
    ("rice_pilaf", r(138.0, 3.5, 29.0, 0.4, 0.3)),
    ("khichdi", r(110.0, 3.2, 22.0, 0.8, 1.2)),
    ("fried_rice", r(145.0, 3.0, 28.0, 2.5, 0.3)),
    // Indian curries and mains
    ("chicken_tikka", r(165.0, 23.0, 4.0, 7.0, 0.0)),
    ("butter_chicken", r(215.0, 15.0, 8.0, 12.0, 0.5)),
    ("tandoori_chicken", r(165.0, 24.0, 2.0, 7.0, 0.0)),
    ("chicken_curry", r(185.0, 20.0, 6.0, 8.0, 0.3)),
    ("goat_curry", r(195.0, 22.0, 5.0, 10.0, 0.2)),
    ("paneer_tikka", r(165.0, 14.0, 5.0, 8.0, 0.2)),
    ("paneer_butter_masala", r(240.0, 12.0, 10.0, 16.0, 0.5)),
    ("dal_makhani", r(165.0, 8.5, 20.0, 5.5, 3.0)),
    ("chole_bhature", r(320.0, 10.0, 45.0, 10.0, 6.0)),
    ("sambar", r(85.0, 4.0, 12.0, 2.0, 3.0)),
    ("rasam", r(25.0, 1.2, 4.0, 0.5, 0.5)),
    ("coconut_curry", r(180.0, 8.0, 10.0, 12.0, 1.0)),
    ("korma", r(210.0, 12.0, 10.0, 13.0, 0.5)),
    ("rogan_josh", r(200.0, 18.0, 8.0, 10.0, 0.3)),
    ("vindaloo", r(190.0, 16.0, 8.0, 10.0, 0.5)),
    ("dopiaza", r(170.0, 14.0, 10.0, 8.0, 1.0)),
    ("saag_paneer", r(155.0, 10.0, 8.0, 8.0, 2.0)),
    ("malai_kofta", r(220.0, 8.0, 20.0, 12.0, 2.0)),
    ("shahi_tukda", r(235.0, 5.0, 30.0, 11.0, 0.5)),
    ("pakora", r(180.0, 5.0, 20.0, 9.0, 1.5)),
    ("samosa", r(262.0, 5.0, 32.0, 12.0, 2.0)),
    ("spring_roll", r(195.0, 4.0, 28.0, 8.0, 1.0)),
    ("momo", r(140.0, 5.0, 20.0, 4.0, 0.5)),
    ("chicken_tikka_masala", r(165.0, 18.0, 6.0, 7.0, 0.3)),
    // Indian vegetable dishes
    ("aloo_gobi", r(85.0, 2.5, 12.0, 4.0, 2.0)),
    ("baingan_bharta", r(80.0, 1.5, 8.0, 5.0, 2.5)),
    ("bhindi_masala", r(95.0, 2.0, 12.0, 5.0, 2.0)),
    ("chana_masala", r(164.0, 8.0, 20.0, 5.0, 5.0)),
    ("dal_tadka", r(145.0, 8.0, 18.0, 4.0, 4.0)),
    ("dam_aloo", r(110.0, 2.0, 15.0, 5.0, 2.0)),
    ("mixed_vegetables", r(65.0, 2.5, 10.0, 2.0, 2.0)),
    ("tindora_masala", r(55.0, 1.5, 8.0, 2.0, 1.5)),
    // Indian yogurt and dairy
    ("dahi", r(59.0, 3.5, 3.2, 3.0, 0.0)),
    ("lassi", r(60.0, 2.0, 8.0, 2.0, 0.0)),
    ("paneer", r(265.0, 25.0, 1.5, 19.0, 0.0)),
    ("ghee", r(892.0, 0.0, 0.0, 99.0, 0.0)),
    ("butter_milk", r(40.0, 3.3, 4.8, 0.8, 0.0)),
    ("raita", r(95.0, 3.5, 12.0, 4.0, 1.0)),
    // Indian snacks and street food
    ("vada", r(165.0, 4.0, 20.0, 8.0, 1.5)),
    ("chaat", r(170.0, 5.0, 22.0, 7.0, 2.0)),
    ("gol_gappa", r(150.0, 3.0, 28.0, 2.0, 1.5)),
    ("sev_puri", r(195.0, 5.0, 25.0, 8.0, 2.0)),
    ("bhel_puri", r(165.0, 4.0, 28.0, 4.0, 2.0)),
    ("pav_bhaji", r(200.0, 6.0, 28.0, 8.0, 2.0)),
    ("aloo_tikki", r(180.0, 3.0, 25.0, 8.0, 2.0)),
    ("jalebi", r(296.0, 0.0, 76.0, 0.5, 0.0)),
    ("gulab_jamun", r(185.0, 1.5, 48.0, 0.2, 0.0)),
    ("kheer", r(152.0, 3.0, 20.0, 6.0, 0.5)),
    ("halwa", r(350.0, 3.0, 48.0, 16.0, 1.0)),
    ("laddu", r(320.0, 5.0, 45.0, 13.0, 1.5)),
    ("barfi", r(365.0, 4.0, 50.0, 17.0, 0.5)),
    ("burfi", r(365.0, 4.0, 50.0, 17.0, 0.5)),
    // Chinese
    ("fried_rice_chinese", r(145.0, 3.0, 28.0, 2.5, 0.3)),
    ("noodles_chow_mein", r(190.0, 5.0, 35.0, 3.0, 0.5)),
    ("spring_roll_chinese", r(195.0, 4.0, 28.0, 8.0, 1.0)),
    ("dim_sum", r(165.0, 6.0, 20.0, 7.0, 0.5)),
    ("peking_duck", r(195.0, 28.0, 0.0, 10.0, 0.0)),
    ("sweet_sour_pork", r(215.0, 15.0, 18.0, 10.0, 0.0)),
    ("mapo_tofu", r(160.0, 12.0, 8.0, 8.0, 1.0)),
    ("kung_pao_chicken", r(210.0, 18.0, 10.0, 10.0, 0.5)),
    ("singapura_mei_fun", r(180.0, 4.0, 32.0, 4.0, 0.5)),
    ("mongolian_beef", r(220.0, 20.0, 12.0, 11.0, 0.0)),
    // Japanese
    ("sushi", r(200.0, 8.0, 36.0, 2.0, 0.5)),
    ("ramen", r(356.0, 9.0, 60.0, 8.0, 1.0)),
    ("tempura", r(230.0, 8.0, 20.0, 13.0, 0.5)),
    ("teriyaki_chicken", r(245.0, 25.0, 10.0, 11.0, 0.0)),
    ("edamame", r(95.0, 11.0, 8.0, 5.0, 2.2)),
    ("miso_soup", r(35.0, 3.0, 2.0, 1.0, 0.3)),
    ("udon", r(180.0, 6.0, 40.0, 0.5, 0.2)),
    ("yakitori", r(165.0, 22.0, 3.0, 8.0, 0.0)),
    // Thai
    ("pad_thai", r(225.0, 8.0, 32.0, 8.0, 2.0)),
    ("green_curry", r(210.0, 15.0, 6.0, 14.0, 0.5)),
    ("red_curry", r(215.0, 14.0, 8.0, 15.0, 0.5)),
    ("tom_yum", r(70.0, 3.0, 8.0, 3.0, 0.5)),
    ("satay", r(415.0, 15.0, 8.0, 37.0, 1.0)),
    ("pad_see_ew", r(240.0, 9.0, 30.0, 10.0, 1.0)),
    // Western
    ("beef_steak", r(250.0, 26.0, 0.0, 16.0, 0.0)),
    ("chicken_breast", r(165.0, 31.0, 0.0, 3.6, 0.0)),
    ("salmon", r(206.0, 22.0, 0.0, 13.0, 0.0)),
    ("tuna", r(132.0, 29.0, 0.0, 1.3, 0.0)),
    ("pork_chop", r(242.0, 27.0, 0.0, 14.0, 0.0)),
    ("turkey_breast", r(189.0, 29.0, 0.0, 7.4, 0.0)),
    ("lamb", r(294.0, 25.0, 0.0, 21.0, 0.0)),
    ("hamburger", r(215.0, 21.0, 0.0, 14.0, 0.0)),
    ("hot_dog", r(290.0, 12.0, 3.0, 25.0, 0.0)),
    ("pizza", r(285.0, 8.0, 36.0, 11.0, 2.0)),
    ("pasta", r(131.0, 5.0, 25.0, 1.1, 1.5)),
    ("spaghetti", r(131.0, 5.0, 25.0, 1.1, 1.5)),
    ("burger", r(215.0, 15.0, 20.0, 10.0, 1.0)),
    ("sandwich", r(200.0, 8.0, 28.0, 8.0, 1.5)),
    ("fries", r(365.0, 3.4, 48.0, 17.0, 4.2)),
    ("fried_chicken", r(320.0, 30.0, 10.0, 17.0, 0.0)),
    ("grilled_fish", r(145.0, 24.0, 0.0, 5.0, 0.0)),
    ("beef_stew", r(198.0, 20.0, 12.0, 8.0, 1.0)),
    ("chicken_soup", r(85.0, 7.0, 8.0, 3.0, 0.5)),
    ("meat_loaf", r(260.0, 20.0, 3.0, 19.0, 0.0)),
    // Fruits
    ("apple", r(52.0, 0.26, 14.0, 0.17, 2.4)),
    ("banana", r(89.0, 1.1, 23.0, 0.3, 2.6)),
    ("orange", r(47.0, 0.9, 12.0, 0.12, 2.4)),
    ("strawberry", r(32.0, 0.67, 8.0, 0.3, 2.0)),
    ("watermelon", r(30.0, 0.61, 8.0, 0.15, 0.4)),
    ("mango", r(60.0, 0.82, 15.0, 0.38, 1.6)),
    ("grapes", r(67.0, 0.72, 17.0, 0.16, 0.9)),
    ("avocado", r(160.0, 2.0, 9.0, 15.0, 7.0)),
    ("blueberry", r(57.0, 0.74, 14.0, 0.33, 2.4)),
    ("pineapple", r(50.0, 0.54, 13.0, 0.12, 1.4)),
    // Vegetables
    ("carrot", r(41.0, 0.93, 10.0, 0.24, 2.8)),
    ("broccoli", r(34.0, 2.8, 7.0, 0.4, 2.4)),
    ("spinach", r(23.0, 2.7, 3.6, 0.4, 2.2)),
    ("potato", r(77.0, 2.0, 17.0, 0.1, 2.1)),
    ("tomato", r(18.0, 0.88, 3.9, 0.2, 1.2)),
    ("cucumber", r(16.0, 0.65, 3.6, 0.11, 0.5)),
    ("onion", r(40.0, 1.1, 9.0, 0.1, 1.7)),
    ("garlic", r(149.0, 6.4, 33.0, 0.5, 2.1)),
    ("lettuce", r(15.0, 0.9, 2.9, 0.1, 1.2)),
    ("bell_pepper", r(31.0, 1.0, 6.0, 0.3, 2.0)),
    // Dairy
    ("milk", r(61.0, 3.2, 4.8, 3.3, 0.0)),
    ("cheese", r(402.0, 25.0, 1.3, 33.0, 0.0)),
    ("yogurt", r(59.0, 3.5, 3.2, 3.0, 0.0)),
    ("ice_cream", r(207.0, 3.5, 24.0, 11.0, 0.0)),
    ("cream", r(340.0, 2.2, 2.8, 35.0, 0.0)),
    ("cream_cheese", r(342.0, 5.9, 4.1, 34.0, 0.0)),
    // Grains
    ("bread", r(265.0, 9.0, 49.0, 3.3, 2.7)),
    ("whole_wheat_bread", r(247.0, 8.2, 41.0, 3.3, 6.8)),
    ("rice", r(130.0, 2.7, 28.0, 0.3, 0.4)),
    ("wheat", r(327.0, 13.0, 71.0, 1.7, 10.7)),
    ("oats", r(389.0, 17.0, 66.0, 6.9, 10.6)),
    ("cereal", r(150.0, 3.0, 30.0, 1.0, 1.0)),
    ("corn", r(86.0, 3.2, 19.0, 1.2, 2.7)),
    // Nuts and seeds
    ("almonds", r(579.0, 21.0, 22.0, 50.0, 12.5)),
    ("peanuts", r(567.0, 26.0, 16.0, 49.0, 8.6)),
    ("walnuts", r(654.0, 9.0, 14.0, 65.0, 6.7)),
    ("sunflower_seeds", r(584.0, 8.5, 20.0, 51.0, 8.6)),
    ("pumpkin_seeds", r(559.0, 25.0, 11.0, 49.0, 6.0)),
    // Fast food
    ("mcdonalds_burger", r(215.0, 12.0, 26.0, 9.0, 1.5)),
    ("kfc_chicken", r(320.0, 30.0, 10.0, 17.0, 0.0)),
    ("subway_sandwich", r(230.0, 11.0, 35.0, 4.0, 2.0)),
    ("pizza_slice", r(285.0, 8.0, 36.0, 11.0, 2.0)),
    ("taco", r(195.0, 9.0, 18.0, 10.0, 1.5)),
    // Beverages
    ("water", r(0.0, 0.0, 0.0, 0.0, 0.0)),
    ("tea", r(2.0, 0.0, 0.0, 0.0, 0.0)),
    ("coffee", r(2.0, 0.2, 0.3, 0.0, 0.0)),
    ("juice", r(47.0, 0.5, 11.0, 0.1, 0.1)),
    ("soft_drink", r(42.0, 0.0, 11.0, 0.0, 0.0)),
    ("beer", r(43.0, 0.5, 3.6, 0.0, 0.0)),
    ("wine", r(82.0, 0.1, 2.6, 0.0, 0.0)),
    ("smoothie", r(120.0, 3.0, 28.0, 0.5, 2.0)),
    // Soups and stews
    ("vegetable_soup", r(75.0, 3.0, 14.0, 1.0, 2.0)),
    ("tomato_soup", r(70.0, 2.0, 15.0, 1.0, 1.0)),
    ("lentil_soup", r(120.0, 8.0, 18.0, 1.0, 4.0)),
    ("mushroom_soup", r(95.0, 3.0, 10.0, 5.0, 1.5)),
    // Salads
    ("caesar_salad", r(150.0, 7.0, 10.0, 8.0, 2.0)),
    ("garden_salad", r(50.0, 2.0, 9.0, 0.5, 2.0)),
    ("greek_salad", r(120.0, 5.0, 9.0, 8.0, 2.0)),
    ("coleslaw", r(150.0, 1.5, 15.0, 9.0, 2.5)),
    ("pasta_salad", r(180.0, 5.0, 25.0, 7.0, 2.0)),
    // Mediterranean
    ("hummus", r(363.0, 12.0, 33.0, 19.0, 9.6)),
    ("falafel", r(333.0, 13.0, 28.0, 17.0, 5.9)),
    ("tabbouleh", r(99.0, 3.3, 16.0, 2.2, 3.9)),
    ("moussaka", r(215.0, 15.0, 12.0, 12.0, 1.0)),
    ("souvlaki", r(210.0, 28.0, 2.0, 10.0, 0.0)),
    // Desserts
    ("cake", r(250.0, 3.0, 40.0, 9.0, 0.5)),
    ("chocolate", r(535.0, 4.9, 58.0, 30.0, 3.3)),
    ("cookie", r(452.0, 5.0, 60.0, 21.0, 1.5)),
    ("donut", r(452.0, 4.3, 50.0, 25.0, 0.0)),
    ("candy", r(390.0, 0.0, 98.0, 0.3, 0.0)),
    ("pudding", r(120.0, 2.0, 20.0, 4.0, 0.0)),
    ("pie", r(270.0, 2.5, 40.0, 11.0, 1.2)),
];

lazy_static! {
    static ref CATALOG_INDEX: HashMap<&'static str, NutritionRecord> =
        FOOD_CATALOG.iter().copied().collect();
}

/// Normalize a raw label or key: lowercase, spaces and hyphens to underscores.
pub fn normalize_key(name: &str) -> String {
    name.to_lowercase().replace([' ', '-'], "_")
}

/// Exact match on an already-normalized key.
pub fn lookup_exact(key: &str) -> Option<NutritionRecord> {
    CATALOG_INDEX.get(key).copied()
}

/// Exact match first, then the first catalog key (definition order) with
/// substring containment in either direction.
pub fn lookup(label: &str) -> Option<NutritionRecord> {
    let key = normalize_key(label);
    if let Some(record) = lookup_exact(&key) {
        return Some(record);
    }
    FOOD_CATALOG
        .iter()
        .find(|(k, _)| key.contains(k) || k.contains(key.as_str()))
        .map(|(_, record)| *record)
}

/// Whether a normalized label is recognizable as catalog food, by exact
/// membership or substring containment in either direction.
pub fn is_known_food(label: &str) -> bool {
    let key = normalize_key(label);
    CATALOG_INDEX.contains_key(key.as_str())
        || FOOD_CATALOG
            .iter()
            .any(|(k, _)| key.contains(k) || k.contains(key.as_str()))
}

pub fn food_count() -> usize {
    FOOD_CATALOG.len()
}

#[cfg(test)]
mod catalog_tests {
    use super::*;

    #[test]
    fn test_keys_are_unique_and_normalized() {
        let mut seen = std::collections::HashSet::new();
        for (key, _) in FOOD_CATALOG {
            assert_eq!(*key, normalize_key(key), "key not normalized: {key}");
            assert!(seen.insert(*key), "duplicate key: {key}");
        }
        assert_eq!(CATALOG_INDEX.len(), FOOD_CATALOG.len());
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Egg Biryani"), "egg_biryani");
        assert_eq!(normalize_key("pad-see-ew"), "pad_see_ew");
        assert_eq!(normalize_key("Ice Cream"), "ice_cream");
    }

    #[test]
    fn test_direct_match_has_priority_over_fuzzy() {
        // "biryani" is a substring of earlier-listed keys' neighborhood, but
        // every exact key must resolve to exactly its own record.
        for (key, record) in FOOD_CATALOG {
            assert_eq!(lookup(key), Some(*record), "direct match broke for {key}");
        }
    }

    #[test]
    fn test_fuzzy_match_follows_definition_order() {
        // "chicken" first hits "chicken_biryani" (the earliest key containing
        // it), not the alphabetically or semantically closest one.
        assert_eq!(lookup("chicken"), lookup_exact("chicken_biryani"));
        // "egg_biryani_special" contains "biryani" before it contains
        // "egg_biryani" in definition order.
        assert_eq!(lookup("egg_biryani_special"), lookup_exact("biryani"));
    }

    #[test]
    fn test_unknown_label_has_no_match() {
        assert_eq!(lookup("mystery_object"), None);
        assert!(!is_known_food("mystery_object"));
        assert!(is_known_food("egg_biryani"));
        assert!(is_known_food("egg biryani special"));
    }
}
