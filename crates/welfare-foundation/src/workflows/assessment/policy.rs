use serde::{Deserialize, Serialize};

/// Lowest total score that lands in `category_1`.
pub const CATEGORY_1_MIN_TOTAL: f64 = 12.0;
/// Lowest total score that lands in `category_2`; anything below is `category_3`.
pub const CATEGORY_2_MIN_TOTAL: f64 = 7.0;

pub const MAX_TOTAL_SCORE: f64 = 20.0;

/// Priority tier derived from the total score; `Category1` carries the highest need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "category_1")]
    Category1,
    #[serde(rename = "category_2")]
    Category2,
    #[serde(rename = "category_3")]
    Category3,
}

impl Category {
    /// Band a total score. Every value maps to exactly one category; the lower bound of each
    /// band is inclusive.
    pub fn from_total(total_score: f64) -> Self {
        if total_score >= CATEGORY_1_MIN_TOTAL {
            Category::Category1
        } else if total_score >= CATEGORY_2_MIN_TOTAL {
            Category::Category2
        } else {
            Category::Category3
        }
    }

    pub const fn color(self) -> CategoryColor {
        match self {
            Category::Category1 => CategoryColor::Green,
            Category::Category2 => CategoryColor::Yellow,
            Category::Category3 => CategoryColor::White,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::Category1 => "category_1",
            Category::Category2 => "category_2",
            Category::Category3 => "category_3",
        }
    }

    pub const fn ordered() -> [Category; 3] {
        [Category::Category1, Category::Category2, Category::Category3]
    }
}

/// Badge color shown next to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryColor {
    Green,
    Yellow,
    White,
}

impl CategoryColor {
    pub const fn label(self) -> &'static str {
        match self {
            CategoryColor::Green => "green",
            CategoryColor::Yellow => "yellow",
            CategoryColor::White => "white",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_integer_total_maps_to_one_category() {
        let mut seen = Vec::new();
        for total in 0..=20 {
            let category = Category::from_total(f64::from(total));
            let expected = if total >= 12 {
                Category::Category1
            } else if total >= 7 {
                Category::Category2
            } else {
                Category::Category3
            };
            assert_eq!(category, expected, "total {total}");
            seen.push(category);
        }

        for category in Category::ordered() {
            assert!(seen.contains(&category), "{category:?} unreachable");
        }
    }

    #[test]
    fn banding_is_monotonic() {
        let mut previous = Category::from_total(0.0);
        let mut total = 0.0;
        while total <= MAX_TOTAL_SCORE {
            let current = Category::from_total(total);
            // Derived Ord puts Category1 first, so rising totals must never move backwards.
            assert!(current <= previous, "total {total} regressed to {current:?}");
            previous = current;
            total += 0.25;
        }
    }

    #[test]
    fn band_edges_are_inclusive() {
        assert_eq!(Category::from_total(11.99), Category::Category2);
        assert_eq!(Category::from_total(12.0), Category::Category1);
        assert_eq!(Category::from_total(6.99), Category::Category3);
        assert_eq!(Category::from_total(7.0), Category::Category2);
    }

    #[test]
    fn colors_follow_categories() {
        assert_eq!(Category::Category1.color(), CategoryColor::Green);
        assert_eq!(Category::Category2.color(), CategoryColor::Yellow);
        assert_eq!(Category::Category3.color(), CategoryColor::White);
    }

    #[test]
    fn serializes_with_wire_names() {
        let json = serde_json::to_string(&(Category::Category1, CategoryColor::Green))
            .expect("serialize");
        assert_eq!(json, r#"["category_1","green"]"#);
    }
}
