use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of expense categories shared by every reporting surface.
///
/// Unrecognized input values coerce to [`Category::Other`] at the serde
/// boundary rather than being rejected, so loosely-typed API payloads can
/// never smuggle an unknown category into the aggregation engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Shopping,
    Bills,
    Healthcare,
    Education,
    Other,
}

/// Fallback color shared by every category without a dedicated palette entry.
const OTHER_COLOR: &str = "#6B7280";

impl Category {
    /// Every category, in fixed palette order.
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Shopping,
        Category::Bills,
        Category::Healthcare,
        Category::Education,
        Category::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Other => "Other",
        }
    }

    /// Display color from the fixed palette. Categories without their own
    /// palette entry share the `Other` color, keeping charts stable across
    /// refreshes.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Food => "#3B82F6",
            Category::Transport => "#10B981",
            Category::Entertainment => "#F59E0B",
            Category::Shopping => "#EF4444",
            Category::Bills => "#8B5CF6",
            Category::Healthcare | Category::Education | Category::Other => OTHER_COLOR,
        }
    }

    /// Position in the fixed palette, used as the deterministic tie-break
    /// when category totals are equal.
    pub fn palette_index(&self) -> usize {
        Category::ALL
            .iter()
            .position(|candidate| candidate == self)
            .unwrap_or(Category::ALL.len() - 1)
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "Food" => Category::Food,
            "Transport" => Category::Transport,
            "Entertainment" => Category::Entertainment,
            "Shopping" => Category::Shopping,
            "Bills" => Category::Bills,
            "Healthcare" => Category::Healthcare,
            "Education" => Category::Education,
            _ => Category::Other,
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.name().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
