use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// The fixed set of categories a transaction can be filed under.
///
/// On the wire a category is its display label, e.g. `"Food & Drinks"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Drinks")]
    FoodAndDrinks,
    Shopping,
    Transportation,
    Entertainment,
    Bills,
    Income,
    Other
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::FoodAndDrinks,
        Category::Shopping,
        Category::Transportation,
        Category::Entertainment,
        Category::Bills,
        Category::Income,
        Category::Other
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::FoodAndDrinks => "Food & Drinks",
            Category::Shopping => "Shopping",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
            Category::Income => "Income",
            Category::Other => "Other"
        }
    }

    /// Short stable tag, used by presentation code to pick an icon.
    pub fn tag(self) -> &'static str {
        match self {
            Category::FoodAndDrinks => "food",
            Category::Shopping => "shopping",
            Category::Transportation => "transportation",
            Category::Entertainment => "entertainment",
            Category::Bills => "bills",
            Category::Income => "income",
            Category::Other => "other"
        }
    }

    /// Exact, case-sensitive label lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }
}

impl Display for Category {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}
