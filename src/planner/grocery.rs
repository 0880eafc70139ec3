use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::model::WeeklyPlan;

const DEFAULT_QUANTITY: &str = "1 portion";
const PLACEHOLDER: &str = "N/A";

/// Store aisle an ingredient is shopped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "Proteins")]
    Proteins,
    #[serde(rename = "Vegetables")]
    Vegetables,
    #[serde(rename = "Fruits")]
    Fruits,
    #[serde(rename = "Grains & Carbs")]
    GrainsAndCarbs,
    #[serde(rename = "Dairy")]
    Dairy,
    #[serde(rename = "Pantry Items")]
    Pantry,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Matching order; the first category with a keyword hit wins.
    const ORDERED: [Category; 6] = [
        Category::Proteins,
        Category::Vegetables,
        Category::Fruits,
        Category::GrainsAndCarbs,
        Category::Dairy,
        Category::Pantry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Proteins => "Proteins",
            Category::Vegetables => "Vegetables",
            Category::Fruits => "Fruits",
            Category::GrainsAndCarbs => "Grains & Carbs",
            Category::Dairy => "Dairy",
            Category::Pantry => "Pantry Items",
            Category::Other => "Other",
        }
    }

    /// Flat price estimate for one distinct item.
    pub fn unit_price(&self) -> u32 {
        match self {
            Category::Proteins => 8,
            Category::Vegetables => 3,
            Category::Fruits => 4,
            Category::GrainsAndCarbs => 2,
            Category::Dairy => 5,
            Category::Pantry => 6,
            Category::Other => 4,
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Proteins => &[
                "chicken", "beef", "pork", "lamb", "mutton", "turkey", "duck", "bacon", "ham",
                "sausage", "mince", "steak", "fish", "salmon", "tuna", "cod", "tilapia", "sardine",
                "shrimp", "prawn", "crab", "tofu", "tempeh", "seitan", "lentil", "chickpea",
                "protein",
            ],
            Category::Vegetables => &[
                "spinach", "broccoli", "carrot", "onion", "garlic", "tomato", "pepper", "lettuce",
                "cucumber", "zucchini", "courgette", "cabbage", "kale", "cauliflower", "celery",
                "mushroom", "eggplant", "aubergine", "peas", "bean", "corn", "potato", "squash",
                "pumpkin", "asparagus", "okra", "beet", "radish", "leek", "ginger", "vegetable",
                "greens",
            ],
            Category::Fruits => &[
                "apple", "banana", "orange", "lemon", "lime", "berry", "berries", "grape", "mango",
                "pineapple", "melon", "peach", "pear", "plum", "cherry", "kiwi", "avocado",
                "date", "fig", "raisin", "fruit",
            ],
            Category::GrainsAndCarbs => &[
                "rice", "pasta", "noodle", "spaghetti", "bread", "tortilla", "wrap", "pita", "oats",
                "quinoa", "couscous", "barley", "bulgur", "flour", "cereal", "granola", "cracker",
                "bagel", "naan", "grain",
            ],
            Category::Dairy => &[
                "milk", "cheese", "yogurt", "yoghurt", "butter", "cream", "egg", "paneer", "ghee",
                "feta", "mozzarella", "parmesan",
            ],
            Category::Pantry => &[
                "oil", "salt", "sugar", "honey", "vinegar", "sauce", "spice", "cumin", "turmeric",
                "paprika", "cinnamon", "oregano", "basil", "thyme", "stock", "broth", "nut",
                "almond", "seed", "syrup", "mustard", "ketchup", "mayo", "jam", "cocoa", "tea",
                "coffee", "baking",
            ],
            Category::Other => &[],
        }
    }

    /// Compound names that a shorter keyword in an earlier bucket would
    /// otherwise claim (`graham` holds `ham`, `cornflour` holds `corn`).
    const COMPOUNDS: [(&'static str, Category); 9] = [
        ("graham", Category::GrainsAndCarbs),
        ("cracker", Category::GrainsAndCarbs),
        ("flour", Category::GrainsAndCarbs),
        ("cornstarch", Category::Pantry),
        ("black pepper", Category::Pantry),
        ("white pepper", Category::Pantry),
        ("peppercorn", Category::Pantry),
        ("pepper flakes", Category::Pantry),
        ("garlic powder", Category::Pantry),
    ];

    /// Keyword match against a lower-cased ingredient name.
    pub fn categorize(name: &str) -> Category {
        let name = name.to_lowercase();
        if let Some((_, category)) = Self::COMPOUNDS.iter().find(|(k, _)| name.contains(k)) {
            return *category;
        }
        Self::ORDERED
            .into_iter()
            .find(|c| c.keywords().iter().any(|k| name.contains(k)))
            .unwrap_or(Category::Other)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroceryItem {
    pub name: String,
    pub quantity: String,
    pub category: Category,
    pub usage_count: u32,
    pub purchased: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroceryList {
    pub items: Vec<GroceryItem>,
    pub categories: BTreeMap<&'static str, Vec<GroceryItem>>,
    pub total_items: usize,
    pub estimated_cost: u32,
}

/// Splits `"name: quantity"`; the quantity defaults to one portion.
fn parse_entry(entry: &str) -> Option<(&str, &str)> {
    let entry = entry.trim();
    if entry.is_empty() || entry.eq_ignore_ascii_case(PLACEHOLDER) {
        return None;
    }
    let (name, quantity) = match entry.split_once(':') {
        Some((name, quantity)) => (name.trim(), quantity.trim()),
        None => (entry, ""),
    };
    if name.is_empty() {
        return None;
    }
    Some((name, if quantity.is_empty() { DEFAULT_QUANTITY } else { quantity }))
}

/// Shopping list for every meal in the week.
///
/// Ingredients merge case-insensitively: quantities join with `" + "`, the
/// usage count goes up, and the first occurrence keeps its display name and
/// category. Items sort by category label, then name.
pub fn build_grocery_list(plan: &WeeklyPlan) -> GroceryList {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut items: Vec<GroceryItem> = Vec::new();

    for meal in plan.meals() {
        for entry in meal.ingredients.entries() {
            let Some((name, quantity)) = parse_entry(&entry) else {
                continue;
            };
            let key = name.to_lowercase();
            match index.get(&key) {
                Some(&i) => {
                    let item = &mut items[i];
                    item.quantity.push_str(" + ");
                    item.quantity.push_str(quantity);
                    item.usage_count += 1;
                }
                None => {
                    index.insert(key, items.len());
                    items.push(GroceryItem {
                        name: name.to_string(),
                        quantity: quantity.to_string(),
                        category: Category::categorize(name),
                        usage_count: 1,
                        purchased: false,
                    });
                }
            }
        }
    }

    items.sort_by(|a, b| {
        a.category
            .as_str()
            .cmp(b.category.as_str())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    let mut categories: BTreeMap<&'static str, Vec<GroceryItem>> = BTreeMap::new();
    for item in &items {
        categories
            .entry(item.category.as_str())
            .or_default()
            .push(item.clone());
    }

    GroceryList {
        total_items: items.len(),
        estimated_cost: items.iter().map(|i| i.category.unit_price()).sum(),
        categories,
        items,
    }
}
