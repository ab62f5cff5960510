//! Synthetic product rows.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// One product record, in table column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl ProductRow {
    pub const COLUMNS: [&'static str; 3] = ["name", "description", "price"];

    pub fn fields(&self) -> [&str; 3] {
        [&self.name, &self.description, &self.price]
    }
}

/// Infallible producer of rows; called once per generated record.
pub trait RowSource {
    fn next_row(&mut self) -> ProductRow;
}

const ADJECTIVES: &[&str] = &[
    "Ergonomic", "Rustic", "Sleek", "Compact", "Portable", "Durable", "Smart", "Classic",
    "Premium", "Lightweight", "Handcrafted", "Modern", "Vintage", "Wireless", "Rugged",
];

const MATERIALS: &[&str] = &[
    "Steel", "Wooden", "Cotton", "Leather", "Granite", "Bamboo", "Ceramic", "Aluminum",
    "Plastic", "Glass", "Copper", "Wool", "Carbon", "Rubber", "Silk",
];

const PRODUCTS: &[&str] = &[
    "Chair", "Lamp", "Backpack", "Keyboard", "Bottle", "Watch", "Speaker", "Blender",
    "Jacket", "Wallet", "Headphones", "Mug", "Tent", "Notebook", "Kettle", "Drone",
];

const FEATURES: &[&str] = &[
    "a reinforced frame", "an adjustable strap", "a matte finish", "fast charging",
    "a water-resistant shell", "a two-year warranty", "a minimalist design",
    "energy-efficient components", "a detachable cover", "silent operation",
];

const AUDIENCES: &[&str] = &[
    "everyday use", "the home office", "outdoor trips", "busy kitchens", "students",
    "frequent travellers", "small studios", "weekend projects",
];

// Prices are drawn in cents so the text form always has two decimals.
const MIN_PRICE_CENTS: u32 = 999;
const MAX_PRICE_CENTS: u32 = 19_999;

/// Pseudo-random product generator backed by a [`StdRng`].
pub struct FakeProducts {
    rng: StdRng,
}

impl FakeProducts {
    /// Seeded generators are reproducible; `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    fn pick(&mut self, words: &'static [&'static str]) -> &'static str {
        words.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn product_name(&mut self) -> String {
        format!(
            "{} {} {}",
            self.pick(ADJECTIVES),
            self.pick(MATERIALS),
            self.pick(PRODUCTS)
        )
    }

    fn product_description(&mut self) -> String {
        let sentences = self.rng.gen_range(1..=3);
        let mut text = String::new();
        for i in 0..sentences {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(&format!(
                "Built with {} for {}.",
                self.pick(FEATURES),
                self.pick(AUDIENCES)
            ));
        }
        text
    }

    fn price(&mut self) -> String {
        let cents = self.rng.gen_range(MIN_PRICE_CENTS..=MAX_PRICE_CENTS);
        format!("{}.{:02}", cents / 100, cents % 100)
    }
}

impl RowSource for FakeProducts {
    fn next_row(&mut self) -> ProductRow {
        let name = self.product_name();
        let description = format!("{} - {}", name, self.product_description());
        let price = self.price();
        ProductRow {
            name,
            description,
            price,
        }
    }
}
