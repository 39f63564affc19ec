//! Color-themed unique file names
//!
//! Each category has a pool of evocative base names ("ruby", "navy",
//! "pistachio", ...). A [`NameRegistry`] draws `{base}_{number}` names from
//! the pool and remembers every name it hands out, so one registry never
//! returns the same name twice. Pass the registry by `&mut` to whoever needs
//! names; separate registries are independent.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::color::ColorCategory;
use crate::config::NamingConfig;
use crate::constants::naming::{FALLBACK_SUFFIX_RANGE, SUFFIX_RANGE};

/// Base names for a category
pub fn name_pool(category: ColorCategory) -> &'static [&'static str] {
    match category {
        ColorCategory::Red => &[
            "ruby", "crimson", "scarlet", "cherry", "rose", "cardinal", "coral", "vermillion",
        ],
        ColorCategory::DarkRed => &["burgundy", "wine", "maroon", "mahogany", "brick", "rust"],
        ColorCategory::Orange => &["tangerine", "apricot", "peach", "amber", "copper", "sunset"],
        ColorCategory::DarkOrange => &["terracotta", "burnt_orange", "pumpkin", "clay"],
        ColorCategory::Yellow => &[
            "lemon", "gold", "sunshine", "butter", "canary", "daffodil", "honey",
        ],
        ColorCategory::Gold => &["golden", "brass", "bronze", "mustard"],
        ColorCategory::YellowGreen => &["lime", "chartreuse", "olive", "pistachio"],
        ColorCategory::Green => &["emerald", "jade", "forest", "grass", "mint", "sage", "fern"],
        ColorCategory::DarkGreen => &["hunter", "pine", "moss", "jungle", "ivy"],
        ColorCategory::Teal => &["turquoise", "aquamarine", "seafoam", "ocean"],
        ColorCategory::Cyan => &["sky", "ice", "azure", "arctic", "lagoon"],
        ColorCategory::Blue => &[
            "sapphire", "cobalt", "cerulean", "marine", "royal", "azure_blue",
        ],
        ColorCategory::DarkBlue => &["navy", "midnight", "indigo", "denim", "steel"],
        ColorCategory::Purple => &["violet", "lavender", "orchid", "amethyst", "plum", "lilac"],
        ColorCategory::DarkPurple => &["eggplant", "grape", "aubergine", "mulberry"],
        ColorCategory::Magenta => &["fuchsia", "hot_pink", "neon_pink", "electric"],
        ColorCategory::Pink => &[
            "rose_pink", "blush", "salmon", "carnation", "flamingo", "bubblegum",
        ],
        ColorCategory::Brown => &["chocolate", "coffee", "cocoa", "chestnut", "walnut", "espresso"],
        ColorCategory::Tan => &["sand", "camel", "khaki", "wheat", "biscuit"],
        ColorCategory::Beige => &["cream", "ivory", "ecru", "linen", "vanilla"],
        ColorCategory::White => &["pearl", "snow", "cloud", "milk", "alabaster"],
        ColorCategory::LightGray => &["silver", "platinum", "ash", "dove"],
        ColorCategory::Gray => &["slate", "pewter", "charcoal_gray", "stone"],
        ColorCategory::DarkGray => &["graphite", "charcoal", "iron", "smoke"],
        ColorCategory::Mixed => &["rainbow", "multicolor", "mosaic", "spectrum", "prism"],
    }
}

/// Hands out unique color-themed names
#[derive(Debug)]
pub struct NameRegistry {
    rng: StdRng,
    used: HashSet<String>,
    max_attempts: usize,
}

impl Default for NameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NameRegistry {
    /// Registry seeded from OS entropy
    pub fn new() -> Self {
        Self::from_config(&NamingConfig::default())
    }

    /// Registry with a fixed seed; same seed, same sequence of names
    pub fn with_seed(seed: u64) -> Self {
        Self::from_config(&NamingConfig {
            seed: Some(seed),
            ..NamingConfig::default()
        })
    }

    pub fn from_config(config: &NamingConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            used: HashSet::new(),
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Produce a name for `category` that this registry has not issued before
    ///
    /// Draws `{base}_{1..=999}` up to `max_attempts` times, then falls back to
    /// `{category}_{1000..=9999}` in lowercase.
    pub fn generate(&mut self, category: ColorCategory) -> String {
        let pool = name_pool(category);

        for _ in 0..self.max_attempts {
            let Some(base) = pool.choose(&mut self.rng) else {
                break;
            };
            let number = self.rng.gen_range(SUFFIX_RANGE.0..=SUFFIX_RANGE.1);
            let name = format!("{}_{}", base, number);
            if self.used.insert(name.clone()) {
                return name;
            }
        }

        self.fallback(category)
    }

    fn fallback(&mut self, category: ColorCategory) -> String {
        let prefix = category.as_str().to_lowercase();

        for _ in 0..self.max_attempts {
            let number = self
                .rng
                .gen_range(FALLBACK_SUFFIX_RANGE.0..=FALLBACK_SUFFIX_RANGE.1);
            let name = format!("{}_{}", prefix, number);
            if self.used.insert(name.clone()) {
                return name;
            }
        }

        // Random fallbacks collided too; take the first free number
        let name = (FALLBACK_SUFFIX_RANGE.0..)
            .map(|number| format!("{}_{}", prefix, number))
            .find(|name| !self.used.contains(name))
            .unwrap_or_else(|| format!("{}_{}", prefix, self.used.len()));
        self.used.insert(name.clone());
        name
    }

    /// Mark a name as taken, e.g. one already present on disk
    ///
    /// Returns false if it was already registered.
    pub fn reserve(&mut self, name: impl Into<String>) -> bool {
        self.used.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
