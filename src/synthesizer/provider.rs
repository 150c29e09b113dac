// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::sync::Mutex;

use chrono::{Days, Local, NaiveDate};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use uuid::Builder;

/// Realistic sample values, one method per category.
///
/// Every method may decline by returning `None`; the synthesizer then falls back
/// to a [`LegacyDataProvider`] and finally to a fixed value.
pub trait DataProvider: Send + Sync {
    fn first_name(&self) -> Option<String> {
        None
    }

    fn last_name(&self) -> Option<String> {
        None
    }

    fn full_name(&self) -> Option<String> {
        None
    }

    fn email(&self) -> Option<String> {
        None
    }

    fn recent_date(&self) -> Option<NaiveDate> {
        None
    }

    fn phone_number(&self) -> Option<String> {
        None
    }

    fn street_address(&self) -> Option<String> {
        None
    }

    fn city(&self) -> Option<String> {
        None
    }

    fn country(&self) -> Option<String> {
        None
    }

    fn zip_code(&self) -> Option<String> {
        None
    }

    fn company_name(&self) -> Option<String> {
        None
    }

    /// A price as text, e.g. `"24.99"`.
    fn price(&self) -> Option<String> {
        None
    }

    fn sentence(&self) -> Option<String> {
        None
    }

    fn paragraph(&self) -> Option<String> {
        None
    }

    fn url(&self) -> Option<String> {
        None
    }

    fn image_url(&self) -> Option<String> {
        None
    }

    fn uuid(&self) -> Option<String> {
        None
    }

    fn boolean(&self) -> Option<bool> {
        None
    }

    /// An integer in `min..=max`.
    fn integer(&self, _min: i64, _max: i64) -> Option<i64> {
        None
    }
}

/// The older, flatter provider shape. Dates come back as free-form text.
pub trait LegacyDataProvider: Send + Sync {
    fn first_name(&self) -> Option<String> {
        None
    }

    fn last_name(&self) -> Option<String> {
        None
    }

    fn find_name(&self) -> Option<String> {
        None
    }

    fn email(&self) -> Option<String> {
        None
    }

    fn past_date(&self) -> Option<String> {
        None
    }

    fn phone_number(&self) -> Option<String> {
        None
    }

    fn street_address(&self) -> Option<String> {
        None
    }

    fn city(&self) -> Option<String> {
        None
    }

    fn country(&self) -> Option<String> {
        None
    }

    fn zip_code(&self) -> Option<String> {
        None
    }

    fn company_name(&self) -> Option<String> {
        None
    }

    fn price(&self) -> Option<String> {
        None
    }

    fn lorem_sentence(&self) -> Option<String> {
        None
    }

    fn lorem_paragraph(&self) -> Option<String> {
        None
    }

    fn url(&self) -> Option<String> {
        None
    }

    fn image_url(&self) -> Option<String> {
        None
    }

    fn uuid(&self) -> Option<String> {
        None
    }

    fn random_boolean(&self) -> Option<bool> {
        None
    }

    /// An integer in `0..=max`.
    fn random_number(&self, _max: i64) -> Option<i64> {
        None
    }
}

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Chloe", "Dmitri", "Elena", "Farah", "Gustavo", "Hana", "Isaac", "Julia", "Kenji", "Leila",
    "Marcus", "Nadia", "Oscar", "Priya",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Becker", "Castillo", "Dubois", "Eriksen", "Fischer", "Garcia", "Hughes", "Ivanova", "Jensen",
    "Kowalski", "Lindqvist", "Moreau", "Nakamura", "Okafor", "Patel",
];

const STREET_NAMES: &[&str] = &[
    "Oak", "Maple", "Cedar", "Elm", "Willow", "Hillcrest", "Lakeview", "Sunset", "River", "Park",
];

const STREET_SUFFIXES: &[&str] = &["Street", "Avenue", "Road", "Lane", "Drive", "Court"];

const CITIES: &[&str] = &[
    "Portland", "Austin", "Denver", "Madison", "Raleigh", "Boise", "Tucson", "Spokane", "Savannah", "Burlington",
];

const COUNTRIES: &[&str] = &[
    "Canada", "Germany", "Japan", "Brazil", "Australia", "Norway", "Kenya", "Mexico", "Ireland", "New Zealand",
];

const COMPANY_WORDS: &[&str] = &[
    "Summit", "Northwind", "Bluebird", "Ironwood", "Brightline", "Keystone", "Silverleaf", "Harbor",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Group", "Partners", "Labs", "Holdings"];

const DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do", "eiusmod", "tempor",
    "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim", "minim", "veniam", "quis", "nostrud",
];

/// A self-contained [`DataProvider`] backed by a seedable random generator.
pub struct RandomProvider {
    rng: Mutex<StdRng>,
    today: NaiveDate,
}

impl RandomProvider {
    pub fn new() -> RandomProvider {
        RandomProvider::from_rng(StdRng::from_entropy())
    }

    /// Same seed, same sequence of values.
    pub fn seeded(seed: u64) -> RandomProvider {
        RandomProvider::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Dates are generated relative to `today`.
    pub fn with_today(mut self, today: NaiveDate) -> RandomProvider {
        self.today = today;
        self
    }

    fn from_rng(rng: StdRng) -> RandomProvider {
        RandomProvider {
            rng: Mutex::new(rng),
            today: Local::now().date_naive(),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> Option<T> {
        // Keep drawing even if another thread panicked while holding the lock.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Some(f(&mut *rng))
    }

    fn pick(&self, list: &[&str]) -> Option<String> {
        self.with_rng(|rng| list.choose(rng).map(|item| item.to_string()))
            .flatten()
    }

    fn words(rng: &mut StdRng, count: usize) -> Vec<&'static str> {
        (0..count)
            .filter_map(|_| WORDS.choose(&mut *rng).copied())
            .collect()
    }

    fn capitalize(text: &str) -> String {
        let mut chars = text.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl Default for RandomProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DataProvider for RandomProvider {
    fn first_name(&self) -> Option<String> {
        self.pick(FIRST_NAMES)
    }

    fn last_name(&self) -> Option<String> {
        self.pick(LAST_NAMES)
    }

    fn full_name(&self) -> Option<String> {
        Some(format!("{} {}", self.first_name()?, self.last_name()?))
    }

    fn email(&self) -> Option<String> {
        let first = self.first_name()?.to_lowercase();
        let last = self.last_name()?.to_lowercase();
        let domain = self.pick(DOMAINS)?;
        Some(format!("{}.{}@{}", first, last, domain))
    }

    fn recent_date(&self) -> Option<NaiveDate> {
        let days_ago = self.with_rng(|rng| rng.gen_range(0..90))?;
        self.today.checked_sub_days(Days::new(days_ago))
    }

    fn phone_number(&self) -> Option<String> {
        self.with_rng(|rng| {
            format!(
                "+1-{}-{}-{:04}",
                rng.gen_range(200..1000),
                rng.gen_range(200..1000),
                rng.gen_range(0..10000)
            )
        })
    }

    fn street_address(&self) -> Option<String> {
        let number = self.with_rng(|rng| rng.gen_range(1..10000))?;
        let street = self.pick(STREET_NAMES)?;
        let suffix = self.pick(STREET_SUFFIXES)?;
        Some(format!("{} {} {}", number, street, suffix))
    }

    fn city(&self) -> Option<String> {
        self.pick(CITIES)
    }

    fn country(&self) -> Option<String> {
        self.pick(COUNTRIES)
    }

    fn zip_code(&self) -> Option<String> {
        self.with_rng(|rng| format!("{:05}", rng.gen_range(10000..100000)))
    }

    fn company_name(&self) -> Option<String> {
        let word = self.pick(COMPANY_WORDS)?;
        let suffix = self.pick(COMPANY_SUFFIXES)?;
        Some(format!("{} {}", word, suffix))
    }

    fn price(&self) -> Option<String> {
        self.with_rng(|rng| format!("{}.{:02}", rng.gen_range(1..1000), rng.gen_range(0..100)))
    }

    fn sentence(&self) -> Option<String> {
        self.with_rng(|rng| {
            let count = rng.gen_range(4..10);
            let sentence = Self::words(rng, count).join(" ");
            format!("{}.", Self::capitalize(&sentence))
        })
    }

    fn paragraph(&self) -> Option<String> {
        let count = self.with_rng(|rng| rng.gen_range(3..6))?;
        let sentences = (0..count).map(|_| self.sentence()).collect::<Option<Vec<_>>>()?;
        Some(sentences.join(" "))
    }

    fn url(&self) -> Option<String> {
        let domain = self.pick(DOMAINS)?;
        let word = self.pick(WORDS)?;
        Some(format!("https://{}/{}", domain, word))
    }

    fn image_url(&self) -> Option<String> {
        let id = self.with_rng(|rng| rng.gen_range(1..1000))?;
        Some(format!("https://picsum.photos/seed/{}/640/480", id))
    }

    fn uuid(&self) -> Option<String> {
        let bytes = self.with_rng(|rng| rng.gen::<[u8; 16]>())?;
        Some(Builder::from_random_bytes(bytes).into_uuid().to_string())
    }

    fn boolean(&self) -> Option<bool> {
        self.with_rng(|rng| rng.gen_bool(0.5))
    }

    fn integer(&self, min: i64, max: i64) -> Option<i64> {
        if min > max {
            return None;
        }
        self.with_rng(|rng| rng.gen_range(min..=max))
    }
}
