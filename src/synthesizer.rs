// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

mod provider;


use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::trace;

use crate::document::Document;

pub use provider::{DataProvider, LegacyDataProvider, RandomProvider};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// What a field name suggests its value looks like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    FirstName,
    LastName,
    Name,
    Email,
    Date,
    Phone,
    Address,
    City,
    Country,
    PostalCode,
    Company,
    Price,
    Title,
    Paragraph,
    ListItem,
    Url,
    Image,
    Id,
    Flag,
    Count,
    Other,
}

impl Category {
    /// Case-insensitive match on the field's leaf name. The first matching rule wins.
    pub fn classify(field_name: &str) -> Category {
        let name = field_name.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|needle| name.contains(needle));

        if has(&["name"]) {
            if name.contains("first") {
                Category::FirstName
            } else if name.contains("last") {
                Category::LastName
            } else {
                Category::Name
            }
        } else if has(&["email"]) {
            Category::Email
        } else if has(&["date", "time", "created", "updated"]) {
            Category::Date
        } else if has(&["phone", "mobile"]) {
            Category::Phone
        } else if has(&["address"]) {
            Category::Address
        } else if has(&["city"]) {
            Category::City
        } else if has(&["country"]) {
            Category::Country
        } else if has(&["zip", "postal"]) {
            Category::PostalCode
        } else if has(&["company"]) {
            Category::Company
        } else if has(&["price", "amount", "cost"]) {
            Category::Price
        } else if has(&["title"]) {
            Category::Title
        } else if has(&["description", "content", "text", "summary", "feedback", "guidance", "evidence"]) {
            Category::Paragraph
        } else if has(&["item", "strength"]) {
            Category::ListItem
        } else if has(&["url", "link"]) {
            Category::Url
        } else if has(&["image", "photo"]) {
            Category::Image
        } else if name == "id" || name.ends_with("_id") {
            Category::Id
        } else if ["is", "has", "active"].iter().any(|prefix| name.starts_with(prefix)) {
            Category::Flag
        } else if has(&["count", "number", "qty"]) {
            Category::Count
        } else {
            Category::Other
        }
    }
}

/// Produces a sample value for a field from its name.
///
/// Each category asks the rich provider first, then the legacy provider, and
/// finally uses a fixed value, so synthesis never fails.
#[derive(Default)]
pub struct Synthesizer {
    provider: Option<Box<dyn DataProvider>>,
    legacy_provider: Option<Box<dyn LegacyDataProvider>>,
}

impl Synthesizer {
    /// A synthesizer that only uses the fixed fallback values.
    pub fn new() -> Synthesizer {
        Synthesizer::default()
    }

    pub fn with_provider(mut self, provider: impl DataProvider + 'static) -> Synthesizer {
        self.provider = Some(Box::new(provider));
        self
    }

    pub fn with_legacy_provider(mut self, provider: impl LegacyDataProvider + 'static) -> Synthesizer {
        self.legacy_provider = Some(Box::new(provider));
        self
    }

    /// `index` numbers the elements of a sample array; only the fixed fallbacks use it.
    pub fn synthesize(&self, field_name: &str, index: usize) -> Document {
        let leaf = field_name.rsplit('.').next().unwrap_or(field_name);
        let leaf = leaf.strip_suffix("[]").unwrap_or(leaf);
        let category = Category::classify(leaf);
        trace!(field = field_name, ?category, index, "synthesizing value");

        match category {
            Category::FirstName => self
                .text(|p| p.first_name(), |p| p.first_name())
                .unwrap_or_else(|| "John".to_string())
                .into(),
            Category::LastName => self
                .text(|p| p.last_name(), |p| p.last_name())
                .unwrap_or_else(|| "Doe".to_string())
                .into(),
            Category::Name => self
                .text(|p| p.full_name(), |p| p.find_name())
                .unwrap_or_else(|| format!("Sample Name {}", index + 1))
                .into(),
            Category::Email => self
                .text(|p| p.email(), |p| p.email())
                .unwrap_or_else(|| "user@example.com".to_string())
                .into(),
            Category::Date => self
                .chain(
                    |p| p.recent_date().map(|date| date.format(DATE_FORMAT).to_string()),
                    |p| p.past_date().as_deref().and_then(normalize_date),
                )
                .unwrap_or_else(|| "2024-01-15".to_string())
                .into(),
            Category::Phone => self
                .text(|p| p.phone_number(), |p| p.phone_number())
                .unwrap_or_else(|| "+1-555-0100".to_string())
                .into(),
            Category::Address => self
                .text(|p| p.street_address(), |p| p.street_address())
                .unwrap_or_else(|| "123 Main Street".to_string())
                .into(),
            Category::City => self
                .text(|p| p.city(), |p| p.city())
                .unwrap_or_else(|| "Springfield".to_string())
                .into(),
            Category::Country => self
                .text(|p| p.country(), |p| p.country())
                .unwrap_or_else(|| "United States".to_string())
                .into(),
            Category::PostalCode => self
                .text(|p| p.zip_code(), |p| p.zip_code())
                .unwrap_or_else(|| "12345".to_string())
                .into(),
            Category::Company => self
                .text(|p| p.company_name(), |p| p.company_name())
                .unwrap_or_else(|| "Acme Corporation".to_string())
                .into(),
            Category::Price => self
                .chain(
                    |p| p.price().as_deref().and_then(parse_price),
                    |p| p.price().as_deref().and_then(parse_price),
                )
                .unwrap_or(99.99)
                .into(),
            Category::Title => self
                .text(|p| p.sentence(), |p| p.lorem_sentence())
                .map(|sentence| sentence.trim_end_matches('.').to_string())
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| "Sample Title".to_string())
                .into(),
            Category::Paragraph => self
                .text(|p| p.paragraph(), |p| p.lorem_paragraph())
                .unwrap_or_else(|| "This is sample content for previewing the template.".to_string())
                .into(),
            Category::ListItem => self
                .text(|p| p.sentence(), |p| p.lorem_sentence())
                .unwrap_or_else(|| format!("Sample item {}", index + 1))
                .into(),
            Category::Url => self
                .text(|p| p.url(), |p| p.url())
                .unwrap_or_else(|| "https://example.com".to_string())
                .into(),
            Category::Image => self
                .text(|p| p.image_url(), |p| p.image_url())
                .unwrap_or_else(|| "https://example.com/image.png".to_string())
                .into(),
            Category::Id => self
                .text(|p| p.uuid(), |p| p.uuid())
                .unwrap_or_else(|| "123e4567-e89b-12d3-a456-426614174000".to_string())
                .into(),
            Category::Flag => self
                .chain(|p| p.boolean(), |p| p.random_boolean())
                .unwrap_or(true)
                .into(),
            Category::Count => self
                .chain(|p| p.integer(1, 100), |p| p.random_number(100))
                .filter(|count| (1..=100).contains(count))
                .unwrap_or(10)
                .into(),
            Category::Other => {
                let text = match index {
                    0 => format!("Sample {}", leaf),
                    _ => format!("Sample {} {}", leaf, index + 1),
                };
                text.into()
            }
        }
    }

    fn chain<T>(
        &self,
        rich: impl FnOnce(&dyn DataProvider) -> Option<T>,
        legacy: impl FnOnce(&dyn LegacyDataProvider) -> Option<T>,
    ) -> Option<T> {
        self.provider
            .as_deref()
            .and_then(|provider| rich(provider))
            .or_else(|| self.legacy_provider.as_deref().and_then(|provider| legacy(provider)))
    }

    // Blank provider text counts as no answer.
    fn text(
        &self,
        rich: impl Fn(&dyn DataProvider) -> Option<String>,
        legacy: impl Fn(&dyn LegacyDataProvider) -> Option<String>,
    ) -> Option<String> {
        self.chain(
            |p| rich(p).filter(|text| !text.trim().is_empty()),
            |p| legacy(p).filter(|text| !text.trim().is_empty()),
        )
    }
}

// Accepts a plain date, an RFC 3339 timestamp or a naive `YYYY-MM-DD HH:MM:SS` timestamp.
fn normalize_date(text: &str) -> Option<String> {
    let text = text.trim();
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|time| time.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|time| time.date())
        })?;
    Some(date.format(DATE_FORMAT).to_string())
}

fn parse_price(text: &str) -> Option<f64> {
    let digits: String = text
        .trim()
        .trim_start_matches(|c: char| !c.is_ascii_digit() && c != '-')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    digits.parse::<f64>().ok().filter(|price| price.is_finite())
}
