//! Product-signal extraction from post text.
//!
//! Pure text analysis: keyword spotting, brand and price pattern matching,
//! a small sentiment lexicon. Runs over every collected post so the counts
//! reported at the end of a run reflect product-relevant content.

use once_cell::sync::Lazy;
use regex::Regex;

const PRODUCT_KEYWORDS: &[&str] = &[
    "product",
    "review",
    "recommend",
    "buy",
    "purchase",
    "deal",
    "sale",
    "upgrade",
    "best",
    "amazing",
    "incredible",
    "fantastic",
    "love",
    "worth",
    "value",
    "quality",
    "performance",
    "experience",
];

const POSITIVE_WORDS: &[&str] = &[
    "amazing",
    "incredible",
    "fantastic",
    "love",
    "best",
    "excellent",
    "perfect",
    "great",
];

const NEGATIVE_WORDS: &[&str] = &[
    "terrible",
    "awful",
    "hate",
    "worst",
    "bad",
    "disappointed",
    "poor",
];

const REVIEW_MARKERS: &[&str] = &["review", "reviewed", "tried", "tested", "used"];

const RECOMMENDATION_MARKERS: &[&str] = &["recommend", "suggest", "should", "must", "worth"];

const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "electronics",
        &[
            "phone",
            "laptop",
            "tablet",
            "headphones",
            "speaker",
            "camera",
            "gaming",
        ],
    ),
    (
        "clothing",
        &[
            "shirt", "dress", "pants", "shoes", "jacket", "sweater", "jeans",
        ],
    ),
    (
        "beauty",
        &[
            "skincare",
            "makeup",
            "sunscreen",
            "moisturizer",
            "serum",
            "foundation",
        ],
    ),
    (
        "automotive",
        &["car", "truck", "suv", "sedan", "vehicle", "automobile"],
    ),
    (
        "home",
        &[
            "furniture",
            "appliance",
            "kitchen",
            "bedroom",
            "living room",
        ],
    ),
    (
        "sports",
        &["fitness", "gym", "running", "cycling", "yoga", "workout"],
    ),
];

static BRAND_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b(apple|samsung|sony|microsoft|google|amazon|nike|adidas|tesla|bmw|audi|mercedes)\b",
        r"\b(iphone|ipad|macbook|galaxy|pixel|surface|xbox|playstation|nintendo)\b",
        r"\b(airpods|beats|bose|jbl|sennheiser|audio-technica)\b",
        r"\b(puma|under armour|lululemon|patagonia)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("brand pattern must compile"))
    .collect()
});

static PRICE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\$[\d,]+\.?\d*",
        r"usd\s*[\d,]+\.?\d*",
        r"(\d+)\s*(?:dollars?|bucks?)",
        r"price[:\s]*\$?(\d+(?:,\d{3})*(?:\.\d{2})?)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("price pattern must compile"))
    .collect()
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductSignals {
    pub product_name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub price_mentioned: Option<f64>,
    pub is_review: bool,
    pub is_recommendation: bool,
    pub sentiment_score: f64,
    pub tags: Vec<String>,
}

impl ProductSignals {
    /// Whether the text looks product-related at all.
    pub fn is_product_related(&self) -> bool {
        self.category.is_some() || self.brand.is_some()
    }
}

pub fn extract_product_signals(text: &str) -> ProductSignals {
    let text_lower = text.to_lowercase();

    let mentions_product = PRODUCT_KEYWORDS.iter().any(|k| text_lower.contains(k));
    let brands = extract_brands(&text_lower);
    let category = detect_category(&text_lower, mentions_product);

    ProductSignals {
        product_name: extract_product_name(text, mentions_product),
        brand: brands.first().cloned(),
        category,
        price_mentioned: extract_price(&text_lower),
        is_review: REVIEW_MARKERS.iter().any(|k| text_lower.contains(k)),
        is_recommendation: RECOMMENDATION_MARKERS.iter().any(|k| text_lower.contains(k)),
        sentiment_score: sentiment_score(&text_lower),
        tags: brands,
    }
}

fn extract_brands(text_lower: &str) -> Vec<String> {
    let mut brands = Vec::new();
    for pattern in BRAND_PATTERNS.iter() {
        for m in pattern.find_iter(text_lower) {
            let brand = m.as_str().to_string();
            if !brands.contains(&brand) {
                brands.push(brand);
            }
        }
    }
    brands
}

fn detect_category(text_lower: &str, mentions_product: bool) -> Option<String> {
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|k| text_lower.contains(k)) {
            return Some(category.to_string());
        }
    }
    // Generic bucket when product keywords appear but no category matched
    mentions_product.then(|| "products".to_string())
}

fn extract_price(text_lower: &str) -> Option<f64> {
    let mut prices = Vec::new();
    for pattern in PRICE_PATTERNS.iter() {
        for caps in pattern.captures_iter(text_lower) {
            let raw = caps
                .get(1)
                .or_else(|| caps.get(0))
                .map(|m| m.as_str())
                .unwrap_or_default();
            // Only decimal amounts count as prices
            let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
            if cleaned.contains('.') {
                if let Ok(value) = cleaned.parse::<f64>() {
                    prices.push(value);
                }
            }
        }
    }
    prices.into_iter().reduce(f64::max)
}

fn extract_product_name(text: &str, mentions_product: bool) -> Option<String> {
    if !mentions_product {
        return None;
    }

    for sentence in text.split(['.', '!', '?']) {
        let trimmed = sentence.trim();
        let lower = trimmed.to_lowercase();
        if PRODUCT_KEYWORDS.iter().any(|k| lower.contains(k))
            && trimmed.chars().count() > 10
            && trimmed.chars().count() < 100
        {
            return Some(trimmed.to_string());
        }
    }
    None
}

fn sentiment_score(text_lower: &str) -> f64 {
    let positive = POSITIVE_WORDS
        .iter()
        .filter(|w| text_lower.contains(*w))
        .count() as f64;
    let negative = NEGATIVE_WORDS
        .iter()
        .filter(|w| text_lower.contains(*w))
        .count() as f64;

    let score = if positive > negative {
        0.7 + positive * 0.1
    } else if negative > positive {
        0.3 - negative * 0.1
    } else {
        0.5
    };
    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_text_has_no_signals() {
        let signals = extract_product_signals("The sky was overcast all afternoon");
        assert_eq!(signals.brand, None);
        assert_eq!(signals.category, None);
        assert_eq!(signals.price_mentioned, None);
        assert!(!signals.is_review);
        assert!(!signals.is_recommendation);
        assert_eq!(signals.sentiment_score, 0.5);
    }

    #[test]
    fn brand_is_detected_case_insensitively() {
        let signals = extract_product_signals("Just got the new Sony headphones, what a product");
        assert_eq!(signals.brand.as_deref(), Some("sony"));
        assert!(signals.tags.contains(&"sony".to_string()));
    }

    #[test]
    fn first_brand_wins_and_tags_are_deduped() {
        let signals =
            extract_product_signals("Apple or Samsung? My apple phone is still my favorite product");
        assert_eq!(signals.brand.as_deref(), Some("apple"));
        assert_eq!(
            signals.tags,
            vec!["apple".to_string(), "samsung".to_string()]
        );
    }

    #[test]
    fn category_prefers_earlier_table_entries() {
        // "laptop" (electronics) appears alongside "shoes" (clothing)
        let signals = extract_product_signals("Bought a laptop and some shoes in the sale");
        assert_eq!(signals.category.as_deref(), Some("electronics"));
    }

    #[test]
    fn product_keywords_fall_back_to_generic_category() {
        let signals = extract_product_signals("This purchase was worth every penny");
        assert_eq!(signals.category.as_deref(), Some("products"));
    }

    #[test]
    fn highest_decimal_price_wins() {
        let signals =
            extract_product_signals("It was $19.99 on sale, down from $49.99, what a deal");
        assert_eq!(signals.price_mentioned, Some(49.99));
    }

    #[test]
    fn whole_dollar_amounts_without_cents_are_ignored() {
        let signals = extract_product_signals("Paid $500 for this product");
        assert_eq!(signals.price_mentioned, None);
    }

    #[test]
    fn review_and_recommendation_flags() {
        let signals =
            extract_product_signals("I reviewed this blender and would recommend it to anyone");
        assert!(signals.is_review);
        assert!(signals.is_recommendation);
    }

    #[test]
    fn positive_sentiment_scales_with_lexicon_hits() {
        let one_hit = extract_product_signals("this product is amazing");
        let two_hits = extract_product_signals("this product is amazing, the best");
        assert!(two_hits.sentiment_score > one_hit.sentiment_score);
        assert!(one_hit.sentiment_score > 0.5);
    }

    #[test]
    fn sentiment_is_clamped_to_unit_interval() {
        let gushing = extract_product_signals(
            "amazing incredible fantastic love best excellent perfect great product",
        );
        assert_eq!(gushing.sentiment_score, 1.0);

        let scathing =
            extract_product_signals("terrible awful hate worst bad disappointed poor product");
        assert_eq!(scathing.sentiment_score, 0.0);
    }

    #[test]
    fn product_name_comes_from_a_keyword_sentence() {
        let signals = extract_product_signals(
            "Rainy day today. This vacuum is the best purchase I have made! More rain tomorrow.",
        );
        assert_eq!(
            signals.product_name.as_deref(),
            Some("This vacuum is the best purchase I have made")
        );
    }

    #[test]
    fn very_short_keyword_sentences_are_not_product_names() {
        let signals = extract_product_signals("Great deal. Ok.");
        assert_eq!(signals.product_name, None);
    }
}
