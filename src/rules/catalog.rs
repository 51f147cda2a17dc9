//! Built-in disambiguation rules for product titles.
//!
//! Title triggers match whole words so that `"kit"` stays silent on
//! `"kitchen"`; category triggers match substrings of the lowercased path.
//!
//! Magnitudes fall into three bands: near-elimination (`<= 0.001`), strong
//! suppression (`0.005..=0.1`) and mild deprioritization (`0.2..=0.5`). Boosts
//! (`10`, `100`) are reserved for the strict rules at the bottom of the table.

use std::sync::LazyLock;

use regex::Regex;

use super::rule::ContextRule;
use super::trigger::Trigger;

pub const NEAR_ZERO: f64 = 0.000_001;

static BABY_AGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+\s*(months?|mo)\b").expect("baby age pattern is valid")
});

static ADULT_SIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(small|medium|large|xl|xxl)\b").expect("adult size pattern is valid")
});

const CLEANER_TITLE: &[&str] = &["cleaner", "polish", "cleaning", "detergent"];
const CLEANER_CATEGORY: &[&str] = &[
    "cleaner",
    "polish",
    "cleaning supplies",
    "maintenance",
    "care products",
];

const ACCESSORY_TITLE: &[&str] = &[
    "accessory",
    "accessories",
    "part",
    "replacement",
    "spare",
    "adapter",
    "cable",
    "cord",
];

const MEASURING_TITLE: &[&str] = &[
    "meter",
    "thermometer",
    "sensor",
    "tester",
    "gauge",
    "detector",
];
const MEASURING_CATEGORY: &[&str] = &["meters", "sensors", "measuring tools", "test equipment"];

const STORAGE_TITLE: &[&str] = &[
    "storage",
    "organizer",
    "holder",
    "rack",
    "stand",
    "case",
    "box",
];
const STORAGE_CATEGORY: &[&str] = &["storage", "organizers", "holders", "racks"];

const BAG_TITLE: &[&str] = &["bag", "handbag", "pouch", "sack", "tote"];
const DISPOSABLE_BAG_KIND: &[&str] = &["steaming", "disposable", "trash", "garbage"];

const CASE_TITLE: &[&str] = &["case", "cover", "sleeve", "skin"];
const SET_TITLE: &[&str] = &["set", "collection", "kit"];

const BABY_TITLE: &[&str] = &["baby", "infant", "toddler", "newborn"];
const BABY_CATEGORY: &[&str] = &["baby", "toddler", "infant"];
const CHILD_CATEGORY: &[&str] = &["baby", "toddler", "infant", "kids", "children"];
const ADULT_TITLE: &[&str] = &[
    "men",
    "women",
    "adult",
    "vintage",
    "professional",
    "evening",
    "cocktail",
    "gown",
    "tuxedo",
];

const SWIM_TITLE: &[&str] = &[
    "swim",
    "swimsuit",
    "swimwear",
    "swimming",
    "beach",
    "pool",
    "bikini",
    "bathing",
];
const ACTIVE_TITLE: &[&str] = &[
    "sport",
    "sportswear",
    "athletic",
    "gym",
    "workout",
    "running",
    "training",
];
const DANCE_TITLE: &[&str] = &["dance", "dancewear", "dancing", "ballet", "tutu", "leotard"];

const UNDERWEAR_TITLE: &[&str] = &[
    "underwear",
    "panties",
    "bra",
    "lingerie",
    "briefs",
    "boxers",
    "thong",
    "camisole",
];
const UNDERWEAR_CATEGORY: &[&str] = &[
    "lingerie",
    "underwear",
    "underpants",
    "bras",
    "panties",
    "briefs",
];

const OUTDOOR_TITLE: &[&str] = &[
    "outdoor",
    "patio",
    "garden",
    "deck",
    "weatherproof",
    "weather-resistant",
    "all-weather",
];

const THERAPEUTIC_OIL: &[&str] = &[
    "essential oil",
    "aromatherapy",
    "diffuser oil",
    "massage oil",
    "carrier oil",
    "therapeutic oil",
];
const THERAPEUTIC_HERBS: &[&str] = &[
    "lavender",
    "eucalyptus",
    "peppermint",
    "tea tree",
    "rosemary",
    "chamomile",
];
const COSMETIC_OIL: &[&str] = &["lip oil", "face oil", "hair oil", "body oil", "skin oil"];
const COOKING_OIL: &[&str] = &["cooking oil", "olive oil", "vegetable oil", "canola oil"];
const FOOD_CATEGORY: &[&str] = &["cooking oil", "food", "baking", "beverage", "edible"];
const COSMETIC_CATEGORY: &[&str] = &["lip oil", "face oil", "makeup", "cosmetic", "nail"];

const REAL_BIKE: &[&str] = &[
    "road bike",
    "mountain bike",
    "bicycle",
    "bike frame",
    "cycling",
];
const EXERCISE_BIKE: &[&str] = &["exercise bike", "stationary bike", "spin bike"];
const EXERCISE_CATEGORY: &[&str] = &[
    "exercise bike",
    "cardio machine",
    "cardio >",
    "fitness equipment",
];
const ELECTRONICS_CATEGORY: &[&str] = &["computer", "tablet", "electronics", "phone", "laptop"];
const MOTORCYCLE_TITLE: &[&str] = &["motorcycle", "motorbike", "motor bike"];
const MOTORCYCLE_CATEGORY: &[&str] = &["motorcycle", "motor vehicle", "motorbike"];

const STORAGE_FURNITURE: &[&str] = &["sideboard", "cabinet", "dresser", "armoire", "buffet"];
const SEATING_CATEGORY: &[&str] = &["chair", "table", "desk"];

const ATHLETIC_TITLE: &[&str] = &["running", "athletic", "performance", "training"];
const ADULT_WEARER: &[&str] = &["men", "women", "adult", "high-waisted"];
const KIDS_CATEGORY: &[&str] = &["boys", "girls", "kids", "children"];
const YOUNG_KIDS_CATEGORY: &[&str] = &["boys", "girls", "kids", "children", "toddler", "infant"];

const ENTERTAINMENT_TITLE: &[&str] = &["karaoke", "party", "toy", "game"];
const PRO_AUDIO_CATEGORY: &[&str] = &[
    "professional audio",
    "studio equipment",
    "sampler",
    "synthesizer",
    "musical instrument",
    "electronic musical",
];

const PLUMBING_TITLE: &[&str] = &["sink", "faucet", "toilet", "bathtub"];

const CYCLING_CATEGORY: &[&str] = &["cycling", "bicycle", "bike parts", "bikes", "road bike"];

fn baby_signal() -> Trigger {
    Trigger::words(BABY_TITLE).or(Trigger::pattern(&BABY_AGE))
}

fn adult_signal() -> Trigger {
    Trigger::words(ADULT_TITLE).or(Trigger::pattern(&ADULT_SIZE))
}

fn therapeutic_oil_signal() -> Trigger {
    Trigger::words(THERAPEUTIC_OIL)
        .or(Trigger::all_words(&["oil"]).and(Trigger::words(THERAPEUTIC_HERBS)))
        .and(Trigger::no_words(COSMETIC_OIL))
        .and(Trigger::no_words(COOKING_OIL))
}

fn road_bike_signal() -> Trigger {
    Trigger::words(REAL_BIKE).and(Trigger::no_words(EXERCISE_BIKE))
}

fn bike_frame_signal() -> Trigger {
    Trigger::words(&["bike frame", "bicycle frame", "road bike", "mountain bike"])
        .or(Trigger::all_words(&["carbon fiber", "bike"]))
        .or(Trigger::all_words(&["bike", "frame"]))
        .and(Trigger::no_words(&["exercise", "stationary", "phone case"]))
}

fn cycling_category() -> Trigger {
    Trigger::any(CYCLING_CATEGORY).and(Trigger::none(&["exercise bike", "stationary"]))
}

fn essential_oil_signal() -> Trigger {
    Trigger::words(&["essential oil"])
        .or(Trigger::all_words(&["oil", "aromatherapy"]))
        .and(Trigger::no_words(&["cooking", "olive", "lip", "face"]))
}

fn performance_underwear_signal() -> Trigger {
    Trigger::words(&["waterproof", "performance", "high-waisted"])
        .and(Trigger::words(&["brief", "underwear", "boxer"]))
        .and(Trigger::words(&["running", "athletic", "sport", "training"]))
}

fn microphone_foam_signal() -> Trigger {
    Trigger::all_words(&["microphone"]).and(Trigger::words(&["foam", "cover", "windscreen"]))
}

/// Returns the built-in rule table in evaluation order.
pub fn standard_rules() -> Vec<ContextRule> {
    vec![
        ContextRule::new(
            "maintenance-products",
            Trigger::no_words(CLEANER_TITLE),
            Trigger::any(CLEANER_CATEGORY),
            0.03,
        ),
        ContextRule::new(
            "accessory-categories",
            Trigger::no_words(ACCESSORY_TITLE),
            Trigger::any(&["accessories"]).and(Trigger::prefix("apparel & accessories").negate()),
            0.25,
        ),
        ContextRule::new(
            "replacement-parts",
            Trigger::no_words(ACCESSORY_TITLE),
            Trigger::any(&["replacement parts", "spare parts"]),
            0.15,
        ),
        ContextRule::new(
            "cable-adapters",
            Trigger::no_words(ACCESSORY_TITLE),
            Trigger::any(&["adapter", "cable", "coupler", "cord"]),
            0.1,
        ),
        ContextRule::new(
            "measuring-equipment",
            Trigger::no_words(MEASURING_TITLE),
            Trigger::any(MEASURING_CATEGORY),
            0.02,
        ),
        ContextRule::new(
            "storage-organizers",
            Trigger::no_words(STORAGE_TITLE),
            Trigger::any(STORAGE_CATEGORY).and(Trigger::none(&["with storage"])),
            0.3,
        ),
        ContextRule::new(
            "disposable-bags",
            Trigger::no_words(BAG_TITLE),
            Trigger::all(&["bags"]).and(Trigger::any(DISPOSABLE_BAG_KIND)),
            0.08,
        ),
        ContextRule::new(
            "cases-covers",
            Trigger::no_words(CASE_TITLE),
            Trigger::any(&["cases", "covers"]),
            0.35,
        ),
        ContextRule::new(
            "sets-collections",
            Trigger::no_words(SET_TITLE),
            Trigger::all(&["sets"]).and(Trigger::none(&["headsets"])),
            0.5,
        ),
        ContextRule::new(
            "baby-categories",
            baby_signal().negate(),
            Trigger::any(BABY_CATEGORY),
            0.005,
        ),
        ContextRule::new(
            "baby-title-adult-category",
            baby_signal().and(adult_signal().negate()),
            Trigger::none(CHILD_CATEGORY),
            0.4,
        ),
        ContextRule::new(
            "swimwear",
            Trigger::no_words(SWIM_TITLE),
            Trigger::any(&["swimwear"]),
            0.1,
        ),
        ContextRule::new(
            "activewear",
            Trigger::no_words(ACTIVE_TITLE),
            Trigger::any(&["activewear"]),
            0.3,
        ),
        ContextRule::new(
            "dancewear",
            Trigger::no_words(DANCE_TITLE),
            Trigger::any(&["dance", "costume"]),
            0.2,
        ),
        ContextRule::new(
            "underwear",
            Trigger::no_words(UNDERWEAR_TITLE),
            Trigger::any(UNDERWEAR_CATEGORY),
            0.001,
        ),
        ContextRule::new(
            "outdoor",
            Trigger::no_words(OUTDOOR_TITLE),
            Trigger::any(&["outdoor"]),
            0.3,
        ),
        ContextRule::new(
            "therapeutic-oil-food",
            therapeutic_oil_signal(),
            Trigger::any(FOOD_CATEGORY),
            0.001,
        ),
        ContextRule::new(
            "therapeutic-oil-cosmetic",
            therapeutic_oil_signal(),
            Trigger::any(COSMETIC_CATEGORY),
            0.001,
        ),
        ContextRule::new(
            "road-bike-exercise",
            road_bike_signal(),
            Trigger::any(EXERCISE_CATEGORY),
            0.001,
        ),
        ContextRule::new(
            "road-bike-electronics",
            road_bike_signal(),
            Trigger::any(ELECTRONICS_CATEGORY),
            0.0001,
        ),
        ContextRule::new(
            "furniture-storage-seating",
            Trigger::words(STORAGE_FURNITURE),
            Trigger::any(SEATING_CATEGORY),
            0.1,
        ),
        ContextRule::new(
            "adult-athletic-kids",
            Trigger::words(ATHLETIC_TITLE).and(Trigger::words(ADULT_WEARER)),
            Trigger::any(KIDS_CATEGORY),
            0.001,
        ),
        ContextRule::new(
            "adult-underwear-kids",
            Trigger::words(&["waterproof", "high-waisted", "performance", "athletic"])
                .and(Trigger::words(&["brief", "underwear", "boxer", "short"]))
                .and(Trigger::words(&["running", "training", "sport"])),
            Trigger::any(YOUNG_KIDS_CATEGORY),
            0.000_01,
        ),
        ContextRule::new(
            "entertainment-audio",
            Trigger::words(ENTERTAINMENT_TITLE),
            Trigger::any(PRO_AUDIO_CATEGORY),
            0.001,
        ),
        ContextRule::new(
            "bicycle-motorcycle",
            Trigger::words(REAL_BIKE).and(Trigger::no_words(MOTORCYCLE_TITLE)),
            Trigger::any(MOTORCYCLE_CATEGORY),
            0.001,
        ),
        ContextRule::new(
            "plumbing-appliance",
            Trigger::words(PLUMBING_TITLE),
            Trigger::all(&["appliance"]).and(Trigger::none(&["plumbing"])),
            0.2,
        ),
        ContextRule::new(
            "strict-bike-frame-elsewhere",
            bike_frame_signal(),
            cycling_category().negate(),
            NEAR_ZERO,
        ),
        ContextRule::new(
            "strict-bike-frame-cycling",
            bike_frame_signal(),
            cycling_category(),
            100.0,
        ),
        ContextRule::new(
            "strict-essential-oil-food",
            essential_oil_signal(),
            Trigger::any(&["food", "cooking", "baking", "beverage", "edible", "tobacco"]),
            NEAR_ZERO,
        ),
        ContextRule::new(
            "strict-essential-oil-cosmetic",
            essential_oil_signal(),
            Trigger::any(&[
                "makeup",
                "cosmetic",
                "lip",
                "nail",
                "face oil",
                "hair oil",
                "skin care",
            ]),
            NEAR_ZERO,
        ),
        ContextRule::new(
            "strict-performance-underwear-kids",
            performance_underwear_signal(),
            Trigger::any(&[
                "boys", "girls", "kids", "children", "toddler", "infant", "baby",
            ]),
            NEAR_ZERO,
        ),
        ContextRule::new(
            "strict-performance-underwear-adult",
            performance_underwear_signal(),
            Trigger::any(&["men", "women"]).and(Trigger::any(&["underwear", "undergarment"])),
            10.0,
        ),
        ContextRule::new(
            "strict-microphone-foam-fitness",
            microphone_foam_signal(),
            Trigger::any(&["sporting", "fitness", "exercise", "foam roller", "yoga", "gym"]),
            NEAR_ZERO,
        ),
        ContextRule::new(
            "strict-microphone-foam-audio",
            microphone_foam_signal(),
            Trigger::any(&["audio", "microphone", "electronics"]),
            10.0,
        ),
    ]
}
