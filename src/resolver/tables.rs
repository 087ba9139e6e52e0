//! Built-in region and country reference tables for the IMF dataset.

use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;

/// Region name → member codes. Codes may name country-group aggregates.
const REGION_CODES: &[(&str, &[&str])] = &[
    (
        "Africa",
        &[
            "EGY", "ETH", "GHA", "KEN", "LBY", "MUS", "MAR", "NGA", "SOM", "ZAF", "SDN", "TZA",
            "UGA", "ZWE",
        ],
    ),
    (
        "Americas",
        &[
            "ARG", "BRA", "CAN", "CHL", "COL", "ECU", "GUY", "JAM", "MEX", "PER", "URY", "VEN",
            "LAM",
        ],
    ),
    (
        "Asia",
        &[
            "AFG", "BGD", "BTN", "CHN", "HKG", "IND", "IDN", "JPN", "KOR", "MYS", "MMR", "NPL",
            "PAK", "PHL", "SGP", "THA", "VNM",
        ],
    ),
    ("Australasia", &["AUS", "NZL"]),
    (
        "Europe",
        &[
            "AUT", "BEL", "BGR", "HRV", "CYP", "CZE", "DNK", "EST", "FIN", "FRA", "DEU", "GRC",
            "HUN", "ISL", "IRL", "ITA", "LVA", "LTU", "LUX", "MLT", "NLD", "NOR", "POL", "PRT",
            "ROU", "RUS", "SVK", "SVN", "ESP", "SWE", "CHE", "TUR", "UKR", "GBR",
        ],
    ),
    (
        "Country Groups",
        &[
            "ADE", "AEN", "EMA", "EME", "EUR", "EUU", "G7C", "LAM", "MEA", "OAE", "WLD",
        ],
    ),
];

/// Country display name → code. Several names may share a code.
const COUNTRY_CODES: &[(&str, &str)] = &[
    // Africa
    ("Egypt", "EGY"),
    ("Ethiopia", "ETH"),
    ("Ghana", "GHA"),
    ("Kenya", "KEN"),
    ("Libya", "LBY"),
    ("Mauritius", "MUS"),
    ("Morocco", "MAR"),
    ("Nigeria", "NGA"),
    ("Somalia", "SOM"),
    ("South Africa", "ZAF"),
    ("Sudan", "SDN"),
    ("Tanzania", "TZA"),
    ("Uganda", "UGA"),
    ("Zimbabwe", "ZWE"),
    // Americas
    ("Argentina", "ARG"),
    ("Brazil", "BRA"),
    ("Canada", "CAN"),
    ("Chile", "CHL"),
    ("Colombia", "COL"),
    ("Mexico", "MEX"),
    ("United States", "USA"),
    // Asia
    ("Bangladesh", "BGD"),
    ("China", "CHN"),
    ("Hong Kong", "HKG"),
    ("India", "IND"),
    ("Indonesia", "IDN"),
    ("Japan", "JPN"),
    ("Korea", "KOR"),
    ("Malaysia", "MYS"),
    ("Pakistan", "PAK"),
    ("Philippines", "PHL"),
    ("Singapore", "SGP"),
    ("Thailand", "THA"),
    ("Vietnam", "VNM"),
    // Australasia
    ("Australia", "AUS"),
    ("New Zealand", "NZL"),
    // Europe
    ("Austria", "AUT"),
    ("Belgium", "BEL"),
    ("Bulgaria", "BGR"),
    ("Croatia", "HRV"),
    ("Cyprus", "CYP"),
    ("Czech Republic", "CZE"),
    ("Czechia", "CZE"),
    ("Denmark", "DNK"),
    ("Estonia", "EST"),
    ("Finland", "FIN"),
    ("France", "FRA"),
    ("Germany", "DEU"),
    ("Greece", "GRC"),
    ("Hungary", "HUN"),
    ("Iceland", "ISL"),
    ("Ireland", "IRL"),
    ("Italy", "ITA"),
    ("Latvia", "LVA"),
    ("Lithuania", "LTU"),
    ("Luxembourg", "LUX"),
    ("Malta", "MLT"),
    ("Netherlands", "NLD"),
    ("Norway", "NOR"),
    ("Poland", "POL"),
    ("Portugal", "PRT"),
    ("Romania", "ROU"),
    ("Russian Federation", "RUS"),
    ("Slovak Republic", "SVK"),
    ("Slovenia", "SVN"),
    ("Spain", "ESP"),
    ("Sweden", "SWE"),
    ("Switzerland", "CHE"),
    ("Turkey", "TUR"),
    ("Ukraine", "UKR"),
    ("United Kingdom", "GBR"),
];

pub(super) static BUILTIN_REGIONS: Lazy<IndexMap<String, IndexSet<String>>> = Lazy::new(|| {
    REGION_CODES
        .iter()
        .map(|(region, codes)| {
            (
                (*region).to_string(),
                codes.iter().map(|c| (*c).to_string()).collect(),
            )
        })
        .collect()
});

pub(super) static BUILTIN_COUNTRIES: Lazy<IndexMap<String, String>> = Lazy::new(|| {
    COUNTRY_CODES
        .iter()
        .map(|(name, code)| ((*name).to_string(), (*code).to_string()))
        .collect()
});
