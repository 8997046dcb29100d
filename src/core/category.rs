use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized product classification used as the key into a fee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CanonicalCategory {
    Computers,
    Laptops,
    Printers,
    Peripherals,
    Av,
    Cellphones,
    /// <= 30"
    DisplaySmall,
    /// > 30" and < 46"
    DisplayLarge,
    /// >= 46"
    DisplayXlarge,
    AllInOne,
    SmallAppliances,
    Tools,
}

impl CanonicalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalCategory::Computers => "computers",
            CanonicalCategory::Laptops => "laptops",
            CanonicalCategory::Printers => "printers",
            CanonicalCategory::Peripherals => "peripherals",
            CanonicalCategory::Av => "av",
            CanonicalCategory::Cellphones => "cellphones",
            CanonicalCategory::DisplaySmall => "display-small",
            CanonicalCategory::DisplayLarge => "display-large",
            CanonicalCategory::DisplayXlarge => "display-xlarge",
            CanonicalCategory::AllInOne => "all-in-one",
            CanonicalCategory::SmallAppliances => "small-appliances",
            CanonicalCategory::Tools => "tools",
        }
    }

    /// Maps a merchant tag name to its category. Unknown tags yield `None`.
    pub fn normalize(tag: &str) -> Option<Self> {
        TAG_ALIASES
            .iter()
            .find(|(alias, _)| *alias == tag)
            .map(|(_, category)| *category)
    }
}

impl fmt::Display for CanonicalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag name → category. Legacy monitor tags resolve to the display categories.
pub const TAG_ALIASES: &[(&str, CanonicalCategory)] = &[
    ("eco-category-computers", CanonicalCategory::Computers),
    ("eco-category-laptops", CanonicalCategory::Laptops),
    ("eco-category-printers", CanonicalCategory::Printers),
    ("eco-category-peripherals", CanonicalCategory::Peripherals),
    ("eco-category-av", CanonicalCategory::Av),
    ("eco-category-cellphones", CanonicalCategory::Cellphones),
    ("eco-category-display-small", CanonicalCategory::DisplaySmall),
    ("eco-category-display-large", CanonicalCategory::DisplayLarge),
    ("eco-category-display-xlarge", CanonicalCategory::DisplayXlarge),
    ("eco-category-all-in-one", CanonicalCategory::AllInOne),
    // legacy
    ("eco-category-monitor-small", CanonicalCategory::DisplaySmall),
    ("eco-category-monitor-large", CanonicalCategory::DisplayLarge),
    ("eco-category-monitor-xlarge", CanonicalCategory::DisplayXlarge),
    ("eco-category-small-appliances", CanonicalCategory::SmallAppliances),
    ("eco-category-tools", CanonicalCategory::Tools),
];
