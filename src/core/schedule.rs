//! Static per-jurisdiction fee schedules.
//!
//! Amounts are integer cents. Shipping provinces are AB, BC and SK; the
//! remaining codes are placeholders kept disabled until their tables land.
//!
//! Display brackets: small is <= 30", large is > 30" and < 46", xlarge is
//! >= 46". All-in-one devices default to the small display tier unless the
//! product also carries a size tag.

use crate::core::category::CanonicalCategory::{self, *};
use crate::core::jurisdiction::JurisdictionCode;
use crate::core::money::Cents;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSchedule {
    pub enabled: bool,
    pub label: &'static str,
    pub fee_by_category: &'static [(CanonicalCategory, Cents)],
}

impl FeeSchedule {
    /// Missing categories are not applicable and cost nothing.
    pub fn fee_for(&self, category: CanonicalCategory) -> Cents {
        self.fee_by_category
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, fee)| *fee)
            .unwrap_or(0)
    }

    const fn disabled(label: &'static str) -> Self {
        Self {
            enabled: false,
            label,
            fee_by_category: &[],
        }
    }
}

static AB_SCHEDULE: FeeSchedule = FeeSchedule {
    enabled: true,
    label: "AB Environmental Fee",
    fee_by_category: &[
        (Computers, 45),
        (Laptops, 30),
        (Printers, 165),
        (Peripherals, 0),
        (Av, 55),
        (Cellphones, 0),
        (DisplaySmall, 130),
        (DisplayLarge, 130),
        (DisplayXlarge, 275),
        (AllInOne, 130),
        (SmallAppliances, 40),
        (Tools, 65),
    ],
};

static BC_SCHEDULE: FeeSchedule = FeeSchedule {
    enabled: true,
    label: "BC Environmental Fee",
    fee_by_category: &[
        (Computers, 70),
        (Laptops, 45),
        (Printers, 650),
        (Peripherals, 35),
        (Av, 280),
        (Cellphones, 20),
        (DisplaySmall, 350),
        (DisplayLarge, 450),
        (DisplayXlarge, 775),
        (AllInOne, 350),
        (SmallAppliances, 0),
        (Tools, 0),
    ],
};

// Values from the Jan 5, 2026 SK schedule. Display brackets there are
// <=29", 30-45" and >=46" with AIOs included.
static SK_SCHEDULE: FeeSchedule = FeeSchedule {
    enabled: true,
    label: "SK Environmental Fee",
    fee_by_category: &[
        (Computers, 80),
        (Laptops, 45),
        (Printers, 450),
        (Peripherals, 20),
        (Av, 125),
        (Cellphones, 0),
        (DisplaySmall, 180),
        (DisplayLarge, 310),
        (DisplayXlarge, 700),
        (AllInOne, 180),
        (SmallAppliances, 0),
        (Tools, 0),
    ],
};

static MB_SCHEDULE: FeeSchedule = FeeSchedule::disabled("MB Environmental Fee");
static ON_SCHEDULE: FeeSchedule = FeeSchedule::disabled("ON Environmental Fee");
static QC_SCHEDULE: FeeSchedule = FeeSchedule::disabled("QC Environmental Fee");
static NS_SCHEDULE: FeeSchedule = FeeSchedule::disabled("NS Environmental Fee");
static NB_SCHEDULE: FeeSchedule = FeeSchedule::disabled("NB Environmental Fee");
static NL_SCHEDULE: FeeSchedule = FeeSchedule::disabled("NL Environmental Fee");
static PE_SCHEDULE: FeeSchedule = FeeSchedule::disabled("PE Environmental Fee");
static NT_SCHEDULE: FeeSchedule = FeeSchedule::disabled("NT Environmental Fee");
static NU_SCHEDULE: FeeSchedule = FeeSchedule::disabled("NU Environmental Fee");
static YT_SCHEDULE: FeeSchedule = FeeSchedule::disabled("YT Environmental Fee");

/// Total over the enum; adding a code without a schedule does not compile.
pub fn lookup(code: JurisdictionCode) -> &'static FeeSchedule {
    match code {
        JurisdictionCode::AB => &AB_SCHEDULE,
        JurisdictionCode::BC => &BC_SCHEDULE,
        JurisdictionCode::SK => &SK_SCHEDULE,
        JurisdictionCode::MB => &MB_SCHEDULE,
        JurisdictionCode::ON => &ON_SCHEDULE,
        JurisdictionCode::QC => &QC_SCHEDULE,
        JurisdictionCode::NS => &NS_SCHEDULE,
        JurisdictionCode::NB => &NB_SCHEDULE,
        JurisdictionCode::NL => &NL_SCHEDULE,
        JurisdictionCode::PE => &PE_SCHEDULE,
        JurisdictionCode::NT => &NT_SCHEDULE,
        JurisdictionCode::NU => &NU_SCHEDULE,
        JurisdictionCode::YT => &YT_SCHEDULE,
    }
}
