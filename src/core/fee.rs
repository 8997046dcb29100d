use crate::core::category::CanonicalCategory;
use crate::core::money::Cents;
use crate::core::schedule::FeeSchedule;
use crate::domain::model::CategoryFlag;

/// The fee a line owes and the category that set it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedFee {
    pub category: CanonicalCategory,
    pub cents: Cents,
}

/// Picks the highest applicable per-unit fee among the line's active flags.
///
/// Overlapping tags (a general display tag next to a size-specific one) must
/// not double-charge, so the result is the maximum, never the sum. A zero
/// amount is treated as not applicable. On ties the first matching flag is
/// reported.
pub fn select_fee(flags: &[CategoryFlag], schedule: &FeeSchedule) -> Option<AppliedFee> {
    let mut selected: Option<AppliedFee> = None;

    for flag in flags.iter().filter(|flag| flag.has_tag) {
        let Some(category) = CanonicalCategory::normalize(&flag.tag) else {
            tracing::trace!(tag = %flag.tag, "ignoring unrecognized category tag");
            continue;
        };

        let cents = schedule.fee_for(category);
        if cents > selected.map_or(0, |fee| fee.cents) {
            selected = Some(AppliedFee { category, cents });
        }
    }

    selected
}

pub fn compute_fee(flags: &[CategoryFlag], schedule: &FeeSchedule) -> Cents {
    select_fee(flags, schedule).map_or(0, |fee| fee.cents)
}
