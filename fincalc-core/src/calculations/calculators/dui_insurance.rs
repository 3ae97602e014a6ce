//! Projected car insurance cost after a DUI conviction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::round_whole;
use crate::{InsuranceAssumptions, OffenseTier};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceImpact {
    pub current_annual: Decimal,
    pub offense: OffenseTier,

    /// Average increase for the tier, in percent.
    pub increase_percent: Decimal,

    pub new_annual: Decimal,

    /// Annual SR-22 filing cost.
    pub sr22_fee: Decimal,

    /// `new_annual − current_annual`.
    pub yearly_increase: Decimal,

    /// Extra cost while an SR-22 is mandated (increase plus filing fee).
    pub sr22_period_total: Decimal,

    /// Extra cost over the whole rate-impact period.
    pub impact_period_total: Decimal,

    pub total_extra_cost: Decimal,

    /// Annual premium at the low end of the tier's range.
    pub low_estimate_annual: Decimal,

    /// Annual premium at the high end of the tier's range.
    pub high_estimate_annual: Decimal,
}

/// Projects the premium increase and SR-22 cost for `offense` on a current
/// annual premium of `current_annual`.
pub fn project_insurance_impact(
    current_annual: Decimal,
    offense: OffenseTier,
    assumptions: &InsuranceAssumptions,
) -> InsuranceImpact {
    let increase = assumptions.increase_for(offense);
    debug!(
        offense = %offense,
        premium = %current_annual,
        avg_increase = %increase.avg,
        "Projecting DUI insurance impact"
    );

    let new_annual = round_whole(current_annual * (Decimal::ONE + increase.avg));
    let yearly_increase = new_annual - current_annual;
    let sr22_fee = assumptions.sr22_monthly_fee * Decimal::from(12);
    let sr22_years = Decimal::from(assumptions.sr22_years);
    let impact_years = Decimal::from(assumptions.rate_impact_years);

    let sr22_period_total = (yearly_increase + sr22_fee) * sr22_years;
    let impact_period_total = yearly_increase * impact_years + sr22_fee * sr22_years;

    InsuranceImpact {
        current_annual,
        offense,
        increase_percent: round_whole(increase.avg * Decimal::ONE_HUNDRED),
        new_annual,
        sr22_fee,
        yearly_increase,
        sr22_period_total,
        impact_period_total,
        total_extra_cost: impact_period_total,
        low_estimate_annual: round_whole(current_annual * (Decimal::ONE + increase.min)),
        high_estimate_annual: round_whole(current_annual * (Decimal::ONE + increase.max)),
    }
}
