use std::collections::BTreeMap;

use chrono::NaiveDate;
use stayrate_core::{Promotion, PromotionDailyRate, QuoteError};
use stayrate_shared::StayRange;

/// A promotion paired with its daily-rate rows for one room type, keyed by
/// stay date.
#[derive(Debug, Clone)]
pub struct CandidatePromotion {
    pub promotion: Promotion,
    pub rates: BTreeMap<NaiveDate, PromotionDailyRate>,
}

impl CandidatePromotion {
    pub fn new(promotion: Promotion, daily_rates: Vec<PromotionDailyRate>) -> Self {
        let rates = daily_rates
            .into_iter()
            .map(|rate| (rate.stay_date, rate))
            .collect();
        Self { promotion, rates }
    }

    /// Eligibility per the promotion contract: active, bookable today, stay
    /// window fully containing the stay, and a daily-rate row for every
    /// night. Partial coverage disqualifies the promotion entirely; it is
    /// never used for a subset of nights.
    pub fn eligible_for(&self, stay: &StayRange, today: NaiveDate) -> bool {
        self.promotion.is_active
            && self.promotion.bookable_on(today)
            && self.promotion.covers_stay(stay)
            && stay.iter_nights().all(|night| self.rates.contains_key(&night))
    }
}

/// Outcome of explicit promotion selection for a quote.
#[derive(Debug, Clone)]
pub enum PromotionSelection {
    /// The caller named a promotion and it is eligible.
    Promotion(CandidatePromotion),
    /// No promotion requested; resolution falls back to season rates. The
    /// eligible list is surfaced separately, never auto-picked.
    SeasonOnly,
}

/// Filter candidates down to the eligible set, preserving input order.
pub fn eligible_promotions(
    candidates: &[CandidatePromotion],
    stay: &StayRange,
    today: NaiveDate,
) -> Vec<Promotion> {
    candidates
        .iter()
        .filter(|c| c.eligible_for(stay, today))
        .map(|c| c.promotion.clone())
        .collect()
}

/// Apply the explicit-selection contract: a requested code must be in the
/// eligible set or the quote fails; with no code, no promotion is applied.
pub fn select(
    candidates: Vec<CandidatePromotion>,
    stay: &StayRange,
    today: NaiveDate,
    requested_code: Option<&str>,
) -> Result<PromotionSelection, QuoteError> {
    let Some(code) = requested_code else {
        return Ok(PromotionSelection::SeasonOnly);
    };

    candidates
        .into_iter()
        .find(|c| c.promotion.code == code && c.eligible_for(stay, today))
        .map(PromotionSelection::Promotion)
        .ok_or_else(|| QuoteError::PromoNotApplicable {
            code: code.to_string(),
        })
}
