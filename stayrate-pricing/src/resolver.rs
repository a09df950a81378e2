use std::collections::HashMap;

use stayrate_core::{NightPrice, QuoteError, RateSource};
use stayrate_shared::{Cents, StayRange};
use uuid::Uuid;

use crate::calendar::SeasonCalendar;
use crate::matcher::CandidatePromotion;

/// Resolve a nightly price for every night of the stay, in order:
/// promotion daily rate, then season rate, else the night is unresolved.
/// Any unresolved night fails the whole quote; a silently-missing night
/// would otherwise be billed as zero.
///
/// `season_rates` maps season id to the nightly price for the quoted room
/// type. Minimum-nights constraints on the used daily rates apply to the
/// total night count of the stay.
pub fn resolve_nights(
    stay: &StayRange,
    selected: Option<&CandidatePromotion>,
    calendar: &SeasonCalendar,
    season_rates: &HashMap<Uuid, Cents>,
) -> Result<Vec<NightPrice>, QuoteError> {
    let mut nights = Vec::with_capacity(stay.nights() as usize);
    let mut missing = Vec::new();
    let mut min_nights_required: Option<i64> = None;

    for date in stay.iter_nights() {
        if let Some(candidate) = selected {
            if let Some(rate) = candidate.rates.get(&date) {
                if let Some(min) = rate.min_nights {
                    min_nights_required = Some(min_nights_required.map_or(min, |m| m.max(min)));
                }
                nights.push(NightPrice {
                    date,
                    nightly_cents: rate.nightly_cents,
                    source: RateSource::Promotion,
                    promotion_code: Some(candidate.promotion.code.clone()),
                });
                continue;
            }
        }

        let season_rate = calendar
            .season_for(date)
            .and_then(|season| season_rates.get(&season.id));
        match season_rate {
            Some(nightly_cents) => nights.push(NightPrice {
                date,
                nightly_cents: *nightly_cents,
                source: RateSource::Season,
                promotion_code: None,
            }),
            None => missing.push(date),
        }
    }

    if !missing.is_empty() {
        return Err(QuoteError::IncompleteRateCoverage {
            missing_dates: missing,
        });
    }

    if let Some(required) = min_nights_required {
        if stay.nights() < required {
            return Err(QuoteError::MinNightsNotMet {
                required,
                stay_nights: stay.nights(),
            });
        }
    }

    Ok(nights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stayrate_core::{Promotion, PromotionBenefit, PromotionDailyRate, Season};

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn stay() -> StayRange {
        StayRange::new(d("2026-01-05"), d("2026-01-07")).unwrap()
    }

    fn winter_calendar() -> (SeasonCalendar, Uuid) {
        let season_id = Uuid::new_v4();
        let calendar = SeasonCalendar::try_new(vec![Season {
            id: season_id,
            hotel_id: Uuid::nil(),
            label: "off-peak".into(),
            start_date: d("2026-01-01"),
            end_date: d("2026-02-28"),
        }])
        .unwrap();
        (calendar, season_id)
    }

    fn candidate(dates_and_prices: &[(&str, i64)], min_nights: Option<i64>) -> CandidatePromotion {
        let promotion = Promotion {
            id: Uuid::new_v4(),
            hotel_id: Uuid::nil(),
            code: "EARLYWINTER2025".into(),
            name: "Early winter".into(),
            booking_start: d("2025-11-01"),
            booking_end: d("2025-12-31"),
            stay_start: d("2026-01-01"),
            stay_end: d("2026-01-31"),
            is_active: true,
            benefit: PromotionBenefit::RateOverride,
        };
        let rates = dates_and_prices
            .iter()
            .map(|(date, price)| PromotionDailyRate {
                promotion_id: promotion.id,
                room_type_id: Uuid::nil(),
                stay_date: d(date),
                nightly_cents: *price,
                min_nights,
            })
            .collect();
        CandidatePromotion::new(promotion, rates)
    }

    #[test]
    fn promotion_rate_overrides_season_rate() {
        let (calendar, season_id) = winter_calendar();
        let season_rates = HashMap::from([(season_id, 8_000)]);
        let candidate = candidate(&[("2026-01-05", 10_000), ("2026-01-06", 11_000)], None);

        let nights = resolve_nights(&stay(), Some(&candidate), &calendar, &season_rates).unwrap();
        assert_eq!(nights.len(), 2);
        assert!(nights.iter().all(|n| n.source == RateSource::Promotion));
        assert_eq!(nights[0].nightly_cents, 10_000);
        assert_eq!(nights[1].nightly_cents, 11_000);
        assert_eq!(nights[0].promotion_code.as_deref(), Some("EARLYWINTER2025"));
    }

    #[test]
    fn season_fallback_prices_every_night() {
        let (calendar, season_id) = winter_calendar();
        let season_rates = HashMap::from([(season_id, 8_000)]);

        let nights = resolve_nights(&stay(), None, &calendar, &season_rates).unwrap();
        assert!(nights.iter().all(|n| n.source == RateSource::Season));
        assert!(nights.iter().all(|n| n.nightly_cents == 8_000));
        assert!(nights.iter().all(|n| n.promotion_code.is_none()));
    }

    #[test]
    fn uncovered_night_fails_whole_quote_naming_the_date() {
        // Season ends mid-stay: 2026-01-06 has no rate from any source.
        let season_id = Uuid::new_v4();
        let calendar = SeasonCalendar::try_new(vec![Season {
            id: season_id,
            hotel_id: Uuid::nil(),
            label: "off-peak".into(),
            start_date: d("2026-01-01"),
            end_date: d("2026-01-05"),
        }])
        .unwrap();
        let season_rates = HashMap::from([(season_id, 8_000)]);

        let err = resolve_nights(&stay(), None, &calendar, &season_rates).unwrap_err();
        match err {
            QuoteError::IncompleteRateCoverage { missing_dates } => {
                assert_eq!(missing_dates, vec![d("2026-01-06")]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn season_without_rate_for_room_type_is_unresolved() {
        let (calendar, _season_id) = winter_calendar();
        let err = resolve_nights(&stay(), None, &calendar, &HashMap::new()).unwrap_err();
        match err {
            QuoteError::IncompleteRateCoverage { missing_dates } => {
                assert_eq!(missing_dates, vec![d("2026-01-05"), d("2026-01-06")]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn min_nights_applies_to_the_whole_stay() {
        let (calendar, season_id) = winter_calendar();
        let season_rates = HashMap::from([(season_id, 8_000)]);
        let candidate = candidate(&[("2026-01-05", 10_000), ("2026-01-06", 11_000)], Some(3));

        let err = resolve_nights(&stay(), Some(&candidate), &calendar, &season_rates).unwrap_err();
        assert!(matches!(
            err,
            QuoteError::MinNightsNotMet {
                required: 3,
                stay_nights: 2
            }
        ));
    }
}
