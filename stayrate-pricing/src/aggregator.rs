use stayrate_core::{
    ExtrasBreakdown, NightPrice, PriceQuote, PromotionBenefit, RoomType, StayQuoteRequest,
};
use stayrate_shared::Cents;

/// Sum resolved nightly prices, apply the promotion benefit adjustment and
/// the requested extras, and assemble the final quote.
///
/// Breakfast is charged per person per night; extra bed and baby cot are
/// flat one-time charges. Benefit adjustments only ever touch the room
/// subtotal, never the extras. Currency conversion is not done here; the
/// aggregator is currency-agnostic and never guesses a rate.
pub fn aggregate(
    request: &StayQuoteRequest,
    room_type: &RoomType,
    nights: Vec<NightPrice>,
    benefit: Option<&PromotionBenefit>,
    currency: &str,
) -> PriceQuote {
    let night_count = nights.len() as i64;
    let room_subtotal_cents: Cents = nights.iter().map(|n| n.nightly_cents).sum();
    let benefit_discount_cents = benefit_discount(benefit, &nights, room_subtotal_cents);

    let rates = &room_type.extras;
    let breakfast_cents = if request.breakfast {
        let per_night = request.adults as i64 * rates.breakfast_adult_cents
            + request.children as i64 * rates.breakfast_child_cents
            + request.infants as i64 * rates.breakfast_infant_cents;
        per_night * night_count
    } else {
        0
    };
    let extra_bed_cents = if request.extra_bed {
        rates.extra_bed_cents
    } else {
        0
    };
    let baby_cot_cents = if request.baby_cot {
        rates.baby_cot_cents
    } else {
        0
    };

    let extras = ExtrasBreakdown {
        breakfast_cents,
        extra_bed_cents,
        baby_cot_cents,
        total_cents: breakfast_cents + extra_bed_cents + baby_cot_cents,
    };

    let promotion_code = nights.iter().find_map(|n| n.promotion_code.clone());

    PriceQuote {
        room_type_id: request.room_type_id,
        check_in: request.check_in,
        check_out: request.check_out,
        nights,
        promotion_code,
        room_subtotal_cents,
        benefit_discount_cents,
        extras,
        grand_total_cents: room_subtotal_cents - benefit_discount_cents + extras.total_cents,
        currency: currency.to_string(),
    }
}

/// Exhaustive over the closed benefit set. `RateOverride` promotions carry
/// their benefit entirely in the daily rates already summed.
fn benefit_discount(
    benefit: Option<&PromotionBenefit>,
    nights: &[NightPrice],
    room_subtotal_cents: Cents,
) -> Cents {
    match benefit {
        None | Some(PromotionBenefit::RateOverride) => 0,
        Some(PromotionBenefit::DiscountPercent { percent }) => {
            (room_subtotal_cents as f64 * percent / 100.0).round() as Cents
        }
        Some(PromotionBenefit::FixedDiscount { amount_cents }) => {
            (*amount_cents).min(room_subtotal_cents)
        }
        Some(PromotionBenefit::FreeNights { nights: free }) => {
            let mut nightly: Vec<Cents> = nights.iter().map(|n| n.nightly_cents).collect();
            nightly.sort_unstable();
            nightly.iter().take(*free as usize).sum()
        }
    }
}
