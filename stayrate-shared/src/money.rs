/// All prices in the system are integer minor units (cents).
pub type Cents = i64;

/// Convert an amount into the settlement currency by multiplying with the
/// exchange rate supplied by the settlement module. Rounds half away from
/// zero. The quote pipeline itself never converts; this is a settlement-only
/// helper.
pub fn to_settlement(amount: Cents, exchange_rate: f64) -> Cents {
    (amount as f64 * exchange_rate).round() as Cents
}
