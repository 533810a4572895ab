//! Future value of a lump sum plus a level contribution stream
//!
//! Uses the standard annuity sign convention: money paid in is positive,
//! the resulting future value is negative. Callers negate for display.

/// When each periodic contribution is posted within its period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentTiming {
    /// Ordinary annuity, contribution posted after the period's growth
    #[default]
    End,
    /// Annuity-due, contribution posted before the period's growth
    Begin,
}

impl PaymentTiming {
    fn factor(self) -> f64 {
        match self {
            PaymentTiming::End => 0.0,
            PaymentTiming::Begin => 1.0,
        }
    }
}

/// Future value of `present_value` plus `periods` payments of `payment`
/// compounding at the periodic `rate`.
///
/// # Arguments
/// * `rate` - Periodic rate (annual / 12 for monthly contributions)
/// * `periods` - Number of compounding periods
/// * `payment` - Contribution per period
/// * `present_value` - Initial lump sum
/// * `when` - Whether contributions land at the start or end of each period
///
/// Non-finite inputs propagate into the result.
pub fn future_value(
    rate: f64,
    periods: u32,
    payment: f64,
    present_value: f64,
    when: PaymentTiming,
) -> f64 {
    let n = periods as f64;

    if rate == 0.0 {
        return -(present_value + payment * n);
    }

    let growth = (1.0 + rate).powf(n);
    let annuity = payment * (1.0 + rate * when.factor()) * ((growth - 1.0) / rate);

    -(present_value * growth + annuity)
}

/// Monthly-compounded future value of an annual rate over whole years,
/// contributions at month end.
pub fn monthly_future_value(
    annual_rate: f64,
    years: u32,
    monthly_contribution: f64,
    lump_sum: f64,
) -> f64 {
    future_value(
        annual_rate / 12.0,
        years * 12,
        monthly_contribution,
        lump_sum,
        PaymentTiming::End,
    )
}

/// Round a currency amount to cents
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
