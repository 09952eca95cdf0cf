use super::types::{AssumptionField, Assumptions};

pub const CONVERSION_RATE_MIN: f64 = 0.0001;
pub const CONVERSION_RATE_MAX: f64 = 0.01;
/// Slider steps per unit of conversion rate (step = 0.0001).
const CONVERSION_STEPS_PER_UNIT: f64 = 10_000.0;
pub const MIN_FRACTION: f64 = 0.01;

/// Reads the leading integer of `raw` the way a browser number field does:
/// surrounding whitespace is skipped, a sign is allowed, and anything after
/// the digits (a fractional part, units, junk) is ignored.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_fraction(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn price_from(raw: &str) -> f64 {
    parse_leading_int(raw).unwrap_or(0).max(0) as f64
}

fn count_from(raw: &str) -> i64 {
    parse_leading_int(raw).unwrap_or(1).max(1)
}

fn whole_percent_from(raw: &str) -> f64 {
    let fraction = parse_leading_int(raw)
        .filter(|v| *v != 0)
        .map(|v| v as f64 / 100.0)
        .unwrap_or(MIN_FRACTION);
    clamp_fraction(fraction)
}

fn clamp_fraction(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_FRACTION;
    }
    value.clamp(MIN_FRACTION, 1.0)
}

fn clamp_conversion_rate(value: f64) -> f64 {
    if value.is_nan() {
        return CONVERSION_RATE_MIN;
    }
    let snapped = (value * CONVERSION_STEPS_PER_UNIT).round() / CONVERSION_STEPS_PER_UNIT;
    snapped.clamp(CONVERSION_RATE_MIN, CONVERSION_RATE_MAX)
}

fn clamp_ratio(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

fn to_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

impl Assumptions {
    /// Sets one field from raw control text, clamping instead of rejecting.
    pub fn apply(&mut self, field: AssumptionField, raw: &str) {
        match field {
            AssumptionField::MonthlyPrice => self.monthly_price = price_from(raw),
            AssumptionField::YearlyPrice => self.yearly_price = price_from(raw),
            AssumptionField::ConversionRate => {
                self.conversion_rate =
                    clamp_conversion_rate(parse_fraction(raw).unwrap_or(CONVERSION_RATE_MIN));
            }
            AssumptionField::ProfitMargin => self.profit_margin = whole_percent_from(raw),
            AssumptionField::RetentionMonths => self.retention_months = to_u32(count_from(raw)),
            AssumptionField::YearlyRetentionYears => {
                self.yearly_retention_years = to_u32(count_from(raw));
            }
            AssumptionField::YearlyRatio => {
                // Slider position in whole percent.
                let pct = parse_fraction(raw).unwrap_or(0.0).clamp(0.0, 100.0).round();
                self.yearly_ratio = pct / 100.0;
            }
            AssumptionField::Impressions => self.impressions = to_u64(count_from(raw)),
            AssumptionField::AppStoreCut => self.app_store_cut = whole_percent_from(raw),
        }
    }

    /// Re-applies every range clamp to an already typed record.
    pub fn clamped(self) -> Self {
        let non_negative = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            monthly_price: non_negative(self.monthly_price),
            yearly_price: non_negative(self.yearly_price),
            conversion_rate: clamp_conversion_rate(self.conversion_rate),
            profit_margin: clamp_fraction(self.profit_margin),
            retention_months: self.retention_months.max(1),
            yearly_retention_years: self.yearly_retention_years.max(1),
            yearly_ratio: clamp_ratio(self.yearly_ratio),
            impressions: self.impressions.max(1),
            app_store_cut: clamp_fraction(self.app_store_cut),
        }
    }

    /// Value shown in the control for `field`, in the units the control edits.
    pub fn control_value(&self, field: AssumptionField) -> String {
        match field {
            AssumptionField::MonthlyPrice => format!("{}", self.monthly_price),
            AssumptionField::YearlyPrice => format!("{}", self.yearly_price),
            AssumptionField::ConversionRate => format!("{}", self.conversion_rate),
            AssumptionField::ProfitMargin => format!("{}", (self.profit_margin * 100.0).round()),
            AssumptionField::RetentionMonths => self.retention_months.to_string(),
            AssumptionField::YearlyRetentionYears => self.yearly_retention_years.to_string(),
            AssumptionField::YearlyRatio => format!("{}", (self.yearly_ratio * 100.0).round()),
            AssumptionField::Impressions => self.impressions.to_string(),
            AssumptionField::AppStoreCut => format!("{}", (self.app_store_cut * 100.0).round()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{any, prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn applied(field: AssumptionField, raw: &str) -> Assumptions {
        let mut assumptions = Assumptions::default();
        assumptions.apply(field, raw);
        assumptions
    }

    #[test]
    fn parse_leading_int_reads_integer_prefix() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  7 "), Some(7));
        assert_eq!(parse_leading_int("3.9"), Some(3));
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("1e3"), Some(1));
        assert_eq!(parse_leading_int("-5"), Some(-5));
        assert_eq!(parse_leading_int("+8"), Some(8));
    }

    #[test]
    fn parse_leading_int_rejects_text_without_digits() {
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(".5"), None);
    }

    #[test]
    fn impressions_zero_or_garbage_clamps_to_one() {
        assert_eq!(applied(AssumptionField::Impressions, "0").impressions, 1);
        assert_eq!(applied(AssumptionField::Impressions, "lots").impressions, 1);
        assert_eq!(applied(AssumptionField::Impressions, "-30").impressions, 1);
        assert_eq!(applied(AssumptionField::Impressions, "2500").impressions, 2500);
    }

    #[test]
    fn prices_fall_back_to_zero() {
        assert_approx(applied(AssumptionField::MonthlyPrice, "").monthly_price, 0.0);
        assert_approx(applied(AssumptionField::YearlyPrice, "-10").yearly_price, 0.0);
        assert_approx(applied(AssumptionField::YearlyPrice, "49.99").yearly_price, 49.0);
    }

    #[test]
    fn retention_lengths_are_at_least_one() {
        let a = applied(AssumptionField::RetentionMonths, "0");
        assert_eq!(a.retention_months, 1);
        let a = applied(AssumptionField::YearlyRetentionYears, "x");
        assert_eq!(a.yearly_retention_years, 1);
        let a = applied(AssumptionField::RetentionMonths, "18");
        assert_eq!(a.retention_months, 18);
    }

    #[test]
    fn percent_fields_floor_at_one_percent() {
        assert_approx(applied(AssumptionField::ProfitMargin, "0").profit_margin, 0.01);
        assert_approx(applied(AssumptionField::ProfitMargin, "").profit_margin, 0.01);
        assert_approx(applied(AssumptionField::AppStoreCut, "-20").app_store_cut, 0.01);
        assert_approx(applied(AssumptionField::AppStoreCut, "15").app_store_cut, 0.15);
        assert_approx(applied(AssumptionField::ProfitMargin, "250").profit_margin, 1.0);
    }

    #[test]
    fn conversion_rate_snaps_to_slider_range() {
        assert_approx(
            applied(AssumptionField::ConversionRate, "0.00123").conversion_rate,
            0.0012,
        );
        assert_approx(
            applied(AssumptionField::ConversionRate, "0.5").conversion_rate,
            CONVERSION_RATE_MAX,
        );
        assert_approx(
            applied(AssumptionField::ConversionRate, "0").conversion_rate,
            CONVERSION_RATE_MIN,
        );
        assert_approx(
            applied(AssumptionField::ConversionRate, "nope").conversion_rate,
            CONVERSION_RATE_MIN,
        );
    }

    #[test]
    fn yearly_ratio_is_read_as_whole_percent() {
        assert_approx(applied(AssumptionField::YearlyRatio, "45").yearly_ratio, 0.45);
        assert_approx(applied(AssumptionField::YearlyRatio, "45.6").yearly_ratio, 0.46);
        assert_approx(applied(AssumptionField::YearlyRatio, "140").yearly_ratio, 1.0);
        assert_approx(applied(AssumptionField::YearlyRatio, "?").yearly_ratio, 0.0);
    }

    #[test]
    fn apply_only_touches_the_named_field() {
        let before = Assumptions::default();
        let after = applied(AssumptionField::Impressions, "5000");
        assert_eq!(
            Assumptions {
                impressions: before.impressions,
                ..after
            },
            before
        );
    }

    #[test]
    fn clamped_repairs_out_of_range_values() {
        let wild = Assumptions {
            monthly_price: -3.0,
            yearly_price: f64::NAN,
            conversion_rate: 2.0,
            profit_margin: 0.0,
            retention_months: 0,
            yearly_retention_years: 0,
            yearly_ratio: -0.5,
            impressions: 0,
            app_store_cut: 7.0,
        };
        let fixed = wild.clamped();
        assert_approx(fixed.monthly_price, 0.0);
        assert_approx(fixed.yearly_price, 0.0);
        assert_approx(fixed.conversion_rate, CONVERSION_RATE_MAX);
        assert_approx(fixed.profit_margin, 0.01);
        assert_eq!(fixed.retention_months, 1);
        assert_eq!(fixed.yearly_retention_years, 1);
        assert_approx(fixed.yearly_ratio, 0.0);
        assert_eq!(fixed.impressions, 1);
        assert_approx(fixed.app_store_cut, 1.0);
    }

    #[test]
    fn control_values_round_trip_through_apply() {
        let original = Assumptions::default();
        for field in AssumptionField::ALL {
            let mut copy = original;
            copy.apply(field, &original.control_value(field));
            assert_eq!(copy, original, "field {}", field.key());
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(128))]

        #[test]
        fn prop_applied_text_always_lands_in_range(raw in any::<String>()) {
            for field in AssumptionField::ALL {
                let mut assumptions = Assumptions::default();
                assumptions.apply(field, &raw);
                prop_assert!(assumptions.monthly_price >= 0.0);
                prop_assert!(assumptions.yearly_price >= 0.0);
                prop_assert!(assumptions.conversion_rate >= CONVERSION_RATE_MIN);
                prop_assert!(assumptions.conversion_rate <= CONVERSION_RATE_MAX);
                prop_assert!(assumptions.profit_margin >= MIN_FRACTION && assumptions.profit_margin <= 1.0);
                prop_assert!(assumptions.app_store_cut >= MIN_FRACTION && assumptions.app_store_cut <= 1.0);
                prop_assert!((0.0..=1.0).contains(&assumptions.yearly_ratio));
                prop_assert!(assumptions.retention_months >= 1);
                prop_assert!(assumptions.yearly_retention_years >= 1);
                prop_assert!(assumptions.impressions >= 1);
            }
        }

        #[test]
        fn prop_clamped_is_idempotent(
            monthly_price in -1_000.0f64..1_000.0,
            conversion_rate in -1.0f64..1.0,
            margin in -2.0f64..2.0,
            ratio in -2.0f64..2.0,
            impressions in 0u64..1_000_000,
            retention in 0u32..100
        ) {
            let once = Assumptions {
                monthly_price,
                conversion_rate,
                profit_margin: margin,
                yearly_ratio: ratio,
                impressions,
                retention_months: retention,
                ..Assumptions::default()
            }
            .clamped();
            prop_assert_eq!(once.clamped(), once);
        }
    }
}
