//! Signal engine: EMAs, categorical rules, and the composite regime score.
//!
//! Every rule is a pure function over already-acquired inputs. Absent inputs
//! flow through as `None` and come out as an explicit missing-data category;
//! no rule ever substitutes an estimate for a missing series.

use crate::domain::{CurveSignal, Regime, RelativeSignal, Series, SignalSet, TrendSignal};

/// Last value of the exponential moving average over `values`.
///
/// Standard recursive smoothing with `α = 2/(span+1)`, seeded at the first
/// value. Only the final point is of interest downstream.
pub fn ema_last(values: &[f64], span: usize) -> Option<f64> {
    let (first, rest) = values.split_first()?;
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut ema = *first;
    for v in rest {
        ema = alpha * v + (1.0 - alpha) * ema;
    }
    Some(ema)
}

/// Slope of the VIX term structure (9d / 30d / 3m / 6m).
///
/// Strictly increasing is the healthy contango shape; strictly decreasing
/// (backwardation) is stress. Any absent point makes the whole read
/// unusable, by design.
pub fn multi_vix_signal(
    vxst: Option<f64>,
    vix: Option<f64>,
    vxv: Option<f64>,
    vxmt: Option<f64>,
) -> TrendSignal {
    let (Some(vxst), Some(vix), Some(vxv), Some(vxmt)) = (vxst, vix, vxv, vxmt) else {
        return TrendSignal::MissingData;
    };
    if vxst < vix && vix < vxv && vxv < vxmt {
        TrendSignal::Bullish
    } else if vxst > vix && vix > vxv && vxv > vxmt {
        TrendSignal::Bearish
    } else {
        TrendSignal::Neutral
    }
}

/// Fast-vs-slow EMA cross with a neutral band at exact equality.
pub fn trend_signal(series: Option<&Series>, fast_span: usize, slow_span: usize) -> TrendSignal {
    let Some(series) = series else {
        return TrendSignal::MissingData;
    };
    let values = series.values();
    let (Some(fast), Some(slow)) = (ema_last(&values, fast_span), ema_last(&values, slow_span))
    else {
        return TrendSignal::MissingData;
    };
    if fast > slow {
        TrendSignal::Bullish
    } else if fast < slow {
        TrendSignal::Bearish
    } else {
        TrendSignal::Neutral
    }
}

/// Two-way EMA(50)/EMA(200) trend: bullish above, bearish otherwise.
///
/// Used for the breadth proxy and the long-term SPX read, which have no
/// neutral state.
pub fn long_trend_signal(series: Option<&Series>) -> TrendSignal {
    let Some(series) = series else {
        return TrendSignal::MissingData;
    };
    let values = series.values();
    let (Some(fast), Some(slow)) = (ema_last(&values, 50), ema_last(&values, 200)) else {
        return TrendSignal::MissingData;
    };
    if fast > slow {
        TrendSignal::Bullish
    } else {
        TrendSignal::Bearish
    }
}

/// SPX relative to the credit ratio, same EMA(50)/EMA(200) comparison.
pub fn relative_signal(series: Option<&Series>) -> RelativeSignal {
    let Some(series) = series else {
        return RelativeSignal::MissingData;
    };
    let values = series.values();
    let (Some(fast), Some(slow)) = (ema_last(&values, 50), ema_last(&values, 200)) else {
        return RelativeSignal::MissingData;
    };
    if fast > slow {
        RelativeSignal::Overperforms
    } else {
        RelativeSignal::Underperforms
    }
}

/// Sign of the 10y−2y Treasury spread.
pub fn yield_curve_signal(spread: Option<f64>) -> CurveSignal {
    match spread {
        Some(s) if s > 0.0 => CurveSignal::Normal,
        Some(_) => CurveSignal::Inverted,
        None => CurveSignal::MissingData,
    }
}

/// Composite regime score in [-1, 5].
///
/// Each constructive signal contributes its signed weight explicitly
/// (+1 bullish/overperforms, 0 otherwise), the yield curve subtracts 1 when
/// inverted. The split HYG/JNK trends are diagnostics only and do not score.
pub fn regime_score(signals: &SignalSet) -> i32 {
    signals.multi_vix.weight()
        + signals.credit.weight()
        + signals.nhnl.weight()
        + signals.spx_vs_credit.weight()
        + signals.spx_long_term.weight()
        + signals.yield_curve.weight()
}

/// Map the composite score onto the coarse regime label.
pub fn regime_for(score: i32) -> Regime {
    if score >= 3 {
        Regime::RiskOn
    } else if score <= 0 {
        Regime::RiskOff
    } else {
        Regime::Neutral
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn series_of(values: &[f64]) -> Series {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (start + chrono::Duration::days(i as i64), v))
            .collect();
        Series::from_points(points).unwrap()
    }

    #[test]
    fn ema_seeds_at_first_value() {
        // span 3 -> alpha 0.5: 1, 1.5, 2.25
        assert_eq!(ema_last(&[1.0], 3), Some(1.0));
        assert_eq!(ema_last(&[1.0, 2.0, 3.0], 3), Some(2.25));
        assert_eq!(ema_last(&[], 3), None);
    }

    #[test]
    fn ema_of_constant_series_is_the_constant() {
        let ema = ema_last(&[42.0; 250], 200).unwrap();
        assert!((ema - 42.0).abs() < 1e-9);
    }

    #[test]
    fn multi_vix_strictly_increasing_is_bullish() {
        let s = multi_vix_signal(Some(14.0), Some(15.0), Some(16.5), Some(18.0));
        assert_eq!(s, TrendSignal::Bullish);
    }

    #[test]
    fn multi_vix_strictly_decreasing_is_bearish() {
        let s = multi_vix_signal(Some(30.0), Some(27.0), Some(24.0), Some(21.0));
        assert_eq!(s, TrendSignal::Bearish);
    }

    #[test]
    fn multi_vix_tie_or_kink_is_neutral() {
        // Tie at the front.
        assert_eq!(
            multi_vix_signal(Some(15.0), Some(15.0), Some(16.0), Some(17.0)),
            TrendSignal::Neutral
        );
        // Non-monotonic middle.
        assert_eq!(
            multi_vix_signal(Some(14.0), Some(17.0), Some(16.0), Some(18.0)),
            TrendSignal::Neutral
        );
    }

    #[test]
    fn multi_vix_any_absent_input_is_missing_data() {
        assert_eq!(
            multi_vix_signal(None, Some(15.0), Some(16.0), Some(17.0)),
            TrendSignal::MissingData
        );
        assert_eq!(
            multi_vix_signal(Some(14.0), Some(15.0), Some(16.0), None),
            TrendSignal::MissingData
        );
    }

    #[test]
    fn trend_signal_follows_ema_cross() {
        // Rising series: fast EMA sits above slow EMA at the end.
        let rising = series_of(&(0..80).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        assert_eq!(trend_signal(Some(&rising), 20, 50), TrendSignal::Bullish);

        let falling = series_of(&(0..80).map(|i| 200.0 - i as f64).collect::<Vec<_>>());
        assert_eq!(trend_signal(Some(&falling), 20, 50), TrendSignal::Bearish);

        // Constant series: both EMAs equal.
        let flat = series_of(&[50.0; 80]);
        assert_eq!(trend_signal(Some(&flat), 20, 50), TrendSignal::Neutral);

        assert_eq!(trend_signal(None, 20, 50), TrendSignal::MissingData);
    }

    #[test]
    fn long_trend_has_no_neutral_state() {
        let flat = series_of(&[50.0; 250]);
        assert_eq!(long_trend_signal(Some(&flat)), TrendSignal::Bearish);
        let rising = series_of(&(0..250).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        assert_eq!(long_trend_signal(Some(&rising)), TrendSignal::Bullish);
        assert_eq!(long_trend_signal(None), TrendSignal::MissingData);
    }

    #[test]
    fn relative_signal_mirrors_long_trend() {
        let rising = series_of(&(0..250).map(|i| 1.0 + i as f64 * 0.01).collect::<Vec<_>>());
        assert_eq!(relative_signal(Some(&rising)), RelativeSignal::Overperforms);
        let falling = series_of(&(0..250).map(|i| 10.0 - i as f64 * 0.01).collect::<Vec<_>>());
        assert_eq!(relative_signal(Some(&falling)), RelativeSignal::Underperforms);
        assert_eq!(relative_signal(None), RelativeSignal::MissingData);
    }

    #[test]
    fn yield_curve_sign() {
        assert_eq!(yield_curve_signal(Some(0.5)), CurveSignal::Normal);
        assert_eq!(yield_curve_signal(Some(0.0)), CurveSignal::Inverted);
        assert_eq!(yield_curve_signal(Some(-0.3)), CurveSignal::Inverted);
        assert_eq!(yield_curve_signal(None), CurveSignal::MissingData);
    }

    fn all_signals(trend: TrendSignal, rel: RelativeSignal, curve: CurveSignal) -> SignalSet {
        SignalSet {
            multi_vix: trend,
            credit: trend,
            hyg_trend: trend,
            jnk_trend: trend,
            nhnl: trend,
            spx_vs_credit: rel,
            spx_long_term: trend,
            yield_curve: curve,
        }
    }

    #[test]
    fn score_five_is_risk_on() {
        let s = all_signals(
            TrendSignal::Bullish,
            RelativeSignal::Overperforms,
            CurveSignal::Normal,
        );
        assert_eq!(regime_score(&s), 5);
        assert_eq!(regime_for(5), Regime::RiskOn);
    }

    #[test]
    fn score_minus_one_is_risk_off() {
        let s = all_signals(
            TrendSignal::Bearish,
            RelativeSignal::Underperforms,
            CurveSignal::Inverted,
        );
        assert_eq!(regime_score(&s), -1);
        assert_eq!(regime_for(-1), Regime::RiskOff);
    }

    #[test]
    fn score_two_is_neutral() {
        let mut s = all_signals(
            TrendSignal::Bearish,
            RelativeSignal::Overperforms,
            CurveSignal::Normal,
        );
        s.multi_vix = TrendSignal::Bullish;
        assert_eq!(regime_score(&s), 2);
        assert_eq!(regime_for(2), Regime::Neutral);
    }

    #[test]
    fn missing_signals_score_zero() {
        let s = all_signals(
            TrendSignal::MissingData,
            RelativeSignal::MissingData,
            CurveSignal::MissingData,
        );
        assert_eq!(regime_score(&s), 0);
        assert_eq!(regime_for(0), Regime::RiskOff);
    }

    #[test]
    fn split_etf_trends_do_not_score() {
        let mut s = all_signals(
            TrendSignal::Bearish,
            RelativeSignal::Underperforms,
            CurveSignal::Normal,
        );
        s.hyg_trend = TrendSignal::Bullish;
        s.jnk_trend = TrendSignal::Bullish;
        assert_eq!(regime_score(&s), 0);
    }
}
