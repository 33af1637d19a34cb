//! The acquisition → fallback → signal pipeline.
//!
//! Everything here is a pure function of its two provider seams, so the
//! whole run can be exercised with scripted sources. The only fatal
//! acquisition is the base VIX level; every other absence degrades the
//! dependent signals to an explicit missing-data category and the run
//! still completes.

use chrono::NaiveDate;
use log::warn;

use crate::data::resolve::resolve_instrument;
use crate::data::{Period, PriceSource, RateSource};
use crate::domain::{
    SERIES_2Y, SERIES_10Y, Series, SignalSet, Snapshot, TICKER_HYG, TICKER_JNK, TICKER_SPX,
    TICKER_VIX, VXMT, VXST, VXV, ratio, round2,
};
use crate::error::AppError;
use crate::signals;

/// Build the snapshot for `date` from the two providers.
pub fn build_snapshot<Q, R>(quotes: &Q, rates: &R, date: NaiveDate) -> Result<Snapshot, AppError>
where
    Q: PriceSource + ?Sized,
    R: RateSource + ?Sized,
{
    // Base VIX level. Without it no term-structure read is meaningful, so
    // this is the one acquisition that aborts the run.
    let vix = quotes
        .fetch(TICKER_VIX, Period::SixMonths)?
        .ok_or_else(|| AppError::data("VIX data unavailable; cannot compute a regime."))?;

    let spx = quotes.fetch_tolerant(TICKER_SPX, Period::SixMonths);
    let hyg = quotes.fetch_tolerant(TICKER_HYG, Period::SixMonths);
    let jnk = quotes.fetch_tolerant(TICKER_JNK, Period::SixMonths);

    // Term-structure points, via ticker/window fallback.
    let vxst = resolve_instrument(quotes, &VXST);
    let vxv = resolve_instrument(quotes, &VXV);
    let vxmt = resolve_instrument(quotes, &VXMT);

    // Derived series: HYG/JNK as the credit ratio, SPX over that ratio for
    // the relative-performance read.
    let credit_ratio = join_ratio(hyg.as_ref(), jnk.as_ref());
    let spx_over_credit = join_ratio(spx.as_ref(), credit_ratio.as_ref());

    let multi_vix = signals::multi_vix_signal(
        vxst.as_ref().map(Series::latest),
        Some(vix.latest()),
        vxv.as_ref().map(Series::latest),
        vxmt.as_ref().map(Series::latest),
    );

    let spx_long_term = signals::long_trend_signal(spx.as_ref());
    let set = SignalSet {
        multi_vix,
        credit: signals::trend_signal(credit_ratio.as_ref(), 20, 50),
        hyg_trend: signals::trend_signal(hyg.as_ref(), 20, 50),
        jnk_trend: signals::trend_signal(jnk.as_ref(), 20, 50),
        // The breadth proxy reads the same SPX trend as the long-term
        // signal; both are reported.
        nhnl: spx_long_term,
        spx_vs_credit: signals::relative_signal(spx_over_credit.as_ref()),
        spx_long_term,
        yield_curve: signals::yield_curve_signal(yield_spread(rates)),
    };

    let score = signals::regime_score(&set);
    let regime = signals::regime_for(score);

    let mut values = std::collections::BTreeMap::new();
    for (name, series) in [
        ("VXST", vxst.as_ref()),
        ("VIX", Some(&vix)),
        ("VXV", vxv.as_ref()),
        ("VXMT", vxmt.as_ref()),
        ("SPX", spx.as_ref()),
        ("HYG", hyg.as_ref()),
        ("JNK", jnk.as_ref()),
    ] {
        values.insert(name.to_string(), series.map(|s| round2(s.latest())));
    }

    Ok(Snapshot {
        date,
        values,
        signals: set,
        score,
        regime,
    })
}

fn join_ratio(numerator: Option<&Series>, denominator: Option<&Series>) -> Option<Series> {
    match (numerator, denominator) {
        (Some(n), Some(d)) => ratio(n, d),
        _ => None,
    }
}

/// Latest 10y−2y spread, or `None` when either leg is unavailable.
fn yield_spread<R: RateSource + ?Sized>(rates: &R) -> Option<f64> {
    let leg = |series_id: &str| match rates.latest(series_id) {
        Ok(v) => Some(v),
        Err(err) => {
            warn!("rate series {series_id} unavailable: {err}");
            None
        }
    };
    Some(leg(SERIES_10Y)? - leg(SERIES_2Y)?)
}
