//! Ticker/window fallback resolution for the VIX term structure.
//!
//! Yahoo rotates the term-structure symbols over time, and short lookback
//! windows are less likely to hit serving errors. So candidates are tried
//! shortest-window-first, preferred-ticker-first, and the first non-empty
//! result wins. This is substitution across equivalent sources, not a timed
//! retry; a request failure simply counts as "no data" for that pair.

use log::{debug, warn};

use crate::data::yahoo::{Period, PriceSource};
use crate::domain::{Instrument, Series};

/// Widening lookback windows used for the term-structure points, shortest
/// first — only the latest value is consumed, so a 5-day window is enough
/// when it serves.
pub const TERM_WINDOWS: [Period; 4] = [
    Period::FiveDays,
    Period::OneMonth,
    Period::ThreeMonths,
    Period::SixMonths,
];

/// Try every (window, ticker) pair in order and return the first non-empty
/// series. `None` only when every combination fails.
pub fn resolve<S: PriceSource + ?Sized>(
    source: &S,
    candidates: &[&str],
    windows: &[Period],
) -> Option<Series> {
    for &window in windows {
        for &ticker in candidates {
            if let Some(series) = source.fetch_tolerant(ticker, window) {
                debug!("resolved {ticker} over {}", window.as_str());
                return Some(series);
            }
        }
    }
    None
}

/// Resolve one term-structure instrument, logging when it stays unresolved.
///
/// An unresolved point is not substituted with an estimate; the caller
/// degrades the dependent signal to an explicit missing-data category.
pub fn resolve_instrument<S: PriceSource + ?Sized>(
    source: &S,
    instrument: &Instrument,
) -> Option<Series> {
    let series = resolve(source, instrument.candidates, &TERM_WINDOWS);
    if series.is_none() {
        warn!(
            "{} unresolved after trying {:?} across {:?} windows",
            instrument.name,
            instrument.candidates,
            TERM_WINDOWS.map(Period::as_str)
        );
    }
    series
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::NaiveDate;

    use super::*;
    use crate::error::AppError;

    /// Scripted source: answers from a fixed table and records call order.
    struct Scripted {
        hits: Vec<(&'static str, Period)>,
        calls: RefCell<Vec<(String, Period)>>,
        fail: Vec<(&'static str, Period)>,
    }

    impl Scripted {
        fn new(hits: Vec<(&'static str, Period)>) -> Self {
            Self {
                hits,
                calls: RefCell::new(Vec::new()),
                fail: Vec::new(),
            }
        }

        fn one_point() -> Series {
            let d = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
            Series::from_points(vec![(d, 20.0)]).unwrap()
        }
    }

    impl PriceSource for Scripted {
        fn fetch(&self, ticker: &str, period: Period) -> Result<Option<Series>, AppError> {
            self.calls.borrow_mut().push((ticker.to_string(), period));
            if self.fail.iter().any(|&(t, p)| t == ticker && p == period) {
                return Err(AppError::data("scripted failure"));
            }
            if self.hits.iter().any(|&(t, p)| t == ticker && p == period) {
                Ok(Some(Self::one_point()))
            } else {
                Ok(None)
            }
        }
    }

    const SHORT: Period = Period::OneMonth;
    const LONG: Period = Period::ThreeMonths;

    #[test]
    fn windows_outer_tickers_inner_first_hit_wins() {
        // Empty for (short, A) and (short, B); data for (long, A).
        let source = Scripted::new(vec![("A", LONG), ("B", LONG)]);
        let series = resolve(&source, &["A", "B"], &[SHORT, LONG]);
        assert!(series.is_some());
        // (long, B) must never be attempted.
        let calls = source.calls.borrow();
        assert_eq!(
            *calls,
            vec![
                ("A".to_string(), SHORT),
                ("B".to_string(), SHORT),
                ("A".to_string(), LONG),
            ]
        );
    }

    #[test]
    fn preferred_ticker_short_circuits() {
        let source = Scripted::new(vec![("A", SHORT)]);
        assert!(resolve(&source, &["A", "B"], &[SHORT, LONG]).is_some());
        assert_eq!(source.calls.borrow().len(), 1);
    }

    #[test]
    fn term_windows_widen_from_the_shortest_period() {
        assert_eq!(
            TERM_WINDOWS.map(Period::as_str),
            ["5d", "1mo", "3mo", "6mo"]
        );
    }

    #[test]
    fn exhausted_candidates_yield_none() {
        let source = Scripted::new(vec![]);
        assert!(resolve(&source, &["A", "B"], &[SHORT, LONG]).is_none());
        assert_eq!(source.calls.borrow().len(), 4);
    }

    #[test]
    fn request_failures_count_as_empty_not_fatal() {
        let mut source = Scripted::new(vec![("B", SHORT)]);
        source.fail = vec![("A", SHORT)];
        let series = resolve(&source, &["A", "B"], &[SHORT, LONG]);
        assert!(series.is_some());
        assert_eq!(source.calls.borrow().len(), 2);
    }
}
