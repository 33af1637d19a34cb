//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the acquisition/signal code stays clean and testable
//! - output changes are localized

use crate::domain::Snapshot;

/// Format the run summary printed after a successful build.
pub fn format_run_summary(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    out.push_str("=== regime - Market Regime Snapshot ===\n");
    out.push_str(&format!("Date: {}\n", snapshot.date));
    out.push_str(&format!(
        "Regime: {} (score {})\n",
        snapshot.regime.display_name(),
        snapshot.score
    ));

    out.push_str("\nSignals:\n");
    let s = &snapshot.signals;
    out.push_str(&format!("  multi_vix      {}\n", s.multi_vix.display_name()));
    out.push_str(&format!("  credit         {}\n", s.credit.display_name()));
    out.push_str(&format!("  hyg_trend      {}\n", s.hyg_trend.display_name()));
    out.push_str(&format!("  jnk_trend      {}\n", s.jnk_trend.display_name()));
    out.push_str(&format!("  nhnl           {}\n", s.nhnl.display_name()));
    out.push_str(&format!("  spx_vs_credit  {}\n", s.spx_vs_credit.display_name()));
    out.push_str(&format!("  spx_long_term  {}\n", s.spx_long_term.display_name()));
    out.push_str(&format!("  yield_curve    {}\n", s.yield_curve.display_name()));

    out.push_str("\nValues:\n");
    for (name, value) in &snapshot.values {
        match value {
            Some(v) => out.push_str(&format!("  {name:<5} {v:.2}\n")),
            None => out.push_str(&format!("  {name:<5} n/a\n")),
        }
    }

    out.push_str(&format!(
        "\nMarket regime built: {}\n",
        snapshot.regime.display_name()
    ));
    out
}
