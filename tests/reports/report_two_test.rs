//! Integration tests for the opening-risk-by-month report.

use caissa::config::QueryDefaults;
use caissa::report::opening_risk_by_month;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

#[test]
fn composes_three_ctes() {
    let sql = opening_risk_by_month(&QueryDefaults::default());

    assert!(sql.starts_with("WITH WinRates AS ("));
    assert!(sql.contains("AvgMovesInLoss AS ("));
    assert!(sql.contains("GamesInMonthYear AS ("));
}

#[test]
fn outer_select_joins_all_ctes() {
    let sql = opening_risk_by_month(&QueryDefaults::default());

    assert!(sql.contains("FROM WinRates"));
    assert!(sql.contains("INNER JOIN AvgMovesInLoss ON WinRates.ECOCODE = AvgMovesInLoss.ECOCODE"));
    assert!(sql.contains("INNER JOIN GAMES2 ON WinRates.ECOCODE = GAMES2.ECOCODE"));
    assert!(sql.contains(
        "INNER JOIN GamesInMonthYear ON EXTRACT(MONTH FROM GAMES2.EVENTDATE) = \
         GamesInMonthYear.Month AND EXTRACT(YEAR FROM GAMES2.EVENTDATE) = GamesInMonthYear.Year"
    ));
}

#[test]
fn computes_risky_plays_percentage() {
    let sql = opening_risk_by_month(&QueryDefaults::default());

    assert!(sql.contains(
        "ROUND((COUNT(*) * 100.0) / GamesInMonthYear.Games, 2) AS RiskyPlaysPercent"
    ));
    assert!(sql.contains("ORDER BY Year, Month"));
}

#[test]
fn month_window_uses_to_date_bounds() {
    let sql = opening_risk_by_month(&QueryDefaults::default());

    assert!(sql.contains("GAMES2.EVENTDATE >= TO_DATE('JAN-2018', 'MON-YYYY')"));
    assert!(sql.contains("GAMES2.EVENTDATE <= TO_DATE('DEC-2023', 'MON-YYYY')"));
}

#[test]
fn min_games_changes_embedded_threshold() {
    let defaults = QueryDefaults::default();
    let baseline = opening_risk_by_month(&defaults);

    let tightened = QueryDefaults {
        min_games: 77,
        ..defaults
    };
    let sql = opening_risk_by_month(&tightened);

    assert!(sql.contains(">= 77"));
    assert!(!baseline.contains(">= 77"));
    assert_ne!(baseline, sql);
}

#[test]
fn deterministic_for_identical_inputs() {
    let defaults = QueryDefaults::default();
    assert_eq!(
        opening_risk_by_month(&defaults),
        opening_risk_by_month(&defaults)
    );
}

#[test]
fn composed_query_parses() {
    let sql = opening_risk_by_month(&QueryDefaults::default());
    let statements =
        Parser::parse_sql(&GenericDialect {}, &sql).expect("generated SQL should parse");
    assert_eq!(statements.len(), 1);
}
