//! Integration tests for the rating-gap-accuracy-by-year report.

use caissa::config::QueryDefaults;
use caissa::report::rating_gap_accuracy_by_year;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

#[test]
fn composes_three_ctes() {
    let sql = rating_gap_accuracy_by_year(&QueryDefaults::default());

    assert!(sql.starts_with("WITH UserSelectedGames AS ("));
    assert!(sql.contains("DifferenceData AS ("));
    assert!(sql.contains("YearTotals AS ("));
}

#[test]
fn nested_fragments_read_from_the_ctes() {
    let sql = rating_gap_accuracy_by_year(&QueryDefaults::default());

    assert!(sql.contains("FROM UserSelectedGames"));
    assert!(sql.contains("FROM DifferenceData"));
    assert!(sql.contains("FROM YearTotals"));
}

#[test]
fn outer_select_rounds_ratio_to_three_places() {
    let sql = rating_gap_accuracy_by_year(&QueryDefaults::default());

    // The ratio is rounded in SQL, not evaluated locally.
    assert!(sql.contains(
        "ROUND((SampleYearProbability / ExpectedYearProbability), 3) AS SampleOverExpected"
    ));
    assert!(sql.contains("WHERE OccurrencesPerYear >= 250"));
    assert!(sql.contains("ORDER BY Year DESC"));
}

#[test]
fn default_bounds_are_embedded() {
    let sql = rating_gap_accuracy_by_year(&QueryDefaults::default());

    assert!(sql.contains("WHITEELO >= 246"));
    assert!(sql.contains("WHITEELO <= 3958"));
    assert!(sql.contains("TURNS >= 1"));
    assert!(sql.contains("TURNS <= 201"));
    assert!(sql.contains("TO_DATE('01-JAN-1942', 'DD-MON-YYYY')"));
    assert!(sql.contains("TO_DATE('01-JAN-2024', 'DD-MON-YYYY')"));
}

#[test]
fn custom_bounds_replace_defaults() {
    let defaults = QueryDefaults {
        low_white_elo: 1500,
        high_turn: 60,
        start_date: "01-JAN-2000".to_string(),
        ..QueryDefaults::default()
    };
    let sql = rating_gap_accuracy_by_year(&defaults);

    assert!(sql.contains("WHITEELO >= 1500"));
    assert!(sql.contains("TURNS <= 60"));
    assert!(sql.contains("TO_DATE('01-JAN-2000', 'DD-MON-YYYY')"));
}

#[test]
fn uses_elo_logistic_model() {
    let sql = rating_gap_accuracy_by_year(&QueryDefaults::default());
    assert!(sql.contains("POWER(10, -(ABS(WHITEELO - BLACKELO) / 400))"));
}

#[test]
fn deterministic_for_identical_inputs() {
    let defaults = QueryDefaults::default();
    assert_eq!(
        rating_gap_accuracy_by_year(&defaults),
        rating_gap_accuracy_by_year(&defaults)
    );
}

#[test]
fn composed_query_parses() {
    let sql = rating_gap_accuracy_by_year(&QueryDefaults::default());
    let statements =
        Parser::parse_sql(&GenericDialect {}, &sql).expect("generated SQL should parse");
    assert_eq!(statements.len(), 1);
}
