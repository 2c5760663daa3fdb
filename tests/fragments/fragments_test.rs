//! Integration tests for the fragment builders.

use caissa::config::QueryDefaults;
use caissa::report::fragments::{
    avg_moves_in_loss, eco_code_where, games_per_month_year, rating_difference_outcome,
    user_selected_games, win_rates, year_totals, DIFFERENCE_DATA_CTE, USER_SELECTED_GAMES_CTE,
};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

fn assert_parses(sql: &str) {
    let statements =
        Parser::parse_sql(&GenericDialect {}, sql).expect("generated SQL should parse");
    assert_eq!(statements.len(), 1, "expected a single statement: {sql}");
}

#[test]
fn eco_code_where_none_is_empty() {
    assert_eq!(eco_code_where(None), "");
}

#[test]
fn eco_code_where_some_is_exact() {
    assert_eq!(eco_code_where(Some("A00")), "WHERE ECOCODE = 'A00' ");
}

#[test]
fn eco_code_where_escapes_quotes() {
    assert_eq!(eco_code_where(Some("A'00")), "WHERE ECOCODE = 'A''00' ");
}

#[test]
fn win_rates_embeds_threshold_and_limit() {
    let sql = win_rates(10, 42).to_sql();

    assert!(sql.contains("FROM GAMES2"));
    assert!(sql.contains("SUM(CASE WHEN RESULT = '1-0' THEN 1 ELSE 0 END) AS Wins"));
    assert!(sql.contains("SUM(CASE WHEN RESULT = '0-1' THEN 1 ELSE 0 END) AS Losses"));
    assert!(sql.contains("AS WinRate"));
    assert!(sql.contains("HAVING"));
    assert!(sql.contains(">= 10"));
    assert!(sql.contains("ORDER BY WinRate DESC"));
    assert!(sql.contains("FETCH FIRST 42 ROWS ONLY"));
    assert_parses(&sql);
}

#[test]
fn win_rates_rounds_to_two_places() {
    let sql = win_rates(1, 130).to_sql();
    assert!(sql.contains(", 2) AS WinRate"));
}

#[test]
fn win_rates_zero_threshold_keeps_having_clause() {
    let sql = win_rates(0, 130).to_sql();
    assert!(sql.contains(">= 0"));
    assert_parses(&sql);
}

#[test]
fn avg_moves_in_loss_without_filter() {
    let sql = avg_moves_in_loss(None, 130).to_sql();

    assert!(!sql.contains("WHERE"));
    assert!(sql.contains("AVG(TURNS) AS AvgMovesInLoss"));
    assert!(sql.contains("GROUP BY ECOCODE"));
    assert!(sql.contains("ORDER BY AvgMovesInLoss ASC"));
    assert!(sql.contains("FETCH FIRST 130 ROWS ONLY"));
    assert_parses(&sql);
}

#[test]
fn avg_moves_in_loss_with_opening_filter() {
    let sql = avg_moves_in_loss(Some("B01"), 130).to_sql();

    assert!(sql.contains("WHERE ECOCODE = 'B01'"));
    assert_parses(&sql);
}

#[test]
fn games_per_month_year_groups_by_extracted_parts() {
    let sql = games_per_month_year().to_sql();

    assert!(sql.contains("COUNT(*) AS Games"));
    assert!(sql.contains("EXTRACT(MONTH FROM EVENTDATE) AS Month"));
    assert!(sql.contains("EXTRACT(YEAR FROM EVENTDATE) AS Year"));
    assert!(sql.contains("GROUP BY EXTRACT(MONTH FROM EVENTDATE), EXTRACT(YEAR FROM EVENTDATE)"));
    assert_parses(&sql);
}

#[test]
fn user_selected_games_embeds_all_bounds() {
    let defaults = QueryDefaults {
        low_white_elo: 1200,
        high_white_elo: 2900,
        low_black_elo: 1100,
        high_black_elo: 2800,
        low_turn: 5,
        high_turn: 90,
        start_date: "01-JAN-1990".to_string(),
        end_date: "31-DEC-2020".to_string(),
        ..QueryDefaults::default()
    };
    let sql = user_selected_games(&defaults).to_sql();

    assert!(sql.contains("WHITEELO >= 1200"));
    assert!(sql.contains("WHITEELO <= 2900"));
    assert!(sql.contains("BLACKELO >= 1100"));
    assert!(sql.contains("BLACKELO <= 2800"));
    assert!(sql.contains("TURNS >= 5"));
    assert!(sql.contains("TURNS <= 90"));
    assert!(sql.contains("EVENTDATE >= TO_DATE('01-JAN-1990', 'DD-MON-YYYY')"));
    assert!(sql.contains("EVENTDATE <= TO_DATE('31-DEC-2020', 'DD-MON-YYYY')"));
    assert_parses(&sql);
}

#[test]
fn rating_difference_outcome_uses_elo_logistic_model() {
    let sql = rating_difference_outcome(USER_SELECTED_GAMES_CTE).to_sql();

    assert!(sql.contains("ABS(WHITEELO - BLACKELO) AS Difference"));
    assert!(sql.contains("(1 / (1 + POWER(10, -(ABS(WHITEELO - BLACKELO) / 400))))"));
    assert!(sql.contains(", 2) AS SampleProbability"));
    assert!(sql.contains("COUNT(*) AS Occurrences"));
    assert!(sql.contains("FROM UserSelectedGames"));
    assert!(sql.contains(
        "(RESULT = '0-1' AND WHITEELO < BLACKELO) OR (RESULT = '1-0' AND WHITEELO > BLACKELO)"
    ));
    assert_parses(&sql);
}

#[test]
fn rating_difference_outcome_source_is_explicit() {
    let sql = rating_difference_outcome("GAMES2").to_sql();
    assert!(sql.contains("FROM GAMES2"));
}

#[test]
fn year_totals_weights_by_occurrences() {
    let sql = year_totals(DIFFERENCE_DATA_CTE).to_sql();

    assert!(sql.contains(
        "SUM(SampleProbability * Occurrences) / SUM(Occurrences) AS SampleYearProbability"
    ));
    assert!(sql.contains(
        "SUM(ExpectedProbability * Occurrences) / SUM(Occurrences) AS ExpectedYearProbability"
    ));
    assert!(sql.contains("SUM(Occurrences) AS OccurrencesPerYear"));
    assert!(sql.contains("FROM DifferenceData"));
    assert!(sql.contains("GROUP BY Year"));
    assert_parses(&sql);
}

#[test]
fn builders_are_idempotent() {
    assert_eq!(win_rates(5, 50).to_sql(), win_rates(5, 50).to_sql());
    assert_eq!(
        avg_moves_in_loss(Some("C42"), 10).to_sql(),
        avg_moves_in_loss(Some("C42"), 10).to_sql()
    );
    let defaults = QueryDefaults::default();
    assert_eq!(
        user_selected_games(&defaults).to_sql(),
        user_selected_games(&defaults).to_sql()
    );
}
