//! Report composers - assemble fragments into the two analytical reports.
//!
//! Each composer embeds several fragment builders as named CTEs, wraps them
//! in an outer SELECT, and returns the finished SQL text. The composed query
//! is also emitted on the `tracing` debug channel; whether a subscriber is
//! installed has no effect on the returned string.

pub mod fragments;

use tracing::debug;

use crate::config::QueryDefaults;
use crate::schema::{ECO_CODE, EVENT_DATE, GAMES_TABLE, MONTH_YEAR_FORMAT};
use crate::sql::{
    col, count_star, extract_month, extract_year, lit_float, lit_int, paren, round, table_col,
    to_date, Cte, ExprExt, OrderByExpr, Query, TableRef,
};
use fragments::{
    avg_moves_in_loss, games_per_month_year, rating_difference_outcome, user_selected_games,
    win_rates, year_totals, AVG_MOVES_IN_LOSS_CTE, DIFFERENCE_DATA_CTE, EXPECTED_YEAR_PROBABILITY,
    GAMES, GAMES_IN_MONTH_YEAR_CTE, MONTH, OCCURRENCES_PER_YEAR, SAMPLE_YEAR_PROBABILITY,
    USER_SELECTED_GAMES_CTE, WIN_RATES_CTE, YEAR, YEAR_TOTALS_CTE,
};

/// Years with fewer occurrences than this are dropped from the rating-gap
/// report as statistically too thin.
pub const MIN_OCCURRENCES_PER_YEAR: i64 = 250;

/// Alias of the risky-openings percentage column.
pub const RISKY_PLAYS_PERCENT: &str = "RiskyPlaysPercent";

/// Alias of the observed-over-expected ratio column.
pub const SAMPLE_OVER_EXPECTED: &str = "SampleOverExpected";

/// Opening risk by month: per (month, year), the percentage of games played
/// with openings that qualify for the win-rate fragment, relative to the
/// total games that month.
///
/// CTEs: `WinRates`, `AvgMovesInLoss`, `GamesInMonthYear`. The outer SELECT
/// joins them on opening code and on (month, year), restricted to the
/// configured MON-YYYY window, ordered chronologically.
pub fn opening_risk_by_month(defaults: &QueryDefaults) -> String {
    let event_date = || table_col(GAMES_TABLE, EVENT_DATE);

    let query = Query::new()
        .with_cte(Cte::new(
            WIN_RATES_CTE,
            win_rates(defaults.min_games, defaults.fetch_rows),
        ))
        .with_cte(Cte::new(
            AVG_MOVES_IN_LOSS_CTE,
            avg_moves_in_loss(None, defaults.fetch_rows),
        ))
        .with_cte(Cte::new(GAMES_IN_MONTH_YEAR_CTE, games_per_month_year()))
        .select(vec![
            round(
                paren(count_star().mul(lit_float(100.0)))
                    .div(table_col(GAMES_IN_MONTH_YEAR_CTE, GAMES)),
                2,
            )
            .alias(RISKY_PLAYS_PERCENT),
            extract_month(event_date()).alias(MONTH),
            extract_year(event_date()).alias(YEAR),
        ])
        .from(TableRef::new(WIN_RATES_CTE))
        .inner_join(
            TableRef::new(AVG_MOVES_IN_LOSS_CTE),
            table_col(WIN_RATES_CTE, ECO_CODE).eq(table_col(AVG_MOVES_IN_LOSS_CTE, ECO_CODE)),
        )
        .inner_join(
            TableRef::new(GAMES_TABLE),
            table_col(WIN_RATES_CTE, ECO_CODE).eq(table_col(GAMES_TABLE, ECO_CODE)),
        )
        .inner_join(
            TableRef::new(GAMES_IN_MONTH_YEAR_CTE),
            extract_month(event_date())
                .eq(table_col(GAMES_IN_MONTH_YEAR_CTE, MONTH))
                .and(extract_year(event_date()).eq(table_col(GAMES_IN_MONTH_YEAR_CTE, YEAR))),
        )
        .filter(event_date().gte(to_date(&defaults.start_month, MONTH_YEAR_FORMAT)))
        .filter(event_date().lte(to_date(&defaults.end_month, MONTH_YEAR_FORMAT)))
        .group_by(vec![
            extract_month(event_date()),
            extract_year(event_date()),
            table_col(GAMES_IN_MONTH_YEAR_CTE, GAMES),
        ])
        .order_by(vec![
            OrderByExpr::new(col(YEAR)),
            OrderByExpr::new(col(MONTH)),
        ]);

    let sql = query.to_sql();
    debug!(report = "opening_risk_by_month", sql = %sql, "composed report query");
    sql
}

/// Rating-gap accuracy by year: per year with at least
/// [`MIN_OCCURRENCES_PER_YEAR`] occurrences, the ratio of the observed
/// probability that the higher-rated side won to the Elo-model expectation.
///
/// CTEs: `UserSelectedGames`, `DifferenceData`, `YearTotals`. Ordered by
/// year descending; the ratio is rounded to three decimal places in SQL.
pub fn rating_gap_accuracy_by_year(defaults: &QueryDefaults) -> String {
    let query = Query::new()
        .with_cte(Cte::new(
            USER_SELECTED_GAMES_CTE,
            user_selected_games(defaults),
        ))
        .with_cte(Cte::new(
            DIFFERENCE_DATA_CTE,
            rating_difference_outcome(USER_SELECTED_GAMES_CTE),
        ))
        .with_cte(Cte::new(YEAR_TOTALS_CTE, year_totals(DIFFERENCE_DATA_CTE)))
        .select(vec![
            col(YEAR).into(),
            round(
                paren(col(SAMPLE_YEAR_PROBABILITY).div(col(EXPECTED_YEAR_PROBABILITY))),
                3,
            )
            .alias(SAMPLE_OVER_EXPECTED),
        ])
        .from(TableRef::new(YEAR_TOTALS_CTE))
        .filter(col(OCCURRENCES_PER_YEAR).gte(lit_int(MIN_OCCURRENCES_PER_YEAR)))
        .order_by(vec![OrderByExpr::desc(col(YEAR))]);

    let sql = query.to_sql();
    debug!(report = "rating_gap_accuracy_by_year", sql = %sql, "composed report query");
    sql
}
