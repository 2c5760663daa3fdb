//! Fragment builders - the analytical sub-queries behind the reports.
//!
//! Each builder is a pure function from scalar parameters to a [`Query`]
//! value; serializing the query yields a self-contained SELECT statement.
//! Builders do no range validation (low > high simply selects nothing) and
//! have no side effects.
//!
//! Two builders ([`rating_difference_outcome`], [`year_totals`]) read from a
//! relation that only exists as a CTE of the composed report. They take the
//! source relation name as an explicit argument so the coupling is visible in
//! the signature instead of being baked into the fragment text.

use crate::config::QueryDefaults;
use crate::schema::{
    BLACK_ELO, BLACK_WIN, DAY_MONTH_YEAR_FORMAT, ECO_CODE, EVENT_DATE, GAMES_TABLE, RESULT, TURNS,
    WHITE_ELO, WHITE_WIN,
};
use crate::sql::{
    abs_val, avg, case_when, col, count_star, extract_month, extract_year, lit_int, lit_str, neg,
    paren, power, round, sum, to_date, Expr, ExprExt, OrderByExpr, Query, TableRef, Token,
    TokenStream,
};

// CTE names used when the fragments are embedded in a report.
pub const WIN_RATES_CTE: &str = "WinRates";
pub const AVG_MOVES_IN_LOSS_CTE: &str = "AvgMovesInLoss";
pub const GAMES_IN_MONTH_YEAR_CTE: &str = "GamesInMonthYear";
pub const USER_SELECTED_GAMES_CTE: &str = "UserSelectedGames";
pub const DIFFERENCE_DATA_CTE: &str = "DifferenceData";
pub const YEAR_TOTALS_CTE: &str = "YearTotals";

// Output column names shared between producing fragments and the consuming
// outer SELECTs.
pub const WINS: &str = "Wins";
pub const LOSSES: &str = "Losses";
pub const WIN_RATE: &str = "WinRate";
pub const AVG_MOVES: &str = "AvgMovesInLoss";
pub const GAMES: &str = "Games";
pub const MONTH: &str = "Month";
pub const YEAR: &str = "Year";
pub const DIFFERENCE: &str = "Difference";
pub const SAMPLE_PROBABILITY: &str = "SampleProbability";
pub const EXPECTED_PROBABILITY: &str = "ExpectedProbability";
pub const OCCURRENCES: &str = "Occurrences";
pub const SAMPLE_YEAR_PROBABILITY: &str = "SampleYearProbability";
pub const EXPECTED_YEAR_PROBABILITY: &str = "ExpectedYearProbability";
pub const OCCURRENCES_PER_YEAR: &str = "OccurrencesPerYear";

/// Optional opening-code predicate: `ECOCODE = '<code>'`.
pub fn eco_code_predicate(eco_code: Option<&str>) -> Option<Expr> {
    eco_code.map(|code| col(ECO_CODE).eq(lit_str(code)))
}

/// Optional opening-code WHERE clause for textual insertion.
///
/// Returns the empty string for `None`, otherwise exactly
/// `WHERE ECOCODE = '<code>' ` with a trailing space so the fragment can be
/// spliced between a FROM clause and a GROUP BY. The code is quoted as a
/// string literal but not otherwise validated.
pub fn eco_code_where(eco_code: Option<&str>) -> String {
    match eco_code_predicate(eco_code) {
        Some(predicate) => {
            let mut ts = TokenStream::new();
            ts.push(Token::Where)
                .space()
                .append(&predicate.to_tokens())
                .space();
            ts.serialize()
        }
        None => String::new(),
    }
}

/// SUM(CASE WHEN RESULT = '<result>' THEN 1 ELSE 0 END)
fn result_count(result: &str) -> Expr {
    sum(case_when(
        vec![(col(RESULT).eq(lit_str(result)), lit_int(1))],
        Some(lit_int(0)),
    ))
}

/// Per-opening win/loss counts and win rate.
///
/// Openings qualify with at least `min_games` decided games; since a win
/// rate's denominator is exactly that decided-game count, `min_games >= 1`
/// rules out division by zero by construction. Ordered by win rate
/// descending, capped at `fetch_rows` rows.
pub fn win_rates(min_games: u32, fetch_rows: u64) -> Query {
    let wins = result_count(WHITE_WIN);
    let losses = result_count(BLACK_WIN);
    let decided = paren(losses.clone().add(wins.clone()));

    Query::new()
        .select(vec![
            col(ECO_CODE).into(),
            wins.clone().alias(WINS),
            losses.clone().alias(LOSSES),
            round(wins.div(decided.clone()), 2).alias(WIN_RATE),
        ])
        .from(TableRef::new(GAMES_TABLE))
        .group_by(vec![col(ECO_CODE)])
        .having(decided.gte(lit_int(min_games as i64)))
        .order_by(vec![OrderByExpr::desc(col(WIN_RATE))])
        .fetch_first(fetch_rows)
}

/// Average turn count per opening, optionally restricted to one opening.
///
/// Ascending order surfaces the openings that lose quickest.
pub fn avg_moves_in_loss(eco_code: Option<&str>, fetch_rows: u64) -> Query {
    let mut query = Query::new()
        .select(vec![
            col(ECO_CODE).into(),
            avg(col(TURNS)).alias(AVG_MOVES),
        ])
        .from(TableRef::new(GAMES_TABLE));

    if let Some(predicate) = eco_code_predicate(eco_code) {
        query = query.filter(predicate);
    }

    query
        .group_by(vec![col(ECO_CODE)])
        .order_by(vec![OrderByExpr::asc(col(AVG_MOVES))])
        .fetch_first(fetch_rows)
}

/// Game volume per calendar (month, year) extracted from the event date.
pub fn games_per_month_year() -> Query {
    Query::new()
        .select(vec![
            count_star().alias(GAMES),
            extract_month(col(EVENT_DATE)).alias(MONTH),
            extract_year(col(EVENT_DATE)).alias(YEAR),
        ])
        .from(TableRef::new(GAMES_TABLE))
        .group_by(vec![
            extract_month(col(EVENT_DATE)),
            extract_year(col(EVENT_DATE)),
        ])
}

/// Full-table filter: games whose Elo ratings, turn counts, and event date
/// all fall within the configured inclusive ranges.
pub fn user_selected_games(defaults: &QueryDefaults) -> Query {
    Query::new()
        .select_star()
        .from(TableRef::new(GAMES_TABLE))
        .filter(col(WHITE_ELO).gte(lit_int(defaults.low_white_elo)))
        .filter(col(WHITE_ELO).lte(lit_int(defaults.high_white_elo)))
        .filter(col(BLACK_ELO).gte(lit_int(defaults.low_black_elo)))
        .filter(col(BLACK_ELO).lte(lit_int(defaults.high_black_elo)))
        .filter(col(TURNS).gte(lit_int(defaults.low_turn)))
        .filter(col(TURNS).lte(lit_int(defaults.high_turn)))
        .filter(
            col(EVENT_DATE).gte(to_date(&defaults.start_date, DAY_MONTH_YEAR_FORMAT)),
        )
        .filter(col(EVENT_DATE).lte(to_date(&defaults.end_date, DAY_MONTH_YEAR_FORMAT)))
}

/// Observed versus Elo-predicted outcome per (absolute rating difference, year).
///
/// A game counts as rating-consistent when the higher-rated side won. The
/// expected probability is the standard Elo logistic model,
/// `1 / (1 + 10^(-difference / 400))`.
///
/// `games` names the source relation; the fragment is only executable when
/// that name resolves, normally to the [`USER_SELECTED_GAMES_CTE`] defined by
/// the enclosing report.
pub fn rating_difference_outcome(games: &str) -> Query {
    let difference = abs_val(col(WHITE_ELO).sub(col(BLACK_ELO)));

    let consistent = paren(
        col(RESULT)
            .eq(lit_str(BLACK_WIN))
            .and(col(WHITE_ELO).lt(col(BLACK_ELO))),
    )
    .or(paren(
        col(RESULT)
            .eq(lit_str(WHITE_WIN))
            .and(col(WHITE_ELO).gt(col(BLACK_ELO))),
    ));

    let observed = sum(case_when(vec![(consistent, lit_int(1))], Some(lit_int(0))));

    let expected = paren(lit_int(1).div(paren(lit_int(1).add(power(
        lit_int(10),
        neg(paren(difference.clone().div(lit_int(400)))),
    )))));

    Query::new()
        .select(vec![
            difference.clone().alias(DIFFERENCE),
            extract_year(col(EVENT_DATE)).alias(YEAR),
            round(observed.div(count_star()), 2).alias(SAMPLE_PROBABILITY),
            expected.alias(EXPECTED_PROBABILITY),
            count_star().alias(OCCURRENCES),
        ])
        .from(TableRef::new(games))
        .group_by(vec![difference, extract_year(col(EVENT_DATE))])
}

/// Occurrence-weighted yearly averages of the per-difference probabilities.
///
/// `difference_data` names the source relation, normally the
/// [`DIFFERENCE_DATA_CTE`] defined by the enclosing report.
pub fn year_totals(difference_data: &str) -> Query {
    let weighted = |column: &str| {
        sum(col(column).mul(col(OCCURRENCES))).div(sum(col(OCCURRENCES)))
    };

    Query::new()
        .select(vec![
            col(YEAR).into(),
            weighted(SAMPLE_PROBABILITY).alias(SAMPLE_YEAR_PROBABILITY),
            weighted(EXPECTED_PROBABILITY).alias(EXPECTED_YEAR_PROBABILITY),
            sum(col(OCCURRENCES)).alias(OCCURRENCES_PER_YEAR),
        ])
        .from(TableRef::new(difference_data))
        .group_by(vec![col(YEAR)])
}
