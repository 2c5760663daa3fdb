//! Identifiers of the historical games table.
//!
//! Every fragment builder references these constants instead of re-spelling
//! the identifiers; the external engine's schema contract lives here and
//! nowhere else.

/// The single wide table holding one row per game.
pub const GAMES_TABLE: &str = "GAMES2";

/// Opening classification code (ECO).
pub const ECO_CODE: &str = "ECOCODE";

/// Game result: `'1-0'`, `'0-1'`, or a draw/other marker.
pub const RESULT: &str = "RESULT";

/// Number of turns played.
pub const TURNS: &str = "TURNS";

/// Date the game was played.
pub const EVENT_DATE: &str = "EVENTDATE";

/// White player's Elo rating.
pub const WHITE_ELO: &str = "WHITEELO";

/// Black player's Elo rating.
pub const BLACK_ELO: &str = "BLACKELO";

/// RESULT value for a white win.
pub const WHITE_WIN: &str = "1-0";

/// RESULT value for a black win.
pub const BLACK_WIN: &str = "0-1";

/// TO_DATE format for full dates ("01-JAN-1942").
pub const DAY_MONTH_YEAR_FORMAT: &str = "DD-MON-YYYY";

/// TO_DATE format for month bounds ("JAN-2018").
pub const MONTH_YEAR_FORMAT: &str = "MON-YYYY";
