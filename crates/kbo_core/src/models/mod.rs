pub mod standings;

pub use standings::{StandingsSnapshot, TeamStanding, DEFAULT_SEASON};
