use crate::models::Choice;

/// Question-set file format version written on export.
pub const FORMAT_VERSION: &str = "1.0";

pub const DEFAULT_TIME_LIMIT_MINUTES: u32 = 60;

/// What an empty label E stands for when a test is administered.
pub const NONE_OF_THE_ABOVE: &str = "None of the above";

/// Labels whose content may move during choice shuffling. E stays put.
pub const MOVABLE_CHOICES: [Choice; 4] = [Choice::A, Choice::B, Choice::C, Choice::D];
