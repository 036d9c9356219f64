pub mod attempt;
pub mod expand;
pub mod models;
pub mod names;
pub mod runner;
pub mod score;
pub mod shuffle;
pub mod validate;
