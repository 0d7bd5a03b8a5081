pub mod query;
pub mod rate;
pub mod score;
