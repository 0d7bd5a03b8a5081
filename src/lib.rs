pub mod catalog;
pub mod config;
pub mod error;
pub mod rating;
pub mod reports;
pub mod session;

pub use catalog::{ChartCatalog, ChartColumn, ChartRecord, Difficulty};
pub use error::{ArcError, ArcResult};
pub use session::{ScoreSession, ScoreSnapshot, SessionCommand, SessionEvent, SessionExit};
