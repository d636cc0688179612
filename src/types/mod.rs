//! Public types for the docsort API.

mod category;
mod classification;
mod document;
mod inference;
mod scores;

pub use category::CategorySet;
pub use classification::{ChunkStats, ClassificationResult, Outcome};
pub use document::{DocumentRecord, NewDocument};
pub use inference::ClassifyResult;
pub use scores::ScoreVector;
pub(crate) use scores::ScoreTotals;
