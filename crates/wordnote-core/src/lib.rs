pub mod date;
pub mod dictionary;
pub mod entry;
pub mod error;
pub mod id;
pub mod normalize;
pub mod preprocess;

pub use date::{DateKey, YearMonth};
pub use entry::{EntryPatch, VocabEntry};
pub use error::CoreError;
pub use id::compute_id;
pub use normalize::{is_valid_translation, normalize};
