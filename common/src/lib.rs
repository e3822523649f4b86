//! Design Feedback Common Library
//!
//! CLIとWeb(WASM)で共有される型・ストレージ・集計

pub mod category;
pub mod design;
pub mod display;
pub mod error;
pub mod feedback;
pub mod filter;
pub mod id;
pub mod lenient;
pub mod rating;
pub mod sort;
pub mod store;
pub mod timestamp;

pub use category::{is_known_category, resolve_category, CATEGORIES};
pub use design::{
    average_of, average_of_single_feedback, sort_designs, sort_feedback, Design, DesignFeedback,
    DesignStore, NewDesign, NewFeedback,
};
pub use display::DesignSummary;
pub use error::{Error, Result};
pub use feedback::{Feedback, FeedbackStore, NewStandaloneFeedback};
pub use filter::{filter_designs, GalleryQuery};
pub use rating::{Rated, Ratings};
pub use sort::SortOrder;
pub use store::{KeyValueStore, MemoryStore};
