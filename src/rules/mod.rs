pub mod ignored_error;
pub mod suppression;

pub use ignored_error::{detect_ignored_errors, IgnoredErrorRule, OriginCheck};
pub use suppression::{parse_suppression_comments, SuppressionContext};
