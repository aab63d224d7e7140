//! Quizport shared utilities.
//!
//! Text normalization used by both the quiz converter and the domain
//! suggester.
//!
//! # Example
//!
//! ```
//! use quizport_shared::clean_text;
//!
//! assert_eq!(clean_text("  What is\n\tX?&nbsp;"), "What is X?");
//! ```

pub mod text;

pub use text::{clean_text, word_count};
