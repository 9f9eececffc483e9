// src/feed/mod.rs
//! The content reconstruction pipeline's pure transforms.
//!
//! Every function here is stateless and deterministic: identical input
//! yields byte-identical output. Stage order within one render pass is
//! extract → number → group; a manual reorder runs the inverse expansion
//! and cycles back through number → group on the next render.

pub mod boards;
pub mod classify;
pub mod grouper;
pub mod media;
pub mod numbering;
pub mod reorder;

pub use boards::extract_boards;
pub use classify::classify;
pub use grouper::group;
pub use media::extract_media;
pub use numbering::number_list_items;
pub use reorder::expand_reorder;
