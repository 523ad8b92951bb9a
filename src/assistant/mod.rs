//! Élise assistant: persona prompts and the offline reply selector

pub mod fallback;
pub mod persona;

pub use fallback::{classify, select_reply, Topic};
