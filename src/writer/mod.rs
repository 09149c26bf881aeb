//! Output persistence.

mod jsonl;

pub use jsonl::{read_jsonl, JsonlWriter};
