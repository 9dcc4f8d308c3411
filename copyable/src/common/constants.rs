// document constants
pub const DOC_ID: &str = "_id";
pub const ID_SUFFIX: &str = "#doc";

// field list capacity before spilling to the heap
pub const INLINE_FIELDS: usize = 8;

pub const COPYABLE_VERSION: &str = env!("CARGO_PKG_VERSION");
