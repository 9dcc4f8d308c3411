mod constants;
mod date_utils;
mod type_utils;
mod value;

pub use constants::*;
pub use date_utils::*;
pub use type_utils::*;
pub use value::*;

use smallvec::SmallVec;

/// A short list of field names, kept inline for the common case.
pub type FieldVec = SmallVec<[String; INLINE_FIELDS]>;
