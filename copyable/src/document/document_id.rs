use crate::common::ID_SUFFIX;
use crate::errors::{CopyError, CopyResult, ErrorKind};
use crate::ID_GENERATOR;
use std::fmt::{Debug, Display};

const MAX_VALUE: u64 = 10_000_000_000_000_000_000;
const MIN_VALUE: u64 = 1_000_000_000_000_000_000;

/// The identity of a document instance.
///
/// Identities are minted once, when a document is created, and never change
/// afterwards. Copy operations never transfer an identity: every duplicated
/// embedded child receives a freshly minted one.
///
/// Values are 64-bit unsigned integers in the range [10^18, 10^19), produced
/// by a process-wide Snowflake-style generator, so identities are unique
/// across threads without coordination.
///
/// # Examples
///
/// ```rust,ignore
/// use copyable::document::DocumentId;
///
/// let id = DocumentId::new();
/// let restored = DocumentId::create_id(id.id_value())?;
/// assert_eq!(id, restored);
/// ```
#[derive(PartialEq, Eq, Ord, PartialOrd, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentId {
    id_value: u64,
}

impl DocumentId {
    /// Mints a new unique identity.
    pub fn new() -> Self {
        DocumentId {
            id_value: ID_GENERATOR.get_id(),
        }
    }

    /// Rebuilds an identity from a stored value, typically when loading a
    /// document. Fails with [ErrorKind::InvalidId] outside [10^18, 10^19).
    pub fn create_id(id_value: u64) -> CopyResult<DocumentId> {
        DocumentId::valid_id(id_value)?;
        Ok(DocumentId { id_value })
    }

    pub fn id_value(&self) -> u64 {
        self.id_value
    }

    pub(crate) fn valid_id(id_value: u64) -> CopyResult<()> {
        if id_value >= MAX_VALUE {
            log::error!("Id value {} is too large", id_value);
            return Err(CopyError::new(
                &format!("DocumentId validation error: id value must be less than 10^19 ({})", MAX_VALUE),
                ErrorKind::InvalidId,
            ));
        } else if id_value < MIN_VALUE {
            log::error!("Id value {} is too small", id_value);
            return Err(CopyError::new(
                &format!("DocumentId validation error: id value must be greater than or equal to 10^18 ({})", MIN_VALUE),
                ErrorKind::InvalidId,
            ));
        }
        Ok(())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        DocumentId::new()
    }
}

impl Debug for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]{}", self.id_value, ID_SUFFIX)
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]{}", self.id_value, ID_SUFFIX)
    }
}
