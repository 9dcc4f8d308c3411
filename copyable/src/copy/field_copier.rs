use crate::copy::{FieldOutcome, MergePolicy};
use crate::document::Document;
use crate::errors::CopyResult;

/// Copies one scalar field between two documents under a [MergePolicy].
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldCopier;

impl FieldCopier {
    pub fn new() -> Self {
        FieldCopier
    }

    /// Copies `field` from `source` to `destination` unless `policy` says to
    /// skip it. The destination's change tracker records a copied field like
    /// any other assignment.
    pub fn copy_field(
        &self,
        source: &Document,
        destination: &mut Document,
        field: &str,
        policy: MergePolicy,
    ) -> CopyResult<FieldOutcome> {
        let source_value = source.get(field)?;
        let destination_value = destination.get(field)?;

        let outcome = policy.decide(&source_value, &destination_value);
        match outcome {
            FieldOutcome::Copied => {
                log::debug!(
                    "Copying field '{}' of {} to {}",
                    field,
                    source.id(),
                    destination.id()
                );
                destination.put(field, source_value)?;
            }
            FieldOutcome::Skipped(reason) => {
                log::debug!(
                    "Skipping field '{}' of {} ({:?})",
                    field,
                    destination.id(),
                    reason
                );
            }
        }
        Ok(outcome)
    }
}
