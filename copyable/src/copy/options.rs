use crate::common::Value;

/// Options for [crate::copy::DocumentCopier::copy_fields_to].
///
/// * `overwrite_nil_only`: only fill destination fields that are currently
///   absent. Checked first.
/// * `ignore_nil_source`: never overwrite a destination field with an absent
///   source value. On by default.
///
/// Options only apply to scalar fields. Embedded collections named in a field
/// list are always duplicated.
///
/// # Examples
///
/// ```rust,ignore
/// use copyable::copy::CopyOptions;
///
/// // Defaults: skip absent sources, overwrite anything else
/// let options = CopyOptions::default();
///
/// // Fill gaps only
/// let options = CopyOptions::default().with_overwrite_nil_only(true);
///
/// // Propagate nulls too
/// let options = CopyOptions::new(false, false);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOptions {
    overwrite_nil_only: bool,
    ignore_nil_source: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        CopyOptions {
            overwrite_nil_only: false,
            ignore_nil_source: true,
        }
    }
}

impl CopyOptions {
    pub fn new(overwrite_nil_only: bool, ignore_nil_source: bool) -> Self {
        CopyOptions {
            overwrite_nil_only,
            ignore_nil_source,
        }
    }

    pub fn with_overwrite_nil_only(mut self, overwrite_nil_only: bool) -> Self {
        self.overwrite_nil_only = overwrite_nil_only;
        self
    }

    pub fn with_ignore_nil_source(mut self, ignore_nil_source: bool) -> Self {
        self.ignore_nil_source = ignore_nil_source;
        self
    }

    pub fn is_overwrite_nil_only(&self) -> bool {
        self.overwrite_nil_only
    }

    pub fn is_ignore_nil_source(&self) -> bool {
        self.ignore_nil_source
    }
}

/// Creates options that only fill absent destination fields.
pub fn overwrite_nil_only() -> CopyOptions {
    CopyOptions::new(true, true)
}

/// Creates options that copy absent source values over the destination.
pub fn copy_nil_source() -> CopyOptions {
    CopyOptions::new(false, false)
}

/// Why a scalar field was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The destination already held a value and only absent fields were to be
    /// filled.
    DestinationPresent,
    /// The source value was absent and absent sources are ignored.
    SourceAbsent,
}

/// Result of one scalar field decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldOutcome {
    Copied,
    Skipped(SkipReason),
}

impl FieldOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, FieldOutcome::Copied)
    }
}

/// The resolved per-field rule applied by [crate::copy::FieldCopier].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergePolicy {
    skip_if_destination_present: bool,
    skip_if_source_absent: bool,
}

impl MergePolicy {
    /// Copy unconditionally, absent values included.
    pub const ALWAYS: MergePolicy = MergePolicy {
        skip_if_destination_present: false,
        skip_if_source_absent: false,
    };

    pub fn new(skip_if_destination_present: bool, skip_if_source_absent: bool) -> Self {
        MergePolicy {
            skip_if_destination_present,
            skip_if_source_absent,
        }
    }

    pub fn is_always(&self) -> bool {
        *self == MergePolicy::ALWAYS
    }

    /// Decides a single field. A present destination is checked before an
    /// absent source.
    pub fn decide(&self, source: &Value, destination: &Value) -> FieldOutcome {
        if self.skip_if_destination_present && destination.is_present() {
            FieldOutcome::Skipped(SkipReason::DestinationPresent)
        } else if self.skip_if_source_absent && source.is_null() {
            FieldOutcome::Skipped(SkipReason::SourceAbsent)
        } else {
            FieldOutcome::Copied
        }
    }
}

impl From<&CopyOptions> for MergePolicy {
    fn from(options: &CopyOptions) -> Self {
        MergePolicy::new(options.overwrite_nil_only, options.ignore_nil_source)
    }
}

impl From<CopyOptions> for MergePolicy {
    fn from(options: CopyOptions) -> Self {
        MergePolicy::from(&options)
    }
}
