use crate::copy::CopyOptions;

/// Settings shared by every operation of a [crate::copy::DocumentCopier].
///
/// * `default_options`: options used by
///   [crate::copy::DocumentCopier::copy_fields_with_defaults].
/// * `require_same_type`: reject copies between documents of different
///   types with [crate::errors::ErrorKind::TypeMismatch]. On by default; when
///   off, fields are matched by name and must agree in kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopierConfig {
    default_options: CopyOptions,
    require_same_type: bool,
}

impl Default for CopierConfig {
    fn default() -> Self {
        CopierConfig {
            default_options: CopyOptions::default(),
            require_same_type: true,
        }
    }
}

impl CopierConfig {
    pub fn new() -> Self {
        CopierConfig::default()
    }

    pub fn default_options(&self) -> CopyOptions {
        self.default_options
    }

    pub fn require_same_type(&self) -> bool {
        self.require_same_type
    }

    pub(crate) fn set_default_options(&mut self, options: CopyOptions) {
        self.default_options = options;
    }

    pub(crate) fn set_require_same_type(&mut self, require_same_type: bool) {
        self.require_same_type = require_same_type;
    }
}
