use crate::common::Value;
use crate::document::Document;
use crate::errors::{CopyError, CopyResult, ErrorKind};

impl Document {
    /// Reads a scalar field.
    ///
    /// The identity field reads as [Value::Id]. A declared field with no
    /// value reads as [Value::Null].
    pub fn get(&self, field: &str) -> CopyResult<Value> {
        if self.doc_type.is_identity(field) {
            return Ok(Value::Id(self.id));
        }
        self.ensure_scalar(field)?;
        Ok(self.data.get(field).cloned().unwrap_or_default())
    }

    /// Assigns a scalar field and records it as changed.
    ///
    /// The identity field is read-only and fails with
    /// [ErrorKind::InvalidOperation].
    pub fn put<T: Into<Value>>(&mut self, field: &str, value: T) -> CopyResult<()> {
        let value = value.into();
        let previous = self.current_value(field)?;
        self.write_scalar(field, value)?;
        self.changes.record(field, previous);
        Ok(())
    }

    /// Clears a scalar field. Equivalent to assigning [Value::Null].
    pub fn unset(&mut self, field: &str) -> CopyResult<()> {
        self.put(field, Value::Null)
    }

    /// Whether a field holds a present value. An embedded collection is
    /// present when it has at least one child.
    pub fn is_present(&self, field: &str) -> CopyResult<bool> {
        if self.doc_type.is_identity(field) {
            return Ok(true);
        }
        let declaration = self.doc_type.require_field(field)?;
        if declaration.is_embedded() {
            return Ok(!self.collection(field)?.is_empty());
        }
        Ok(self.data.get(field).map_or(false, Value::is_present))
    }

    /// Scalar values in declaration order, absent fields reading as null.
    pub fn values(&self) -> Vec<(String, Value)> {
        self.doc_type
            .scalar_fields()
            .map(|declaration| {
                let value = self.data.get(declaration.name()).cloned().unwrap_or_default();
                (declaration.name().to_string(), value)
            })
            .collect()
    }

    /// Stores a scalar value without recording a change.
    pub(crate) fn write_scalar(&mut self, field: &str, value: Value) -> CopyResult<()> {
        if self.doc_type.is_identity(field) {
            log::error!(
                "Identity field '{}' of '{}' cannot be assigned",
                field,
                self.type_name()
            );
            return Err(CopyError::new(
                &format!(
                    "Identity field '{}' of '{}' cannot be assigned",
                    field,
                    self.type_name()
                ),
                ErrorKind::InvalidOperation,
            ));
        }
        self.ensure_scalar(field)?;
        self.data = self.data.update(field.to_string(), value);
        Ok(())
    }

    fn current_value(&self, field: &str) -> CopyResult<Value> {
        if self.doc_type.is_identity(field) {
            return Ok(Value::Id(self.id));
        }
        Ok(self.data.get(field).cloned().unwrap_or_default())
    }

    fn ensure_scalar(&self, field: &str) -> CopyResult<()> {
        let declaration = self.doc_type.require_field(field)?;
        if declaration.is_embedded() {
            log::error!(
                "Field '{}' of '{}' is an embedded collection, not a scalar",
                field,
                self.type_name()
            );
            return Err(CopyError::new(
                &format!(
                    "Field '{}' of '{}' is an embedded collection, not a scalar",
                    field,
                    self.type_name()
                ),
                ErrorKind::FieldKindMismatch,
            ));
        }
        Ok(())
    }
}
