use arrow::datatypes::Schema;

use super::builders::create_static_schema;

/// Validates that a schema carries every standard ObsCore column.
///
/// Returns `Ok(())` if all static columns exist with their expected types,
/// or an error describing the first incompatibility. Extra columns are
/// allowed.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaValidationError> {
    let reference = create_static_schema();

    for expected in reference.fields() {
        match schema.field_with_name(expected.name()) {
            Ok(field) => {
                if field.data_type() != expected.data_type() {
                    return Err(SchemaValidationError::TypeMismatch {
                        column: expected.name().to_string(),
                        expected: format!("{:?}", expected.data_type()),
                        found: format!("{:?}", field.data_type()),
                    });
                }
            }
            Err(_) => {
                return Err(SchemaValidationError::MissingColumn(expected.name().to_string()));
            }
        }
    }

    Ok(())
}

/// Errors that can occur during schema validation
#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    /// A required column is missing from the schema
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A column has an incorrect data type
    #[error("Type mismatch for column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the column with the type mismatch
        column: String,
        /// Expected data type
        expected: String,
        /// Actual data type found
        found: String,
    },
}
