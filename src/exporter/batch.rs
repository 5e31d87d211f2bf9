use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanBuilder, Float64Builder, PrimitiveBuilder, StringBuilder};
use arrow::datatypes::{
    ArrowPrimitiveType, DataType, Field, Int16Type, Int32Type, Int64Type, Int8Type, SchemaRef,
};
use arrow::record_batch::RecordBatch;

use crate::config::ColumnValue;

use super::error::ExportError;
use super::row::Row;

/// Accumulates rows column by column and emits them as record batches.
///
/// Every column buffer holds exactly one entry per collected row; columns a
/// row does not set are stored as nulls.
#[derive(Debug)]
pub struct BatchCollector {
    schema: SchemaRef,
    columns: Vec<Vec<Option<ColumnValue>>>,
    row_count: usize,
}

impl BatchCollector {
    /// Create an empty collector for a schema
    pub fn new(schema: SchemaRef) -> Self {
        let columns = vec![Vec::new(); schema.fields().len()];
        Self {
            schema,
            columns,
            row_count: 0,
        }
    }

    /// Schema of the emitted batches
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Number of collected rows
    pub fn len(&self) -> usize {
        self.row_count
    }

    /// True if no rows are collected
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Append a row.
    ///
    /// Fails without modifying the collector if the row has columns that
    /// are not in the schema.
    pub fn add_to_batch(&mut self, mut row: Row) -> Result<(), ExportError> {
        let unexpected: Vec<String> = row
            .columns()
            .filter(|name| self.schema.column_with_name(name).is_none())
            .map(str::to_string)
            .collect();
        if !unexpected.is_empty() {
            return Err(ExportError::UnexpectedColumns(unexpected));
        }

        for (field, buffer) in self.schema.fields().iter().zip(self.columns.iter_mut()) {
            buffer.push(row.take(field.name()));
        }
        self.row_count += 1;
        Ok(())
    }

    /// Convert the collected rows to a record batch and reset the collector.
    ///
    /// Returns `None` when no rows are collected.
    pub fn make_record_batch(&mut self) -> Result<Option<RecordBatch>, ExportError> {
        if self.row_count == 0 {
            return Ok(None);
        }

        let capacity = self.row_count;
        let buffers: Vec<Vec<Option<ColumnValue>>> = self
            .columns
            .iter_mut()
            .map(|buffer| std::mem::replace(buffer, Vec::with_capacity(capacity)))
            .collect();
        self.row_count = 0;

        let arrays = self
            .schema
            .fields()
            .iter()
            .zip(&buffers)
            .map(|(field, values)| build_array(field, values))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(RecordBatch::try_new(self.schema.clone(), arrays)?))
    }

    #[cfg(test)]
    pub(crate) fn buffer_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().map(Vec::len)
    }
}

fn type_error(field: &Field, value: &ColumnValue) -> ExportError {
    ExportError::ColumnType {
        column: field.name().clone(),
        expected: field.data_type().to_string(),
        found: format!("{} {}", value.kind(), value),
    }
}

fn build_array(field: &Field, values: &[Option<ColumnValue>]) -> Result<ArrayRef, ExportError> {
    match field.data_type() {
        DataType::Utf8 => {
            let mut builder = StringBuilder::with_capacity(values.len(), values.len() * 16);
            for value in values {
                match value {
                    None => builder.append_null(),
                    Some(ColumnValue::Str(s)) => builder.append_value(s),
                    Some(other) => return Err(type_error(field, other)),
                }
            }
            Ok(Arc::new(builder.finish()))
        }
        DataType::Float64 => {
            let mut builder = Float64Builder::with_capacity(values.len());
            for value in values {
                match value {
                    None => builder.append_null(),
                    Some(ColumnValue::Float(x)) => builder.append_value(*x),
                    Some(ColumnValue::Int(i)) => builder.append_value(*i as f64),
                    Some(other) => return Err(type_error(field, other)),
                }
            }
            Ok(Arc::new(builder.finish()))
        }
        DataType::Boolean => {
            let mut builder = BooleanBuilder::with_capacity(values.len());
            for value in values {
                match value {
                    None => builder.append_null(),
                    Some(ColumnValue::Bool(b)) => builder.append_value(*b),
                    Some(other) => return Err(type_error(field, other)),
                }
            }
            Ok(Arc::new(builder.finish()))
        }
        DataType::Int8 => build_integers::<Int8Type>(field, values),
        DataType::Int16 => build_integers::<Int16Type>(field, values),
        DataType::Int32 => build_integers::<Int32Type>(field, values),
        DataType::Int64 => build_integers::<Int64Type>(field, values),
        other => Err(ExportError::ColumnType {
            column: field.name().clone(),
            expected: other.to_string(),
            found: "unsupported column type".to_string(),
        }),
    }
}

fn build_integers<T>(
    field: &Field,
    values: &[Option<ColumnValue>],
) -> Result<ArrayRef, ExportError>
where
    T: ArrowPrimitiveType,
    T::Native: TryFrom<i64>,
{
    let mut builder = PrimitiveBuilder::<T>::with_capacity(values.len());
    for value in values {
        match value {
            None => builder.append_null(),
            Some(ColumnValue::Int(i)) => {
                let narrowed = T::Native::try_from(*i)
                    .map_err(|_| type_error(field, &ColumnValue::Int(*i)))?;
                builder.append_value(narrowed);
            }
            Some(other) => return Err(type_error(field, other)),
        }
    }
    Ok(Arc::new(builder.finish()))
}
