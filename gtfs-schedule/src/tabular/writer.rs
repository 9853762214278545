use super::error::WriteError;
use super::field::FieldDescriptor;
use super::Tabular;
use std::io::Write;
use std::marker::PhantomData;

enum Sink<W: Write> {
    Csv(csv::Writer<W>),
    // csv writes `""` for a row without cells, an empty line is written instead
    NoColumn(W),
}

/// Writes records of type `T` as csv rows
///
/// The header lists the non omitted fields in declaration order and is written
/// on creation.
pub struct TabularWriter<W: Write, T> {
    sink: Sink<W>,
    columns: Vec<&'static FieldDescriptor>,
    _record_type: PhantomData<fn(&T)>,
}

impl<W: Write, T: Tabular> TabularWriter<W, T> {
    /// Writes the header to `writer`
    pub fn new(writer: W) -> Result<Self, WriteError> {
        Self::with_builder(&csv::WriterBuilder::new(), writer)
    }

    /// Writes the header to `writer`, with the csv settings of `builder`
    pub fn with_builder(builder: &csv::WriterBuilder, mut writer: W) -> Result<Self, WriteError> {
        let columns: Vec<&'static FieldDescriptor> = T::field_map().columns().collect();
        let sink = if columns.is_empty() {
            writer.write_all(b"\n")?;
            Sink::NoColumn(writer)
        } else {
            let mut writer = builder.from_writer(writer);
            writer.write_record(columns.iter().map(|c| c.name))?;
            Sink::Csv(writer)
        };
        Ok(TabularWriter {
            sink,
            columns,
            _record_type: PhantomData,
        })
    }

    /// Writes one record as a row
    pub fn write(&mut self, record: &T) -> Result<(), WriteError> {
        match &mut self.sink {
            Sink::NoColumn(writer) => writer.write_all(b"\n")?,
            Sink::Csv(writer) => {
                let cells = self
                    .columns
                    .iter()
                    .map(|c| {
                        (T::FIELDS[c.slot].encode)(record).map_err(|source| WriteError::Format {
                            name: c.name,
                            source,
                        })
                    })
                    .collect::<Result<Vec<String>, WriteError>>()?;
                writer.write_record(&cells)?;
            }
        }
        Ok(())
    }

    /// Writes all buffered rows to the underlying writer
    pub fn flush(&mut self) -> Result<(), WriteError> {
        match &mut self.sink {
            Sink::Csv(writer) => writer.flush()?,
            Sink::NoColumn(writer) => writer.flush()?,
        }
        Ok(())
    }

    /// Flushes and gives back the underlying writer
    pub fn into_inner(self) -> Result<W, WriteError> {
        match self.sink {
            Sink::Csv(writer) => writer
                .into_inner()
                .map_err(|e| WriteError::Io(e.into_error())),
            Sink::NoColumn(mut writer) => {
                writer.flush()?;
                Ok(writer)
            }
        }
    }
}
