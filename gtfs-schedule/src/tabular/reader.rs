use super::error::ReadError;
use super::Tabular;
use std::io::Read;
use std::marker::PhantomData;

/// Reads the rows of a csv file as records of type `T`
///
/// Columns are matched to fields by the header names, so their order does not
/// matter. Columns with no field are handed to [Tabular::keep_unused] and fields
/// with no column keep their default value.
pub struct TabularReader<R, T> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    columns: Vec<Option<usize>>,
    record: csv::StringRecord,
    _record_type: PhantomData<fn() -> T>,
}

impl<R: Read, T: Tabular> TabularReader<R, T> {
    /// Reads `reader` with surrounding whitespace of cells and header trimmed
    pub fn new(reader: R) -> Result<Self, ReadError> {
        Self::from_csv(
            csv::ReaderBuilder::new()
                .flexible(true)
                .trim(csv::Trim::All)
                .from_reader(reader),
        )
    }

    /// Reads the header of an already configured csv reader
    ///
    /// The reader must be configured with headers, and `flexible` for the column
    /// count of a row to be reported by [TabularReader::read].
    pub fn from_csv(mut reader: csv::Reader<R>) -> Result<Self, ReadError> {
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
        let map = T::field_map();
        let columns = headers.iter().map(|h| map.slot(h)).collect();
        Ok(TabularReader {
            reader,
            headers,
            columns,
            record: csv::StringRecord::new(),
            _record_type: PhantomData,
        })
    }

    /// Column names of the file; empty for an empty file
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Line of the last row read
    pub fn line(&self) -> u64 {
        self.record.position().map_or(0, |p| p.line())
    }

    /// Reads the next row, [None] at the end of the input
    ///
    /// A failing row is skipped: the next call reads the row after it, unless
    /// the error is [fatal](ReadError::is_fatal).
    pub fn read(&mut self) -> Result<Option<T>, ReadError> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        let line = self.line();
        if self.record.len() != self.columns.len() {
            return Err(ReadError::ColumnCount {
                line,
                expected: self.columns.len(),
                found: self.record.len(),
            });
        }

        let mut value = T::default();
        for (column, cell) in self.record.iter().enumerate() {
            match self.columns[column] {
                Some(slot) => {
                    (T::FIELDS[slot].decode)(&mut value, cell).map_err(|source| {
                        ReadError::Field {
                            line,
                            column,
                            field: slot,
                            name: self.headers[column].clone(),
                            source,
                        }
                    })?
                }
                None => value.keep_unused(&self.headers[column], cell),
            }
        }
        Ok(Some(value))
    }
}

impl<R: Read, T: Tabular> Iterator for TabularReader<R, T> {
    type Item = Result<T, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::ParseError;
    use crate::tabular_record;

    #[derive(Debug, Default, PartialEq)]
    struct Platform {
        id: String,
        name: String,
        capacity: Option<u32>,
        accessible: bool,
        unused: Vec<(String, String)>,
    }

    tabular_record! {
        Platform {
            id: "platform_id",
            name: "platform_name",
            capacity,
            accessible,
        }
        unused: unused
    }

    fn platform(id: &str, name: &str, capacity: Option<u32>, accessible: bool) -> Platform {
        Platform {
            id: id.to_owned(),
            name: name.to_owned(),
            capacity,
            accessible,
            unused: vec![],
        }
    }

    fn read_all(content: &str) -> Vec<Result<Platform, ReadError>> {
        TabularReader::<_, Platform>::new(content.as_bytes())
            .unwrap()
            .collect()
    }

    #[test]
    fn header_order_does_not_matter() {
        let a: Vec<_> = read_all("platform_id,platform_name,capacity,accessible\nA,North,12,true\n")
            .into_iter()
            .map(Result::unwrap)
            .collect();
        let b: Vec<_> = read_all("accessible,capacity,platform_name,platform_id\ntrue,12,North,A\n")
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(a, vec![platform("A", "North", Some(12), true)]);
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_and_missing_columns() {
        let rows = read_all("platform_id,color , accessible\n A ,red,false\n");
        let expected = Platform {
            unused: vec![("color".to_owned(), "red".to_owned())],
            ..platform("A", "", None, false)
        };
        assert_eq!(rows.into_iter().map(Result::unwrap).collect::<Vec<_>>(), vec![expected]);
    }

    #[test]
    fn failing_rows_are_skipped() {
        let mut reader = TabularReader::<_, Platform>::new(
            "platform_id,capacity,accessible\nA,1,true\nB,many,true\nC,3\nD,4,false\n".as_bytes(),
        )
        .unwrap();
        assert_eq!(reader.headers(), &["platform_id", "capacity", "accessible"]);
        assert_eq!(reader.read().unwrap().unwrap().id, "A");
        match reader.read() {
            Err(ReadError::Field {
                line,
                column,
                field,
                name,
                source: ParseError::Integer { text, .. },
            }) => {
                assert_eq!(line, 3);
                assert_eq!(column, 1);
                assert_eq!(field, 2);
                assert_eq!(name, "capacity");
                assert_eq!(text, "many");
            }
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
        assert!(matches!(
            reader.read(),
            Err(ReadError::ColumnCount {
                line: 4,
                expected: 3,
                found: 2
            })
        ));
        assert_eq!(reader.read().unwrap().unwrap().id, "D");
        assert!(reader.read().unwrap().is_none());
    }

    #[test]
    fn empty_input() {
        let mut reader = TabularReader::<_, Platform>::new("".as_bytes()).unwrap();
        assert!(reader.headers().is_empty());
        assert!(reader.read().unwrap().is_none());
    }

    #[test]
    fn quoted_cells() {
        let rows = read_all("platform_id,platform_name\nA,\"North, upper level\"\n");
        assert_eq!(rows[0].as_ref().unwrap().name, "North, upper level");
    }
}
