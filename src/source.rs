use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::time::Instant;

use crate::counter;
use crate::error::{Error, Result};
use crate::index::{Build, PopulationIndex};
use crate::query::Query;
use crate::record::parse_record_bytes;

fn source_error(path: &Path, source: io::Error) -> Error {
    Error::Source {
        path: path.to_owned(),
        source,
    }
}

/// Raw lines of `reader` with `\n` or `\r\n` stripped.  Bytes are left as they
/// are so that a line which isn't UTF-8 is only a bad line, not a read failure.
fn raw_lines(reader: impl BufRead) -> impl Iterator<Item = io::Result<Vec<u8>>> {
    reader.split(b'\n').map(|line| {
        line.map(|mut l| {
            if l.last() == Some(&b'\r') {
                l.pop();
            }
            l
        })
    })
}

pub fn count_records(path: &Path) -> Result<usize> {
    let file = File::open(path).map_err(|e| source_error(path, e))?;
    let mut n = 0;
    for line in raw_lines(BufReader::new(file)) {
        line.map_err(|e| source_error(path, e))?;
        n += 1;
    }
    Ok(n)
}

/// Builds an index from a file with one record per line.
///
/// The file is read twice: once to size the vectors and once to fill them.  If
/// the two passes disagree on the number of lines the build fails.
pub fn load_index(path: &Path) -> Result<Build> {
    let num_records = count_records(path)?;
    let file = File::open(path).map_err(|e| source_error(path, e))?;
    populate(num_records, BufReader::new(file), path)
}

// A read error stops the pass and wins over the count mismatch it causes.
pub(crate) fn populate(num_records: usize, reader: impl BufRead, path: &Path) -> Result<Build> {
    let mut failure = None;
    let records = raw_lines(reader).scan(&mut failure, |failure, line| match line {
        Ok(line) => Some(parse_record_bytes(&line)),
        Err(e) => {
            **failure = Some(e);
            None
        }
    });
    let build = PopulationIndex::build(num_records, records);
    if let Some(e) = failure {
        return Err(source_error(path, e));
    }
    build
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ServeStats {
    pub answered: usize,
    pub skipped: usize,
}

/// Answers one query per line of `input` until EOF.
///
/// Each valid query gets a `"e2 e3 e4 e5"` line on `output`.  Malformed queries
/// get nothing.  When `timings` is given, the time spent on each answered query
/// is reported there.
pub fn serve(
    index: &PopulationIndex,
    input: impl BufRead,
    mut output: impl Write,
    mut timings: Option<&mut dyn Write>,
) -> Result<ServeStats> {
    let mut stats = ServeStats::default();
    for line in raw_lines(input) {
        let line = line?;
        let start = Instant::now();
        let parsed = std::str::from_utf8(&line).ok().map(Query::parse);
        let query = match parsed {
            Some(Ok(q)) => q,
            _ => {
                stats.skipped += 1;
                continue;
            }
        };
        let counts = counter::count(index, &query);
        writeln!(output, "{}", counts)?;
        output.flush()?;
        stats.answered += 1;

        if let Some(ref mut t) = timings {
            writeln!(t, "Query took: {} ms", start.elapsed().as_millis())?;
        }
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::{count_records, load_index, populate, serve, ServeStats};
    use crate::error::{Error, RecordError};
    use crate::index::PopulationIndex;

    use std::io::{self, BufReader, Read, Write};
    use std::path::Path;
    use tempfile::NamedTempFile;

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk went away"))
        }
    }

    fn write_records(lines: &[u8]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(lines).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn test_load_index() {
        let f = write_records(b"1 2 3 4 5\n1 2 3 4 6\n1 2 3 4 91\n7 8 9 10 11\n");
        assert_eq!(count_records(f.path()).unwrap(), 4);

        let build = load_index(f.path()).unwrap();
        assert_eq!(build.index.num_participants(), 4);
        assert_eq!(build.diagnostics.len(), 1);
        assert_eq!(build.diagnostics[0].index, 2);
        assert_eq!(build.diagnostics[0].error, RecordError::OutOfRange { value: 91 });
        assert_eq!(build.index.intersection_count(&[1, 2, 3, 4]), 2);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        match load_index(&path) {
            Err(Error::Source { path: p, .. }) => assert_eq!(p, path),
            r => panic!("unexpected result {:?}", r.map(|b| b.index.num_participants())),
        }
    }

    #[test]
    fn test_serve() {
        let index = PopulationIndex::from_picks(&[
            [1, 2, 3, 4, 5],
            [1, 2, 3, 4, 6],
            [7, 8, 9, 10, 11],
        ]);
        let input = "1 2 3 4 5\n\
                     1 2 3\n\
                     1 1 2 3 4\n\
                     1 2 3 4 91\n\
                     nope 2 3 4 5\n\
                     7 8 9 1 2\n";
        let mut output: Vec<u8> = vec![];
        let mut timings: Vec<u8> = vec![];
        let stats = serve(&index, input.as_bytes(), &mut output, Some(&mut timings)).unwrap();

        assert_eq!(
            stats,
            ServeStats {
                answered: 2,
                skipped: 4
            }
        );
        assert_eq!(String::from_utf8(output).unwrap(), "0 0 1 1\n2 1 0 0\n");
        let timings = String::from_utf8(timings).unwrap();
        assert_eq!(timings.lines().count(), 2);
        assert!(timings.lines().all(|l| l.starts_with("Query took: ") && l.ends_with(" ms")));
    }

    #[test]
    fn test_serve_without_timings() {
        let index = PopulationIndex::from_picks(&[]);
        let mut output: Vec<u8> = vec![];
        let stats = serve(&index, &b"10 20 30 40 50\n"[..], &mut output, None).unwrap();
        assert_eq!(stats.answered, 1);
        assert_eq!(output, b"0 0 0 0\n");
    }

    #[test]
    fn test_load_index_non_utf8_record() {
        let f = write_records(b"1 2 3 4 5\r\n1 2 3 4 \xff\n6 7 8 9 10");
        assert_eq!(count_records(f.path()).unwrap(), 3);

        let build = load_index(f.path()).unwrap();
        assert_eq!(build.index.num_participants(), 3);
        assert_eq!(build.diagnostics.len(), 1);
        assert_eq!(build.diagnostics[0].index, 1);
        assert_eq!(build.diagnostics[0].error, RecordError::NotUtf8);
        assert_eq!(build.index.intersection_count(&[1, 2, 3, 4, 5]), 1);
        assert_eq!(build.index.intersection_count(&[6, 7, 8, 9, 10]), 1);
        assert_eq!(build.index.membership(4).unwrap().count_ones(), 1);
    }

    #[test]
    fn test_read_failure_during_populate() {
        let reader = BufReader::new((&b"1 2 3 4 5\n"[..]).chain(BrokenReader));
        match populate(3, reader, Path::new("players.txt")) {
            Err(Error::Source { path, source }) => {
                assert_eq!(path, Path::new("players.txt"));
                assert_eq!(source.kind(), io::ErrorKind::Other);
            }
            r => panic!("unexpected result {:?}", r.map(|b| b.index.num_participants())),
        }
    }

    #[test]
    fn test_serve_skips_non_utf8_query() {
        let index = PopulationIndex::from_picks(&[[1, 2, 3, 4, 5]]);
        let mut output: Vec<u8> = vec![];
        let input = &b"\xff 2 3 4 5\n1 2 3 4 5\r\n"[..];
        let stats = serve(&index, input, &mut output, None).unwrap();
        assert_eq!(
            stats,
            ServeStats {
                answered: 1,
                skipped: 1
            }
        );
        assert_eq!(output, b"0 0 0 1\n");
    }

    #[test]
    fn test_serve_read_failure() {
        let index = PopulationIndex::from_picks(&[]);
        let mut output: Vec<u8> = vec![];
        let input = BufReader::new((&b"1 2 3 4 5\n"[..]).chain(BrokenReader));
        match serve(&index, input, &mut output, None) {
            Err(Error::Stream(e)) => assert_eq!(e.kind(), io::ErrorKind::Other),
            r => panic!("unexpected result {:?}", r),
        }
        assert_eq!(output, b"0 0 0 0\n");
    }
}
