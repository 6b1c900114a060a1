//! Opens triple dumps as line streams, decompressing `.gz` and `.bz2` files on the fly.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;

use crate::error::{Error, Result};

const READ_BUFFER_BYTES: usize = 1 << 20;

/// Compression format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Bzip2,
    None,
}

impl Compression {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => Compression::Gzip,
            Some("bz2") => Compression::Bzip2,
            _ => Compression::None,
        }
    }
}

/// An open triple file. Dropping it closes the underlying file.
pub struct TripleSource {
    path: PathBuf,
    compression: Compression,
    reader: Box<dyn BufRead>,
}

impl TripleSource {
    /// Open `path`, wrapping it in a decoder when the extension asks for one.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|source| Error::Open { path: path.to_path_buf(), source })?;
        let compression = Compression::from_path(path);

        let reader: Box<dyn BufRead> = match compression {
            Compression::Gzip => {
                Box::new(BufReader::with_capacity(READ_BUFFER_BYTES, MultiGzDecoder::new(file)))
            }
            Compression::Bzip2 => {
                Box::new(BufReader::with_capacity(READ_BUFFER_BYTES, MultiBzDecoder::new(file)))
            }
            Compression::None => Box::new(BufReader::with_capacity(READ_BUFFER_BYTES, file)),
        };

        Ok(Self { path: path.to_path_buf(), compression, reader })
    }

    /// Wrap an already decoded reader; `name` only shows up in errors and logs.
    pub fn from_reader(name: impl Into<PathBuf>, reader: impl Read + 'static) -> Self {
        Self {
            path: name.into(),
            compression: Compression::None,
            reader: Box::new(BufReader::new(reader)),
        }
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Lines of the file, each with its trailing newline.
    pub fn lines(self) -> SourceLines {
        SourceLines { path: self.path, reader: self.reader, index: 0 }
    }
}

/// Iterator over the lines of a [`TripleSource`].
pub struct SourceLines {
    path: PathBuf,
    reader: Box<dyn BufRead>,
    index: u64,
}

impl Iterator for SourceLines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                self.index += 1;
                Some(Ok(line))
            }
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                Some(Err(Error::Encoding { path: self.path.clone(), line: self.index }))
            }
            Err(err) => Some(Err(Error::Io(err))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_compression_from_extension() {
        assert_eq!(Compression::from_path(Path::new("page_links_en.ttl.bz2")), Compression::Bzip2);
        assert_eq!(Compression::from_path(Path::new("redirects.ttl.gz")), Compression::Gzip);
        assert_eq!(Compression::from_path(Path::new("labels.ttl")), Compression::None);
        assert_eq!(Compression::from_path(Path::new("labels")), Compression::None);
    }

    #[test]
    fn test_missing_file() {
        let result = TripleSource::open("does/not/exist.ttl");
        assert!(matches!(result, Err(Error::Open { .. })));
    }

    #[test]
    fn test_lines_keep_newlines() {
        let source = TripleSource::from_reader("memory", "# header\n<a> <b> <c> .\n".as_bytes());
        let lines: Vec<String> = source.lines().collect::<Result<_>>().unwrap();
        assert_eq!(lines, vec!["# header\n".to_string(), "<a> <b> <c> .\n".to_string()]);
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        let bytes: &'static [u8] = b"# header\n\xff\xfe .\n";
        let mut lines = TripleSource::from_reader("broken.ttl", bytes).lines();
        assert!(lines.next().unwrap().is_ok());
        match lines.next().unwrap() {
            Err(Error::Encoding { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected encoding error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_gzip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triples.ttl.gz");
        let mut encoder = flate2::write::GzEncoder::new(
            File::create(&path).unwrap(),
            flate2::Compression::default(),
        );
        encoder.write_all(b"# header\n<a> <b> <c> .\n").unwrap();
        encoder.finish().unwrap();

        let source = TripleSource::open(&path).unwrap();
        assert_eq!(source.compression(), Compression::Gzip);
        assert_eq!(source.lines().count(), 2);
    }
}
