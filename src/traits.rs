use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Seek, Write},
    path::Path,
};

use crate::{error::Error, types::Documents};

/// Encoding of a whole document set into one file (spreadsheet, JSON, YAML).
pub trait DocumentCodec {
    /// Decode from any seekable reader.
    fn decode<R: Read + Seek>(&self, reader: R) -> Result<Documents, Error>;

    /// Encode to any writer (file, memory, etc.).
    fn encode<W: Write>(&self, docs: &Documents, writer: W) -> Result<(), Error>;

    /// Decode from file path, recording it as the set's source path.
    fn read_from<P: AsRef<Path>>(&self, path: P) -> Result<Documents, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::read(path, e))?;
        let mut docs = self.decode(BufReader::new(file))?;
        docs.path = path.display().to_string();
        Ok(docs)
    }

    /// Encode to file path, replacing any existing file.
    fn write_to<P: AsRef<Path>>(&self, docs: &Documents, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::write(path, e))?;
        let mut writer = BufWriter::new(file);
        self.encode(docs, &mut writer)?;
        writer.flush().map_err(|e| Error::write(path, e))
    }
}
