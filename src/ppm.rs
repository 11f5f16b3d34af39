//! Binary PPM (`P6`) output.

use crate::PixelBuffer;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

/// Writes scanlines of `width * 3` bytes after a `P6` header.
///
/// The header goes out as soon as the writer is created.
pub struct PpmWriter<W: Write> {
    writer: W,
    width: u32,
    height: u32,
    rows_written: u32,
}

impl PpmWriter<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P, width: u32, height: u32) -> io::Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), width, height)
    }
}

impl<W: Write> PpmWriter<W> {
    pub fn new(mut writer: W, width: u32, height: u32) -> io::Result<Self> {
        write!(writer, "P6\n{} {}\n255\n", width, height)?;

        Ok(Self { writer, width, height, rows_written: 0 })
    }

    pub fn write_scanline(&mut self, scanline: &[u8]) -> io::Result<()> {
        if self.rows_written >= self.height {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("image only has {} rows", self.height),
            ));
        }

        let expected_len = self.width as u64 * 3;
        if scanline.len() as u64 != expected_len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("scanline is {} bytes, expected {}", scanline.len(), expected_len),
            ));
        }

        self.writer.write_all(scanline)?;
        self.rows_written += 1;

        Ok(())
    }

    /// Flushes and hands back the inner writer. Fails if rows are missing.
    pub fn finish(mut self) -> io::Result<W> {
        if self.rows_written != self.height {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("wrote {} of {} rows", self.rows_written, self.height),
            ));
        }

        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl PixelBuffer {
    pub fn write_ppm<W: Write>(&self, writer: W) -> io::Result<W> {
        let mut ppm = PpmWriter::new(writer, self.width(), self.height())?;
        for row in self.rows() {
            ppm.write_scanline(row)?;
        }

        ppm.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_written_immediately() {
        let ppm = PpmWriter::new(Vec::new(), 640, 480).unwrap();
        assert_eq!(ppm.writer, b"P6\n640 480\n255\n".to_vec());
    }

    #[test]
    fn scanlines_follow_header_without_padding() {
        let mut ppm = PpmWriter::new(Vec::new(), 2, 2).unwrap();
        ppm.write_scanline(&[1, 2, 3, 4, 5, 6]).unwrap();
        ppm.write_scanline(&[7, 8, 9, 10, 11, 12]).unwrap();

        let bytes = ppm.finish().unwrap();
        let mut expected = b"P6\n2 2\n255\n".to_vec();
        expected.extend(1..=12);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn rejects_wrong_scanline_length() {
        let mut ppm = PpmWriter::new(Vec::new(), 2, 1).unwrap();
        let err = ppm.write_scanline(&[1, 2, 3, 4]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn rejects_extra_rows() {
        let mut ppm = PpmWriter::new(Vec::new(), 1, 1).unwrap();
        ppm.write_scanline(&[1, 2, 3]).unwrap();

        let err = ppm.write_scanline(&[4, 5, 6]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn finish_requires_every_row() {
        let mut ppm = PpmWriter::new(Vec::new(), 1, 2).unwrap();
        ppm.write_scanline(&[1, 2, 3]).unwrap();

        let err = ppm.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn pixel_buffer_dumps_rows_in_order() {
        let image = PixelBuffer { width: 1, height: 2, pixels: vec![1, 2, 3, 4, 5, 6] };

        let bytes = image.write_ppm(Vec::new()).unwrap();
        assert_eq!(bytes, b"P6\n1 2\n255\n\x01\x02\x03\x04\x05\x06".to_vec());
    }
}
