//! Sample source adapter over a seekable byte stream.
//!
//! Codecs that pull compressed bytes on demand need four capabilities from
//! their input: the current position, bounded reads, absolute seeks, and a
//! probe for whether an offset lies within the known stream size. A
//! [`SampleSource`] provides exactly those over any `Read + Seek`, and itself
//! implements `Read + Seek` so stream-reader adapters (such as
//! `libheif_rs::StreamReader`) can drive it directly.

use std::io::{self, Read, Seek, SeekFrom};

/// A logical cursor over an immutable, seekable byte sequence.
///
/// The source does not own the underlying bytes in any semantic sense; it is
/// a positioned view whose total length is fixed at construction time.
#[derive(Debug)]
pub struct SampleSource<R> {
    stream: R,
    len: u64,
}

impl<R: Read + Seek> SampleSource<R> {
    /// Wraps a seekable stream, measuring its total length.
    ///
    /// The cursor is left at the start of the stream.
    pub fn new(mut stream: R) -> io::Result<Self> {
        let len = stream.seek(SeekFrom::End(0))?;
        stream.seek(SeekFrom::Start(0))?;
        Ok(Self { stream, len })
    }

    /// Total length of the underlying byte sequence.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// True when the underlying byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current byte position of the cursor.
    pub fn position(&mut self) -> io::Result<u64> {
        self.stream.stream_position()
    }

    /// Reads exactly `buf.len()` bytes or fails.
    ///
    /// Short reads surface as `UnexpectedEof`; the cursor position after a
    /// failed read is unspecified.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.stream.read_exact(buf)
    }

    /// Seeks to an absolute byte offset.
    pub fn seek_to(&mut self, pos: u64) -> io::Result<()> {
        self.stream.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    /// Size-growth probe: whether `offset` lies within the known total size.
    ///
    /// Streaming-capable codecs use this to decide between waiting for more
    /// data and reporting truncation; for a fixed-size source the answer is
    /// immediate.
    pub fn covers(&self, offset: u64) -> bool {
        offset <= self.len
    }

    /// Reads up to `buf.len()` leading bytes and restores the cursor.
    ///
    /// Returns the number of bytes actually available, which may be short;
    /// the position is restored regardless of the outcome.
    pub fn peek_prefix(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let pos = self.stream.stream_position()?;
        self.stream.seek(SeekFrom::Start(0))?;
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.stream.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        self.stream.seek(SeekFrom::Start(pos))?;
        Ok(filled)
    }
}

impl<R: Read + Seek> Read for SampleSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl<R: Read + Seek> Seek for SampleSource<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.stream.seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_len_and_initial_position() {
        let mut src = SampleSource::new(Cursor::new(vec![1u8, 2, 3, 4])).unwrap();
        assert_eq!(src.len(), 4);
        assert_eq!(src.position().unwrap(), 0);
    }

    #[test]
    fn test_read_exact_and_seek() {
        let mut src = SampleSource::new(Cursor::new(vec![10u8, 20, 30, 40])).unwrap();
        let mut buf = [0u8; 2];
        src.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [10, 20]);

        src.seek_to(3).unwrap();
        src.read_exact(&mut buf[..1]).unwrap();
        assert_eq!(buf[0], 40);
    }

    #[test]
    fn test_short_read_fails() {
        let mut src = SampleSource::new(Cursor::new(vec![1u8, 2])).unwrap();
        let mut buf = [0u8; 4];
        assert!(src.read_exact(&mut buf).is_err());
    }

    #[test]
    fn test_covers() {
        let src = SampleSource::new(Cursor::new(vec![0u8; 10])).unwrap();
        assert!(src.covers(0));
        assert!(src.covers(10));
        assert!(!src.covers(11));
    }

    #[test]
    fn test_peek_prefix_restores_position() {
        let mut src = SampleSource::new(Cursor::new(vec![5u8; 20])).unwrap();
        src.seek_to(7).unwrap();

        let mut buf = [0u8; 12];
        assert_eq!(src.peek_prefix(&mut buf).unwrap(), 12);
        assert_eq!(src.position().unwrap(), 7);
    }

    #[test]
    fn test_peek_prefix_short_input() {
        let mut src = SampleSource::new(Cursor::new(vec![9u8; 5])).unwrap();
        let mut buf = [0u8; 12];
        assert_eq!(src.peek_prefix(&mut buf).unwrap(), 5);
        assert_eq!(src.position().unwrap(), 0);
    }
}
