//! Byte sources and sinks the codec reads from and writes to.

use alloc::vec::Vec;

use crate::error::PixmapError;

/// Sequential input the tokenizer pulls bytes from.
pub trait ByteSource {
    /// Fill as much of `buf` as is available and return the count.
    ///
    /// A count shorter than `buf.len()` (including zero) means the source is
    /// exhausted. Errors are reserved for genuine transport failures.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, PixmapError>;
}

/// Sequential output the encoder writes text to.
pub trait ByteSink {
    /// Write `data` and return how many bytes were accepted.
    ///
    /// Accepting fewer than `data.len()` bytes fails the encode with
    /// [`PixmapError::ShortWrite`].
    fn write(&mut self, data: &[u8]) -> Result<usize, PixmapError>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, PixmapError> {
        (**self).read(buf)
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn write(&mut self, data: &[u8]) -> Result<usize, PixmapError> {
        (**self).write(data)
    }
}

/// Byte source over a borrowed buffer.
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        self.data
    }
}

impl ByteSource for SliceSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, PixmapError> {
        let n = buf.len().min(self.data.len());
        let (head, tail) = self.data.split_at(n);
        buf[..n].copy_from_slice(head);
        self.data = tail;
        Ok(n)
    }
}

impl ByteSink for Vec<u8> {
    fn write(&mut self, data: &[u8]) -> Result<usize, PixmapError> {
        self.extend_from_slice(data);
        Ok(data.len())
    }
}

/// Byte source over any [`std::io::Read`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> IoSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ByteSource for IoSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, PixmapError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(PixmapError::Io(std::format!("{e}"))),
            }
        }
        Ok(filled)
    }
}

/// Byte sink over any [`std::io::Write`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
}

#[cfg(feature = "std")]
impl<W: std::io::Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> ByteSink for IoSink<W> {
    fn write(&mut self, data: &[u8]) -> Result<usize, PixmapError> {
        self.inner
            .write_all(data)
            .map_err(|e| PixmapError::Io(std::format!("{e}")))?;
        Ok(data.len())
    }
}
