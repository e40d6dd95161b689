//! Tokenizer and chunk reader for the plain PPM text stream.
//!
//! Tokens are maximal runs of non-delimiter bytes. `#` starts a comment that
//! runs through the end of the line and yields nothing.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::PixmapError;
use crate::stream::ByteSource;

/// One whitespace-delimited word of the stream. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Token(String);

impl Token {
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        debug_assert!(!s.is_empty());
        Token(s)
    }
}

/// Longest token accepted. Any valid label, header field or component is far
/// shorter; the cap keeps a single runaway token from growing unbounded.
pub(crate) const MAX_TOKEN_LEN: usize = 1024;

const fn is_delimiter(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Splits a byte source into tokens, reading one byte at a time.
///
/// The delimiter that ends a token is consumed with it, so no byte ever has
/// to be pushed back.
pub(crate) struct Tokenizer<S> {
    source: S,
}

impl<S: ByteSource> Tokenizer<S> {
    pub(crate) fn new(source: S) -> Self {
        Self { source }
    }

    fn next_byte(&mut self) -> Result<Option<u8>, PixmapError> {
        let mut buf = [0u8; 1];
        match self.source.read(&mut buf)? {
            1 => Ok(Some(buf[0])),
            _ => Ok(None),
        }
    }

    /// Next token, or `None` once only delimiters and comments remain.
    ///
    /// A token longer than [`MAX_TOKEN_LEN`] is [`PixmapError::LimitExceeded`].
    pub(crate) fn next_token(&mut self) -> Result<Option<Token>, PixmapError> {
        let first = loop {
            match self.next_byte()? {
                None => return Ok(None),
                Some(b) if is_delimiter(b) => continue,
                Some(b'#') => self.skip_comment()?,
                Some(b) => break b,
            }
        };

        let mut word = Vec::new();
        word.push(first);
        while let Some(b) = self.next_byte()? {
            if is_delimiter(b) {
                break;
            }
            if word.len() == MAX_TOKEN_LEN {
                return Err(PixmapError::LimitExceeded(alloc::format!(
                    "token longer than {MAX_TOKEN_LEN} bytes"
                )));
            }
            word.push(b);
        }
        Ok(Some(Token::from(String::from_utf8_lossy(&word).into_owned())))
    }

    fn skip_comment(&mut self) -> Result<(), PixmapError> {
        let mut skipped = 0usize;
        while let Some(b) = self.next_byte()? {
            if b == b'\n' {
                break;
            }
            skipped += 1;
        }
        log::trace!("skipped {skipped} byte comment");
        Ok(())
    }

    /// Read exactly `count` tokens; running out first is
    /// [`PixmapError::TruncatedStream`] and nothing is returned.
    pub(crate) fn next_chunk(&mut self, count: usize) -> Result<Vec<Token>, PixmapError> {
        let mut chunk = Vec::with_capacity(count);
        for _ in 0..count {
            chunk.push(self.next_token()?.ok_or(PixmapError::TruncatedStream)?);
        }
        Ok(chunk)
    }

    /// Read one group of three tokens (a header or a pixel).
    pub(crate) fn next_triple(&mut self) -> Result<[Token; 3], PixmapError> {
        let chunk = self.next_chunk(3)?;
        chunk.try_into().map_err(|_| PixmapError::TruncatedStream)
    }
}
