//! Byte sources the parser pulls from.

use crate::error::{Error, Result};
use std::io;

/// Pull-based byte source underneath an [`InputCursor`].
///
/// This trait is sealed and cannot be implemented for types outside of
/// `picojson`. Wrap an arbitrary byte iterator in [`IterRead`] instead.
///
/// [`InputCursor`]: crate::cursor::InputCursor
pub trait Read: private::Sealed {
    #[doc(hidden)]
    fn next(&mut self) -> Result<Option<u8>>;

    /// Offset from the beginning of the input to the next byte that would be
    /// returned by next().
    #[doc(hidden)]
    fn byte_offset(&self) -> usize;

    /// Consumes and returns the longest run of bytes at the current position
    /// that a string body copies verbatim, stopping before any quote,
    /// backslash or control character.
    ///
    /// Sources that cannot look ahead return an empty run and let the caller
    /// go byte by byte.
    #[doc(hidden)]
    fn plain_run(&mut self) -> &[u8] {
        &[]
    }
}

/// JSON input source that reads from a slice of bytes.
pub struct SliceRead<'a> {
    slice: &'a [u8],
    /// Index of the *next* byte that will be returned by next().
    index: usize,
}

/// JSON input source that reads from a std::io input stream.
pub struct IoRead<R>
where
    R: io::Read,
{
    iter: io::Bytes<R>,
    offset: usize,
}

/// JSON input source that pulls bytes from any iterator.
pub struct IterRead<I> {
    iter: I,
    offset: usize,
}

mod private {
    pub trait Sealed {}
}

//////////////////////////////////////////////////////////////////////////////

impl<'a> SliceRead<'a> {
    /// Create a JSON input source to read from a slice of bytes.
    pub fn new(slice: &'a [u8]) -> Self {
        SliceRead { slice, index: 0 }
    }

    /// The bytes that have not been pulled from this source yet.
    pub fn remaining(&self) -> &'a [u8] {
        &self.slice[self.index..]
    }

    pub(crate) fn input(&self) -> &'a [u8] {
        self.slice
    }
}

impl<'a> private::Sealed for SliceRead<'a> {}

impl<'a> Read for SliceRead<'a> {
    #[inline]
    fn next(&mut self) -> Result<Option<u8>> {
        // `Ok(self.slice.get(self.index).map(|ch| { self.index += 1; *ch }))`
        // is about 10% slower.
        Ok(if self.index < self.slice.len() {
            let ch = self.slice[self.index];
            self.index += 1;
            Some(ch)
        } else {
            None
        })
    }

    fn byte_offset(&self) -> usize {
        self.index
    }

    fn plain_run(&mut self) -> &[u8] {
        let slice = self.slice;
        let rest = &slice[self.index..];
        let mut end = memchr::memchr2(b'"', b'\\', rest).unwrap_or(rest.len());
        if let Some(ctrl) = rest[..end].iter().position(|&ch| ch < b' ') {
            end = ctrl;
        }
        self.index += end;
        &rest[..end]
    }
}

//////////////////////////////////////////////////////////////////////////////

impl<R> IoRead<R>
where
    R: io::Read,
{
    /// Create a JSON input source to read from a std::io input stream.
    ///
    /// When reading from a source against which short reads are not efficient,
    /// such as a [`File`], you will want to apply your own buffering because
    /// this source reads one byte at a time.
    ///
    /// [`File`]: std::fs::File
    pub fn new(reader: R) -> Self {
        IoRead {
            iter: reader.bytes(),
            offset: 0,
        }
    }
}

impl<R> private::Sealed for IoRead<R> where R: io::Read {}

impl<R> Read for IoRead<R>
where
    R: io::Read,
{
    #[inline]
    fn next(&mut self) -> Result<Option<u8>> {
        match self.iter.next() {
            None => Ok(None),
            Some(Ok(ch)) => {
                self.offset += 1;
                Ok(Some(ch))
            }
            Some(Err(err)) => Err(Error::io(err)),
        }
    }

    fn byte_offset(&self) -> usize {
        self.offset
    }
}

//////////////////////////////////////////////////////////////////////////////

impl<I> IterRead<I>
where
    I: Iterator<Item = u8>,
{
    /// Create a JSON input source pulling from a byte iterator.
    pub fn new(iter: I) -> Self {
        IterRead { iter, offset: 0 }
    }
}

impl<I> private::Sealed for IterRead<I> where I: Iterator<Item = u8> {}

impl<I> Read for IterRead<I>
where
    I: Iterator<Item = u8>,
{
    #[inline]
    fn next(&mut self) -> Result<Option<u8>> {
        let ch = self.iter.next();
        if ch.is_some() {
            self.offset += 1;
        }
        Ok(ch)
    }

    fn byte_offset(&self) -> usize {
        self.offset
    }
}
