//! Copy-and-append transform

use std::io::{self, Read, Write};

/// Bytes appended after every copied file.
pub const TRAILER: &[u8] = b"\nbar";

/// Copies everything from `reader` into `writer`, then writes [`TRAILER`].
///
/// Returns the number of bytes written, trailer included. Nothing is rolled
/// back if the copy fails halfway.
pub fn append_trailer<R, W>(reader: &mut R, writer: &mut W) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let copied = io::copy(reader, writer)?;
    writer.write_all(TRAILER)?;
    writer.flush()?;
    Ok(copied + TRAILER.len() as u64)
}
