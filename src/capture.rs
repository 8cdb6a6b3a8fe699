//! Duplicating pass-through for standard input.

use std::io::{self, Read, Write};

const CHUNK_SIZE: usize = 8 * 1024;

/// Copy `reader` to `writer` chunk by chunk, returning everything that was read.
///
/// Each chunk is written and flushed as soon as it arrives, so the echo keeps
/// pace with the input instead of waiting for EOF. The full content is still
/// buffered in memory for the sink; no size limit is applied.
///
/// Read errors (other than `Interrupted`) and write errors are returned as-is.
pub fn tee<R: Read, W: Write>(mut reader: R, mut writer: W) -> io::Result<Vec<u8>> {
    let mut captured = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&chunk[..n])?;
        writer.flush()?;
        captured.extend_from_slice(&chunk[..n]);
    }
    Ok(captured)
}
