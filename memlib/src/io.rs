use std::fs::File;
use std::io::{BufRead, Seek};
use lazy_static::lazy_static;
use regex::Regex;
use crate::error::{Result, SimError};

lazy_static! {
    // An address in decimal or 0x-prefixed hex, optionally followed by a comment
    static ref TRACE_LINE: Regex = Regex::new(
        r"^\s*(?:0[xX](?P<hex>[0-9a-fA-F]{1,16})|(?P<dec>[0-9]{1,20}))?\s*(?:#.*)?$"
    ).unwrap();
}

pub fn get_reader(file: File) -> Result<impl BufRead + Seek> {
    // Compatibility on other systems
    #[cfg(not(unix))]
    {
        use std::io::BufReader;
        const BUFFER_SIZE: usize = 64 * 4096;
        Ok(BufReader::with_capacity(BUFFER_SIZE, file))
    }
    // Memory map the file for speed on unix systems
    #[cfg(unix)]
    {
        use std::io::Cursor;
        use memmap2::{Advice, Mmap};
        // SAFETY: the map is read-only and the trace file isn't expected to change during a run
        unsafe {
            let m = Mmap::map(&file)?;
            m.advise(Advice::Sequential)?;
            Ok(Cursor::new(m))
        }
    }
}

/// Reads a trace of addresses, one per line
///
/// Addresses are decimal or `0x`-prefixed hexadecimal. Blank lines and `#` comments are skipped.
///
/// # Examples
///
/// ```
/// use memlib::io::read_trace;
/// let trace = "# warm-up\n0x40\n128\n\n0x40 # again\n";
/// assert_eq!(read_trace(trace.as_bytes()).unwrap(), vec![64, 128, 64]);
/// ```
pub fn read_trace(reader: impl BufRead) -> Result<Vec<u64>> {
    let mut addresses = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trace_error = || SimError::Trace {
            line: number + 1,
            content: line.clone(),
        };
        let captures = TRACE_LINE.captures(&line).ok_or_else(trace_error)?;
        let address = if let Some(hex) = captures.name("hex") {
            u64::from_str_radix(hex.as_str(), 16).map_err(|_| trace_error())?
        } else if let Some(dec) = captures.name("dec") {
            dec.as_str().parse::<u64>().map_err(|_| trace_error())?
        } else {
            continue;
        };
        addresses.push(address);
    }
    Ok(addresses)
}
