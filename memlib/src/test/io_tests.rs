use std::error::Error;
use std::fs::File;
use std::io::Write;
use crate::io::{get_reader, read_trace};
use crate::SimError;

#[test]
fn reads_decimal_and_hex_addresses() -> Result<(), Box<dyn Error>> {
    let trace = "0\n0x40\n0XfF\n  128  \n# comment\n\n0x10 # trailing comment\n";
    assert_eq!(read_trace(trace.as_bytes())?, vec![0, 64, 255, 128, 16]);
    Ok(())
}

#[test]
fn reports_bad_line_number() {
    let trace = "0x40\n\nload 0x80\n";
    match read_trace(trace.as_bytes()) {
        Err(SimError::Trace { line, content }) => {
            assert_eq!(line, 3);
            assert_eq!(content, "load 0x80");
        }
        other => panic!("expected a trace error, got {other:?}"),
    }
}

#[test]
fn rejects_addresses_wider_than_64_bits() {
    let trace = "99999999999999999999\n";
    assert!(matches!(read_trace(trace.as_bytes()), Err(SimError::Trace { line: 1, .. })));
}

#[test]
fn reads_trace_file_through_reader() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join(format!("memlib-trace-{}.txt", std::process::id()));
    {
        let mut file = File::create(&path)?;
        writeln!(file, "# generated")?;
        for address in [0u64, 4096, 64] {
            writeln!(file, "{address:#x}")?;
        }
    }
    let reader = get_reader(File::open(&path)?)?;
    let addresses = read_trace(reader);
    std::fs::remove_file(&path)?;
    assert_eq!(addresses?, vec![0, 4096, 64]);
    Ok(())
}
