//! Merged stdout/stderr line reading.
//!
//! Both of the child's output descriptors point at the write end of one
//! pipe, so lines come out in the order the child wrote them. Lines are read
//! as bytes and decoded lossily, so invalid UTF-8 never stops the reader.

use std::io::{self, BufRead, BufReader, PipeReader, Read};
use std::process::Command;

/// Point the command's stdout and stderr at a single pipe.
///
/// The returned reader sees EOF only once every write end is closed, so the
/// caller must drop `cmd` after spawning.
pub(crate) fn merge_output(cmd: &mut Command) -> io::Result<PipeReader> {
    let (reader, writer) = io::pipe()?;
    cmd.stdout(writer.try_clone()?).stderr(writer);
    Ok(reader)
}

/// Read `source` to EOF, handing each decoded line to `on_line`.
pub(crate) fn for_each_line(source: impl Read, mut on_line: impl FnMut(String)) -> io::Result<()> {
    let mut reader = BufReader::new(source);
    let mut buf: Vec<u8> = Vec::with_capacity(1024);
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        for line in decode_chunk(&buf) {
            on_line(line);
        }
    }
}

/// Turn one raw `\n`-terminated chunk into output lines.
///
/// Bytes are decoded lossily. The terminator (`\n` or `\r\n`) is dropped and
/// a lone `\r` (progress redraw) starts a new line. A bare terminator yields
/// one empty line.
pub(crate) fn decode_chunk(raw: &[u8]) -> Vec<String> {
    let mut body = raw.strip_suffix(b"\n").unwrap_or(raw);
    body = body.strip_suffix(b"\r").unwrap_or(body);

    if body.is_empty() {
        return vec![String::new()];
    }

    String::from_utf8_lossy(body)
        .split('\r')
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_each_line_keeps_order_and_tail() {
        let mut lines = Vec::new();
        for_each_line(&b"first\r\nsecond\n\nlast"[..], |line| lines.push(line)).unwrap();
        assert_eq!(lines, vec!["first", "second", "", "last"]);
    }

    #[test]
    fn test_decode_plain_line() {
        assert_eq!(decode_chunk(b"hello world\n"), vec!["hello world"]);
    }

    #[test]
    fn test_decode_crlf() {
        assert_eq!(decode_chunk(b"windows line\r\n"), vec!["windows line"]);
    }

    #[test]
    fn test_decode_progress_redraws() {
        assert_eq!(
            decode_chunk(b"10%\r20%\r30%\n"),
            vec!["10%", "20%", "30%"]
        );
    }

    #[test]
    fn test_decode_empty_line() {
        assert_eq!(decode_chunk(b"\n"), vec![""]);
    }

    #[test]
    fn test_decode_final_chunk_without_newline() {
        assert_eq!(decode_chunk(b"tail"), vec!["tail"]);
    }

    #[test]
    fn test_decode_invalid_utf8_is_lossy() {
        let lines = decode_chunk(b"caf\xe9 \xff\n");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("caf"));
        assert!(lines[0].contains('\u{FFFD}'));
    }
}
