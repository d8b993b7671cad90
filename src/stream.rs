use std::io::{ErrorKind, Read, Result, Write};

pub trait Stream: Read + Write {}
impl<T> Stream for T where T: Read + Write {}

const CRLF: &[u8] = b"\r\n";
// One transport read; bursts such as a MOTD arrive as a single chunk.
const READ_SIZE: usize = 64 * 1024;
// Pending bytes without a line break are handed over once they reach this.
const MAX_PENDING: usize = 8 * 1024;

/// Pulls chunks of text off a stream, one `read` at a time.
///
/// With reassembly on, a chunk always ends at a line break: bytes after the
/// last `\n` stay buffered until a later read completes the line, or until
/// the buffer holds more than any real line would.
pub struct ChunkReader {
    buffer: Vec<u8>,
    read_buf: Vec<u8>,
    reassemble: bool,
}

impl ChunkReader {
    pub fn new(reassemble: bool) -> Self {
        ChunkReader {
            buffer: Vec::new(),
            read_buf: vec![0; READ_SIZE],
            reassemble,
        }
    }

    /// Returns `None` once the stream is closed and nothing is left buffered.
    pub fn read_chunk<T: Read>(&mut self, stream: &mut T) -> Result<Option<String>> {
        loop {
            let size = match stream.read(&mut self.read_buf) {
                Ok(size) => size,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            if size == 0 {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                let leftover = std::mem::take(&mut self.buffer);
                return Ok(Some(String::from_utf8_lossy(&leftover).into_owned()));
            }

            if !self.reassemble {
                let chunk = String::from_utf8_lossy(&self.read_buf[..size]).into_owned();
                return Ok(Some(chunk));
            }

            self.buffer.extend_from_slice(&self.read_buf[..size]);
            if let Some(line_end) = self.buffer.iter().rposition(|&b| b == b'\n') {
                let leftover = self.buffer.split_off(line_end + 1);
                let chunk = std::mem::replace(&mut self.buffer, leftover);
                return Ok(Some(String::from_utf8_lossy(&chunk).into_owned()));
            }
            if self.buffer.len() >= MAX_PENDING {
                warn!("No line break in {} bytes, dispatching them as is", self.buffer.len());
                let pending = std::mem::take(&mut self.buffer);
                return Ok(Some(String::from_utf8_lossy(&pending).into_owned()));
            }
        }
    }
}

pub fn write_line<T: Write>(stream: &mut T, line: &str) -> Result<()> {
    stream.write_all(line.as_bytes())?;
    stream.write_all(CRLF)?;
    stream.flush()
}


#[cfg(test)]
mod tests {
    use super::testing::ChunkedTestStream;
    use super::*;

    #[test]
    fn chunks_pass_through_without_reassembly() {
        let mut stream = ChunkedTestStream::with_chunks(&[b"line-one\r\nline-", b"two\r\n"]);
        let mut reader = ChunkReader::new(false);
        assert_eq!(reader.read_chunk(&mut stream).unwrap().unwrap(), "line-one\r\nline-");
        assert_eq!(reader.read_chunk(&mut stream).unwrap().unwrap(), "two\r\n");
        assert_eq!(reader.read_chunk(&mut stream).unwrap(), None);
    }

    #[test]
    fn reassembly_holds_back_partial_lines() {
        let mut stream = ChunkedTestStream::with_chunks(&[
            b"line-one\r\nline-",
            b"tw",
            b"o\r\nline-three\r\n",
            b"tail",
        ]);
        let mut reader = ChunkReader::new(true);
        assert_eq!(reader.read_chunk(&mut stream).unwrap().unwrap(), "line-one\r\n");
        assert_eq!(
            reader.read_chunk(&mut stream).unwrap().unwrap(),
            "line-two\r\nline-three\r\n"
        );
        // Whatever is left at EOF is still delivered.
        assert_eq!(reader.read_chunk(&mut stream).unwrap().unwrap(), "tail");
        assert_eq!(reader.read_chunk(&mut stream).unwrap(), None);
    }

    #[test]
    fn reassembly_keeps_multibyte_characters_whole() {
        let text = "PRIVMSG #c :héllo\r\n".as_bytes();
        let split = text.iter().position(|&b| b == 0xc3).unwrap() + 1;
        let mut stream = ChunkedTestStream::with_chunks(&[&text[..split], &text[split..]]);
        let mut reader = ChunkReader::new(true);
        assert_eq!(
            reader.read_chunk(&mut stream).unwrap().unwrap(),
            "PRIVMSG #c :héllo\r\n"
        );
    }

    #[test]
    fn large_reads_stay_whole() {
        let burst = format!("{}\r\n", "x".repeat(2000));
        let mut stream = ChunkedTestStream::with_chunks(&[burst.as_bytes()]);
        let mut reader = ChunkReader::new(false);
        assert_eq!(reader.read_chunk(&mut stream).unwrap().unwrap(), burst);
    }

    #[test]
    fn reassembly_buffer_is_bounded() {
        let flood = vec![b'x'; 3 * 1024];
        let mut stream = ChunkedTestStream::with_chunks(&[&flood[..], &flood[..], &flood[..], b"\r\n"]);
        let mut reader = ChunkReader::new(true);
        let chunk = reader.read_chunk(&mut stream).unwrap().unwrap();
        assert_eq!(chunk.len(), 9 * 1024);
        assert_eq!(reader.read_chunk(&mut stream).unwrap().unwrap(), "\r\n");
        assert_eq!(reader.read_chunk(&mut stream).unwrap(), None);
    }

    #[test]
    fn write_line_test() {
        let mut stream = ChunkedTestStream::default();
        write_line(&mut stream, "line-one").unwrap();
        write_line(&mut stream, "line-two").unwrap();
        write_line(&mut stream, "line-three").unwrap();
        assert_eq!(&stream.write_buf, b"line-one\r\nline-two\r\nline-three\r\n");
    }
}
