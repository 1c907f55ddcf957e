use crate::imp::core::*;
use std::io::{self, Read, Write};
use thiserror::Error;

#[derive(Debug)]
pub(crate) struct Reader<R> {
    inner: R,
    buf: Vec<u8>,
}

#[derive(Debug)]
pub(crate) struct Writer<W> {
    inner: W,
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Serde(#[from] serde_json::error::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Driver closed the pipe")]
    Closed,
}

impl<R: Read> Reader<R> {
    const BUFSIZE: usize = 30000;

    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(Self::BUFSIZE),
        }
    }

    /// Blocks until a whole length-prefixed (u32 LE) JSON frame is buffered.
    pub(crate) fn read_message(&mut self) -> Result<Res, TransportError> {
        let mut chunk = [0; Self::BUFSIZE];
        loop {
            if let Some(frame) = self.take_frame() {
                log::debug!("RECV {}", String::from_utf8_lossy(&frame));
                return Ok(serde_json::from_slice(&frame)?);
            }
            let n = self.inner.read(&mut chunk)?;
            if n == 0 {
                return Err(TransportError::Closed);
            }
            self.buf.extend_from_slice(&chunk[..n]);
        }
    }

    fn take_frame(&mut self) -> Option<Vec<u8>> {
        if self.buf.len() < 4 {
            return None;
        }
        let mut prefix = [0; 4];
        prefix.copy_from_slice(&self.buf[..4]);
        let len = u32::from_le_bytes(prefix) as usize;
        if self.buf.len() < 4 + len {
            return None;
        }
        let frame = self.buf[4..4 + len].to_vec();
        self.buf.drain(..4 + len);
        Some(frame)
    }
}

impl<W: Write> Writer<W> {
    pub(crate) fn new(inner: W) -> Self { Self { inner } }

    pub(crate) fn send(&mut self, req: &Req<'_>) -> Result<(), TransportError> {
        log::debug!("SEND {:?}", &req);
        let serialized = serde_json::to_vec(&req)?;
        let length = serialized.len() as u32;
        let mut bytes = length.to_le_bytes().to_vec();
        bytes.extend(serialized);
        self.inner.write_all(&bytes)?;
        self.inner.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imp::prelude::*;
    use std::io::Cursor;

    fn frame(json: &str) -> Vec<u8> {
        let mut bytes = (json.len() as u32).to_le_bytes().to_vec();
        bytes.extend(json.as_bytes());
        bytes
    }

    /// Hands out at most `step` bytes per read.
    struct Trickle {
        data: Cursor<Vec<u8>>,
        step: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(self.step);
            self.data.read(&mut buf[..n])
        }
    }

    #[test]
    fn reassembles_split_frames() {
        let mut data = frame(r#"{"id":1,"result":{}}"#);
        data.extend(frame(r#"{"guid":"","method":"__create__","params":{}}"#));
        let mut reader = Reader::new(Trickle {
            data: Cursor::new(data),
            step: 3,
        });
        assert!(matches!(reader.read_message().unwrap(), Res::Result(r) if r.id == 1));
        assert!(matches!(reader.read_message().unwrap(), Res::Event(e) if e.method == "__create__"));
        assert!(matches!(reader.read_message(), Err(TransportError::Closed)));
    }

    #[test]
    fn truncated_frame_is_closed() {
        let mut data = frame(r#"{"id":1}"#);
        data.truncate(6);
        let mut reader = Reader::new(Cursor::new(data));
        assert!(matches!(reader.read_message(), Err(TransportError::Closed)));
    }

    #[test]
    fn writes_length_prefix() {
        let guid = Guid::root();
        let req = Req {
            id: 1,
            guid: &guid,
            method: "initialize",
            params: Map::new(),
            metadata: Metadata::default(),
        };
        let mut writer = Writer::new(Vec::new());
        writer.send(&req).unwrap();
        let bytes = writer.inner;
        let len = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        assert_eq!(len, bytes.len() - 4);
        let v: Value = serde_json::from_slice(&bytes[4..]).unwrap();
        assert_eq!(v["method"], "initialize");
        assert_eq!(v["guid"], "");
    }
}
