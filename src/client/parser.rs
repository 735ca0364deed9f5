//! Frame parser for carriage-return delimited streams.
//!
//! Incremental, state-machine based splitter for streaming response bodies.
//! Network reads rarely line up with frame boundaries, so bytes are buffered
//! until a `\r` arrives.
//!
//! # Parsing Flow
//!
//! 1. **Scanning**: Accumulate bytes until `\r` is found, then emit the frame
//!    (delimiter included)
//! 2. **Discarding**: A partial frame outgrew the limit; drop bytes up to the
//!    next `\r`, then go back to scanning
//!
//! The server interleaves keep-alive frames (`\n\r`) with payload frames;
//! [`Frame::is_keep_alive`] identifies them so callers can skip them without
//! a decode attempt.
//!
//! # Examples
//!
//! ```
//! use twitter_stream::client::{FrameParser, ParseState};
//!
//! let mut parser = FrameParser::new(1024);
//! assert_eq!(parser.state(), ParseState::Scanning);
//!
//! let frames = parser.feed(b"{\"id\":1}\r\n\r{\"id\"");
//! assert_eq!(frames.len(), 2);
//! assert!(frames[1].as_ref().unwrap().is_keep_alive());
//!
//! let frames = parser.feed(b":2}\r");
//! assert_eq!(frames[0].as_ref().unwrap().payload(), b"{\"id\":2}");
//! ```

use crate::error::{Result, TwitterError};
use crate::protocol::constants::{FRAME_DELIMITER, KEEP_ALIVE_FRAME};
use bytes::{Bytes, BytesMut};
use serde::de::DeserializeOwned;

/// Parse state for the frame splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Accumulating bytes of the current frame
    Scanning,
    /// Dropping the rest of an oversized frame
    Discarding,
}

/// Splits a byte stream into `\r`-terminated frames.
#[derive(Debug)]
pub struct FrameParser {
    /// Bytes of the frame in progress
    buffer: BytesMut,
    /// Current state in the parse state machine
    state: ParseState,
    /// Largest frame, delimiter included, that will be emitted
    max_frame_len: usize,
}

impl FrameParser {
    /// Create a parser that rejects frames longer than `max_frame_len` bytes.
    pub fn new(max_frame_len: usize) -> Self {
        FrameParser {
            buffer: BytesMut::with_capacity(8192.min(max_frame_len)),
            state: ParseState::Scanning,
            max_frame_len,
        }
    }

    /// Feed bytes to the parser, returning every frame they complete.
    ///
    /// An oversized frame is reported once as
    /// [`TwitterError::FrameTooLarge`] in its position in the sequence.
    pub fn feed(&mut self, data: &[u8]) -> Vec<Result<Frame>> {
        let mut frames = Vec::new();
        let mut rest = data;

        while !rest.is_empty() {
            let delimiter = rest.iter().position(|&b| b == FRAME_DELIMITER);
            match (self.state, delimiter) {
                (ParseState::Scanning, Some(pos)) => {
                    self.buffer.extend_from_slice(&rest[..=pos]);
                    rest = &rest[pos + 1..];
                    if self.buffer.len() > self.max_frame_len {
                        self.buffer.clear();
                        frames.push(Err(self.too_large()));
                    } else {
                        frames.push(Ok(Frame::new(self.buffer.split().freeze())));
                    }
                }
                (ParseState::Scanning, None) => {
                    self.buffer.extend_from_slice(rest);
                    if self.buffer.len() > self.max_frame_len {
                        self.buffer.clear();
                        self.state = ParseState::Discarding;
                        frames.push(Err(self.too_large()));
                    }
                    break;
                }
                (ParseState::Discarding, Some(pos)) => {
                    rest = &rest[pos + 1..];
                    self.state = ParseState::Scanning;
                }
                (ParseState::Discarding, None) => break,
            }
        }

        frames
    }

    /// Take whatever partial frame is buffered, e.g. at end of stream.
    pub fn finish(&mut self) -> Option<Bytes> {
        self.state = ParseState::Scanning;
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.buffer.split().freeze())
        }
    }

    /// Get current parse state
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Number of buffered bytes of the frame in progress
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    fn too_large(&self) -> TwitterError {
        TwitterError::FrameTooLarge {
            limit: self.max_frame_len,
        }
    }
}

/// One delimiter-terminated chunk of a stream body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Bytes,
}

impl Frame {
    /// Wrap raw frame bytes, delimiter included.
    pub fn new(bytes: Bytes) -> Self {
        Frame { bytes }
    }

    /// Whether this is the two-byte `\n\r` keep-alive artifact.
    pub fn is_keep_alive(&self) -> bool {
        self.bytes[..] == *KEEP_ALIVE_FRAME
    }

    /// Raw bytes, delimiter included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes without the trailing delimiter.
    pub fn payload(&self) -> &[u8] {
        self.bytes
            .strip_suffix(&[FRAME_DELIMITER])
            .unwrap_or(&self.bytes[..])
    }

    /// Decode the payload as one JSON value.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(self.payload())?)
    }

    /// Frame length, delimiter included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the frame holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_frames(results: Vec<Result<Frame>>) -> Vec<Vec<u8>> {
        results
            .into_iter()
            .map(|r| r.unwrap().as_bytes().to_vec())
            .collect()
    }

    #[test]
    fn test_parser_creation() {
        let parser = FrameParser::new(64);
        assert_eq!(parser.state(), ParseState::Scanning);
        assert_eq!(parser.pending(), 0);
    }

    #[test]
    fn test_frames_keep_their_delimiter() {
        let mut parser = FrameParser::new(64);
        let frames = ok_frames(parser.feed(b"{\"a\":1}\r\n{\"b\":2}\r"));
        assert_eq!(frames, vec![b"{\"a\":1}\r".to_vec(), b"\n{\"b\":2}\r".to_vec()]);
    }

    #[test]
    fn test_frame_split_across_reads() {
        let mut parser = FrameParser::new(64);
        assert!(parser.feed(b"{\"id\"").is_empty());
        assert!(parser.feed(b":4").is_empty());
        assert_eq!(parser.pending(), 7);
        let frames = parser.feed(b"2}\r");
        let frame = frames[0].as_ref().unwrap();
        let v: serde_json::Value = frame.decode().unwrap();
        assert_eq!(v["id"], 42);
    }

    #[test]
    fn test_keep_alive_detection() {
        let mut parser = FrameParser::new(64);
        let frames = parser.feed(b"\n\r\r\n\n\r");
        let kinds: Vec<bool> = frames.iter().map(|f| f.as_ref().unwrap().is_keep_alive()).collect();
        assert_eq!(kinds, vec![true, false, false]);
    }

    #[test]
    fn test_bare_delimiter_is_not_keep_alive_and_fails_decode() {
        let frame = Frame::new(Bytes::from_static(b"\r"));
        assert!(!frame.is_keep_alive());
        assert!(frame.payload().is_empty());
        assert!(frame.decode::<serde_json::Value>().is_err());
    }

    #[test]
    fn test_oversized_complete_frame() {
        let mut parser = FrameParser::new(8);
        let frames = parser.feed(b"0123456789\r{}\r");
        assert!(matches!(frames[0], Err(TwitterError::FrameTooLarge { limit: 8 })));
        assert_eq!(frames[1].as_ref().unwrap().payload(), b"{}");
    }

    #[test]
    fn test_oversized_partial_frame_discards_to_next_delimiter() {
        let mut parser = FrameParser::new(8);
        let frames = parser.feed(b"0123456789");
        assert_eq!(frames.len(), 1);
        assert!(frames[0].is_err());
        assert_eq!(parser.state(), ParseState::Discarding);

        assert!(parser.feed(b"still part of it").is_empty());
        let frames = parser.feed(b"tail\r{}\r");
        assert_eq!(parser.state(), ParseState::Scanning);
        assert_eq!(ok_frames(frames), vec![b"{}\r".to_vec()]);
    }

    #[test]
    fn test_finish_returns_partial_frame() {
        let mut parser = FrameParser::new(64);
        parser.feed(b"{}\r{\"trunc");
        assert_eq!(parser.finish(), Some(Bytes::from_static(b"{\"trunc")));
        assert_eq!(parser.finish(), None);
    }
}
