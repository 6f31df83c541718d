//! Frame encoders
//!
//! The raw stream is just every frame's pixel bytes back to back: no header,
//! no compression, no markers. A reader needs the width, height, frame count
//! and the 3-bytes-per-pixel RGB layout from the same script to decode it.

use std::io::{self, Write};

use log::trace;

use crate::visualization::raster::Raster;

/// Consumes rendered frames in order
pub trait FrameEncoder {
    fn encode(&mut self, frame: &Raster) -> io::Result<()>;

    /// Flush anything buffered; called once after the last frame
    fn finish(&mut self) -> io::Result<()>;
}

/// Appends raw RGB frames to an already-open byte sink
pub struct RawFrameEncoder<W: Write> {
    sink: W,
    frames_written: u64,
    bytes_written: u64,
}

impl<W: Write> RawFrameEncoder<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            frames_written: 0,
            bytes_written: 0,
        }
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> FrameEncoder for RawFrameEncoder<W> {
    fn encode(&mut self, frame: &Raster) -> io::Result<()> {
        let bytes = frame.as_bytes();
        self.sink.write_all(bytes)?;
        self.frames_written += 1;
        self.bytes_written += bytes.len() as u64;
        trace!("frame {} written ({} bytes)", self.frames_written - 1, bytes.len());
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}
