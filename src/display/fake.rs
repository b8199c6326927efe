//! Recording sink for tests.

use crate::error::{Error, Result};

use super::frame::{Frame, FrameSink};

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<Frame>,
    /// Reject pushes while set.
    pub offline: bool,
    pub rejected: usize,
}

impl RecordingSink {
    pub fn last(&self) -> &Frame {
        self.frames.last().expect("no frame rendered yet")
    }
}

impl FrameSink for RecordingSink {
    fn push(&mut self, frame: &Frame) -> Result<()> {
        if self.offline {
            self.rejected += 1;
            return Err(Error::Display("panel unplugged".to_string()));
        }
        self.frames.push(frame.clone());
        Ok(())
    }
}
