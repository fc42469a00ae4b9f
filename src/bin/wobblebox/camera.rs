//! Synthetic camera
//!
//! A bright block drifting across a dark frame. Its speed swells and fades
//! over a few seconds, so the motion meter and the lead filter have
//! something to follow without a real webcam.

use std::f32::consts::TAU;

use wobblebox::motion::{CaptureError, Frame, FrameSource};

const BLOCK: u32 = 96;
const BACKGROUND: [u8; 4] = [16, 16, 24, 255];
const FOREGROUND: [u8; 4] = [230, 220, 200, 255];

/// Frames per speed cycle.
const SWELL_FRAMES: f32 = 360.0;
const MAX_SPEED: f32 = 14.0;

pub struct SyntheticCamera {
    size: Option<(u32, u32)>,
    frame_index: u32,
    x: f32,
}

impl SyntheticCamera {
    pub fn new() -> Self {
        Self {
            size: None,
            frame_index: 0,
            x: 0.0,
        }
    }
}

impl FrameSource for SyntheticCamera {
    fn open(&mut self, width: u32, height: u32) -> Result<(), CaptureError> {
        if width < BLOCK || height < BLOCK {
            return Err(CaptureError::Device(format!(
                "{width}x{height} is smaller than the test pattern"
            )));
        }
        self.size = Some((width, height));
        self.frame_index = 0;
        self.x = 0.0;
        Ok(())
    }

    fn capture(&mut self) -> Result<Frame, CaptureError> {
        let (width, height) = self
            .size
            .ok_or_else(|| CaptureError::Device("camera is not open".into()))?;

        let swell = 0.5 - 0.5 * (TAU * self.frame_index as f32 / SWELL_FRAMES).cos();
        let travel = (width - BLOCK) as f32;
        self.x = (self.x + swell * MAX_SPEED) % travel.max(1.0);
        self.frame_index = self.frame_index.wrapping_add(1);

        let left = self.x as u32;
        let top = (height - BLOCK) / 2;
        let mut frame = Frame::filled(width, height, BACKGROUND);
        for y in top..top + BLOCK {
            let row = (y * width) as usize * 4;
            for x in left..left + BLOCK {
                let at = row + x as usize * 4;
                frame.rgba[at..at + 4].copy_from_slice(&FOREGROUND);
            }
        }
        Ok(frame)
    }

    fn close(&mut self) {
        self.size = None;
    }
}
