use thiserror::Error;

/// Resolution requested from every camera.
pub const CAPTURE_WIDTH: u32 = 320;
pub const CAPTURE_HEIGHT: u32 = 240;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("camera device error: {0}")]
    Device(String),
}

/// One decoded video frame, 8-bit RGBA, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Frame {
    /// `None` if `rgba` is not exactly `width × height × 4` bytes.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = width as usize * height as usize * 4;
        (rgba.len() == expected).then_some(Self { width, height, rgba })
    }

    /// Every pixel the same colour.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            width,
            height,
            rgba: rgba.repeat(pixels),
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn same_size(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height
    }
}

/// A camera, or anything standing in for one.
///
/// `open` may block on a permission prompt. `close` must release the
/// device; it is called on every exit path, including after a capture
/// error.
pub trait FrameSource {
    fn open(&mut self, width: u32, height: u32) -> Result<(), CaptureError>;

    fn capture(&mut self) -> Result<Frame, CaptureError>;

    fn close(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_size_is_checked() {
        assert!(Frame::new(2, 2, vec![0; 16]).is_some());
        assert!(Frame::new(2, 2, vec![0; 15]).is_none());
    }

    #[test]
    fn filled_frame_repeats_the_pixel() {
        let frame = Frame::filled(3, 1, [1, 2, 3, 255]);
        assert_eq!(frame.rgba, vec![1, 2, 3, 255, 1, 2, 3, 255, 1, 2, 3, 255]);
        assert_eq!(frame.pixel_count(), 3);
    }
}
