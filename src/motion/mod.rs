//! Camera motion to lead filter cutoff.
//!
//! The pipeline runs on the view's clock (one [`MotionPipeline::sample`]
//! per redraw), never the audio clock. All it touches on the audio side is
//! a [`SharedParam`]; the lead filter glides 100 ms to each new value.
//!
//! ```ignore
//! let mut motion = MotionPipeline::new(engine.lead_cutoff_param());
//! motion.enable(camera)?;
//! loop {
//!     match motion.sample() {
//!         Ok(intensity) => draw_meter(intensity),
//!         Err(err) => { show(err); break; }
//!     }
//! }
//! ```

pub mod detector;
pub mod source;

pub use detector::{map_intensity_to_frequency, motion_intensity};
pub use source::{CaptureError, Frame, FrameSource, CAPTURE_HEIGHT, CAPTURE_WIDTH};

use thiserror::Error;
use tracing::{info, warn};

use crate::graph::param::SharedParam;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MotionError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("frame capture failed: {0}")]
    Capture(String),

    #[error("motion capture is not enabled")]
    NotEnabled,
}

impl From<CaptureError> for MotionError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::PermissionDenied => MotionError::PermissionDenied,
            CaptureError::Device(msg) => MotionError::Capture(msg),
        }
    }
}

pub struct MotionPipeline {
    source: Option<Box<dyn FrameSource + Send>>,
    last_frame: Option<Frame>,
    intensity: f32,
    cutoff: SharedParam,
}

impl MotionPipeline {
    pub fn new(cutoff: SharedParam) -> Self {
        Self {
            source: None,
            last_frame: None,
            intensity: 0.0,
            cutoff,
        }
    }

    /// Open `source` at 320×240. On failure the pipeline stays disabled and
    /// the engine carries on without motion.
    pub fn enable(&mut self, source: impl FrameSource + Send + 'static) -> Result<(), MotionError> {
        self.disable();

        let mut source: Box<dyn FrameSource + Send> = Box::new(source);
        match source.open(CAPTURE_WIDTH, CAPTURE_HEIGHT) {
            Ok(()) => {
                info!("motion capture on");
                self.source = Some(source);
                Ok(())
            }
            Err(err) => {
                warn!(%err, "motion capture unavailable");
                source.close();
                Err(err.into())
            }
        }
    }

    /// Release the camera and forget the last frame.
    pub fn disable(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.close();
            info!("motion capture off");
        }
        self.last_frame = None;
        self.intensity = 0.0;
    }

    pub fn is_enabled(&self) -> bool {
        self.source.is_some()
    }

    /// Capture one frame, compare it with the previous one and retarget the
    /// cutoff. The first frame after enabling only primes the comparison.
    ///
    /// A capture error shuts the pipeline down and is returned once; the
    /// cutoff keeps its last value.
    pub fn sample(&mut self) -> Result<f32, MotionError> {
        let source = self.source.as_mut().ok_or(MotionError::NotEnabled)?;

        let frame = match source.capture() {
            Ok(frame) => frame,
            Err(err) => {
                warn!(%err, "frame capture failed, motion capture stopped");
                self.disable();
                return Err(err.into());
            }
        };

        if let Some(prev) = &self.last_frame {
            self.intensity = motion_intensity(prev, &frame);
            self.cutoff.set(map_intensity_to_frequency(self.intensity));
        }
        self.last_frame = Some(frame);

        Ok(self.intensity)
    }

    /// Latest intensity, 0 while disabled.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }
}

impl Drop for MotionPipeline {
    fn drop(&mut self) {
        self.disable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        collections::VecDeque,
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
    };

    struct Scripted {
        open: Result<(), CaptureError>,
        frames: VecDeque<Result<Frame, CaptureError>>,
        closed: Arc<AtomicBool>,
    }

    impl Scripted {
        fn new(frames: Vec<Result<Frame, CaptureError>>) -> (Self, Arc<AtomicBool>) {
            let closed = Arc::new(AtomicBool::new(false));
            let source = Self {
                open: Ok(()),
                frames: frames.into(),
                closed: closed.clone(),
            };
            (source, closed)
        }
    }

    impl FrameSource for Scripted {
        fn open(&mut self, width: u32, height: u32) -> Result<(), CaptureError> {
            assert_eq!((width, height), (CAPTURE_WIDTH, CAPTURE_HEIGHT));
            self.open.clone()
        }

        fn capture(&mut self) -> Result<Frame, CaptureError> {
            self.frames
                .pop_front()
                .unwrap_or(Err(CaptureError::Device("out of frames".into())))
        }

        fn close(&mut self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    fn gray(value: u8) -> Result<Frame, CaptureError> {
        Ok(Frame::filled(CAPTURE_WIDTH, CAPTURE_HEIGHT, [value, value, value, 255]))
    }

    #[test]
    fn motion_moves_the_cutoff() {
        let cutoff = SharedParam::new(1_000.0);
        let mut motion = MotionPipeline::new(cutoff.clone());
        let (source, _) = Scripted::new(vec![gray(0), gray(0), gray(255)]);
        motion.enable(source).unwrap();

        assert_eq!(motion.sample(), Ok(0.0));
        assert_eq!(cutoff.get(), 1_000.0, "first frame only primes");

        assert_eq!(motion.sample(), Ok(0.0));
        assert_eq!(cutoff.get(), 200.0);

        assert_eq!(motion.sample(), Ok(1.0));
        assert_eq!(cutoff.get(), 3_200.0);
    }

    #[test]
    fn permission_denied_leaves_pipeline_off() {
        let mut motion = MotionPipeline::new(SharedParam::new(1_000.0));
        let (mut source, closed) = Scripted::new(vec![]);
        source.open = Err(CaptureError::PermissionDenied);

        assert_eq!(motion.enable(source), Err(MotionError::PermissionDenied));
        assert!(!motion.is_enabled());
        assert!(closed.load(Ordering::SeqCst));
        assert_eq!(motion.sample(), Err(MotionError::NotEnabled));
    }

    #[test]
    fn capture_error_stops_once_and_keeps_cutoff() {
        let cutoff = SharedParam::new(1_000.0);
        let mut motion = MotionPipeline::new(cutoff.clone());
        let (source, closed) = Scripted::new(vec![
            gray(0),
            gray(128),
            Err(CaptureError::Device("unplugged".into())),
        ]);
        motion.enable(source).unwrap();
        motion.sample().unwrap();
        let intensity = motion.sample().unwrap();
        assert!(intensity > 0.0);
        let last = cutoff.get();

        assert_eq!(motion.sample(), Err(MotionError::Capture("unplugged".into())));
        assert!(closed.load(Ordering::SeqCst));
        assert!(!motion.is_enabled());
        assert_eq!(motion.intensity(), 0.0);
        assert_eq!(cutoff.get(), last);

        assert_eq!(motion.sample(), Err(MotionError::NotEnabled));
    }

    #[test]
    fn disable_releases_the_camera() {
        let mut motion = MotionPipeline::new(SharedParam::new(1_000.0));
        let (source, closed) = Scripted::new(vec![gray(1)]);
        motion.enable(source).unwrap();
        motion.disable();
        assert!(closed.load(Ordering::SeqCst));
        assert!(!motion.is_enabled());
    }
}
