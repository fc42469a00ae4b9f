use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use wobblebox::{
    engine::LEAD_IDLE_CUTOFF_HZ,
    motion::{
        map_intensity_to_frequency, motion_intensity, CaptureError, Frame, FrameSource,
        MotionError, MotionPipeline, CAPTURE_HEIGHT, CAPTURE_WIDTH,
    },
    Engine, EngineConfig,
};

fn grey(value: u8) -> Frame {
    Frame::filled(CAPTURE_WIDTH, CAPTURE_HEIGHT, [value, value, value, 255])
}

/// Plays back a fixed list of frames, then fails.
struct Tape {
    frames: VecDeque<Frame>,
    deny: bool,
    closed: Arc<AtomicBool>,
}

impl Tape {
    fn new(values: &[u8]) -> (Self, Arc<AtomicBool>) {
        let closed = Arc::new(AtomicBool::new(false));
        let tape = Self {
            frames: values.iter().map(|&v| grey(v)).collect(),
            deny: false,
            closed: closed.clone(),
        };
        (tape, closed)
    }

    fn denied() -> (Self, Arc<AtomicBool>) {
        let (mut tape, closed) = Self::new(&[]);
        tape.deny = true;
        (tape, closed)
    }
}

impl FrameSource for Tape {
    fn open(&mut self, width: u32, height: u32) -> Result<(), CaptureError> {
        assert_eq!((width, height), (CAPTURE_WIDTH, CAPTURE_HEIGHT));
        if self.deny {
            return Err(CaptureError::PermissionDenied);
        }
        Ok(())
    }

    fn capture(&mut self) -> Result<Frame, CaptureError> {
        self.frames
            .pop_front()
            .ok_or_else(|| CaptureError::Device("tape ran out".into()))
    }

    fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[test]
fn intensity_maps_linearly_onto_the_cutoff() {
    assert_eq!(map_intensity_to_frequency(0.0), 200.0);
    assert_eq!(map_intensity_to_frequency(1.0), 3_200.0);
    assert!((map_intensity_to_frequency(0.5) - 1_700.0).abs() < 1e-3);
    assert_eq!(map_intensity_to_frequency(4.0), 3_200.0);
    assert_eq!(map_intensity_to_frequency(-1.0), 200.0);
}

#[test]
fn identical_frames_have_no_motion() {
    assert_eq!(motion_intensity(&grey(90), &grey(90)), 0.0);
}

#[test]
fn intensity_is_the_normalised_rgb_difference() {
    // 76 800 pixels × 3 channels × 10 = 2 304 000
    let intensity = motion_intensity(&grey(0), &grey(10));
    assert!((intensity - 0.4608).abs() < 1e-6);
    assert_eq!(motion_intensity(&grey(0), &grey(255)), 1.0);
}

#[test]
fn pipeline_drives_the_engine_lead_cutoff() {
    let engine = Engine::new(EngineConfig::new().seed(2)).expect("engine");
    let cutoff = engine.lead_cutoff_param();
    assert_eq!(cutoff.get(), LEAD_IDLE_CUTOFF_HZ);

    let mut motion = MotionPipeline::new(cutoff.clone());
    let (tape, _) = Tape::new(&[0, 10, 10]);
    motion.enable(tape).expect("enable");

    // First frame has nothing to compare against
    assert_eq!(motion.sample(), Ok(0.0));
    assert_eq!(cutoff.get(), LEAD_IDLE_CUTOFF_HZ);

    let intensity = motion.sample().expect("second frame");
    assert!((intensity - 0.4608).abs() < 1e-6);
    assert!((cutoff.get() - 1_582.4).abs() < 0.1);

    motion.sample().expect("third frame");
    assert_eq!(cutoff.get(), 200.0);
}

#[test]
fn permission_denied_leaves_motion_off() {
    let cutoff = Engine::new(EngineConfig::new().seed(2))
        .expect("engine")
        .lead_cutoff_param();
    let mut motion = MotionPipeline::new(cutoff.clone());
    let (tape, closed) = Tape::denied();

    assert_eq!(motion.enable(tape), Err(MotionError::PermissionDenied));
    assert!(!motion.is_enabled());
    assert!(closed.load(Ordering::SeqCst));
    assert_eq!(motion.sample(), Err(MotionError::NotEnabled));
    assert_eq!(cutoff.get(), LEAD_IDLE_CUTOFF_HZ);
}

#[test]
fn capture_failure_releases_the_camera() {
    let cutoff = Engine::new(EngineConfig::new().seed(2))
        .expect("engine")
        .lead_cutoff_param();
    let mut motion = MotionPipeline::new(cutoff.clone());
    let (tape, closed) = Tape::new(&[0, 40]);
    motion.enable(tape).expect("enable");
    motion.sample().expect("prime");
    motion.sample().expect("diff");
    let last = cutoff.get();

    assert!(matches!(motion.sample(), Err(MotionError::Capture(_))));
    assert!(!motion.is_enabled());
    assert!(closed.load(Ordering::SeqCst));
    assert_eq!(cutoff.get(), last);
}
