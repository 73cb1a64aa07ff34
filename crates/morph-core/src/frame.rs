use crate::capability::CapabilityProfile;
use crate::error::EngineError;

/// What to do with the host callback that just fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameDecision {
    /// Leave the previous image on screen; no simulation work.
    Skip,
    Process { sort: bool },
}

/// Frame-skip and sort cadence for the host's per-frame callback.
#[derive(Debug)]
pub struct FrameLoop {
    running: bool,
    frame_count: u64,
    frame_skip: u32,
    sort_interval: u32,
}

impl FrameLoop {
    pub fn new(profile: &CapabilityProfile) -> Self {
        let mut frame_loop = Self {
            running: false,
            frame_count: 0,
            frame_skip: 1,
            sort_interval: 1,
        };
        frame_loop.apply_profile(profile);
        frame_loop
    }

    pub fn apply_profile(&mut self, profile: &CapabilityProfile) {
        self.frame_skip = profile.frame_skip.max(1);
        self.sort_interval = profile.sort_interval.max(1);
    }

    /// Refuses to run without a surface. There is no retry.
    pub fn start(&mut self, surface_available: bool) -> Result<(), EngineError> {
        if !surface_available {
            log::warn!("no drawing surface; frame loop stays stopped");
            self.running = false;
            return Err(EngineError::SurfaceUnavailable);
        }
        if !self.running {
            log::debug!("frame loop started");
        }
        self.running = true;
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.running {
            log::debug!("frame loop stopped after {} frames", self.frame_count);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Count one host frame and decide whether it does any work.
    pub fn next_frame(&mut self) -> FrameDecision {
        self.frame_count += 1;
        if self.frame_count % self.frame_skip as u64 != 0 {
            return FrameDecision::Skip;
        }
        FrameDecision::Process {
            sort: self.frame_count % self.sort_interval as u64 == 0,
        }
    }
}
