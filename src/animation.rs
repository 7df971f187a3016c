/*
 * Animation Module
 *
 * The frame loop state owned by a Scene:
 *
 *     Initialized --enable--> Running --disable--> Paused --enable--> Running
 *
 * While running, every frame requests the next one and receives a fresh
 * handle. Disabling cancels the outstanding handle, so a frame that was
 * already scheduled finds the loop stopped and does nothing.
 */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Initialized,
    Running(FrameHandle),
    Paused,
}

#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    next_id: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Initialized,
            next_id: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_))
    }

    fn issue(&mut self) -> FrameHandle {
        self.next_id += 1;
        FrameHandle(self.next_id)
    }

    // Start the loop; enabling a running loop keeps its pending frame
    pub fn enable(&mut self) -> FrameHandle {
        if let LoopState::Running(handle) = self.state {
            return handle;
        }
        let handle = self.issue();
        self.state = LoopState::Running(handle);
        handle
    }

    // Cancel the pending frame, returning its handle if there was one
    pub fn disable(&mut self) -> Option<FrameHandle> {
        match self.state {
            LoopState::Running(handle) => {
                self.state = LoopState::Paused;
                Some(handle)
            }
            LoopState::Initialized | LoopState::Paused => None,
        }
    }

    /// Schedule the frame after the current one. Returns None when the loop
    /// is not running, in which case the caller must not render.
    pub fn request_next(&mut self) -> Option<FrameHandle> {
        if !self.is_running() {
            return None;
        }
        let handle = self.issue();
        self.state = LoopState::Running(handle);
        Some(handle)
    }
}
