use std::time::{Duration, Instant};

/// Paces the main loop to a fixed frame rate
pub struct FrameClock {
    frame_time: Duration,
    last_tick: Instant,
    fps: u32,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame_time: Duration::from_secs(1) / fps.max(1),
            last_tick: Instant::now(),
            fps: 0,
        }
    }

    /// Sleeps away whatever is left of the current frame
    pub fn tick(&mut self) {
        let elapsed = self.last_tick.elapsed();
        if let Some(wait) = remaining(self.frame_time, elapsed) {
            std::thread::sleep(wait);
        }

        let now = Instant::now();
        let frame_time = now.duration_since(self.last_tick);
        self.last_tick = now;
        if frame_time.as_micros() > 0 {
            self.fps = (1_000_000 / frame_time.as_micros()) as u32;
        }
    }

    /// Measured rate of the last frame
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

fn remaining(frame_time: Duration, elapsed: Duration) -> Option<Duration> {
    frame_time.checked_sub(elapsed).filter(|wait| !wait.is_zero())
}
