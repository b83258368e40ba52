use std::time::{Duration, Instant};

/// Measures frame times and optionally sleeps to hold a fixed framerate
pub struct Framepacer {
    instants: [Instant; 2],
    current: usize,
    frames: u64,
}

impl Framepacer {
    pub fn new() -> Self {
        Self {
            instants: [Instant::now(); 2],
            current: 0,
            frames: 0,
        }
    }

    /// Seconds since the current frame began
    pub fn frametime(&self) -> f32 {
        self.instants[self.current].elapsed().as_secs_f32()
    }

    pub fn framerate(&self) -> f32 {
        1.0 / self.frametime()
    }

    /// Frames finished so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn begin_frame(&mut self) {
        self.instants[self.next()] = Instant::now();
    }

    /// Ends the frame, holding it until `framerate` is met. `0` means unlimited.
    pub fn end_frame(&mut self, framerate: u32) {
        if let Some(limit) = frame_budget(framerate) {
            const ACCURACY: f32 = 0.0001; // 100 microseconds
            let sleep_time = limit - self.frametime() - ACCURACY;

            if sleep_time > 0.0 {
                std::thread::sleep(Duration::from_secs_f32(sleep_time));

                while self.frametime() < limit {
                    std::thread::yield_now();
                }
            }
        }

        self.current = self.next();
        self.frames += 1;
    }

    fn next(&self) -> usize {
        (self.current + 1) % 2
    }
}

fn frame_budget(framerate: u32) -> Option<f32> {
    (framerate > 0).then(|| 1.0 / framerate as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_framerate_is_unlimited() {
        assert_eq!(frame_budget(0), None);
        assert_eq!(frame_budget(50), Some(0.02));
    }

    #[test]
    fn counts_finished_frames() {
        let mut pacer = Framepacer::new();
        for _ in 0..3 {
            pacer.begin_frame();
            pacer.end_frame(0);
        }
        assert_eq!(pacer.frames(), 3);
    }

    #[test]
    fn holds_the_frame_budget() {
        let start = Instant::now();
        let mut pacer = Framepacer::new();

        pacer.begin_frame();
        pacer.end_frame(100);

        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
