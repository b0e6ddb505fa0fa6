use instant::Instant;

/// Seconds elapsed since the first time the clock was read.
#[derive(Clone, Copy, Debug, Default)]
pub struct Clock {
    start: Option<Instant>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the clock on first use, so the first frame reads roughly zero.
    pub fn elapsed(&mut self) -> f32 {
        self.start
            .get_or_insert_with(Instant::now)
            .elapsed()
            .as_secs_f32()
    }

    pub fn is_running(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_read_and_never_goes_back() {
        let mut clock = Clock::new();
        assert!(!clock.is_running());
        let first = clock.elapsed();
        assert!(clock.is_running());
        assert!(first < 1.0);
        let second = clock.elapsed();
        assert!(second >= first);
    }
}
