use std::f64::consts::PI;
use std::time::{Duration, Instant};

/// Chat box scroll position, counted in lines up from the bottom.
#[derive(Debug, Clone, Default)]
pub struct ChatScroll {
    offset: u16,
    animation: Option<ScrollAnimation>,
}

#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: u16,
    started: Instant,
    duration: Duration,
}

impl ChatScroll {
    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn scroll_up(&mut self, lines: u16, max_offset: u16) {
        self.animation = None;
        self.offset = self.offset.saturating_add(lines).min(max_offset);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.animation = None;
        self.offset = self.offset.saturating_sub(lines);
    }

    /// Starts easing the view back to the bottom.
    pub fn animate_to_bottom(&mut self, now: Instant, duration: Duration) {
        if self.offset == 0 {
            self.animation = None;
            return;
        }
        self.animation = Some(ScrollAnimation {
            from: self.offset,
            started: now,
            duration,
        });
    }

    /// Advances the animation. Returns whether the offset changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        let elapsed = now.saturating_duration_since(animation.started);
        let next = eased_offset(animation.from, elapsed, animation.duration);
        if next == 0 {
            self.animation = None;
        }
        let changed = next != self.offset;
        self.offset = next;
        changed
    }
}

/// Offset at `elapsed` into an animation from `from` down to zero, using a
/// swing (half cosine) curve.
pub fn eased_offset(from: u16, elapsed: Duration, duration: Duration) -> u16 {
    if duration.is_zero() || elapsed >= duration {
        return 0;
    }
    let progress = elapsed.as_secs_f64() / duration.as_secs_f64();
    let eased = 0.5 - (progress * PI).cos() / 2.0;
    let remaining = f64::from(from) * (1.0 - eased);
    // Bounded by `from`, so the cast cannot truncate.
    remaining.round().clamp(0.0, f64::from(from)) as u16
}
