use std::time::{Duration, Instant};

/// Control points of the CSS `ease` timing function
const EASE: (f32, f32, f32, f32) = (0.25, 0.1, 0.25, 1.0);

/// Width/opacity of the text field, as it would be styled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputStyle {
    pub width: u16,
    pub opacity: f32,
}

impl InputStyle {
    /// Resting style for a state: hidden when collapsed, full when expanded
    pub fn target(expanded: bool, full_width: u16) -> Self {
        if expanded {
            InputStyle {
                width: full_width.max(1),
                opacity: 1.0,
            }
        } else {
            InputStyle {
                width: 0,
                opacity: 0.0,
            }
        }
    }

    /// Style at an intermediate point of the expand animation (0 = collapsed)
    pub fn at(progress: f32, full_width: u16) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        InputStyle {
            width: (f32::from(full_width) * progress).round() as u16,
            opacity: progress,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.width > 0 && self.opacity > 0.0
    }
}

/// Eased animation between the collapsed (0.0) and expanded (1.0) states
///
/// Retargeting mid-flight starts from the current progress, so a quick
/// expand/collapse reverses smoothly instead of jumping.
#[derive(Debug, Clone)]
pub struct Transition {
    from: f32,
    to: f32,
    started: Option<Instant>,
    duration: Duration,
}

impl Transition {
    pub fn new(expanded: bool, duration: Duration) -> Self {
        let value = if expanded { 1.0 } else { 0.0 };
        Transition {
            from: value,
            to: value,
            started: None,
            duration,
        }
    }

    pub fn target(&self) -> bool {
        self.to >= 1.0
    }

    /// Start animating towards `expanded`; no-op when already heading there
    pub fn retarget(&mut self, expanded: bool, now: Instant) {
        if self.target() == expanded {
            return;
        }
        self.from = self.progress(now);
        self.to = if expanded { 1.0 } else { 0.0 };
        self.started = Some(now);
    }

    /// Eased progress in `[0, 1]`
    pub fn progress(&self, now: Instant) -> f32 {
        let Some(started) = self.started else {
            return self.to;
        };
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(started).as_secs_f32();
        let t = (elapsed / self.duration.as_secs_f32()).min(1.0);
        self.from + (self.to - self.from) * ease(t)
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        match self.started {
            None => true,
            Some(started) => now.saturating_duration_since(started) >= self.duration,
        }
    }
}

/// CSS `ease`: solve x(s) = t on the bezier, then evaluate y(s)
fn ease(t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let (x1, y1, x2, y2) = EASE;
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    let mut s = t;
    for _ in 0..24 {
        s = (lo + hi) / 2.0;
        if bezier(s, x1, x2) < t {
            lo = s;
        } else {
            hi = s;
        }
    }
    bezier(s, y1, y2)
}

fn bezier(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}
