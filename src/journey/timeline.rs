use bevy::prelude::*;

use super::JourneyError;
use crate::math;

/// The two colours of the background gradient.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct GradientColors {
    /// Upper colour.
    pub color_a: Srgba,
    /// Lower colour.
    pub color_b: Srgba,
}

impl GradientColors {
    /// Gradient from two `0xRRGGBB` values.
    pub const fn from_rgb(a: u32, b: u32) -> Self {
        Self {
            color_a: rgb(a),
            color_b: rgb(b),
        }
    }

    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            color_a: lerp_srgba(self.color_a, other.color_a, t),
            color_b: lerp_srgba(self.color_b, other.color_b, t),
        }
    }
}

/// How a segment eases between its start and target values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum Ease {
    /// Constant rate.
    Linear,
    /// Quadratic ease-out, the tween default.
    #[default]
    QuadOut,
}

impl Ease {
    fn apply(self, t: f32) -> f32 {
        match self {
            Self::Linear => t.clamp(0.0, 1.0),
            Self::QuadOut => math::ease_out_quad(t),
        }
    }
}

/// One keyframe segment: tween from the previous values to `target`.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct TimelineSegment {
    /// Length of the segment in timeline units.
    pub duration: f32,
    /// Colours reached at the end of the segment.
    pub target: GradientColors,
    /// Easing within the segment.
    pub ease: Ease,
}

impl TimelineSegment {
    /// Unit-length segment with the default ease.
    pub fn to(target: GradientColors) -> Self {
        Self {
            duration: 1.0,
            target,
            ease: Ease::default(),
        }
    }
}

/// Keyframed colours scrubbed by scroll progress rather than played by time.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct NarrativeTimeline {
    start: GradientColors,
    segments: Vec<TimelineSegment>,
    total: f32,
}

impl NarrativeTimeline {
    /// Builds a timeline. Every segment duration must be positive and finite.
    pub fn new(start: GradientColors, segments: Vec<TimelineSegment>) -> Result<Self, JourneyError> {
        if let Some((index, seg)) = segments
            .iter()
            .enumerate()
            .find(|(_, s)| !(s.duration.is_finite() && s.duration > 0.0))
        {
            return Err(JourneyError::InvalidSegmentDuration {
                index,
                duration: seg.duration,
            });
        }
        let total = segments.iter().map(|s| s.duration).sum();
        Ok(Self {
            start,
            segments,
            total,
        })
    }

    /// Sum of all segment durations.
    pub fn total_duration(&self) -> f32 {
        self.total
    }

    /// Values at the read head `time`, clamped to `[0, total_duration]`.
    pub fn sample(&self, time: f32) -> GradientColors {
        let mut remaining = time.clamp(0.0, self.total);
        let mut from = self.start;
        for seg in &self.segments {
            if remaining <= seg.duration {
                let t = seg.ease.apply(remaining / seg.duration);
                return from.lerp(&seg.target, t);
            }
            remaining -= seg.duration;
            from = seg.target;
        }
        from
    }

    /// Moves the read head straight to `fraction * total_duration`.
    ///
    /// Pure function of the fraction, so scrolling back replays the colours
    /// in reverse.
    pub fn scrub(&self, fraction: f32) -> GradientColors {
        self.sample(fraction.clamp(0.0, 1.0) * self.total)
    }

    /// Colours before the first segment.
    pub fn start(&self) -> GradientColors {
        self.start
    }
}

const fn rgb(hex: u32) -> Srgba {
    Srgba::rgb(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

fn lerp_srgba(a: Srgba, b: Srgba, t: f32) -> Srgba {
    Srgba::new(
        a.red + (b.red - a.red) * t,
        a.green + (b.green - a.green) * t,
        a.blue + (b.blue - a.blue) * t,
        a.alpha + (b.alpha - a.alpha) * t,
    )
}
