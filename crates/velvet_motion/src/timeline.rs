//! Timeline sequencing
//!
//! A timeline is an ordered list of animation steps bound to a single
//! progress source. `advance_to` re-derives every output from absolute
//! progress — nothing is integrated incrementally — so repeated and
//! rewound progress values are exactly recoverable.
//!
//! Steps are data, not side-effecting calls: each step carries its
//! targets, property tracks (from → to pairs), easing, duration, stagger,
//! and an offset within the timeline. Construction validates every target
//! and track; a timeline is never partially constructed.

use velvet_core::{
    Easing, MotionError, Property, PropertySink, PropertyValue, Result, TargetHandle,
    TargetRegistry,
};
use velvet_text::SegmentTree;

// ============================================================================
// Build-time target validation
// ============================================================================

/// Validation context for timeline construction
///
/// Holds the registry and the segment trees whose references may appear as
/// step targets. A handle that resolves nowhere fails construction with
/// `MissingTarget`.
pub struct TargetContext<'a> {
    registry: &'a TargetRegistry,
    trees: Vec<&'a SegmentTree>,
}

impl<'a> TargetContext<'a> {
    pub fn new(registry: &'a TargetRegistry) -> Self {
        Self {
            registry,
            trees: Vec::new(),
        }
    }

    /// Add a segment tree whose references may be targeted
    pub fn with_tree(mut self, tree: &'a SegmentTree) -> Self {
        self.trees.push(tree);
        self
    }

    fn validate(&self, handle: TargetHandle) -> Result<()> {
        match handle {
            TargetHandle::Element(element) => {
                if self.registry.contains(element) {
                    Ok(())
                } else {
                    Err(MotionError::MissingTarget {
                        id: "unregistered element".into(),
                    })
                }
            }
            TargetHandle::Segment(segment) => {
                if self.trees.iter().any(|t| t.is_current(segment)) {
                    Ok(())
                } else {
                    Err(MotionError::MissingTarget {
                        id: format!("stale segment (generation {})", segment.generation),
                    })
                }
            }
        }
    }
}

// ============================================================================
// Steps
// ============================================================================

/// Position of a step within its timeline
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum StepOffset {
    /// Start when the previous step's span ends
    #[default]
    AfterPrevious,
    /// Absolute position in seconds from the timeline start
    At(f32),
    /// Relative to the previous step's end; negative overlaps
    Gap(f32),
}

/// One property track within a step
#[derive(Clone, Debug)]
struct PropertyTrack {
    property: Property,
    from: PropertyValue,
    to: PropertyValue,
}

/// One atomic transformation: a set of targets, the property deltas applied
/// to them, and the step's timing
#[derive(Clone, Debug, Default)]
pub struct TimelineStep {
    targets: Vec<TargetHandle>,
    tracks: Vec<PropertyTrack>,
    easing: Easing,
    duration: f32,
    stagger: f32,
    offset: StepOffset,
}

impl TimelineStep {
    pub fn new() -> Self {
        Self {
            duration: 1.0,
            ..Default::default()
        }
    }

    /// Add a single target
    pub fn target(mut self, target: impl Into<TargetHandle>) -> Self {
        self.targets.push(target.into());
        self
    }

    /// Add targets in order
    pub fn targets<I, T>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetHandle>,
    {
        self.targets.extend(targets.into_iter().map(Into::into));
        self
    }

    /// Animate a property between explicit values
    pub fn tween(
        mut self,
        property: Property,
        from: impl Into<PropertyValue>,
        to: impl Into<PropertyValue>,
    ) -> Self {
        self.tracks.push(PropertyTrack {
            property,
            from: from.into(),
            to: to.into(),
        });
        self
    }

    /// Animate a property from its resting value to a target value
    pub fn tween_to(self, property: Property, to: impl Into<PropertyValue>) -> Self {
        let from = property.identity();
        self.tween(property, from, to)
    }

    /// Animate a property from an explicit value back to its resting value
    /// (a "from" tween: the element ends where the stylesheet put it)
    pub fn tween_from(self, property: Property, from: impl Into<PropertyValue>) -> Self {
        let to = property.identity();
        self.tween(property, from, to)
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Step duration in seconds
    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    /// Delay increment applied across successive targets, in seconds
    pub fn stagger(mut self, seconds: f32) -> Self {
        self.stagger = seconds.max(0.0);
        self
    }

    /// Place this step at an absolute offset
    pub fn at(mut self, seconds: f32) -> Self {
        self.offset = StepOffset::At(seconds);
        self
    }

    /// Place this step relative to the previous step's end
    pub fn gap(mut self, seconds: f32) -> Self {
        self.offset = StepOffset::Gap(seconds);
        self
    }

    /// Full span of the step including its stagger tail
    fn span(&self) -> f32 {
        self.duration + self.stagger * self.targets.len().saturating_sub(1) as f32
    }
}

// ============================================================================
// Timeline
// ============================================================================

/// A step with its resolved absolute start time
#[derive(Clone, Debug)]
struct ResolvedStep {
    start: f32,
    step: TimelineStep,
}

/// Ordered sequence of animation steps driven by one progress source
#[derive(Clone, Debug)]
pub struct Timeline {
    steps: Vec<ResolvedStep>,
    total: f32,
}

/// Builder validating steps into a `Timeline`
#[derive(Default)]
pub struct TimelineBuilder {
    steps: Vec<TimelineStep>,
}

impl TimelineBuilder {
    pub fn step(mut self, step: TimelineStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Validate all steps and resolve offsets
    ///
    /// Fails if any step has no tracks, pairs mismatched value kinds, or
    /// references a target the context cannot resolve. On failure nothing
    /// is constructed.
    pub fn build(self, context: &TargetContext<'_>) -> Result<Timeline> {
        let mut resolved = Vec::with_capacity(self.steps.len());
        let mut cursor = 0.0f32;
        let mut total = 0.0f32;

        for step in self.steps {
            if step.tracks.is_empty() {
                return Err(MotionError::EmptyStep {
                    targets: step.targets.len(),
                });
            }
            for track in &step.tracks {
                if !track.from.same_kind(&track.to) {
                    return Err(MotionError::MismatchedTrack {
                        property: track.property.to_string(),
                    });
                }
            }
            for &target in &step.targets {
                context.validate(target)?;
            }

            let start = match step.offset {
                StepOffset::AfterPrevious => cursor,
                StepOffset::At(seconds) => seconds.max(0.0),
                StepOffset::Gap(seconds) => (cursor + seconds).max(0.0),
            };
            let end = start + step.span();
            cursor = end;
            total = total.max(end);

            resolved.push(ResolvedStep { start, step });
        }

        Ok(Timeline {
            steps: resolved,
            total,
        })
    }
}

impl Timeline {
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::default()
    }

    /// Total duration: the furthest step end, staggers included
    pub fn total_duration(&self) -> f32 {
        self.total
    }

    /// Write the state for an absolute progress value
    ///
    /// Progress is clamped to [0,1] and mapped onto the timeline's local
    /// time axis. Each target's fraction is derived by clamping and
    /// rescaling into its own stagger-shifted window, so calling this with
    /// any progress sequence — including rewinds and repeats — always
    /// yields the state a single call with the final value would.
    pub fn advance_to(&self, progress: f32, sink: &mut dyn PropertySink) {
        let t = progress.clamp(0.0, 1.0) * self.total;

        for resolved in &self.steps {
            let step = &resolved.step;
            for (index, &target) in step.targets.iter().enumerate() {
                let target_start = resolved.start + step.stagger * index as f32;
                let local = if step.duration > 0.0 {
                    ((t - target_start) / step.duration).clamp(0.0, 1.0)
                } else if t >= target_start {
                    1.0
                } else {
                    0.0
                };
                let eased = step.easing.apply(local);

                for track in &step.tracks {
                    match track.from.lerp(&track.to, eased) {
                        Some(value) => sink.set(target, track.property, value),
                        // Unreachable: kinds are validated at build
                        None => tracing::warn!(
                            property = %track.property,
                            "skipping write for mismatched track"
                        ),
                    }
                }
            }
        }
    }
}
