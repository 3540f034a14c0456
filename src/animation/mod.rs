//! Animation sink.
//!
//! States drive animation through two fire-and-forget calls: a cross-fade
//! cue when a state is entered, and a continuously updated float parameter
//! while walking. Nothing is ever read back.

use serde::{Deserialize, Serialize};

/// Float parameter carrying the damped walk amount (0 idle, 1 walking).
pub const MOVE_BLEND_PARAM: &str = "MoveSpeed";

/// Clip or blend tree to cross-fade into on state entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum AnimationCue {
    Move,
    Jump,
    Fall,
}

impl AnimationCue {
    /// Name of the animator state the cue targets.
    pub fn clip_name(&self) -> &'static str {
        match self {
            Self::Move => "MoveBlendTree",
            Self::Jump => "Jump",
            Self::Fall => "Fall",
        }
    }
}

/// Receiver for animation commands.
pub trait AnimationSink {
    fn cross_fade(&mut self, cue: AnimationCue, duration: f32);

    fn set_float(&mut self, param: &'static str, value: f32);
}

impl<T: AnimationSink + ?Sized> AnimationSink for Box<T> {
    fn cross_fade(&mut self, cue: AnimationCue, duration: f32) {
        (**self).cross_fade(cue, duration)
    }

    fn set_float(&mut self, param: &'static str, value: f32) {
        (**self).set_float(param, value)
    }
}

/// Discards every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAnimator;

impl AnimationSink for NullAnimator {
    fn cross_fade(&mut self, _cue: AnimationCue, _duration: f32) {}

    fn set_float(&mut self, _param: &'static str, _value: f32) {}
}

/// A command received by a [`RecordingAnimator`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationCommand {
    CrossFade { cue: AnimationCue, duration: f32 },
    SetFloat { param: &'static str, value: f32 },
}

/// Keeps every command it receives, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnimator {
    commands: Vec<AnimationCommand>,
}

impl RecordingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[AnimationCommand] {
        &self.commands
    }

    /// Cues in the order they were cross-faded.
    pub fn cues(&self) -> Vec<AnimationCue> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                AnimationCommand::CrossFade { cue, .. } => Some(*cue),
                AnimationCommand::SetFloat { .. } => None,
            })
            .collect()
    }

    /// Most recent value written to `param`.
    pub fn last_float(&self, param: &str) -> Option<f32> {
        self.commands.iter().rev().find_map(|c| match c {
            AnimationCommand::SetFloat { param: p, value } if *p == param => Some(*value),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl AnimationSink for RecordingAnimator {
    fn cross_fade(&mut self, cue: AnimationCue, duration: f32) {
        self.commands
            .push(AnimationCommand::CrossFade { cue, duration });
    }

    fn set_float(&mut self, param: &'static str, value: f32) {
        self.commands.push(AnimationCommand::SetFloat { param, value });
    }
}

/// Move `current` toward `target` with exponential smoothing.
///
/// `damp_time` is the time constant: after `damp_time` seconds about 63% of
/// the gap is closed. A zero damp time snaps straight to the target.
pub fn damp(current: f32, target: f32, damp_time: f32, dt: f32) -> f32 {
    if damp_time <= 0.0 {
        return target;
    }
    current + (target - current) * (1.0 - (-dt / damp_time).exp())
}
