//! Animation primitives: easing functions, timestamped animations, and the
//! engine that steps them.

/// Standard easing functions.
///
/// Input `p` is clamped to `[0.0, 1.0]`. Output is the eased value. All of
/// these map 0 to 0 and 1 to 1 except [`elastic`], which is deliberately
/// left non-normalized.
pub mod easing {
    /// Linear easing (no acceleration).
    pub fn linear(p: f32) -> f32 {
        p.clamp(0.0, 1.0)
    }

    /// Quadratic ease-in (slow start).
    pub fn quadratic(p: f32) -> f32 {
        let p = p.clamp(0.0, 1.0);
        p * p
    }

    /// Cosine ease-in-out (slow start and end).
    pub fn swing(p: f32) -> f32 {
        let p = p.clamp(0.0, 1.0);
        0.5 - (p * core::f32::consts::PI).cos() / 2.0
    }

    /// Circular ease-in (very slow start, sharp end).
    pub fn circ(p: f32) -> f32 {
        let p = p.clamp(0.0, 1.0);
        1.0 - p.acos().sin()
    }

    /// Back ease-in: pulls behind the start before accelerating.
    /// `x` controls the overshoot amount.
    pub fn back(p: f32, x: f32) -> f32 {
        let p = p.clamp(0.0, 1.0);
        p * p * ((x + 1.0) * p - x)
    }

    /// Bounce ease-out: staged parabolic segments of halving height.
    pub fn bounce(p: f32) -> f32 {
        let p = p.clamp(0.0, 1.0);
        let mut a = 0.0_f32;
        let mut b = 1.0_f32;
        loop {
            // Threshold reaches 0 at a = 1.75, so the loop always exits.
            if p >= (7.0 - 4.0 * a) / 11.0 {
                return -((11.0 - 6.0 * a - 11.0 * p) / 4.0).powi(2) + b * b;
            }
            a += b;
            b /= 2.0;
        }
    }

    /// Elastic ease: exponentially-decayed cosine. `x` shapes the frequency.
    ///
    /// Not normalized: `elastic(1.0, x)` is not 1.0 for general `x`. This
    /// matches the curve's historical definition and is kept as-is; callers
    /// that need an exact landing should pick another easing.
    pub fn elastic(p: f32, x: f32) -> f32 {
        let p = p.clamp(0.0, 1.0);
        2.0_f32.powf(10.0 * (p - 1.0))
            * (20.0 * core::f32::consts::PI * x / 3.0 * p).cos()
    }
}

/// An easing curve selector, dispatching to the functions in [`easing`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    Linear,
    Quadratic,
    /// The fade easing.
    #[default]
    Swing,
    Circ,
    Back {
        overshoot: f32,
    },
    Bounce,
    /// Non-normalized; see [`easing::elastic`].
    Elastic {
        shape: f32,
    },
}

impl Easing {
    /// Evaluate the curve at progress `p`.
    pub fn eval(self, p: f32) -> f32 {
        match self {
            Easing::Linear => easing::linear(p),
            Easing::Quadratic => easing::quadratic(p),
            Easing::Swing => easing::swing(p),
            Easing::Circ => easing::circ(p),
            Easing::Back { overshoot } => easing::back(p, overshoot),
            Easing::Bounce => easing::bounce(p),
            Easing::Elastic { shape } => easing::elastic(p, shape),
        }
    }
}

/// A value interpolation anchored to a start timestamp.
#[derive(Debug, Clone, Copy)]
pub struct Animation {
    /// Start timestamp in milliseconds.
    pub start_ms: u64,
    /// Total duration in milliseconds. Zero completes immediately.
    pub duration_ms: u64,
    /// Starting value.
    pub from: f32,
    /// Target value.
    pub to: f32,
    /// Easing curve.
    pub easing: Easing,
}

impl Animation {
    pub fn new(start_ms: u64, duration_ms: u64, from: f32, to: f32, easing: Easing) -> Self {
        Self {
            start_ms,
            duration_ms,
            from,
            to,
            easing,
        }
    }

    /// Normalized progress at `now_ms`, clamped to `[0, 1]`.
    pub fn progress(&self, now_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Interpolated value at `now_ms`.
    pub fn value(&self, now_ms: u64) -> f32 {
        let eased = self.easing.eval(self.progress(now_ms));
        self.from + (self.to - self.from) * eased
    }

    /// Whether the full duration has elapsed at `now_ms`.
    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

/// Handle to an in-flight engine animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(u64);

/// One emitted animation step.
#[derive(Debug, Clone)]
pub struct Step<T> {
    /// The caller's tag for this animation.
    pub tag: T,
    /// Progress in `[0, 1]`.
    pub progress: f32,
    /// Eased, interpolated value.
    pub value: f32,
    /// True exactly once, on the final step.
    pub done: bool,
}

struct Active<T> {
    handle: AnimationHandle,
    tag: T,
    anim: Animation,
    tick_ms: u64,
    last_step_ms: u64,
}

/// Steps a set of tagged animations against a millisecond clock.
///
/// Animations on different targets run concurrently and independently. The
/// engine does not police two animations driving the same target; callers
/// serialize those themselves (the carousel's transition lock does).
pub struct AnimationEngine<T> {
    active: Vec<Active<T>>,
    next_handle: u64,
}

impl<T: Clone> AnimationEngine<T> {
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            next_handle: 0,
        }
    }

    /// Start an animation; steps are emitted from `poll` at most every
    /// `tick_ms`, with the final step always emitted exactly once.
    pub fn start(&mut self, tag: T, anim: Animation, tick_ms: u64) -> AnimationHandle {
        let handle = AnimationHandle(self.next_handle);
        self.next_handle += 1;
        self.active.push(Active {
            handle,
            tag,
            last_step_ms: anim.start_ms,
            anim,
            tick_ms: tick_ms.max(1),
        });
        handle
    }

    /// Drive `tag`'s opacity from 1 to 0 with the swing easing.
    pub fn fade_out(
        &mut self,
        now_ms: u64,
        tag: T,
        duration_ms: u64,
        tick_ms: u64,
    ) -> AnimationHandle {
        let anim = Animation::new(now_ms, duration_ms, 1.0, 0.0, Easing::Swing);
        self.start(tag, anim, tick_ms)
    }

    /// Drive `tag`'s opacity from 0 to 1 with the swing easing.
    pub fn fade_in(
        &mut self,
        now_ms: u64,
        tag: T,
        duration_ms: u64,
        tick_ms: u64,
    ) -> AnimationHandle {
        let anim = Animation::new(now_ms, duration_ms, 0.0, 1.0, Easing::Swing);
        self.start(tag, anim, tick_ms)
    }

    /// Cancel an in-flight animation. No further steps are emitted for it,
    /// including the final one.
    pub fn cancel(&mut self, handle: AnimationHandle) {
        self.active.retain(|a| a.handle != handle);
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Whether no animations are in flight.
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Emit due steps at `now_ms`. Finished animations emit a `done` step
    /// and are dropped.
    pub fn poll(&mut self, now_ms: u64) -> Vec<Step<T>> {
        let mut steps = Vec::new();
        let mut finished: Vec<AnimationHandle> = Vec::new();
        for a in &mut self.active {
            if a.anim.is_finished(now_ms) {
                steps.push(Step {
                    tag: a.tag.clone(),
                    progress: 1.0,
                    value: a.anim.value(now_ms),
                    done: true,
                });
                finished.push(a.handle);
            } else if now_ms.saturating_sub(a.last_step_ms) >= a.tick_ms {
                a.last_step_ms = now_ms;
                steps.push(Step {
                    tag: a.tag.clone(),
                    progress: a.anim.progress(now_ms),
                    value: a.anim.value(now_ms),
                    done: false,
                });
            }
        }
        self.active.retain(|a| !finished.contains(&a.handle));
        steps
    }
}

impl<T: Clone> Default for AnimationEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}
