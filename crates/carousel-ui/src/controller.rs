//! Slide controller: the per-carousel state machine.
//!
//! One `Carousel` owns one slider element and everything attached to it:
//! the slide sequence (clones included), the current index, the transition
//! lock, the autoplay timer and the in-flight animations. At most one slide
//! change is ever in flight; `next`/`prev`/`go_to` during a transition are
//! dropped, never queued.

use carousel_types::{
    Capabilities, CarouselBackend, CarouselConfig, CarouselError, ElementId, Mode, Result,
};

use crate::animation::{Animation, AnimationEngine, Easing};
use crate::scheduler::{Scheduler, TimerId};
use crate::sequence::SlideSequence;

/// Class carried by exactly one real slide at a time.
pub const CURRENT_CLASS: &str = "currentSlide";
/// Class of the wrapper element a slider is wrapped in.
pub const WRAPPER_CLASS: &str = "carousel-wrapper";
/// Mode class for fade carousels.
pub const FADE_CLASS: &str = "carousel--fadeIn";
/// Mode class for slide carousels.
pub const SLIDE_CLASS: &str = "carousel--slide";
/// Class of the previous-slide button.
pub const PREV_BUTTON_CLASS: &str = "carousel-prev";
/// Class of the next-slide button.
pub const NEXT_BUTTON_CLASS: &str = "carousel-next";

/// Direction of the slide change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Left-to-right: advancing to a higher index.
    #[default]
    Ltr,
    /// Right-to-left: backing to a lower index.
    Rtl,
}

/// Scheduler tasks owned by one carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    /// Automatic advance tick.
    Autoplay,
    /// Declarative transition (or fade unlock timer) has finished.
    TransitionEnd,
}

/// Tags for in-flight engine animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Effect {
    /// Opacity of the outgoing slide, 1 to 0.
    FadeOut(ElementId),
    /// Opacity of the incoming slide, 0 to 1.
    FadeIn(ElementId),
    /// Horizontal offset of the slide track.
    Track,
}

/// One carousel instance.
pub struct Carousel {
    config: CarouselConfig,
    capabilities: Capabilities,
    /// The slider element; in slide mode it is the translated track.
    slider: ElementId,
    wrapper: ElementId,
    sequence: SlideSequence,
    current_index: usize,
    direction: Direction,
    is_animating: bool,
    /// Index the in-flight transition started from.
    pending_from: usize,
    /// Raw target of the in-flight transition; may point at a clone.
    pending_target: isize,
    /// Manual fade path: animations still running for this transition.
    fades_remaining: u8,
    /// Measured per-slide width (slide mode).
    slide_width: f32,
    prev_button: Option<ElementId>,
    next_button: Option<ElementId>,
    scheduler: Scheduler<Task>,
    engine: AnimationEngine<Effect>,
    autoplay_timer: Option<TimerId>,
    destroyed: bool,
}

impl Carousel {
    /// Wire up one slider element: wrapper, mode class, current class,
    /// clones and initial offset (slide mode), nav buttons, autoplay.
    pub fn build(
        backend: &mut dyn CarouselBackend,
        slider: ElementId,
        config: &CarouselConfig,
        now_ms: u64,
    ) -> Result<Self> {
        if backend.children(slider).is_empty() {
            return Err(CarouselError::Config("slider has no slides".into()));
        }

        let capabilities = backend.capabilities();
        let wrapper = backend.wrap_in_div(slider, WRAPPER_CLASS)?;

        let mode_class = match config.mode {
            Mode::Fade => FADE_CLASS,
            Mode::Slide => SLIDE_CLASS,
        };
        backend.add_class(slider, mode_class)?;

        let sequence = SlideSequence::build(backend, slider, config.mode)?;
        let current_index = sequence.first_item_index();

        let mut carousel = Self {
            config: config.clone(),
            capabilities,
            slider,
            wrapper,
            sequence,
            current_index,
            direction: Direction::Ltr,
            is_animating: false,
            pending_from: current_index,
            pending_target: current_index as isize,
            fades_remaining: 0,
            slide_width: 0.0,
            prev_button: None,
            next_button: None,
            scheduler: Scheduler::new(),
            engine: AnimationEngine::new(),
            autoplay_timer: None,
            destroyed: false,
        };

        let current_el = carousel
            .sequence
            .get(current_index)
            .ok_or_else(|| CarouselError::Backend("missing current slide".into()))?;
        backend.add_class(current_el, CURRENT_CLASS)?;

        match config.mode {
            Mode::Fade => {
                for (i, &el) in carousel.sequence.elements().iter().enumerate() {
                    let opacity = if i == current_index { 1.0 } else { 0.0 };
                    backend.set_opacity(el, opacity)?;
                    if capabilities.supports_transitions {
                        backend.set_transition_duration(el, config.transition_duration_ms)?;
                    }
                }
            },
            Mode::Slide => {
                carousel.slide_width = backend.offset_width(current_el);
                backend.set_transition_duration(slider, 0)?;
                backend.set_translate_x(slider, carousel.slide_width * current_index as f32)?;
                backend.set_wrapper_width(wrapper, carousel.slide_width)?;
            },
        }

        if config.manual_controls {
            let prev = backend.create_button("Prev", PREV_BUTTON_CLASS)?;
            backend.insert_before(wrapper, prev, slider)?;
            let next = backend.create_button("Next", NEXT_BUTTON_CLASS)?;
            backend.append_child(wrapper, next)?;
            carousel.prev_button = Some(prev);
            carousel.next_button = Some(next);
        }

        if config.autoplay.enabled {
            if config.loop_around {
                carousel.autoplay_timer = Some(carousel.scheduler.schedule_repeating(
                    now_ms,
                    config.autoplay.interval_ms,
                    Task::Autoplay,
                ));
            } else {
                log::debug!("carousel: autoplay ignored, looping is off");
            }
        }

        Ok(carousel)
    }

    /// Advance one slide. Dropped while a transition is in flight, and at
    /// the last slide when looping is off.
    pub fn next(&mut self, backend: &mut dyn CarouselBackend, now_ms: u64) {
        if self.rejects_requests() {
            return;
        }
        if !self.config.loop_around && self.current_index >= self.sequence.last_item_index() {
            log::debug!("carousel: next dropped at last slide, looping is off");
            return;
        }
        self.direction = Direction::Ltr;
        self.start_transition(backend, now_ms, self.current_index as isize + 1);
    }

    /// Back one slide. Mirror of [`Self::next`].
    pub fn prev(&mut self, backend: &mut dyn CarouselBackend, now_ms: u64) {
        if self.rejects_requests() {
            return;
        }
        if !self.config.loop_around && self.current_index <= self.sequence.first_item_index() {
            log::debug!("carousel: prev dropped at first slide, looping is off");
            return;
        }
        self.direction = Direction::Rtl;
        self.start_transition(backend, now_ms, self.current_index as isize - 1);
    }

    /// Jump to a real slide index. Out-of-range targets are dropped.
    pub fn go_to(&mut self, backend: &mut dyn CarouselBackend, now_ms: u64, index: usize) {
        if self.rejects_requests() {
            return;
        }
        if index < self.sequence.first_item_index() || index > self.sequence.last_item_index() {
            log::debug!("carousel: go_to({index}) out of range, dropped");
            return;
        }
        if index == self.current_index {
            return;
        }
        self.direction = if index > self.current_index {
            Direction::Ltr
        } else {
            Direction::Rtl
        };
        self.start_transition(backend, now_ms, index as isize);
    }

    /// Stop automatic advance.
    pub fn pause(&mut self) {
        if let Some(id) = self.autoplay_timer.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Re-arm automatic advance. Same gate as at build time: autoplay only
    /// runs when looping is on.
    pub fn resume(&mut self, now_ms: u64) {
        if self.destroyed || self.autoplay_timer.is_some() {
            return;
        }
        if self.config.autoplay.enabled && self.config.loop_around {
            self.autoplay_timer = Some(self.scheduler.schedule_repeating(
                now_ms,
                self.config.autoplay.interval_ms,
                Task::Autoplay,
            ));
        }
    }

    /// Drive timers and animations. The embedding loop calls this on every
    /// frame with the current clock reading.
    pub fn tick(&mut self, backend: &mut dyn CarouselBackend, now_ms: u64) {
        if self.destroyed {
            return;
        }

        for task in self.scheduler.poll(now_ms) {
            match task {
                Task::Autoplay => self.next(backend, now_ms),
                Task::TransitionEnd => {
                    if let Err(e) = self.complete_transition(backend) {
                        log::warn!("carousel: transition completion failed: {e}");
                        self.is_animating = false;
                    }
                },
            }
        }

        for step in self.engine.poll(now_ms) {
            let result = self.apply_step(backend, step.tag, step.value, step.done);
            if let Err(e) = result {
                log::warn!("carousel: animation step failed: {e}");
            }
        }
    }

    /// Route a click on one of the nav buttons.
    pub fn handle_click(&mut self, backend: &mut dyn CarouselBackend, now_ms: u64, el: ElementId) {
        if Some(el) == self.next_button {
            self.next(backend, now_ms);
        } else if Some(el) == self.prev_button {
            self.prev(backend, now_ms);
        }
    }

    /// Re-measure the slide width and re-anchor the track (slide mode).
    pub fn handle_resize(&mut self, backend: &mut dyn CarouselBackend) {
        if self.destroyed || self.config.mode != Mode::Slide {
            return;
        }
        if let Err(e) = self.apply_resize(backend) {
            log::warn!("carousel: resize failed: {e}");
        }
    }

    /// Tear down: cancel every timer and in-flight animation, remove the
    /// nav buttons and clone slides. No pending completion can touch the
    /// instance afterwards.
    pub fn destroy(&mut self, backend: &mut dyn CarouselBackend) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.scheduler.clear();
        self.engine.clear();
        self.autoplay_timer = None;
        self.is_animating = false;

        for button in [self.prev_button.take(), self.next_button.take()]
            .into_iter()
            .flatten()
        {
            if let Err(e) = backend.remove_child(self.wrapper, button) {
                log::warn!("carousel: failed to remove nav button: {e}");
            }
        }

        let clone_indices: Vec<usize> = (0..self.sequence.len())
            .filter(|&i| self.sequence.is_clone(i))
            .collect();
        for i in clone_indices {
            if let Some(el) = self.sequence.get(i) {
                if let Err(e) = backend.remove_child(self.slider, el) {
                    log::warn!("carousel: failed to remove clone: {e}");
                }
            }
        }
    }

    // -- accessors --

    /// Current slide index (sequence index space, clones included).
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether a transition is in flight.
    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Measured per-slide width (slide mode; 0 in fade mode).
    pub fn slide_width(&self) -> f32 {
        self.slide_width
    }

    pub fn sequence(&self) -> &SlideSequence {
        &self.sequence
    }

    pub fn slider(&self) -> ElementId {
        self.slider
    }

    pub fn wrapper(&self) -> ElementId {
        self.wrapper
    }

    /// Nav buttons as `(prev, next)`; `None` when `manual_controls` is off.
    pub fn nav_buttons(&self) -> (Option<ElementId>, Option<ElementId>) {
        (self.prev_button, self.next_button)
    }

    // -- internals --

    fn rejects_requests(&self) -> bool {
        // The lock check is the mutual-exclusion guarantee: requests that
        // arrive mid-transition are dropped, not deferred.
        self.destroyed || self.is_animating || self.sequence.real_count() <= 1
    }

    fn start_transition(
        &mut self,
        backend: &mut dyn CarouselBackend,
        now_ms: u64,
        target: isize,
    ) {
        self.is_animating = true;
        self.pending_from = self.current_index;
        self.pending_target = target;

        let started = match self.config.mode {
            Mode::Slide => self.start_slide_effect(backend, now_ms),
            Mode::Fade => self.start_fade_effect(backend, now_ms),
        };
        if let Err(e) = started {
            log::warn!("carousel: transition start failed: {e}");
            self.is_animating = false;
            return;
        }
        self.restart_autoplay(now_ms);
    }

    fn start_slide_effect(
        &mut self,
        backend: &mut dyn CarouselBackend,
        now_ms: u64,
    ) -> Result<()> {
        let duration = self.config.transition_duration_ms;
        let from_px = self.slide_width * self.pending_from as f32;
        let to_px = self.slide_width * self.pending_target as f32;

        if self.capabilities.supports_transitions {
            backend.set_transition_duration(self.slider, duration)?;
            backend.set_translate_x(self.slider, to_px)?;
            self.scheduler
                .schedule_once(now_ms, duration, Task::TransitionEnd);
        } else {
            self.engine.start(
                Effect::Track,
                Animation::new(now_ms, duration, from_px, to_px, Easing::Linear),
                self.config.tick_interval_ms,
            );
        }
        Ok(())
    }

    fn start_fade_effect(
        &mut self,
        backend: &mut dyn CarouselBackend,
        now_ms: u64,
    ) -> Result<()> {
        let duration = self.config.transition_duration_ms;
        let from_el = self
            .sequence
            .get(self.pending_from)
            .ok_or_else(|| CarouselError::Backend("missing outgoing slide".into()))?;
        // Fade mode has no clones, so the target element is picked from the
        // already-normalized index.
        let to_index = self.sequence.normalize(self.pending_target);
        let to_el = self
            .sequence
            .get(to_index)
            .ok_or_else(|| CarouselError::Backend("missing incoming slide".into()))?;

        if self.capabilities.supports_transitions {
            backend.remove_class(from_el, CURRENT_CLASS)?;
            backend.add_class(to_el, CURRENT_CLASS)?;
            backend.set_opacity(from_el, 0.0)?;
            backend.set_opacity(to_el, 1.0)?;
            self.scheduler
                .schedule_once(now_ms, duration, Task::TransitionEnd);
        } else {
            let tick = self.config.tick_interval_ms;
            self.fades_remaining = 2;
            self.engine
                .fade_out(now_ms, Effect::FadeOut(from_el), duration, tick);
            self.engine
                .fade_in(now_ms, Effect::FadeIn(to_el), duration, tick);
        }
        Ok(())
    }

    fn apply_step(
        &mut self,
        backend: &mut dyn CarouselBackend,
        tag: Effect,
        value: f32,
        done: bool,
    ) -> Result<()> {
        match tag {
            Effect::Track => {
                backend.set_translate_x(self.slider, value)?;
                if done {
                    self.complete_transition(backend)?;
                }
            },
            Effect::FadeOut(el) => {
                backend.set_opacity(el, value)?;
                if done {
                    backend.remove_class(el, CURRENT_CLASS)?;
                    self.finish_one_fade(backend)?;
                }
            },
            Effect::FadeIn(el) => {
                backend.set_opacity(el, value)?;
                if done {
                    backend.add_class(el, CURRENT_CLASS)?;
                    self.finish_one_fade(backend)?;
                }
            },
        }
        Ok(())
    }

    fn finish_one_fade(&mut self, backend: &mut dyn CarouselBackend) -> Result<()> {
        self.fades_remaining = self.fades_remaining.saturating_sub(1);
        if self.fades_remaining == 0 {
            self.complete_transition(backend)?;
        }
        Ok(())
    }

    /// Commit the in-flight transition: normalize the index and, when a
    /// clone boundary was crossed, re-anchor the track onto the matching
    /// real slide at zero duration. The clone offset and the real offset
    /// derive from the same `slide_width`, so the snap has no visual delta.
    fn complete_transition(&mut self, backend: &mut dyn CarouselBackend) -> Result<()> {
        if !self.is_animating {
            return Ok(());
        }
        let normalized = self.sequence.normalize(self.pending_target);

        if self.config.mode == Mode::Slide {
            if self.pending_target != normalized as isize {
                backend.set_transition_duration(self.slider, 0)?;
                backend.set_translate_x(self.slider, self.slide_width * normalized as f32)?;
            }
            if let Some(from_el) = self.sequence.get(self.pending_from) {
                backend.remove_class(from_el, CURRENT_CLASS)?;
            }
            if let Some(to_el) = self.sequence.get(normalized) {
                backend.add_class(to_el, CURRENT_CLASS)?;
            }
        }
        // Fade mode classes are handled at effect start (declarative path)
        // or as each fade animation completes (stepped path).

        self.current_index = normalized;
        self.is_animating = false;
        Ok(())
    }

    fn restart_autoplay(&mut self, now_ms: u64) {
        if let Some(id) = self.autoplay_timer.take() {
            self.scheduler.cancel(id);
            self.autoplay_timer = Some(self.scheduler.schedule_repeating(
                now_ms,
                self.config.autoplay.interval_ms,
                Task::Autoplay,
            ));
        }
    }

    fn apply_resize(&mut self, backend: &mut dyn CarouselBackend) -> Result<()> {
        let first = self
            .sequence
            .get(self.sequence.first_item_index())
            .ok_or_else(|| CarouselError::Backend("missing first slide".into()))?;
        self.slide_width = backend.offset_width(first);

        // An in-flight transition was computed against the old width, so its
        // destination is wrong in pixels. Land on the destination at the new
        // width and commit the transition instead of letting it run out.
        let anchor = if self.is_animating {
            self.engine.clear();
            self.sequence.normalize(self.pending_target)
        } else {
            self.current_index
        };
        backend.set_transition_duration(self.slider, 0)?;
        backend.set_translate_x(self.slider, self.slide_width * anchor as f32)?;
        backend.set_wrapper_width(self.wrapper, self.slide_width)?;
        if self.is_animating {
            self.complete_transition(backend)?;
        }
        Ok(())
    }
}
