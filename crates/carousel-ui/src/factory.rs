//! Mounting: one independent carousel per matched element.

use carousel_types::{CarouselBackend, CarouselConfig, ElementId, Mode};

use crate::controller::Carousel;

/// Every carousel mounted by one factory call.
///
/// Instances share nothing: each has its own timers, animations and lock.
/// The set only fans calls out.
pub struct CarouselSet {
    carousels: Vec<Carousel>,
}

impl CarouselSet {
    /// Wire up every element matching `config.slider` as an independent
    /// carousel. A selector that matches nothing yields an empty set; an
    /// element the carousel cannot be built on (no slides) is skipped.
    /// Neither is an error.
    pub fn mount(
        backend: &mut dyn CarouselBackend,
        config: &CarouselConfig,
        now_ms: u64,
    ) -> Self {
        let roots = backend.select(&config.slider);
        if roots.is_empty() {
            log::debug!("carousel: selector {:?} matched nothing", config.slider);
        }

        let mut carousels = Vec::with_capacity(roots.len());
        for root in roots {
            match Carousel::build(backend, root, config, now_ms) {
                Ok(c) => carousels.push(c),
                Err(e) => log::warn!("carousel: skipping element {root:?}: {e}"),
            }
        }
        Self { carousels }
    }

    /// Mount with a mode given as a string, for config surfaces that pass
    /// modes through untyped. An unrecognized mode aborts construction
    /// silently: no instances are created.
    pub fn mount_with_mode_str(
        backend: &mut dyn CarouselBackend,
        config: &CarouselConfig,
        mode: &str,
        now_ms: u64,
    ) -> Self {
        match Mode::parse(mode) {
            Some(mode) => {
                let config = CarouselConfig {
                    mode,
                    ..config.clone()
                };
                Self::mount(backend, &config, now_ms)
            },
            None => {
                log::debug!("carousel: unsupported mode {mode:?}, nothing mounted");
                Self {
                    carousels: Vec::new(),
                }
            },
        }
    }

    pub fn len(&self) -> usize {
        self.carousels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carousels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Carousel> {
        self.carousels.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Carousel> {
        self.carousels.get_mut(index)
    }

    /// Drive every instance's timers and animations.
    pub fn tick(&mut self, backend: &mut dyn CarouselBackend, now_ms: u64) {
        for c in &mut self.carousels {
            c.tick(backend, now_ms);
        }
    }

    /// Route a click; only the instance owning the button reacts.
    pub fn handle_click(
        &mut self,
        backend: &mut dyn CarouselBackend,
        now_ms: u64,
        el: ElementId,
    ) {
        for c in &mut self.carousels {
            c.handle_click(backend, now_ms, el);
        }
    }

    /// Propagate a viewport resize.
    pub fn handle_resize(&mut self, backend: &mut dyn CarouselBackend) {
        for c in &mut self.carousels {
            c.handle_resize(backend);
        }
    }

    /// Tear down every instance.
    pub fn destroy(&mut self, backend: &mut dyn CarouselBackend) {
        for c in &mut self.carousels {
            c.destroy(backend);
        }
    }
}
