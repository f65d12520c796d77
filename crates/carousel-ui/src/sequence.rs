//! Slide sequence and index space.
//!
//! In slide mode the sequence is materialized with a clone at each end,
//! `[clone(last), real_0 .. real_N-1, clone(first)]`, so a transition can
//! run visually past either boundary before re-anchoring onto the matching
//! real slide. In fade mode no clones exist.

use carousel_types::{CarouselBackend, ElementId, Mode, Result};

/// Class carried by the two clone elements in slide mode.
pub const CLONE_CLASS: &str = "carousel-clone";

/// The ordered slides of one carousel, clones included.
#[derive(Debug, Clone)]
pub struct SlideSequence {
    slides: Vec<ElementId>,
    mode: Mode,
    real_count: usize,
}

impl SlideSequence {
    /// Build the sequence from `slider`'s children. In slide mode this
    /// clones the end slides and inserts them into the tree; clones are
    /// created once and never rebuilt.
    pub fn build(
        backend: &mut dyn CarouselBackend,
        slider: ElementId,
        mode: Mode,
    ) -> Result<Self> {
        let real = backend.children(slider);
        let real_count = real.len();
        let mut slides = real;

        if mode == Mode::Slide && real_count > 0 {
            let first = slides[0];
            let last = slides[real_count - 1];

            let first_clone = backend.clone_node(first)?;
            let last_clone = backend.clone_node(last)?;
            backend.add_class(first_clone, CLONE_CLASS)?;
            backend.add_class(last_clone, CLONE_CLASS)?;

            backend.insert_before(slider, last_clone, first)?;
            backend.append_child(slider, first_clone)?;

            slides.insert(0, last_clone);
            slides.push(first_clone);
        }

        Ok(Self {
            slides,
            mode,
            real_count,
        })
    }

    /// Element at `index`, clones included.
    pub fn get(&self, index: usize) -> Option<ElementId> {
        self.slides.get(index).copied()
    }

    /// Total length, clones included.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Number of real (non-clone) slides.
    pub fn real_count(&self) -> usize {
        self.real_count
    }

    /// Whether the slide at `index` is a clone.
    pub fn is_clone(&self, index: usize) -> bool {
        self.mode == Mode::Slide
            && self.real_count > 0
            && (index == 0 || index == self.slides.len() - 1)
    }

    /// Index of the first real slide: 1 in slide mode (leading clone), 0 in
    /// fade mode.
    pub fn first_item_index(&self) -> usize {
        match self.mode {
            Mode::Slide if self.real_count > 0 => 1,
            _ => 0,
        }
    }

    /// Index of the last real slide: N in slide mode, N-1 in fade mode.
    pub fn last_item_index(&self) -> usize {
        match self.mode {
            Mode::Slide => self.real_count,
            Mode::Fade => self.real_count.saturating_sub(1),
        }
    }

    /// Wrap an index that stepped one past either end of the real range
    /// back onto the opposite real slide. In-range indices are unchanged.
    pub fn normalize(&self, index: isize) -> usize {
        let first = self.first_item_index() as isize;
        let last = self.last_item_index() as isize;
        if index > last {
            first as usize
        } else if index < first {
            last as usize
        } else {
            index as usize
        }
    }

    /// All element ids, clones included.
    pub fn elements(&self) -> &[ElementId] {
        &self.slides
    }
}
