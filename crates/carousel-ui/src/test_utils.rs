//! Shared test utilities for carousel tests.
//!
//! Provides a [`MockBackend`] over an in-memory element tree that records
//! every mutation for assertion, and a [`FakeClock`] for driving the
//! scheduler and animation engine deterministically.

use std::cell::Cell;
use std::collections::HashMap;

use carousel_types::{Capabilities, CarouselBackend, CarouselError, ElementId, Result};

use crate::clock::Clock;

/// A recorded backend mutation.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum BackendCall {
    CloneNode {
        source: ElementId,
        clone: ElementId,
    },
    InsertBefore {
        parent: ElementId,
        new: ElementId,
        reference: ElementId,
    },
    AppendChild {
        parent: ElementId,
        child: ElementId,
    },
    RemoveChild {
        parent: ElementId,
        child: ElementId,
    },
    Wrap {
        el: ElementId,
        wrapper: ElementId,
    },
    CreateButton {
        el: ElementId,
        label: String,
        class: String,
    },
    AddClass {
        el: ElementId,
        class: String,
    },
    RemoveClass {
        el: ElementId,
        class: String,
    },
    SetWrapperWidth {
        el: ElementId,
        px: f32,
    },
    SetOpacity {
        el: ElementId,
        value: f32,
    },
    SetTransitionDuration {
        el: ElementId,
        ms: u64,
    },
    SetTranslateX {
        el: ElementId,
        px: f32,
        /// Transition duration in effect on `el` when the call was made.
        transition_ms: u64,
    },
}

#[derive(Debug, Clone, Default)]
struct MockElement {
    classes: Vec<String>,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
    width: f32,
    opacity: Option<f32>,
    translate_x: Option<f32>,
    transition_ms: u64,
    label: Option<String>,
    cloned_from: Option<ElementId>,
}

/// In-memory element tree that records all mutations.
pub struct MockBackend {
    elements: HashMap<ElementId, MockElement>,
    next_id: u32,
    sliders: Vec<ElementId>,
    capabilities: Capabilities,
    pub calls: Vec<BackendCall>,
}

/// Default rendered slide width.
pub const SLIDE_WIDTH: f32 = 300.0;

impl MockBackend {
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            next_id: 0,
            sliders: Vec::new(),
            capabilities: Capabilities::default(),
            calls: Vec::new(),
        }
    }

    /// A backend holding one slider (class `carousel`) with `n` slides.
    pub fn with_slider(n: usize) -> Self {
        let mut backend = Self::new();
        backend.add_slider(n);
        backend
    }

    /// Declarative-transition capability on; used to exercise the CSS path.
    pub fn with_transitions(mut self) -> Self {
        self.capabilities = Capabilities {
            supports_transitions: true,
            supports_3d_transform: true,
        };
        self
    }

    fn alloc(&mut self, el: MockElement) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, el);
        id
    }

    /// Add another slider root with `n` slides; returns its id.
    pub fn add_slider(&mut self, n: usize) -> ElementId {
        let slider = self.alloc(MockElement {
            classes: vec!["carousel".to_string()],
            width: SLIDE_WIDTH,
            ..MockElement::default()
        });
        for _ in 0..n {
            let slide = self.alloc(MockElement {
                width: SLIDE_WIDTH,
                parent: Some(slider),
                ..MockElement::default()
            });
            self.elements.get_mut(&slider).unwrap().children.push(slide);
        }
        self.sliders.push(slider);
        slider
    }

    /// The first slider root.
    pub fn slider_root(&self) -> ElementId {
        self.sliders[0]
    }

    /// Change the rendered width of every slide under `slider`.
    pub fn resize_slides(&mut self, slider: ElementId, width: f32) {
        let children = self.elements[&slider].children.clone();
        for c in children {
            self.elements.get_mut(&c).unwrap().width = width;
        }
    }

    fn get(&self, el: ElementId) -> Result<&MockElement> {
        self.elements
            .get(&el)
            .ok_or_else(|| CarouselError::Backend(format!("no element {el:?}")))
    }

    fn get_mut(&mut self, el: ElementId) -> Result<&mut MockElement> {
        self.elements
            .get_mut(&el)
            .ok_or_else(|| CarouselError::Backend(format!("no element {el:?}")))
    }

    // -- assertion helpers --

    pub fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.elements
            .get(&el)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    pub fn opacity_of(&self, el: ElementId) -> Option<f32> {
        self.elements.get(&el).and_then(|e| e.opacity)
    }

    pub fn translate_of(&self, el: ElementId) -> Option<f32> {
        self.elements.get(&el).and_then(|e| e.translate_x)
    }

    pub fn transition_of(&self, el: ElementId) -> u64 {
        self.elements.get(&el).map_or(0, |e| e.transition_ms)
    }

    /// Element a clone was copied from.
    pub fn clone_source(&self, el: ElementId) -> Option<ElementId> {
        self.elements.get(&el).and_then(|e| e.cloned_from)
    }

    /// Number of `CloneNode` calls.
    pub fn clone_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, BackendCall::CloneNode { .. }))
            .count()
    }

    /// All buttons created, as `(id, label)` pairs in creation order.
    pub fn buttons(&self) -> Vec<(ElementId, String)> {
        self.calls
            .iter()
            .filter_map(|c| {
                if let BackendCall::CreateButton { el, label, .. } = c {
                    Some((*el, label.clone()))
                } else {
                    None
                }
            })
            .collect()
    }

    /// All `SetTranslateX` calls on `el`, as `(px, transition_ms)` pairs.
    pub fn translate_calls(&self, el: ElementId) -> Vec<(f32, u64)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BackendCall::SetTranslateX {
                    el: e,
                    px,
                    transition_ms,
                } if *e == el => Some((*px, *transition_ms)),
                _ => None,
            })
            .collect()
    }

    /// Number of `SetOpacity` calls on `el`.
    pub fn opacity_call_count(&self, el: ElementId) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, BackendCall::SetOpacity { el: e, .. } if *e == el))
            .count()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CarouselBackend for MockBackend {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn select(&mut self, selector: &str) -> Vec<ElementId> {
        let class = selector.trim_start_matches('.');
        let mut matches: Vec<ElementId> = self
            .sliders
            .iter()
            .copied()
            .filter(|id| self.has_class(*id, class))
            .collect();
        matches.sort_by_key(|id| id.0);
        matches
    }

    fn children(&self, el: ElementId) -> Vec<ElementId> {
        self.elements
            .get(&el)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    fn clone_node(&mut self, el: ElementId) -> Result<ElementId> {
        let mut copy = self.get(el)?.clone();
        copy.parent = None;
        copy.children = Vec::new();
        copy.cloned_from = Some(el);
        let clone = self.alloc(copy);
        self.calls.push(BackendCall::CloneNode { source: el, clone });
        Ok(clone)
    }

    fn insert_before(
        &mut self,
        parent: ElementId,
        new: ElementId,
        reference: ElementId,
    ) -> Result<()> {
        let pos = self
            .get(parent)?
            .children
            .iter()
            .position(|&c| c == reference)
            .ok_or_else(|| CarouselError::Backend("reference not a child".into()))?;
        self.get_mut(parent)?.children.insert(pos, new);
        self.get_mut(new)?.parent = Some(parent);
        self.calls.push(BackendCall::InsertBefore {
            parent,
            new,
            reference,
        });
        Ok(())
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        self.get_mut(parent)?.children.push(child);
        self.get_mut(child)?.parent = Some(parent);
        self.calls.push(BackendCall::AppendChild { parent, child });
        Ok(())
    }

    fn remove_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        self.get_mut(parent)?.children.retain(|&c| c != child);
        self.get_mut(child)?.parent = None;
        self.calls.push(BackendCall::RemoveChild { parent, child });
        Ok(())
    }

    fn wrap_in_div(&mut self, el: ElementId, class: &str) -> Result<ElementId> {
        let parent = self.get(el)?.parent;
        let wrapper = self.alloc(MockElement {
            classes: vec![class.to_string()],
            children: vec![el],
            parent,
            ..MockElement::default()
        });
        if let Some(p) = parent {
            let children = &mut self.get_mut(p)?.children;
            if let Some(pos) = children.iter().position(|&c| c == el) {
                children[pos] = wrapper;
            }
        }
        self.get_mut(el)?.parent = Some(wrapper);
        self.calls.push(BackendCall::Wrap { el, wrapper });
        Ok(wrapper)
    }

    fn create_button(&mut self, label: &str, class: &str) -> Result<ElementId> {
        let button = self.alloc(MockElement {
            classes: vec![class.to_string()],
            label: Some(label.to_string()),
            ..MockElement::default()
        });
        self.calls.push(BackendCall::CreateButton {
            el: button,
            label: label.to_string(),
            class: class.to_string(),
        });
        Ok(button)
    }

    fn add_class(&mut self, el: ElementId, class: &str) -> Result<()> {
        let e = self.get_mut(el)?;
        if !e.classes.iter().any(|c| c == class) {
            e.classes.push(class.to_string());
        }
        self.calls.push(BackendCall::AddClass {
            el,
            class: class.to_string(),
        });
        Ok(())
    }

    fn remove_class(&mut self, el: ElementId, class: &str) -> Result<()> {
        self.get_mut(el)?.classes.retain(|c| c != class);
        self.calls.push(BackendCall::RemoveClass {
            el,
            class: class.to_string(),
        });
        Ok(())
    }

    fn offset_width(&self, el: ElementId) -> f32 {
        self.elements.get(&el).map_or(0.0, |e| e.width)
    }

    fn set_wrapper_width(&mut self, el: ElementId, px: f32) -> Result<()> {
        self.get_mut(el)?.width = px;
        self.calls.push(BackendCall::SetWrapperWidth { el, px });
        Ok(())
    }

    fn set_opacity(&mut self, el: ElementId, value: f32) -> Result<()> {
        self.get_mut(el)?.opacity = Some(value);
        self.calls.push(BackendCall::SetOpacity { el, value });
        Ok(())
    }

    fn set_transition_duration(&mut self, el: ElementId, ms: u64) -> Result<()> {
        self.get_mut(el)?.transition_ms = ms;
        self.calls.push(BackendCall::SetTransitionDuration { el, ms });
        Ok(())
    }

    fn set_translate_x(&mut self, el: ElementId, px: f32) -> Result<()> {
        let transition_ms = self.get(el)?.transition_ms;
        self.get_mut(el)?.translate_x = Some(px);
        self.calls.push(BackendCall::SetTranslateX {
            el,
            px,
            transition_ms,
        });
        Ok(())
    }
}

/// A manually-advanced clock.
pub struct FakeClock {
    now: Cell<u64>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self { now: Cell::new(0) }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
