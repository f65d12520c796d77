//! Headless backend: an in-memory element tree that logs every mutation.
//!
//! Stands in for a real presentation layer so the demo can run anywhere.
//! Transitions are reported as unsupported, which routes the carousel
//! through its manually-stepped animation path.

use std::collections::HashMap;

use carousel_types::{Capabilities, CarouselBackend, CarouselError, ElementId, Result};

#[derive(Debug, Clone, Default)]
struct Element {
    classes: Vec<String>,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
    width: f32,
    label: Option<String>,
}

/// In-memory element tree.
pub struct HeadlessBackend {
    elements: HashMap<ElementId, Element>,
    next_id: u32,
    roots: Vec<ElementId>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            next_id: 0,
            roots: Vec::new(),
        }
    }

    fn alloc(&mut self, el: Element) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, el);
        id
    }

    /// Create a slider root with `class` and `n` slides of `width` pixels.
    pub fn add_slider(&mut self, class: &str, n: usize, width: f32) -> ElementId {
        let slider = self.alloc(Element {
            classes: vec![class.to_string()],
            width,
            ..Element::default()
        });
        let slides: Vec<ElementId> = (0..n)
            .map(|i| {
                self.alloc(Element {
                    width,
                    parent: Some(slider),
                    label: Some(format!("slide {i}")),
                    ..Element::default()
                })
            })
            .collect();
        if let Some(root) = self.elements.get_mut(&slider) {
            root.children = slides;
        }
        self.roots.push(slider);
        slider
    }

    /// Change every slide width under `slider` (simulated viewport change).
    pub fn resize_slides(&mut self, slider: ElementId, width: f32) {
        let children = self
            .elements
            .get(&slider)
            .map(|el| el.children.clone())
            .unwrap_or_default();
        for c in children {
            if let Some(el) = self.elements.get_mut(&c) {
                el.width = width;
            }
        }
    }

    fn get(&self, el: ElementId) -> Result<&Element> {
        self.elements
            .get(&el)
            .ok_or_else(|| CarouselError::Backend(format!("no element {el:?}")))
    }

    fn get_mut(&mut self, el: ElementId) -> Result<&mut Element> {
        self.elements
            .get_mut(&el)
            .ok_or_else(|| CarouselError::Backend(format!("no element {el:?}")))
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CarouselBackend for HeadlessBackend {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            supports_transitions: false,
            supports_3d_transform: false,
        }
    }

    fn select(&mut self, selector: &str) -> Vec<ElementId> {
        let class = selector.trim_start_matches('.');
        self.roots
            .iter()
            .copied()
            .filter(|id| {
                self.elements
                    .get(id)
                    .is_some_and(|e| e.classes.iter().any(|c| c == class))
            })
            .collect()
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
        let clone = self.alloc(copy);
        log::debug!("clone {el:?} -> {clone:?}");
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
        Ok(())
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        self.get_mut(parent)?.children.push(child);
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn remove_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        self.get_mut(parent)?.children.retain(|&c| c != child);
        self.get_mut(child)?.parent = None;
        Ok(())
    }

    fn wrap_in_div(&mut self, el: ElementId, class: &str) -> Result<ElementId> {
        let parent = self.get(el)?.parent;
        let wrapper = self.alloc(Element {
            classes: vec![class.to_string()],
            children: vec![el],
            parent,
            ..Element::default()
        });
        if let Some(p) = parent {
            let children = &mut self.get_mut(p)?.children;
            if let Some(pos) = children.iter().position(|&c| c == el) {
                children[pos] = wrapper;
            }
        }
        self.get_mut(el)?.parent = Some(wrapper);
        Ok(wrapper)
    }

    fn create_button(&mut self, label: &str, class: &str) -> Result<ElementId> {
        let button = self.alloc(Element {
            classes: vec![class.to_string()],
            label: Some(label.to_string()),
            ..Element::default()
        });
        log::debug!("button {button:?} ({label})");
        Ok(button)
    }

    fn add_class(&mut self, el: ElementId, class: &str) -> Result<()> {
        let e = self.get_mut(el)?;
        if !e.classes.iter().any(|c| c == class) {
            e.classes.push(class.to_string());
        }
        log::debug!("{el:?} +class {class}");
        Ok(())
    }

    fn remove_class(&mut self, el: ElementId, class: &str) -> Result<()> {
        self.get_mut(el)?.classes.retain(|c| c != class);
        log::debug!("{el:?} -class {class}");
        Ok(())
    }

    fn offset_width(&self, el: ElementId) -> f32 {
        self.elements.get(&el).map_or(0.0, |e| e.width)
    }

    fn set_wrapper_width(&mut self, el: ElementId, px: f32) -> Result<()> {
        self.get_mut(el)?.width = px;
        log::debug!("{el:?} wrapper width {px}px");
        Ok(())
    }

    fn set_opacity(&mut self, el: ElementId, value: f32) -> Result<()> {
        self.get(el)?;
        log::debug!("{el:?} opacity {value:.3}");
        Ok(())
    }

    fn set_transition_duration(&mut self, el: ElementId, ms: u64) -> Result<()> {
        self.get(el)?;
        log::debug!("{el:?} transition {ms}ms");
        Ok(())
    }

    fn set_translate_x(&mut self, el: ElementId, px: f32) -> Result<()> {
        self.get(el)?;
        log::debug!("{el:?} translateX {px:.1}px");
        Ok(())
    }
}
