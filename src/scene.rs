use egui::Pos2;
use log::{debug, info};

use crate::element::{Element, ElementId, ElementKind, ElementType, PropertyKey, PropertyValue};
use crate::error::PropertyError;
use crate::geometry::point_in_element;
use crate::id_generator::IdGenerator;
use crate::text_layout::TextMeasure;

/// Ordered collection of elements plus the current selection.
///
/// Creation order is paint order: later elements are drawn on top and win
/// hit-tests. The selection, when present, always names an element that is
/// still in the scene.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    elements: Vec<Element>,
    selected: Option<ElementId>,
    ids: IdGenerator,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Append a new element on top of the scene and return its id
    pub fn add_element(&mut self, position: Pos2, kind: ElementKind) -> ElementId {
        let id = self.ids.next_id();
        let element = Element::new(id, position, kind);
        info!("Added {} at ({}, {})", element.name, position.x, position.y);
        self.elements.push(element);
        id
    }

    /// Append an element with the creation defaults of `element_type`.
    ///
    /// Returns `None` for images, which have no defaults.
    pub fn create_with_defaults(&mut self, element_type: ElementType, pos: Pos2) -> Option<ElementId> {
        let kind = ElementKind::with_defaults(element_type, pos)?;
        Some(self.add_element(pos, kind))
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Position of `id` in paint order
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Topmost visible element whose region contains `pos`
    pub fn find_at_point(&self, pos: Pos2, metrics: &dyn TextMeasure) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .filter(|e| e.visible)
            .find(|e| point_in_element(pos, e, metrics))
            .map(Element::id)
    }

    /// Select `id`. Returns `false` and leaves the selection alone if no such element exists.
    pub fn select(&mut self, id: ElementId) -> bool {
        if self.element(id).is_none() {
            return false;
        }
        if self.selected != Some(id) {
            debug!("Selected element {id}");
        }
        self.selected = Some(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Element> {
        self.selected.and_then(|id| self.element(id))
    }

    pub fn selected_mut(&mut self) -> Option<&mut Element> {
        let id = self.selected?;
        self.element_mut(id)
    }

    /// Remove `id` from the scene, clearing the selection if it pointed there
    pub fn delete_by_id(&mut self, id: ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        let removed = self.elements.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        info!("Deleted {}", removed.name);
        Some(removed)
    }

    pub fn delete_selected(&mut self) -> Option<Element> {
        let id = self.selected?;
        self.delete_by_id(id)
    }

    /// Push a property value to element `id`.
    ///
    /// Returns `Ok(false)` when the element does not exist.
    pub fn set_property(
        &mut self,
        id: ElementId,
        key: &str,
        value: &PropertyValue,
    ) -> Result<bool, PropertyError> {
        let key: PropertyKey = key.parse()?;
        let Some(element) = self.element_mut(id) else {
            return Ok(false);
        };
        element.set_property(key, value)?;
        Ok(true)
    }

    /// Flip the visibility flag. Returns the new state, or `None` for an unknown id.
    pub fn toggle_visibility(&mut self, id: ElementId) -> Option<bool> {
        let element = self.element_mut(id)?;
        element.visible = !element.visible;
        Some(element.visible)
    }

    /// Remove every element. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        info!("Cleared {} elements", self.elements.len());
        self.elements.clear();
        self.selected = None;
    }
}
