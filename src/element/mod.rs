use egui::{Color32, Pos2, Vec2};

mod image;
mod property;
mod shapes;
mod text;

pub use image::{Bitmap, ImageElement, MAX_PLACED_IMAGE_SIZE, fit_within};
pub use property::{PropertyKey, PropertyValue};
pub use shapes::{CircleElement, LineElement, RectangleElement};
pub use text::{FontWeight, TextAlign, TextElement};

/// Scene-unique element identifier. Allocated by the scene, never reused.
pub type ElementId = usize;

/// Discriminant of an element, used for naming, layer lists and export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Text,
    Line,
    Rectangle,
    Circle,
    Image,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Line => "line",
            ElementType::Rectangle => "rectangle",
            ElementType::Circle => "circle",
            ElementType::Image => "image",
        }
    }

    /// Display name given to a freshly created element
    pub fn default_name(&self, id: ElementId) -> String {
        match self {
            ElementType::Image => format!("Image {id}"),
            other => format!("{} {id}", other.as_str()),
        }
    }
}

/// Type-specific payload of an element
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Text(TextElement),
    Line(LineElement),
    Rectangle(RectangleElement),
    Circle(CircleElement),
    Image(ImageElement),
}

impl ElementKind {
    /// Payload with the creation defaults for a tool click at `anchor`.
    ///
    /// Images have no defaults: they only come from uploaded bitmaps.
    pub fn with_defaults(element_type: ElementType, anchor: Pos2) -> Option<Self> {
        match element_type {
            ElementType::Text => Some(ElementKind::Text(TextElement::default())),
            ElementType::Line => Some(ElementKind::Line(LineElement::from_start(anchor))),
            ElementType::Rectangle => Some(ElementKind::Rectangle(RectangleElement::default())),
            ElementType::Circle => Some(ElementKind::Circle(CircleElement::default())),
            ElementType::Image => None,
        }
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Text(_) => ElementType::Text,
            ElementKind::Line(_) => ElementType::Line,
            ElementKind::Rectangle(_) => ElementType::Rectangle,
            ElementKind::Circle(_) => ElementType::Circle,
            ElementKind::Image(_) => ElementType::Image,
        }
    }
}

/// One placed primitive in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    id: ElementId,
    pub name: String,
    /// Anchor point; its meaning depends on the kind (see each payload type)
    pub position: Pos2,
    pub visible: bool,
    pub kind: ElementKind,
}

impl Element {
    pub fn new(id: ElementId, position: Pos2, kind: ElementKind) -> Self {
        Self {
            id,
            name: kind.element_type().default_name(id),
            position,
            visible: true,
            kind,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Move the element rigidly. Lines carry their end point along.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
        if let ElementKind::Line(line) = &mut self.kind {
            line.end += delta;
        }
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match &self.kind {
            ElementKind::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// `#rrggbb` form used by the property panel and the code exporter
pub fn color_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names_follow_the_tool() {
        assert_eq!(ElementType::Rectangle.default_name(3), "rectangle 3");
        assert_eq!(ElementType::Image.default_name(7), "Image 7");
    }

    #[test]
    fn translating_a_line_moves_both_ends() {
        let start = Pos2::new(10.0, 10.0);
        let kind = ElementKind::with_defaults(ElementType::Line, start).unwrap();
        let mut line = Element::new(1, start, kind);
        line.translate(Vec2::new(5.0, -3.0));

        assert_eq!(line.position, Pos2::new(15.0, 7.0));
        match &line.kind {
            ElementKind::Line(l) => assert_eq!(l.end, Pos2::new(115.0, 7.0)),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn images_have_no_click_defaults() {
        assert!(ElementKind::with_defaults(ElementType::Image, Pos2::ZERO).is_none());
    }

    #[test]
    fn hex_ignores_alpha() {
        assert_eq!(color_hex(Color32::from_rgb(0x3b, 0x82, 0xf6)), "#3b82f6");
    }
}
