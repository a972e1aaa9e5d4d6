use std::str::FromStr;

use egui::Color32;
use serde::{Deserialize, Serialize};

use super::{Element, ElementKind, ElementType, color_hex};
use crate::error::PropertyError;

/// Editable fields addressable through the property-update contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Name,
    X,
    Y,
    Visible,
    Text,
    FontSize,
    FontFamily,
    Color,
    TextAlign,
    FontWeight,
    Width,
    Height,
    LineHeight,
    EndX,
    EndY,
    StrokeColor,
    LineWidth,
    FillColor,
    Filled,
    Radius,
}

impl PropertyKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKey::Name => "name",
            PropertyKey::X => "x",
            PropertyKey::Y => "y",
            PropertyKey::Visible => "visible",
            PropertyKey::Text => "text",
            PropertyKey::FontSize => "fontSize",
            PropertyKey::FontFamily => "fontFamily",
            PropertyKey::Color => "color",
            PropertyKey::TextAlign => "textAlign",
            PropertyKey::FontWeight => "fontWeight",
            PropertyKey::Width => "width",
            PropertyKey::Height => "height",
            PropertyKey::LineHeight => "lineHeight",
            PropertyKey::EndX => "endX",
            PropertyKey::EndY => "endY",
            PropertyKey::StrokeColor => "strokeColor",
            PropertyKey::LineWidth => "lineWidth",
            PropertyKey::FillColor => "fillColor",
            PropertyKey::Filled => "filled",
            PropertyKey::Radius => "radius",
        }
    }

    /// Keys shown in the property panel for an element type, in panel order
    pub fn editable_for(element_type: ElementType) -> &'static [PropertyKey] {
        use PropertyKey::*;
        match element_type {
            ElementType::Text => &[
                Name, X, Y, Text, FontSize, Width, FontFamily, Color, FontWeight, LineHeight,
                TextAlign,
            ],
            ElementType::Line => &[Name, X, Y, EndX, EndY, StrokeColor, LineWidth],
            ElementType::Rectangle => &[
                Name, X, Y, Width, Height, Filled, FillColor, StrokeColor, LineWidth,
            ],
            ElementType::Circle => &[Name, X, Y, Radius, Filled, FillColor, StrokeColor, LineWidth],
            ElementType::Image => &[Name, X, Y, Width, Height],
        }
    }
}

impl FromStr for PropertyKey {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use PropertyKey::*;
        let key = match s {
            "name" => Name,
            "x" => X,
            "y" => Y,
            "visible" => Visible,
            "text" => Text,
            "fontSize" => FontSize,
            "fontFamily" => FontFamily,
            "color" => Color,
            "textAlign" => TextAlign,
            "fontWeight" => FontWeight,
            "width" => Width,
            "height" => Height,
            "lineHeight" => LineHeight,
            "endX" => EndX,
            "endY" => EndY,
            "strokeColor" => StrokeColor,
            "lineWidth" => LineWidth,
            "fillColor" => FillColor,
            "filled" => Filled,
            "radius" => Radius,
            other => return Err(PropertyError::UnknownKey(other.to_owned())),
        };
        Ok(key)
    }
}

/// A value pushed by the property panel. Deserializes from plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        PropertyValue::Number(value as f64)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Number(value as f64)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl TryFrom<serde_json::Value> for PropertyValue {
    type Error = serde_json::Error;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

impl PropertyValue {
    fn number(&self, key: PropertyKey) -> Result<f32, PropertyError> {
        match self {
            PropertyValue::Number(n) if n.is_finite() => Ok(*n as f32),
            PropertyValue::Number(_) => Err(PropertyError::InvalidValue {
                key: key.as_str(),
                reason: "number must be finite".to_owned(),
            }),
            _ => Err(PropertyError::TypeMismatch {
                key: key.as_str(),
                expected: "a number",
            }),
        }
    }

    /// Sizes, radii and stroke widths
    fn positive(&self, key: PropertyKey) -> Result<f32, PropertyError> {
        let n = self.number(key)?;
        if n > 0.0 {
            Ok(n)
        } else {
            Err(PropertyError::InvalidValue {
                key: key.as_str(),
                reason: format!("{n} is not greater than zero"),
            })
        }
    }

    fn flag(&self, key: PropertyKey) -> Result<bool, PropertyError> {
        match self {
            PropertyValue::Bool(b) => Ok(*b),
            _ => Err(PropertyError::TypeMismatch {
                key: key.as_str(),
                expected: "a boolean",
            }),
        }
    }

    fn text(&self, key: PropertyKey) -> Result<&str, PropertyError> {
        match self {
            PropertyValue::Text(s) => Ok(s),
            _ => Err(PropertyError::TypeMismatch {
                key: key.as_str(),
                expected: "a string",
            }),
        }
    }

    fn color(&self, key: PropertyKey) -> Result<Color32, PropertyError> {
        let hex = self.text(key)?;
        Color32::from_hex(hex).map_err(|err| PropertyError::InvalidValue {
            key: key.as_str(),
            reason: format!("`{hex}` is not a hex color ({err:?})"),
        })
    }

    fn parsed<T: FromStr>(&self, key: PropertyKey) -> Result<T, PropertyError> {
        let raw = self.text(key)?;
        raw.parse().map_err(|_| PropertyError::InvalidValue {
            key: key.as_str(),
            reason: format!("`{raw}` is not a recognized option"),
        })
    }
}

impl Element {
    /// Current value of a property, or `None` when the key does not apply to this type
    pub fn property(&self, key: PropertyKey) -> Option<PropertyValue> {
        use PropertyKey as K;
        let value = match (key, &self.kind) {
            (K::Name, _) => self.name.clone().into(),
            (K::X, _) => self.position.x.into(),
            (K::Y, _) => self.position.y.into(),
            (K::Visible, _) => self.visible.into(),

            (K::Text, ElementKind::Text(t)) => t.content.clone().into(),
            (K::FontSize, ElementKind::Text(t)) => t.font_size.into(),
            (K::FontFamily, ElementKind::Text(t)) => t.font_family.clone().into(),
            (K::Color, ElementKind::Text(t)) => color_hex(t.color).into(),
            (K::TextAlign, ElementKind::Text(t)) => t.align.as_str().into(),
            (K::FontWeight, ElementKind::Text(t)) => t.weight.as_css().into(),
            (K::Width, ElementKind::Text(t)) => t.width.into(),
            (K::LineHeight, ElementKind::Text(t)) => t.line_height.into(),

            (K::EndX, ElementKind::Line(l)) => l.end.x.into(),
            (K::EndY, ElementKind::Line(l)) => l.end.y.into(),
            (K::StrokeColor, ElementKind::Line(l)) => color_hex(l.stroke_color).into(),
            (K::LineWidth, ElementKind::Line(l)) => l.stroke_width.into(),

            (K::Width, ElementKind::Rectangle(r)) => r.width.into(),
            (K::Height, ElementKind::Rectangle(r)) => r.height.into(),
            (K::FillColor, ElementKind::Rectangle(r)) => color_hex(r.fill_color).into(),
            (K::StrokeColor, ElementKind::Rectangle(r)) => color_hex(r.stroke_color).into(),
            (K::LineWidth, ElementKind::Rectangle(r)) => r.stroke_width.into(),
            (K::Filled, ElementKind::Rectangle(r)) => r.filled.into(),

            (K::Radius, ElementKind::Circle(c)) => c.radius.into(),
            (K::FillColor, ElementKind::Circle(c)) => color_hex(c.fill_color).into(),
            (K::StrokeColor, ElementKind::Circle(c)) => color_hex(c.stroke_color).into(),
            (K::LineWidth, ElementKind::Circle(c)) => c.stroke_width.into(),
            (K::Filled, ElementKind::Circle(c)) => c.filled.into(),

            (K::Width, ElementKind::Image(i)) => i.width.into(),
            (K::Height, ElementKind::Image(i)) => i.height.into(),

            _ => return None,
        };
        Some(value)
    }

    /// Type-checked setter behind the property-update contract.
    ///
    /// On error the element is left untouched.
    pub fn set_property(
        &mut self,
        key: PropertyKey,
        value: &PropertyValue,
    ) -> Result<(), PropertyError> {
        use PropertyKey as K;
        let element_type = self.element_type();
        match (key, &mut self.kind) {
            (K::Name, _) => self.name = value.text(key)?.to_owned(),
            (K::X, _) => self.position.x = value.number(key)?,
            (K::Y, _) => self.position.y = value.number(key)?,
            (K::Visible, _) => self.visible = value.flag(key)?,

            (K::Text, ElementKind::Text(t)) => t.content = value.text(key)?.to_owned(),
            (K::FontSize, ElementKind::Text(t)) => t.font_size = value.positive(key)?,
            (K::FontFamily, ElementKind::Text(t)) => t.font_family = value.text(key)?.to_owned(),
            (K::Color, ElementKind::Text(t)) => t.color = value.color(key)?,
            (K::TextAlign, ElementKind::Text(t)) => t.align = value.parsed(key)?,
            (K::FontWeight, ElementKind::Text(t)) => t.weight = value.parsed(key)?,
            (K::Width, ElementKind::Text(t)) => t.width = value.positive(key)?,
            (K::LineHeight, ElementKind::Text(t)) => t.line_height = value.positive(key)?,

            (K::EndX, ElementKind::Line(l)) => l.end.x = value.number(key)?,
            (K::EndY, ElementKind::Line(l)) => l.end.y = value.number(key)?,
            (K::StrokeColor, ElementKind::Line(l)) => l.stroke_color = value.color(key)?,
            (K::LineWidth, ElementKind::Line(l)) => l.stroke_width = value.positive(key)?,

            (K::Width, ElementKind::Rectangle(r)) => r.width = value.positive(key)?,
            (K::Height, ElementKind::Rectangle(r)) => r.height = value.positive(key)?,
            (K::FillColor, ElementKind::Rectangle(r)) => r.fill_color = value.color(key)?,
            (K::StrokeColor, ElementKind::Rectangle(r)) => r.stroke_color = value.color(key)?,
            (K::LineWidth, ElementKind::Rectangle(r)) => r.stroke_width = value.positive(key)?,
            (K::Filled, ElementKind::Rectangle(r)) => r.filled = value.flag(key)?,

            (K::Radius, ElementKind::Circle(c)) => c.radius = value.positive(key)?,
            (K::FillColor, ElementKind::Circle(c)) => c.fill_color = value.color(key)?,
            (K::StrokeColor, ElementKind::Circle(c)) => c.stroke_color = value.color(key)?,
            (K::LineWidth, ElementKind::Circle(c)) => c.stroke_width = value.positive(key)?,
            (K::Filled, ElementKind::Circle(c)) => c.filled = value.flag(key)?,

            (K::Width, ElementKind::Image(i)) => i.width = value.positive(key)?,
            (K::Height, ElementKind::Image(i)) => i.height = value.positive(key)?,

            _ => {
                return Err(PropertyError::NotApplicable {
                    key: key.as_str(),
                    element_type: element_type.as_str(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, ElementType, TextAlign};
    use egui::Pos2;

    fn text_element() -> Element {
        let kind = ElementKind::with_defaults(ElementType::Text, Pos2::ZERO).unwrap();
        Element::new(1, Pos2::new(10.0, 20.0), kind)
    }

    #[test]
    fn keys_round_trip_through_their_names() {
        for key in PropertyKey::editable_for(ElementType::Text) {
            assert_eq!(key.as_str().parse::<PropertyKey>().unwrap(), *key);
        }
        assert!(matches!(
            "bogus".parse::<PropertyKey>(),
            Err(PropertyError::UnknownKey(_))
        ));
    }

    #[test]
    fn setters_are_type_checked() {
        let mut element = text_element();
        let before = element.clone();

        let err = element
            .set_property(PropertyKey::FontSize, &"large".into())
            .unwrap_err();
        assert!(matches!(err, PropertyError::TypeMismatch { .. }));
        assert_eq!(element, before);

        element.set_property(PropertyKey::FontSize, &PropertyValue::Number(24.0)).unwrap();
        assert_eq!(element.property(PropertyKey::FontSize), Some(24.0f32.into()));
    }

    #[test]
    fn keys_outside_the_type_are_rejected() {
        let mut element = text_element();
        let err = element.set_property(PropertyKey::Radius, &PropertyValue::Number(5.0)).unwrap_err();
        assert_eq!(
            err,
            PropertyError::NotApplicable {
                key: "radius",
                element_type: "text"
            }
        );
        assert_eq!(element.property(PropertyKey::Radius), None);
    }

    #[test]
    fn enum_and_color_fields_parse_strings() {
        let mut element = text_element();
        element.set_property(PropertyKey::TextAlign, &"center".into()).unwrap();
        element.set_property(PropertyKey::Color, &"#ff0000".into()).unwrap();

        let text = element.as_text().unwrap();
        assert_eq!(text.align, TextAlign::Center);
        assert_eq!(text.color, Color32::from_rgb(255, 0, 0));

        assert!(element.set_property(PropertyKey::Color, &"red-ish".into()).is_err());
    }

    #[test]
    fn values_deserialize_from_json() {
        let n = PropertyValue::try_from(serde_json::json!(12.5)).unwrap();
        let b = PropertyValue::try_from(serde_json::json!(true)).unwrap();
        let s = PropertyValue::try_from(serde_json::json!("bold")).unwrap();
        assert_eq!(n, PropertyValue::Number(12.5));
        assert_eq!(b, PropertyValue::Bool(true));
        assert_eq!(s, PropertyValue::Text("bold".to_owned()));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let mut element = text_element();
        let err = element
            .set_property(PropertyKey::X, &PropertyValue::Number(f64::NAN))
            .unwrap_err();
        assert!(matches!(err, PropertyError::InvalidValue { key: "x", .. }));
    }

    #[test]
    fn sizes_must_be_positive() {
        let mut element = text_element();
        let before = element.clone();
        for key in [PropertyKey::FontSize, PropertyKey::Width, PropertyKey::LineHeight] {
            for bad in [-18.0, 0.0] {
                let err = element
                    .set_property(key, &PropertyValue::Number(bad))
                    .unwrap_err();
                assert!(matches!(err, PropertyError::InvalidValue { .. }), "{key:?} = {bad}");
            }
        }
        assert_eq!(element, before);

        let at = Pos2::new(50.0, 50.0);
        let mut circle = Element::new(
            2,
            at,
            ElementKind::with_defaults(ElementType::Circle, at).unwrap(),
        );
        assert!(circle.set_property(PropertyKey::Radius, &PropertyValue::Number(-5.0)).is_err());
        assert!(circle.set_property(PropertyKey::LineWidth, &PropertyValue::Number(0.0)).is_err());
        assert!(circle.set_property(PropertyKey::Radius, &PropertyValue::Number(0.5)).is_ok());
    }
}
