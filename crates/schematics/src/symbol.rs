use crate::{
    geometry::{Orientation, Point},
    SchematicError,
};
use derive_builder::Builder;
use std::collections::HashSet;

/// Pin name used by symbols whose pins are anonymous (e.g. a resistor).
pub const ANONYMOUS_PIN_NAME: &str = "~";

/// Electrical role of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElectricalRole {
    Input,
    Output,
    Passive,
    Bidirectional,
    PowerIn,
    PowerOut,
}

/// `PinGeometry` is the connection point of a pin, in symbol-local
/// coordinates (Y grows upward).
#[derive(Debug, Clone, PartialEq)]
pub struct PinGeometry {
    pub number: String,
    pub name: String,
    pub offset: Point,
    /// Direction the pin body points, from the connection point toward the
    /// symbol body.
    pub orientation: Orientation,
    pub role: ElectricalRole,
    pub length: f64,
}

impl PinGeometry {
    pub fn new(
        number: &str,
        name: &str,
        role: ElectricalRole,
        offset: (f64, f64),
        orientation: Orientation,
        length: f64,
    ) -> Self {
        Self {
            number: number.to_string(),
            name: name.to_string(),
            offset: offset.into(),
            orientation,
            role,
            length,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.name == ANONYMOUS_PIN_NAME
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolCategory {
    Device,
    Transistor,
    Module,
    Connector,
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fill {
    #[default]
    None,
    Outline,
    Background,
}

/// Decorative body drawing of a symbol. Never affects connectivity.
#[derive(Debug, Clone, PartialEq)]
pub enum Graphic {
    Rectangle {
        start: Point,
        end: Point,
        width: f64,
        fill: Fill,
    },
    Polyline {
        points: Vec<Point>,
        width: f64,
        fill: Fill,
    },
    Arc {
        start: Point,
        mid: Point,
        end: Point,
        width: f64,
        fill: Fill,
    },
    Text {
        text: String,
        at: Point,
        size: f64,
    },
}

impl Graphic {
    pub fn rectangle(start: (f64, f64), end: (f64, f64), width: f64, fill: Fill) -> Self {
        Graphic::Rectangle {
            start: start.into(),
            end: end.into(),
            width,
            fill,
        }
    }

    pub fn polyline(points: &[(f64, f64)], width: f64, fill: Fill) -> Self {
        Graphic::Polyline {
            points: points.iter().copied().map(Point::from).collect(),
            width,
            fill,
        }
    }

    pub fn arc(start: (f64, f64), mid: (f64, f64), end: (f64, f64), width: f64) -> Self {
        Graphic::Arc {
            start: start.into(),
            mid: mid.into(),
            end: end.into(),
            width,
            fill: Fill::None,
        }
    }

    pub fn text(text: &str, at: (f64, f64), size: f64) -> Self {
        Graphic::Text {
            text: text.to_string(),
            at: at.into(),
            size,
        }
    }
}

/// Where a symbol field (reference, value) sits relative to the symbol
/// origin, in symbol-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldPlacement {
    pub at: Point,
    pub angle: Orientation,
    pub hidden: bool,
    pub justify_left: bool,
}

impl FieldPlacement {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            at: Point::new(x, y),
            angle: Orientation::R0,
            hidden: false,
            justify_left: false,
        }
    }

    pub fn rotated(mut self, angle: Orientation) -> Self {
        self.angle = angle;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn left(mut self) -> Self {
        self.justify_left = true;
        self
    }
}

/// `SymbolDefinition` is an entry in the symbol library: a reusable
/// component type with a fixed set of pins.
#[derive(Debug, Clone, Builder)]
#[builder(build_fn(error = "SchematicError", validate = "Self::validate"))]
pub struct SymbolDefinition {
    /// Library identifier, e.g. `Device:R`.
    #[builder(setter(into))]
    pub id: String,
    pub category: SymbolCategory,
    #[builder(setter(into))]
    pub reference_prefix: String,
    #[builder(setter(into))]
    pub default_value: String,
    #[builder(setter(into), default)]
    pub description: String,
    #[builder(setter(into, strip_option), default)]
    pub footprint: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub datasheet: Option<String>,
    #[builder(setter(custom), default = "Vec::new()")]
    pub pins: Vec<PinGeometry>,
    #[builder(setter(custom), default = "Vec::new()")]
    pub graphics: Vec<Graphic>,
    #[builder(default = "FieldPlacement::at(0.0, 0.0)")]
    pub reference_field: FieldPlacement,
    #[builder(default = "FieldPlacement::at(0.0, 0.0)")]
    pub value_field: FieldPlacement,
    #[builder(default = "true")]
    pub show_pin_numbers: bool,
    #[builder(default = "true")]
    pub show_pin_names: bool,
    #[builder(default = "0.0")]
    pub pin_name_offset: f64,
    #[builder(default = "false")]
    pub power: bool,
}

impl SymbolDefinition {
    /// Look up a pin by number first, then by name.
    pub fn get_pin(&self, pin: &str) -> Option<&PinGeometry> {
        self.pins
            .iter()
            .find(|p| p.number == pin)
            .or_else(|| {
                self.pins
                    .iter()
                    .find(|p| !p.is_anonymous() && p.name == pin)
            })
    }

    /// The unit-less part of the id (`Device:R` -> `R`).
    pub fn short_name(&self) -> &str {
        self.id
            .split_once(':')
            .map(|(_, name)| name)
            .unwrap_or(&self.id)
    }
}

impl SymbolDefinitionBuilder {
    pub fn pin(&mut self, pin: PinGeometry) -> &mut Self {
        self.pins.get_or_insert_with(Vec::new).push(pin);
        self
    }

    pub fn graphic(&mut self, graphic: Graphic) -> &mut Self {
        self.graphics.get_or_insert_with(Vec::new).push(graphic);
        self
    }

    fn validate(&self) -> Result<(), SchematicError> {
        let id = self.id.clone().unwrap_or_default();
        let pins = self.pins.as_deref().unwrap_or_default();

        if pins.is_empty() {
            return Err(SchematicError::InvalidSymbol(id, "no pins".to_string()));
        }

        let mut numbers = HashSet::new();
        let mut names = HashSet::new();
        for pin in pins {
            if !numbers.insert(pin.number.as_str()) {
                return Err(SchematicError::InvalidSymbol(
                    id,
                    format!("duplicate pin number {}", pin.number),
                ));
            }
            if !pin.is_anonymous() && !names.insert(pin.name.as_str()) {
                return Err(SchematicError::InvalidSymbol(
                    id,
                    format!("duplicate pin name {}", pin.name),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_pin(name_a: &str, name_b: &str) -> Result<SymbolDefinition, SchematicError> {
        SymbolDefinitionBuilder::default()
            .id("Test:Two")
            .category(SymbolCategory::Device)
            .reference_prefix("T")
            .default_value("Two")
            .pin(PinGeometry::new(
                "1",
                name_a,
                ElectricalRole::Passive,
                (0.0, 2.54),
                Orientation::R270,
                1.27,
            ))
            .pin(PinGeometry::new(
                "2",
                name_b,
                ElectricalRole::Passive,
                (0.0, -2.54),
                Orientation::R90,
                1.27,
            ))
            .build()
    }

    #[test]
    fn pin_lookup_by_number_then_name() {
        let symbol = two_pin("A", "B").unwrap();
        assert_eq!(symbol.get_pin("1").unwrap().name, "A");
        assert_eq!(symbol.get_pin("B").unwrap().number, "2");
        assert!(symbol.get_pin("3").is_none());
    }

    #[test]
    fn anonymous_names_may_repeat_but_do_not_match() {
        let symbol = two_pin("~", "~").unwrap();
        assert!(symbol.get_pin("~").is_none());
        assert_eq!(symbol.short_name(), "Two");
    }

    #[test]
    fn duplicate_pin_names_are_rejected() {
        let err = two_pin("A", "A").unwrap_err();
        assert!(matches!(err, SchematicError::InvalidSymbol(id, _) if id == "Test:Two"));
    }

    #[test]
    fn missing_fields_are_reported() {
        let err = SymbolDefinitionBuilder::default()
            .id("Test:Empty")
            .pin(PinGeometry::new(
                "1",
                "A",
                ElectricalRole::Input,
                (0.0, 0.0),
                Orientation::R0,
                0.0,
            ))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchematicError::UninitializedField(_)));
    }
}
