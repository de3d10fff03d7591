use std::fmt;

use crate::{
    geometry::{Orientation, Point},
    placement::Placement,
};

/// Straight wire between two sheet points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wire {
    pub start: Point,
    pub end: Point,
}

impl Wire {
    pub fn endpoints(&self) -> [Point; 2] {
        [self.start, self.end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Junction {
    pub at: Point,
}

/// Local net label. Labels with the same name on one sheet are the same net.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub name: String,
    pub at: Point,
    pub angle: Orientation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelShape {
    Input,
    Output,
    #[default]
    Bidirectional,
    TriState,
    Passive,
}

impl LabelShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelShape::Input => "input",
            LabelShape::Output => "output",
            LabelShape::Bidirectional => "bidirectional",
            LabelShape::TriState => "tri_state",
            LabelShape::Passive => "passive",
        }
    }
}

/// Which namespace a label lives in. A local label and a global label with
/// the same name are different nets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LabelKind {
    Local,
    Global,
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelKind::Local => f.write_str("label"),
            LabelKind::Global => f.write_str("global label"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalLabel {
    pub name: String,
    pub at: Point,
    pub angle: Orientation,
    pub shape: LabelShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerRail {
    Plus12V,
    Plus5V,
    Plus3V3,
    Gnd,
}

impl PowerRail {
    pub const ALL: [PowerRail; 4] = [
        PowerRail::Plus12V,
        PowerRail::Plus5V,
        PowerRail::Plus3V3,
        PowerRail::Gnd,
    ];

    pub fn net_name(&self) -> &'static str {
        match self {
            PowerRail::Plus12V => "+12V",
            PowerRail::Plus5V => "+5V",
            PowerRail::Plus3V3 => "+3V3",
            PowerRail::Gnd => "GND",
        }
    }

    pub fn symbol_id(&self) -> &'static str {
        match self {
            PowerRail::Plus12V => "power:+12V",
            PowerRail::Plus5V => "power:+5V",
            PowerRail::Plus3V3 => "power:+3V3",
            PowerRail::Gnd => "power:GND",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PowerRail::Plus12V => "+12V power rail",
            PowerRail::Plus5V => "+5V power rail",
            PowerRail::Plus3V3 => "+3.3V power rail",
            PowerRail::Gnd => "Ground",
        }
    }
}

impl fmt::Display for PowerRail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.net_name())
    }
}

/// Power-rail symbol instance. Its single pin sits at `at`.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSymbol {
    pub rail: PowerRail,
    pub at: Point,
    /// `#PWRnn`
    pub reference: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoConnect {
    pub at: Point,
}

/// Free annotation. Rendered bold.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNote {
    pub text: String,
    pub at: Point,
    pub size: f64,
}

/// One entry of a topology, in description order.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Symbol(Placement),
    Power(PowerSymbol),
    Wire(Wire),
    Junction(Junction),
    Label(Label),
    GlobalLabel(GlobalLabel),
    NoConnect(NoConnect),
    Text(TextNote),
}

impl Element {
    /// Kind and net name of a label element, if any. Power rails are not
    /// labels and return `None`.
    pub fn label(&self) -> Option<(LabelKind, &str)> {
        match self {
            Element::Label(label) => Some((LabelKind::Local, &label.name)),
            Element::GlobalLabel(label) => Some((LabelKind::Global, &label.name)),
            _ => None,
        }
    }
}
