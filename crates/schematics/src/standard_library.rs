use std::collections::HashSet;

use crate::{
    library::SymbolLibrary,
    symbol::{ElectricalRole, SymbolCategory},
    SchematicError,
};

pub const RESISTOR: &str = "Device:R";
pub const CAPACITOR: &str = "Device:C";
pub const BUZZER: &str = "Device:Buzzer";
pub const IRLZ44N: &str = "bbq:IRLZ44N";
pub const MP1584EN_MODULE: &str = "bbq:MP1584EN_Module";
pub const ADS1115_MODULE: &str = "bbq:ADS1115_Module";

const PIN_TEXT: f64 = 1.27;

mod resistor {
    use crate::{
        geometry::Orientation,
        library::SymbolLibrary,
        symbol::{ElectricalRole, FieldPlacement, Fill, Graphic, PinGeometry, SymbolCategory},
        symbol::SymbolDefinitionBuilder,
        SchematicError,
    };

    pub fn register(library: &mut SymbolLibrary) -> Result<(), SchematicError> {
        let symbol = SymbolDefinitionBuilder::default()
            .id(super::RESISTOR)
            .category(SymbolCategory::Device)
            .reference_prefix("R")
            .default_value("R")
            .description("Resistor")
            .datasheet("~")
            .reference_field(FieldPlacement::at(2.032, 0.0).rotated(Orientation::R90))
            .value_field(FieldPlacement::at(-2.032, 0.0).rotated(Orientation::R90))
            .show_pin_numbers(false)
            .show_pin_names(false)
            .graphic(Graphic::rectangle((-1.016, -2.54), (1.016, 2.54), 0.0, Fill::None))
            .pin(PinGeometry::new(
                "1",
                "~",
                ElectricalRole::Passive,
                (0.0, 3.81),
                Orientation::R270,
                1.27,
            ))
            .pin(PinGeometry::new(
                "2",
                "~",
                ElectricalRole::Passive,
                (0.0, -3.81),
                Orientation::R90,
                1.27,
            ))
            .build()?;

        library.add_symbol(symbol)
    }
}

mod capacitor {
    use crate::{
        geometry::Orientation,
        library::SymbolLibrary,
        symbol::{ElectricalRole, FieldPlacement, Fill, Graphic, PinGeometry, SymbolCategory},
        symbol::SymbolDefinitionBuilder,
        SchematicError,
    };

    pub fn register(library: &mut SymbolLibrary) -> Result<(), SchematicError> {
        let symbol = SymbolDefinitionBuilder::default()
            .id(super::CAPACITOR)
            .category(SymbolCategory::Device)
            .reference_prefix("C")
            .default_value("C")
            .description("Capacitor")
            .datasheet("~")
            .reference_field(
                FieldPlacement::at(2.54, 0.0)
                    .rotated(Orientation::R90)
                    .left(),
            )
            .value_field(
                FieldPlacement::at(-2.54, 0.0)
                    .rotated(Orientation::R90)
                    .left(),
            )
            .show_pin_numbers(false)
            .show_pin_names(false)
            .pin_name_offset(0.254)
            .graphic(Graphic::polyline(
                &[(-2.032, -0.762), (2.032, -0.762)],
                0.508,
                Fill::None,
            ))
            .graphic(Graphic::polyline(
                &[(-2.032, 0.762), (2.032, 0.762)],
                0.508,
                Fill::None,
            ))
            .pin(PinGeometry::new(
                "1",
                "~",
                ElectricalRole::Passive,
                (0.0, 3.81),
                Orientation::R270,
                2.794,
            ))
            .pin(PinGeometry::new(
                "2",
                "~",
                ElectricalRole::Passive,
                (0.0, -3.81),
                Orientation::R90,
                2.794,
            ))
            .build()?;

        library.add_symbol(symbol)
    }
}

mod buzzer {
    use crate::{
        geometry::Orientation,
        library::SymbolLibrary,
        symbol::{ElectricalRole, FieldPlacement, Fill, Graphic, PinGeometry, SymbolCategory},
        symbol::SymbolDefinitionBuilder,
        SchematicError,
    };

    pub fn register(library: &mut SymbolLibrary) -> Result<(), SchematicError> {
        let symbol = SymbolDefinitionBuilder::default()
            .id(super::BUZZER)
            .category(SymbolCategory::Device)
            .reference_prefix("BZ")
            .default_value("Buzzer")
            .description("Buzzer, polarized")
            .datasheet("~")
            .reference_field(FieldPlacement::at(5.08, 1.27).left())
            .value_field(FieldPlacement::at(5.08, -1.27).left())
            .show_pin_names(false)
            .pin_name_offset(1.016)
            .graphic(Graphic::arc((-3.302, -2.54), (2.159, 0.0), (-3.302, 2.54), 0.254))
            .graphic(Graphic::polyline(
                &[(-3.302, 2.54), (-3.302, -2.54)],
                0.254,
                Fill::None,
            ))
            .graphic(Graphic::text("+", (-3.81, 3.175), super::PIN_TEXT))
            .pin(PinGeometry::new(
                "1",
                "+",
                ElectricalRole::Passive,
                (0.0, 5.08),
                Orientation::R270,
                2.54,
            ))
            .pin(PinGeometry::new(
                "2",
                "-",
                ElectricalRole::Passive,
                (0.0, -5.08),
                Orientation::R90,
                2.54,
            ))
            .build()?;

        library.add_symbol(symbol)
    }
}

/// N-channel logic-level MOSFET in a TO-220 package (1 = G, 2 = D, 3 = S).
/// The drain sits above the body and the source below it, as drawn on every
/// schematic of a low-side switch.
mod irlz44n {
    use crate::{
        geometry::Orientation,
        library::SymbolLibrary,
        symbol::{ElectricalRole, FieldPlacement, Fill, Graphic, PinGeometry, SymbolCategory},
        symbol::SymbolDefinitionBuilder,
        SchematicError,
    };

    pub fn register(library: &mut SymbolLibrary) -> Result<(), SchematicError> {
        let symbol = SymbolDefinitionBuilder::default()
            .id(super::IRLZ44N)
            .category(SymbolCategory::Transistor)
            .reference_prefix("Q")
            .default_value("IRLZ44N")
            .description("N-channel logic-level MOSFET, TO-220")
            .footprint("Package_TO_SOT_THT:TO-220-3_Vertical")
            .reference_field(FieldPlacement::at(7.62, 1.27).left())
            .value_field(FieldPlacement::at(7.62, -1.27).left())
            .pin_name_offset(1.016)
            .graphic(Graphic::polyline(&[(-2.54, -2.54), (-2.54, 2.54)], 0.254, Fill::None))
            .graphic(Graphic::polyline(&[(-1.27, 2.54), (-1.27, -2.54)], 0.508, Fill::None))
            .graphic(Graphic::polyline(
                &[(-1.27, 1.905), (2.54, 1.905), (2.54, 2.54)],
                0.254,
                Fill::None,
            ))
            .graphic(Graphic::polyline(
                &[(-1.27, -1.905), (2.54, -1.905), (2.54, -2.54)],
                0.254,
                Fill::None,
            ))
            .graphic(Graphic::polyline(&[(-1.27, 0.0), (2.54, 0.0)], 0.254, Fill::None))
            .graphic(Graphic::polyline(
                &[(2.54, 0.0), (0.762, 0.762), (0.762, -0.762), (2.54, 0.0)],
                0.254,
                Fill::Outline,
            ))
            .graphic(Graphic::text("D", (3.81, 2.54), 0.762))
            .graphic(Graphic::text("G", (-3.81, 0.0), 0.762))
            .graphic(Graphic::text("S", (3.81, -2.54), 0.762))
            .pin(PinGeometry::new(
                "1",
                "G",
                ElectricalRole::Input,
                (-5.08, 0.0),
                Orientation::R0,
                2.54,
            ))
            .pin(PinGeometry::new(
                "2",
                "D",
                ElectricalRole::Passive,
                (2.54, 5.08),
                Orientation::R270,
                2.54,
            ))
            .pin(PinGeometry::new(
                "3",
                "S",
                ElectricalRole::Passive,
                (2.54, -5.08),
                Orientation::R90,
                2.54,
            ))
            .build()?;

        library.add_symbol(symbol)
    }
}

mod mp1584en {
    use crate::{
        geometry::Orientation,
        library::SymbolLibrary,
        symbol::{ElectricalRole, FieldPlacement, Fill, Graphic, PinGeometry, SymbolCategory},
        symbol::SymbolDefinitionBuilder,
        SchematicError,
    };

    pub fn register(library: &mut SymbolLibrary) -> Result<(), SchematicError> {
        let mut builder = SymbolDefinitionBuilder::default();
        builder
            .id(super::MP1584EN_MODULE)
            .category(SymbolCategory::Module)
            .reference_prefix("U")
            .default_value("MP1584EN")
            .description("MP1584EN adjustable buck converter module")
            .reference_field(FieldPlacement::at(0.0, 6.35))
            .value_field(FieldPlacement::at(0.0, -6.35))
            .pin_name_offset(1.016)
            .graphic(Graphic::rectangle((-7.62, 5.08), (7.62, -5.08), 0.254, Fill::Background));

        let pins = [
            ("1", "IN+", ElectricalRole::PowerIn, (-10.16, 2.54), Orientation::R0),
            ("2", "IN-", ElectricalRole::PowerIn, (-10.16, -2.54), Orientation::R0),
            ("3", "OUT+", ElectricalRole::PowerOut, (10.16, 2.54), Orientation::R180),
            ("4", "OUT-", ElectricalRole::PowerOut, (10.16, -2.54), Orientation::R180),
        ];
        for (number, name, role, offset, orientation) in pins {
            builder.pin(PinGeometry::new(number, name, role, offset, orientation, 2.54));
        }

        library.add_symbol(builder.build()?)
    }
}

mod ads1115 {
    use crate::{
        geometry::Orientation,
        library::SymbolLibrary,
        symbol::{ElectricalRole, FieldPlacement, Fill, Graphic, PinGeometry, SymbolCategory},
        symbol::SymbolDefinitionBuilder,
        SchematicError,
    };

    pub fn register(library: &mut SymbolLibrary) -> Result<(), SchematicError> {
        let mut builder = SymbolDefinitionBuilder::default();
        builder
            .id(super::ADS1115_MODULE)
            .category(SymbolCategory::Module)
            .reference_prefix("U")
            .default_value("ADS1115")
            .description("ADS1115 16-bit I2C ADC breakout module")
            .reference_field(FieldPlacement::at(0.0, 13.97))
            .value_field(FieldPlacement::at(0.0, -13.97))
            .pin_name_offset(1.016)
            .graphic(Graphic::rectangle((-7.62, 12.7), (7.62, -12.7), 0.254, Fill::Background));

        let pins = [
            ("1", "A0", ElectricalRole::Input, (-10.16, 7.62), Orientation::R0),
            ("2", "A1", ElectricalRole::Input, (-10.16, 5.08), Orientation::R0),
            ("3", "A2", ElectricalRole::Input, (-10.16, 2.54), Orientation::R0),
            ("4", "A3", ElectricalRole::Input, (-10.16, 0.0), Orientation::R0),
            ("5", "VDD", ElectricalRole::PowerIn, (0.0, 15.24), Orientation::R270),
            ("6", "GND", ElectricalRole::PowerIn, (0.0, -15.24), Orientation::R90),
            ("7", "SDA", ElectricalRole::Bidirectional, (10.16, 5.08), Orientation::R180),
            ("8", "SCL", ElectricalRole::Output, (10.16, 2.54), Orientation::R180),
            ("9", "ADDR", ElectricalRole::Input, (10.16, -5.08), Orientation::R180),
        ];
        for (number, name, role, offset, orientation) in pins {
            builder.pin(PinGeometry::new(number, name, role, offset, orientation, 2.54));
        }

        library.add_symbol(builder.build()?)
    }
}

/// Single-row generic connectors. Pin `n` sits at local `(-2.54, -(n-1) * 2.54)`.
mod connector {
    use crate::{
        geometry::Orientation,
        library::SymbolLibrary,
        symbol::{ElectricalRole, FieldPlacement, Fill, Graphic, PinGeometry, SymbolCategory},
        symbol::SymbolDefinitionBuilder,
        SchematicError,
    };

    pub const PITCH: f64 = 2.54;

    pub fn id(pins: usize) -> String {
        format!("Connector_Generic:Conn_01x{:02}", pins)
    }

    pub fn register(library: &mut SymbolLibrary, pins: usize) -> Result<(), SchematicError> {
        if pins == 0 {
            return Err(SchematicError::InvalidSymbol(
                id(pins),
                "connector needs at least one pin".to_string(),
            ));
        }
        let last_y = -((pins - 1) as f64) * PITCH;

        let mut builder = SymbolDefinitionBuilder::default();
        builder
            .id(id(pins))
            .category(SymbolCategory::Connector)
            .reference_prefix("J")
            .default_value(format!("Conn_01x{:02}", pins))
            .description(format!("Generic {}-pin connector", pins))
            .datasheet("~")
            .reference_field(FieldPlacement::at(0.0, 2.54))
            .value_field(FieldPlacement::at(0.0, last_y - 2.54))
            .show_pin_names(false)
            .pin_name_offset(1.016);

        for n in 1..=pins {
            let y = -((n - 1) as f64) * PITCH;
            builder.graphic(Graphic::rectangle(
                (-1.27, y + 0.127),
                (0.0, y - 0.127),
                0.1524,
                Fill::None,
            ));
            builder.pin(PinGeometry::new(
                &n.to_string(),
                &format!("Pin_{}", n),
                ElectricalRole::Passive,
                (-PITCH, y),
                Orientation::R0,
                1.27,
            ));
        }

        library.add_symbol(builder.build()?)
    }
}

/// Power-rail symbols. Each has a single pin at its origin; the sheet
/// position of the symbol is the point it energizes.
mod power {
    use crate::{
        geometry::Orientation,
        library::SymbolLibrary,
        net::PowerRail,
        symbol::{ElectricalRole, FieldPlacement, Fill, Graphic, PinGeometry, SymbolCategory},
        symbol::SymbolDefinitionBuilder,
        SchematicError,
    };

    pub fn register(library: &mut SymbolLibrary, rail: PowerRail) -> Result<(), SchematicError> {
        let name = rail.net_name();
        let mut builder = SymbolDefinitionBuilder::default();
        builder
            .id(rail.symbol_id())
            .category(SymbolCategory::Power)
            .reference_prefix("#PWR")
            .default_value(name)
            .description(rail.description())
            .show_pin_numbers(false)
            .show_pin_names(false)
            .power(true);

        if rail == PowerRail::Gnd {
            builder
                .reference_field(FieldPlacement::at(0.0, -6.35).hidden())
                .value_field(FieldPlacement::at(0.0, -3.81))
                .graphic(Graphic::polyline(
                    &[
                        (0.0, 0.0),
                        (0.0, -1.27),
                        (1.27, -1.27),
                        (0.0, -2.54),
                        (-1.27, -1.27),
                        (0.0, -1.27),
                    ],
                    0.0,
                    Fill::None,
                ))
                .pin(PinGeometry::new(
                    "1",
                    name,
                    ElectricalRole::PowerIn,
                    (0.0, 0.0),
                    Orientation::R270,
                    0.0,
                ));
        } else {
            builder
                .reference_field(FieldPlacement::at(0.0, -3.81).hidden())
                .value_field(FieldPlacement::at(0.0, 3.556))
                .graphic(Graphic::polyline(&[(-0.762, 1.27), (0.0, 2.54)], 0.0, Fill::None))
                .graphic(Graphic::polyline(&[(0.0, 0.0), (0.0, 2.54)], 0.0, Fill::None))
                .graphic(Graphic::polyline(&[(0.0, 2.54), (0.762, 1.27)], 0.0, Fill::None))
                .pin(PinGeometry::new(
                    "1",
                    name,
                    ElectricalRole::PowerIn,
                    (0.0, 0.0),
                    Orientation::R90,
                    0.0,
                ));
        }

        library.add_symbol(builder.build()?)
    }
}

pub use connector::id as connector_id;

/// Pin counts of the generic single-row connectors in the built-in set.
pub const CONNECTOR_SIZES: [usize; 3] = [2, 3, 8];

impl SymbolLibrary {
    pub fn register_standard_library(&mut self) -> Result<(), SchematicError> {
        resistor::register(self)?;
        capacitor::register(self)?;
        buzzer::register(self)?;
        irlz44n::register(self)?;
        mp1584en::register(self)?;
        ads1115::register(self)?;
        for pins in CONNECTOR_SIZES {
            connector::register(self, pins)?;
        }
        for rail in crate::net::PowerRail::ALL {
            power::register(self, rail)?;
        }
        self.check()
    }

    /// Consistency check over every definition: no two pins of a symbol may
    /// share a connection point, and transistors must carry a gate, drain and
    /// source with the drain above the body and the source below it.
    pub fn check(&self) -> Result<(), SchematicError> {
        for symbol in self.symbols_iter() {
            let mut seen = HashSet::new();
            for pin in &symbol.pins {
                if !seen.insert(pin.offset.key()) {
                    return Err(SchematicError::InvalidSymbol(
                        symbol.id.clone(),
                        format!("pin {} overlaps another pin at {}", pin.number, pin.offset),
                    ));
                }
            }

            if symbol.category == SymbolCategory::Transistor {
                let pin = |name: &str| {
                    symbol.get_pin(name).ok_or_else(|| {
                        SchematicError::InvalidSymbol(
                            symbol.id.clone(),
                            format!("transistor has no {} pin", name),
                        )
                    })
                };
                let gate = pin("G")?;
                let drain = pin("D")?;
                let source = pin("S")?;

                if gate.role != ElectricalRole::Input {
                    return Err(SchematicError::InvalidSymbol(
                        symbol.id.clone(),
                        "gate must be an input".to_string(),
                    ));
                }
                // Local Y grows upward.
                if drain.offset.y <= 0.0 || source.offset.y >= 0.0 {
                    return Err(SchematicError::InvalidSymbol(
                        symbol.id.clone(),
                        "drain must sit above the body and source below it".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}
