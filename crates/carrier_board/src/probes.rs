use schematics::{
    standard_library::{connector_id, CAPACITOR, RESISTOR},
    Orientation, PowerRail, Route, SchematicError, TopologyBuilder,
};

use crate::{nets, part, rail};

const RESISTOR_Y: f64 = 48.26;
const CAPACITOR_Y: f64 = 63.5;
const JACK_Y: f64 = 55.88;
const LABEL_STUB: f64 = 2.54;

/// One thermistor divider: pull-up to 3V3, filter cap to ground, and the
/// probe jack between the divider node and ground.
struct Column {
    net: &'static str,
    resistor: &'static str,
    capacitor: &'static str,
    jack: &'static str,
    jack_value: &'static str,
    x: f64,
    jack_x: f64,
}

const COLUMNS: [Column; 3] = [
    Column {
        net: nets::PROBE_PIT,
        resistor: "R1",
        capacitor: "C1",
        jack: "J2",
        jack_value: "Pit Probe",
        x: 175.26,
        jack_x: 187.96,
    },
    Column {
        net: nets::PROBE_MEAT1,
        resistor: "R2",
        capacitor: "C2",
        jack: "J3",
        jack_value: "Meat1 Probe",
        x: 213.36,
        jack_x: 226.06,
    },
    Column {
        net: nets::PROBE_MEAT2,
        resistor: "R3",
        capacitor: "C3",
        jack: "J4",
        jack_value: "Meat2 Probe",
        x: 251.46,
        jack_x: 264.16,
    },
];

pub(crate) fn draw(builder: &mut TopologyBuilder) -> Result<(), SchematicError> {
    for column in &COLUMNS {
        builder.place(part(column.resistor, RESISTOR, "10K", column.x, RESISTOR_Y)?)?;
        builder.place(part(column.capacitor, CAPACITOR, "100nF", column.x, CAPACITOR_Y)?)?;
        builder.place(part(
            column.jack,
            &connector_id(2),
            column.jack_value,
            column.jack_x,
            JACK_Y,
        )?)?;

        let pull_up = builder.pin(column.resistor, "1")?;
        let node = builder.pin(column.resistor, "2")?;
        let cap_top = builder.pin(column.capacitor, "1")?;
        let cap_bottom = builder.pin(column.capacitor, "2")?;
        let tip = builder.pin(column.jack, "1")?;
        let sleeve = builder.pin(column.jack, "2")?;

        rail(builder, PowerRail::Plus3V3, pull_up);
        builder.branch(node, &[cap_top, tip], Route::HorizontalFirst);
        rail(builder, PowerRail::Gnd, cap_bottom);
        rail(builder, PowerRail::Gnd, sleeve);
        builder.label(
            node,
            node.offset(-LABEL_STUB, 0.0),
            column.net,
            Orientation::R180,
        );
    }

    Ok(())
}
