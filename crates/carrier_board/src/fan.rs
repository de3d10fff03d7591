use schematics::{
    standard_library::{connector_id, IRLZ44N, RESISTOR},
    Orientation, Point, PowerRail, Route, SchematicError, TopologyBuilder,
};

use crate::{nets, part, rail, rail_via};

/// Low-side MOSFET switch for the 12V blower, with a gate pulldown so the fan
/// stays off while the MCU boots.
pub(crate) fn draw(builder: &mut TopologyBuilder) -> Result<(), SchematicError> {
    builder.place(part("Q1", IRLZ44N, "IRLZ44N", 63.5, 119.38)?)?;
    builder.place(part("R4", RESISTOR, "10K", 48.26, 127.0)?)?;
    builder.place(part("J7", &connector_id(2), "Fan", 78.74, 104.14)?)?;

    let gate = builder.pin("Q1", "G")?;
    let drain = builder.pin("Q1", "D")?;
    let source = builder.pin("Q1", "S")?;
    let pulldown_top = builder.pin("R4", "1")?;
    let pulldown_bottom = builder.pin("R4", "2")?;
    let fan_plus = builder.pin("J7", "1")?;
    let fan_minus = builder.pin("J7", "2")?;

    // The gate net turns down to the pulldown; FAN_PWM enters at the corner.
    let corner = Point::new(pulldown_top.x, gate.y);
    builder.connect(gate, pulldown_top, Route::HorizontalFirst);
    builder.junction(corner);
    rail(builder, PowerRail::Gnd, pulldown_bottom);
    builder.label(
        corner,
        corner.offset(-5.08, 0.0),
        nets::FAN_PWM,
        Orientation::R180,
    );

    rail(builder, PowerRail::Gnd, source);
    rail_via(builder, PowerRail::Plus12V, fan_plus, -5.08);
    builder.connect(fan_minus, drain, Route::HorizontalFirst);

    Ok(())
}
