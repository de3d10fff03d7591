use schematics::{
    standard_library::ADS1115_MODULE, Orientation, PowerRail, SchematicError, TopologyBuilder,
};

use crate::{nets, part, rail, rail_via};

const LABEL_STUB: f64 = 2.54;

pub(crate) fn draw(builder: &mut TopologyBuilder) -> Result<(), SchematicError> {
    builder.place(part("U2", ADS1115_MODULE, "ADS1115", 213.36, 109.22)?)?;

    for (pin, net) in [
        ("A0", nets::PROBE_PIT),
        ("A1", nets::PROBE_MEAT1),
        ("A2", nets::PROBE_MEAT2),
    ] {
        let at = builder.pin("U2", pin)?;
        builder.label(at, at.offset(-LABEL_STUB, 0.0), net, Orientation::R180);
    }

    // A3 spare.
    let spare = builder.pin("U2", "A3")?;
    builder.no_connect(spare);

    let vdd = builder.pin("U2", "VDD")?;
    rail(builder, PowerRail::Plus3V3, vdd);
    let gnd = builder.pin("U2", "GND")?;
    rail(builder, PowerRail::Gnd, gnd);

    for (pin, net) in [("SDA", nets::SDA), ("SCL", nets::SCL)] {
        let at = builder.pin("U2", pin)?;
        builder.label(at, at.offset(LABEL_STUB, 0.0), net, Orientation::R0);
    }

    // ADDR low selects I2C address 0x48.
    let addr = builder.pin("U2", "ADDR")?;
    rail_via(builder, PowerRail::Gnd, addr, 5.08);

    Ok(())
}
