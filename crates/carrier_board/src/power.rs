use schematics::{
    standard_library::{connector_id, MP1584EN_MODULE},
    PowerRail, Route, SchematicError, TopologyBuilder,
};

use crate::{part, rail};

/// 12V barrel jack into the MP1584EN, which makes the 5V rail.
pub(crate) fn draw(builder: &mut TopologyBuilder) -> Result<(), SchematicError> {
    builder.place(part("J1", &connector_id(2), "DC_12V", 38.1, 55.88)?)?;
    builder.place(part("U1", MP1584EN_MODULE, "MP1584EN", 76.2, 55.88)?)?;

    let tip = builder.pin("J1", "1")?;
    let sleeve = builder.pin("J1", "2")?;
    let vin = builder.pin("U1", "IN+")?;
    let vin_return = builder.pin("U1", "IN-")?;
    let vout = builder.pin("U1", "OUT+")?;
    let vout_return = builder.pin("U1", "OUT-")?;

    builder.connect(tip, vin, Route::HorizontalFirst);
    builder.connect(sleeve, vin_return, Route::HorizontalFirst);

    rail(builder, PowerRail::Plus12V, tip);
    rail(builder, PowerRail::Gnd, sleeve);
    rail(builder, PowerRail::Plus5V, vout);
    rail(builder, PowerRail::Gnd, vout_return);
    rail(builder, PowerRail::Plus12V, vin);

    Ok(())
}
