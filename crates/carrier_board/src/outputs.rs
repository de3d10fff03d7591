use schematics::{
    standard_library::{connector_id, BUZZER},
    Orientation, PowerRail, SchematicError, TopologyBuilder,
};

use crate::{nets, part, rail, rail_via, RAIL_STUB};

const LABEL_STUB: f64 = 7.62;
const NOTE_TEXT: f64 = 1.27;

/// J5 pin assignment of the WT32-SC01 Plus extension header.
const HEADER_SIGNALS: [(&str, &str); 5] = [
    (nets::SDA, "GPIO10"),
    (nets::SCL, "GPIO11"),
    (nets::FAN_PWM, "GPIO12"),
    (nets::SERVO_SIG, "GPIO13"),
    (nets::BUZZER_SIG, "GPIO14"),
];

pub(crate) fn draw(builder: &mut TopologyBuilder) -> Result<(), SchematicError> {
    header(builder)?;
    servo(builder)?;
    buzzer(builder)
}

fn header(builder: &mut TopologyBuilder) -> Result<(), SchematicError> {
    builder.place(part("J5", &connector_id(8), "WT32-SC01", 330.2, 114.3)?)?;

    for (idx, (net, gpio)) in HEADER_SIGNALS.iter().enumerate() {
        let at = builder.pin("J5", &(idx + 1).to_string())?;
        builder.label(at, at.offset(-LABEL_STUB, 0.0), net, Orientation::R180);
        builder.text(at.offset(2.54, 0.0), gpio, NOTE_TEXT);
    }

    // The positive rails rise past the signal labels above them, so their
    // risers sit left of the label text and apart from each other.
    let supply_3v3 = builder.pin("J5", "6")?;
    rail_via(builder, PowerRail::Plus3V3, supply_3v3, -25.4);
    builder.text(supply_3v3.offset(2.54, 0.0), "3V3", NOTE_TEXT);

    let supply_5v = builder.pin("J5", "7")?;
    rail_via(builder, PowerRail::Plus5V, supply_5v, -30.48);
    builder.text(supply_5v.offset(2.54, 0.0), "5V", NOTE_TEXT);

    let ground = builder.pin("J5", "8")?;
    rail_via(builder, PowerRail::Gnd, ground, -LABEL_STUB);
    builder.text(ground.offset(2.54, 0.0), "GND", NOTE_TEXT);

    Ok(())
}

/// Hobby servo: signal, 5V, ground.
fn servo(builder: &mut TopologyBuilder) -> Result<(), SchematicError> {
    builder.place(part("J6", &connector_id(3), "Servo", 330.2, 157.48)?)?;

    let signal = builder.pin("J6", "1")?;
    builder.label(
        signal,
        signal.offset(-LABEL_STUB, 0.0),
        nets::SERVO_SIG,
        Orientation::R180,
    );

    let supply = builder.pin("J6", "2")?;
    rail_via(builder, PowerRail::Plus5V, supply, -22.86);

    let ground = builder.pin("J6", "3")?;
    rail_via(builder, PowerRail::Gnd, ground, -LABEL_STUB);

    Ok(())
}

fn buzzer(builder: &mut TopologyBuilder) -> Result<(), SchematicError> {
    builder.place(part("BZ1", BUZZER, "Buzzer", 294.64, 165.1)?)?;

    let plus = builder.pin("BZ1", "+")?;
    builder.label(
        plus,
        plus.offset(0.0, -RAIL_STUB),
        nets::BUZZER_SIG,
        Orientation::R90,
    );

    let minus = builder.pin("BZ1", "-")?;
    rail(builder, PowerRail::Gnd, minus);

    Ok(())
}
