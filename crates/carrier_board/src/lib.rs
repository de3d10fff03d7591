//! The Pit Claw BBQ controller carrier board: a 50x70mm perfboard that hosts
//! the buck converter, the probe dividers, the ADC, the fan driver and the
//! connectors to the WT32-SC01 Plus display module.

mod adc;
mod fan;
mod outputs;
mod power;
mod probes;

use kicad_sch::{SheetSettings, SheetSettingsBuilder};
use schematics::{
    Placement, PlacementBuilder, Point, PowerRail, Route, SchematicError, SymbolLibrary,
    TitleBlock, TitleBlockBuilder, Topology, TopologyBuilder,
};

pub const PROJECT: &str = "bbq-controller";

/// Net names shared between sections.
pub mod nets {
    pub const PROBE_PIT: &str = "PROBE_PIT";
    pub const PROBE_MEAT1: &str = "PROBE_MEAT1";
    pub const PROBE_MEAT2: &str = "PROBE_MEAT2";
    pub const SDA: &str = "SDA";
    pub const SCL: &str = "SCL";
    pub const FAN_PWM: &str = "FAN_PWM";
    pub const SERVO_SIG: &str = "SERVO_SIG";
    pub const BUZZER_SIG: &str = "BUZZER_SIG";
}

/// Length of the wire between a pin and the power symbol it feeds.
pub(crate) const RAIL_STUB: f64 = 5.08;

const SECTION_TEXT: f64 = 3.81;

pub fn title_block() -> Result<TitleBlock, SchematicError> {
    TitleBlockBuilder::default()
        .title("Pit Claw BBQ Controller")
        .date("2026-02-18")
        .rev("A")
        .company("Pit Claw Open Source")
        .comment("Carrier Board (50x70mm perfboard)")
        .comment("WT32-SC01 Plus + ADS1115 + IRLZ44N fan driver")
        .build()
}

pub fn sheet_settings() -> Result<SheetSettings, SchematicError> {
    SheetSettingsBuilder::default()
        .paper("A3")
        .project(PROJECT)
        .title_block(title_block()?)
        .build()
}

/// Describe the whole board against `library`.
pub fn build(library: &SymbolLibrary) -> Result<Topology, SchematicError> {
    let mut builder = TopologyBuilder::new(library);

    for (x, y, title) in [
        (38.1, 30.48, "POWER SUPPLY"),
        (175.26, 30.48, "PROBE VOLTAGE DIVIDERS"),
        (175.26, 88.9, "ADS1115 ADC"),
        (38.1, 91.44, "FAN DRIVER"),
        (294.64, 96.52, "WT32-SC01 PLUS + OUTPUTS"),
    ] {
        builder.text(Point::new(x, y), title, SECTION_TEXT);
    }

    power::draw(&mut builder)?;
    probes::draw(&mut builder)?;
    adc::draw(&mut builder)?;
    fan::draw(&mut builder)?;
    outputs::draw(&mut builder)?;

    let topology = builder.finish();
    log::debug!("carrier board: {:?}", topology.stats());
    Ok(topology)
}

pub(crate) fn part(
    reference: &str,
    symbol_id: &str,
    value: &str,
    x: f64,
    y: f64,
) -> Result<Placement, SchematicError> {
    PlacementBuilder::default()
        .reference(reference)
        .symbol_id(symbol_id)
        .value(value)
        .at(x, y)
        .build()
}

/// Hang `rail` straight off `from`: positive rails above, ground below.
pub(crate) fn rail(builder: &mut TopologyBuilder, rail: PowerRail, from: Point) {
    builder.power(rail, from, from.offset(0.0, rail_dy(rail)), Route::VerticalFirst);
}

/// Run `dx` sideways from `from`, then hang `rail` off the end of that run.
pub(crate) fn rail_via(builder: &mut TopologyBuilder, rail: PowerRail, from: Point, dx: f64) {
    let at = from.offset(dx, rail_dy(rail));
    builder.power(rail, from, at, Route::HorizontalFirst);
}

fn rail_dy(rail: PowerRail) -> f64 {
    if rail == PowerRail::Gnd {
        RAIL_STUB
    } else {
        -RAIL_STUB
    }
}
