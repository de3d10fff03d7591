use std::io::{self, Write};

use schematics::symbol::{
    ElectricalRole, FieldPlacement, Fill, Graphic, PinGeometry, SymbolDefinition,
};

use crate::{
    format::{effects, fmt_coord, fmt_point, quote},
    writer::SexprWriter,
};

pub(crate) const FIELD_TEXT: f64 = 1.27;

fn role_keyword(role: ElectricalRole) -> &'static str {
    match role {
        ElectricalRole::Input => "input",
        ElectricalRole::Output => "output",
        ElectricalRole::Passive => "passive",
        ElectricalRole::Bidirectional => "bidirectional",
        ElectricalRole::PowerIn => "power_in",
        ElectricalRole::PowerOut => "power_out",
    }
}

fn fill_keyword(fill: Fill) -> &'static str {
    match fill {
        Fill::None => "none",
        Fill::Outline => "outline",
        Fill::Background => "background",
    }
}

fn stroke_and_fill(width: f64, fill: Fill) -> String {
    format!(
        "(stroke (width {}) (type default)) (fill (type {}))",
        fmt_coord(width),
        fill_keyword(fill)
    )
}

fn property(name: &str, value: &str, field: &FieldPlacement) -> String {
    format!(
        "(property {} {} (at {} {}) {})",
        quote(name),
        quote(value),
        fmt_point(field.at),
        field.angle,
        effects(FIELD_TEXT, field.justify_left, field.hidden)
    )
}

fn hidden_property(name: &str, value: &str) -> String {
    property(name, value, &FieldPlacement::at(0.0, 0.0).hidden())
}

fn render_graphic(graphic: &Graphic) -> String {
    match graphic {
        Graphic::Rectangle {
            start,
            end,
            width,
            fill,
        } => format!(
            "(rectangle (start {}) (end {}) {})",
            fmt_point(*start),
            fmt_point(*end),
            stroke_and_fill(*width, *fill)
        ),
        Graphic::Polyline {
            points,
            width,
            fill,
        } => {
            let pts: Vec<String> = points
                .iter()
                .map(|p| format!("(xy {})", fmt_point(*p)))
                .collect();
            format!(
                "(polyline (pts {}) {})",
                pts.join(" "),
                stroke_and_fill(*width, *fill)
            )
        }
        Graphic::Arc {
            start,
            mid,
            end,
            width,
            fill,
        } => format!(
            "(arc (start {}) (mid {}) (end {}) {})",
            fmt_point(*start),
            fmt_point(*mid),
            fmt_point(*end),
            stroke_and_fill(*width, *fill)
        ),
        Graphic::Text { text, at, size } => format!(
            "(text {} (at {} 0) {})",
            quote(text),
            fmt_point(*at),
            effects(*size, false, false)
        ),
    }
}

fn write_pin<W: Write>(writer: &mut SexprWriter<W>, pin: &PinGeometry) -> io::Result<()> {
    writer.start_block(&format!(
        "pin {} line (at {} {}) (length {})",
        role_keyword(pin.role),
        fmt_point(pin.offset),
        pin.orientation,
        fmt_coord(pin.length)
    ))?;
    writer.write_line(&format!(
        "(name {} {})",
        quote(&pin.name),
        effects(FIELD_TEXT, false, false)
    ))?;
    writer.write_line(&format!(
        "(number {} {})",
        quote(&pin.number),
        effects(FIELD_TEXT, false, false)
    ))?;
    writer.end_block()
}

/// Write one `lib_symbols` entry. Graphics go in unit `_0_1`, pins in `_1_1`.
pub(crate) fn write_lib_symbol<W: Write>(
    writer: &mut SexprWriter<W>,
    symbol: &SymbolDefinition,
) -> io::Result<()> {
    writer.start_block(&format!("symbol {}", quote(&symbol.id)))?;
    if symbol.power {
        writer.write_line("(power)")?;
    }
    if !symbol.show_pin_numbers {
        writer.write_line("(pin_numbers hide)")?;
    }
    writer.write_line(&format!(
        "(pin_names (offset {}){})",
        fmt_coord(symbol.pin_name_offset),
        if symbol.show_pin_names { "" } else { " hide" }
    ))?;
    writer.write_line("(exclude_from_sim no)")?;
    writer.write_line(&format!(
        "(in_bom {})",
        if symbol.power { "no" } else { "yes" }
    ))?;
    writer.write_line("(on_board yes)")?;

    writer.write_line(&property(
        "Reference",
        &symbol.reference_prefix,
        &symbol.reference_field,
    ))?;
    writer.write_line(&property("Value", &symbol.default_value, &symbol.value_field))?;
    writer.write_line(&hidden_property(
        "Footprint",
        symbol.footprint.as_deref().unwrap_or_default(),
    ))?;
    writer.write_line(&hidden_property(
        "Datasheet",
        symbol.datasheet.as_deref().unwrap_or_default(),
    ))?;
    writer.write_line(&hidden_property("Description", &symbol.description))?;

    let name = symbol.short_name();
    if !symbol.graphics.is_empty() {
        writer.start_block(&format!("symbol {}", quote(&format!("{}_0_1", name))))?;
        for graphic in &symbol.graphics {
            writer.write_line(&render_graphic(graphic))?;
        }
        writer.end_block()?;
    }

    writer.start_block(&format!("symbol {}", quote(&format!("{}_1_1", name))))?;
    for pin in &symbol.pins {
        write_pin(writer, pin)?;
    }
    writer.end_block()?;

    writer.end_block()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use schematics::{standard_library::RESISTOR, SymbolLibrary};

    #[test]
    fn resistor_definition() {
        let library = SymbolLibrary::standard().unwrap();
        let mut writer = SexprWriter::new(Vec::new());
        write_lib_symbol(&mut writer, library.symbol(RESISTOR).unwrap()).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();

        assert_eq!(
            text,
            indoc! {r#"
                (symbol "Device:R"
                  (pin_numbers hide)
                  (pin_names (offset 0) hide)
                  (exclude_from_sim no)
                  (in_bom yes)
                  (on_board yes)
                  (property "Reference" "R" (at 2.032 0 90) (effects (font (size 1.27 1.27))))
                  (property "Value" "R" (at -2.032 0 90) (effects (font (size 1.27 1.27))))
                  (property "Footprint" "" (at 0 0 0) (effects (font (size 1.27 1.27)) hide))
                  (property "Datasheet" "~" (at 0 0 0) (effects (font (size 1.27 1.27)) hide))
                  (property "Description" "Resistor" (at 0 0 0) (effects (font (size 1.27 1.27)) hide))
                  (symbol "R_0_1"
                    (rectangle (start -1.016 -2.54) (end 1.016 2.54) (stroke (width 0) (type default)) (fill (type none)))
                  )
                  (symbol "R_1_1"
                    (pin passive line (at 0 3.81 270) (length 1.27)
                      (name "~" (effects (font (size 1.27 1.27))))
                      (number "1" (effects (font (size 1.27 1.27))))
                    )
                    (pin passive line (at 0 -3.81 90) (length 1.27)
                      (name "~" (effects (font (size 1.27 1.27))))
                      (number "2" (effects (font (size 1.27 1.27))))
                    )
                  )
                )
            "#}
        );
    }
}
