use std::io::{self, Write};

use schematics::{
    net::{Element, GlobalLabel, Label, NoConnect, PowerSymbol, TextNote, Wire},
    placement::to_sheet,
    symbol::SymbolDefinition,
    Placement, Point,
};
use uuid::Uuid;

use crate::{
    format::{effects, fmt_coord, fmt_point, quote},
    ids::IdSource,
    symbols::FIELD_TEXT,
    writer::SexprWriter,
};

/// Per-document state shared by every element.
pub(crate) struct RenderContext<'a> {
    pub ids: &'a mut dyn IdSource,
    pub document_id: Uuid,
    pub project: &'a str,
}

fn uuid_field(id: Uuid) -> String {
    format!("(uuid {})", quote(&id.to_string()))
}

/// A property of a placed symbol. `at` is in sheet coordinates.
fn property(
    name: &str,
    value: &str,
    at: Point,
    angle: u16,
    justify_left: bool,
    hidden: bool,
) -> String {
    format!(
        "(property {} {} (at {} {}) {})",
        quote(name),
        quote(value),
        fmt_point(at),
        angle,
        effects(FIELD_TEXT, justify_left, hidden)
    )
}

/// What differs between a placed part and a power symbol instance.
struct Instance<'a> {
    reference: &'a str,
    value: &'a str,
    anchor: Point,
    footprint: &'a str,
    extra: &'a [(String, String)],
}

fn write_instance<W: Write>(
    writer: &mut SexprWriter<W>,
    ctx: &mut RenderContext,
    symbol: &SymbolDefinition,
    instance: Instance,
) -> io::Result<()> {
    let Instance {
        reference,
        value,
        anchor,
        footprint,
        extra,
    } = instance;
    writer.start_block(&format!(
        "symbol (lib_id {}) (at {} 0) (unit 1)",
        quote(&symbol.id),
        fmt_point(anchor)
    ))?;
    writer.write_line(&format!(
        "(exclude_from_sim no) (in_bom {}) (on_board yes) (dnp no)",
        if symbol.power { "no" } else { "yes" }
    ))?;
    writer.write_line(&uuid_field(ctx.ids.next_id()))?;

    let reference_field = &symbol.reference_field;
    writer.write_line(&property(
        "Reference",
        reference,
        to_sheet(anchor, reference_field.at),
        reference_field.angle.degrees(),
        reference_field.justify_left,
        reference_field.hidden,
    ))?;
    let value_field = &symbol.value_field;
    writer.write_line(&property(
        "Value",
        value,
        to_sheet(anchor, value_field.at),
        value_field.angle.degrees(),
        value_field.justify_left,
        value_field.hidden,
    ))?;
    writer.write_line(&property("Footprint", footprint, anchor, 0, false, true))?;
    writer.write_line(&property(
        "Datasheet",
        symbol.datasheet.as_deref().unwrap_or_default(),
        anchor,
        0,
        false,
        true,
    ))?;
    for (key, value) in extra {
        writer.write_line(&property(key, value, anchor, 0, false, true))?;
    }

    for pin in &symbol.pins {
        writer.write_line(&format!(
            "(pin {} {})",
            quote(&pin.number),
            uuid_field(ctx.ids.next_id())
        ))?;
    }

    writer.start_block("instances")?;
    writer.start_block(&format!("project {}", quote(ctx.project)))?;
    writer.write_line(&format!(
        "(path {} (reference {}) (unit 1))",
        quote(&format!("/{}", ctx.document_id)),
        quote(reference)
    ))?;
    writer.end_block()?;
    writer.end_block()?;

    writer.end_block()
}

pub(crate) fn write_placement<W: Write>(
    writer: &mut SexprWriter<W>,
    ctx: &mut RenderContext,
    symbol: &SymbolDefinition,
    placement: &Placement,
) -> io::Result<()> {
    let footprint = placement
        .footprint
        .as_deref()
        .or(symbol.footprint.as_deref())
        .unwrap_or_default();
    write_instance(
        writer,
        ctx,
        symbol,
        Instance {
            reference: &placement.reference,
            value: &placement.value,
            anchor: placement.anchor,
            footprint,
            extra: &placement.properties,
        },
    )
}

pub(crate) fn write_power<W: Write>(
    writer: &mut SexprWriter<W>,
    ctx: &mut RenderContext,
    symbol: &SymbolDefinition,
    power: &PowerSymbol,
) -> io::Result<()> {
    write_instance(
        writer,
        ctx,
        symbol,
        Instance {
            reference: &power.reference,
            value: power.rail.net_name(),
            anchor: power.at,
            footprint: "",
            extra: &[],
        },
    )
}

fn wire(wire: &Wire, id: Uuid) -> String {
    format!(
        "(wire (pts (xy {}) (xy {})) (stroke (width 0) (type default)) {})",
        fmt_point(wire.start),
        fmt_point(wire.end),
        uuid_field(id)
    )
}

fn junction(at: Point, id: Uuid) -> String {
    format!(
        "(junction (at {}) (diameter 0) (color 0 0 0 0) {})",
        fmt_point(at),
        uuid_field(id)
    )
}

fn label(label: &Label, id: Uuid) -> String {
    format!(
        "(label {} (at {} {}) {} {})",
        quote(&label.name),
        fmt_point(label.at),
        label.angle,
        effects(FIELD_TEXT, false, false),
        uuid_field(id)
    )
}

fn global_label(label: &GlobalLabel, id: Uuid) -> String {
    format!(
        "(global_label {} (shape {}) (at {} {}) {} {})",
        quote(&label.name),
        label.shape.as_str(),
        fmt_point(label.at),
        label.angle,
        effects(FIELD_TEXT, true, false),
        uuid_field(id)
    )
}

fn no_connect(marker: &NoConnect, id: Uuid) -> String {
    format!("(no_connect (at {}) {})", fmt_point(marker.at), uuid_field(id))
}

fn text(note: &TextNote, id: Uuid) -> String {
    let size = fmt_coord(note.size);
    format!(
        "(text {} (exclude_from_sim no) (at {} 0) (effects (font (size {} {}) bold)) {})",
        quote(&note.text),
        fmt_point(note.at),
        size,
        size,
        uuid_field(id)
    )
}

/// Write a non-symbol element as a single line.
pub(crate) fn write_element<W: Write>(
    writer: &mut SexprWriter<W>,
    ctx: &mut RenderContext,
    element: &Element,
) -> io::Result<()> {
    let line = match element {
        Element::Wire(w) => wire(w, ctx.ids.next_id()),
        Element::Junction(j) => junction(j.at, ctx.ids.next_id()),
        Element::Label(l) => label(l, ctx.ids.next_id()),
        Element::GlobalLabel(l) => global_label(l, ctx.ids.next_id()),
        Element::NoConnect(n) => no_connect(n, ctx.ids.next_id()),
        Element::Text(t) => text(t, ctx.ids.next_id()),
        // Symbols need their library definition; see write_placement/write_power.
        Element::Symbol(_) | Element::Power(_) => return Ok(()),
    };
    writer.write_line(&line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schematics::{net::LabelShape, Orientation};

    fn id() -> Uuid {
        Uuid::from_u128(7)
    }

    #[test]
    fn wire_line() {
        let w = Wire {
            start: Point::new(35.56, 55.88),
            end: Point::new(35.56, 50.8),
        };
        assert_eq!(
            wire(&w, id()),
            r#"(wire (pts (xy 35.56 55.88) (xy 35.56 50.8)) (stroke (width 0) (type default)) (uuid "00000000-0000-0000-0000-000000000007"))"#
        );
    }

    #[test]
    fn labels_carry_angle_and_shape() {
        let local = Label {
            name: "PROBE_PIT".to_string(),
            at: Point::new(172.72, 52.07),
            angle: Orientation::R180,
        };
        assert!(label(&local, id()).starts_with(r#"(label "PROBE_PIT" (at 172.72 52.07 180)"#));

        let global = GlobalLabel {
            name: "SDA".to_string(),
            at: Point::new(226.06, 104.14),
            angle: Orientation::R0,
            shape: LabelShape::Bidirectional,
        };
        assert!(global_label(&global, id())
            .starts_with(r#"(global_label "SDA" (shape bidirectional) (at 226.06 104.14 0)"#));
    }

    #[test]
    fn text_is_bold() {
        let note = TextNote {
            text: "FAN DRIVER".to_string(),
            at: Point::new(38.1, 91.44),
            size: 3.81,
        };
        assert!(text(&note, id()).contains("(effects (font (size 3.81 3.81) bold))"));
    }
}
