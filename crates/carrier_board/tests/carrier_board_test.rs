use std::collections::HashMap;

use carrier_board::{build, sheet_settings};
use insta::assert_debug_snapshot;
use kicad_sch::{ids::SequentialIds, validate_document, KicadSchExporter};
use schematics::{
    geometry::GridKey,
    net::{Element, Wire},
    placement::to_sheet,
    validate_elements, Point, SymbolLibrary, Topology,
};

fn board() -> (SymbolLibrary, Topology) {
    let library = SymbolLibrary::standard().unwrap();
    let topology = build(&library).unwrap();
    (library, topology)
}

fn wires(topology: &Topology) -> Vec<Wire> {
    topology
        .elements()
        .iter()
        .filter_map(|element| match element {
            Element::Wire(wire) => Some(*wire),
            _ => None,
        })
        .collect()
}

/// Every pin connection point on the sheet, including power symbols.
fn pin_points(library: &SymbolLibrary, topology: &Topology) -> Vec<Point> {
    let mut points = Vec::new();
    for placement in topology.placements() {
        let symbol = library.symbol(&placement.symbol_id).unwrap();
        for pin in &symbol.pins {
            points.push(to_sheet(placement.anchor, pin.offset));
        }
    }
    for element in topology.elements() {
        if let Element::Power(power) = element {
            points.push(power.at);
        }
    }
    points
}

fn strictly_inside(wire: &Wire, point: Point) -> bool {
    let (a, b) = (wire.start, wire.end);
    if point.coincides(a) || point.coincides(b) {
        return false;
    }
    if a.x == b.x && point.x == a.x {
        return point.y > a.y.min(b.y) && point.y < a.y.max(b.y);
    }
    if a.y == b.y && point.y == a.y {
        return point.x > a.x.min(b.x) && point.x < a.x.max(b.x);
    }
    false
}

#[test]
fn every_label_is_paired() {
    let (_, topology) = board();
    assert_eq!(validate_elements(topology.elements()), vec![]);
}

#[test]
fn board_stats() {
    let (_, topology) = board();
    let stats = topology.stats();
    assert_eq!(stats.symbols, 18);
    assert_eq!(stats.power_symbols, 26);
    assert_eq!(stats.labels, 16);
    assert_eq!(stats.no_connects, 1);
    assert_eq!(stats.texts, 13);
}

#[test]
fn wires_are_axis_aligned() {
    let (_, topology) = board();
    for wire in wires(&topology) {
        assert!(
            wire.start.x == wire.end.x || wire.start.y == wire.end.y,
            "diagonal wire {} -> {}",
            wire.start,
            wire.end
        );
        assert!(!wire.start.coincides(wire.end));
    }
}

#[test]
fn junctions_sit_exactly_where_three_wire_ends_meet() {
    let (library, topology) = board();

    let mut ends: HashMap<GridKey, usize> = HashMap::new();
    for wire in wires(&topology) {
        for point in wire.endpoints() {
            *ends.entry(point.key()).or_insert(0) += 1;
        }
    }
    let mut connections = ends.clone();
    for point in pin_points(&library, &topology) {
        *connections.entry(point.key()).or_insert(0) += 1;
    }

    let mut junctions: HashMap<GridKey, usize> = HashMap::new();
    for element in topology.elements() {
        if let Element::Junction(junction) = element {
            *junctions.entry(junction.at.key()).or_insert(0) += 1;
        }
    }

    for (key, count) in &junctions {
        assert_eq!(*count, 1);
        assert!(connections[key] >= 3);
    }
    for (key, count) in &ends {
        if *count >= 3 {
            assert_eq!(junctions.get(key), Some(&1));
        }
        // Every junction the board asks for sits on a three-wire node, so
        // a two-wire point never carries one, pin or not.
        if *count == 2 {
            assert!(!junctions.contains_key(key));
        }
    }
}

#[test]
fn no_connection_lands_in_the_middle_of_a_wire() {
    let (library, topology) = board();
    let wires = wires(&topology);

    let mut points = pin_points(&library, &topology);
    for wire in &wires {
        points.extend(wire.endpoints());
    }
    for element in topology.elements() {
        match element {
            Element::Label(label) => points.push(label.at),
            Element::GlobalLabel(label) => points.push(label.at),
            Element::NoConnect(marker) => points.push(marker.at),
            _ => {}
        }
    }

    for wire in &wires {
        for point in &points {
            assert!(
                !strictly_inside(wire, *point),
                "{} touches wire {} -> {}",
                point,
                wire.start,
                wire.end
            );
        }
    }
}

#[test]
fn probe_nodes_get_junctions() {
    let (_, topology) = board();
    let junctions: Vec<Point> = topology
        .elements()
        .iter()
        .filter_map(|element| match element {
            Element::Junction(junction) => Some(junction.at),
            _ => None,
        })
        .collect();
    for x in [175.26, 213.36, 251.46] {
        assert!(junctions.contains(&Point::new(x, 52.07)));
    }
    // Gate corner where FAN_PWM enters.
    assert!(junctions.contains(&Point::new(48.26, 119.38)));
    assert_eq!(junctions.len(), 4);
}

#[test]
fn pass_through_pins_get_no_junction() {
    let (_, topology) = board();
    // J1 tip and sleeve, U1 IN+: a pin with two wires leaving it.
    for at in [
        Point::new(35.56, 55.88),
        Point::new(35.56, 58.42),
        Point::new(66.04, 53.34),
    ] {
        assert!(!topology
            .elements()
            .iter()
            .any(|element| matches!(element, Element::Junction(j) if j.at == at)));
    }
}

#[test]
fn fan_return_lands_on_the_drain() {
    let (_, topology) = board();
    let drain = Point::new(66.04, 114.3);
    let source = Point::new(66.04, 124.46);
    let wires = wires(&topology);

    // J7 pin 2 reaches the drain; the source goes to ground below.
    assert!(wires
        .iter()
        .any(|w| w.start == Point::new(66.04, 106.68) && w.end == drain));
    assert!(wires
        .iter()
        .any(|w| w.start == source && w.end == Point::new(66.04, 129.54)));
}

#[test]
fn power_references_are_sequential() {
    let (_, topology) = board();
    let references: Vec<String> = topology
        .elements()
        .iter()
        .filter_map(|element| match element {
            Element::Power(power) => Some(power.reference.clone()),
            _ => None,
        })
        .collect();
    let expected: Vec<String> = (1..=26).map(|n| format!("#PWR{:02}", n)).collect();
    assert_eq!(references, expected);
}

#[test]
fn rendered_board_checks_clean() {
    let (library, topology) = board();
    let settings = sheet_settings().unwrap();
    let text = KicadSchExporter::new(&library, &settings)
        .with_ids(SequentialIds::new())
        .export(&topology)
        .unwrap();

    assert!(validate_document(&text).is_empty());
    assert!(text.contains("(title \"Pit Claw BBQ Controller\")"));
    assert!(text.contains("(comment 2 \"WT32-SC01 Plus + ADS1115 + IRLZ44N fan driver\")"));
    assert_eq!(text.matches("(symbol (lib_id").count(), 18 + 26);
    assert_eq!(text.matches("(label ").count(), 16);

    let lib_ids: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("(symbol \"") && line.contains(':'))
        .collect();
    assert_debug_snapshot!(lib_ids, @r###"
    [
        "(symbol \"Device:R\"",
        "(symbol \"Device:C\"",
        "(symbol \"Device:Buzzer\"",
        "(symbol \"bbq:IRLZ44N\"",
        "(symbol \"bbq:MP1584EN_Module\"",
        "(symbol \"bbq:ADS1115_Module\"",
        "(symbol \"Connector_Generic:Conn_01x02\"",
        "(symbol \"Connector_Generic:Conn_01x03\"",
        "(symbol \"Connector_Generic:Conn_01x08\"",
        "(symbol \"power:+12V\"",
        "(symbol \"power:+5V\"",
        "(symbol \"power:+3V3\"",
        "(symbol \"power:GND\"",
    ]
    "###);
}
