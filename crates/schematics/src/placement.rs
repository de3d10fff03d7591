use crate::{
    geometry::{Orientation, Point},
    library::SymbolLibrary,
    SchematicError,
};

/// `Placement` is an instance of a library symbol on the sheet. Pin positions
/// are derived from the anchor and the catalog, never stored.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(build_fn(error = "SchematicError"))]
pub struct Placement {
    /// Reference designator, e.g. `R1`.
    #[builder(setter(into))]
    pub reference: String,
    #[builder(setter(into))]
    pub symbol_id: String,
    #[builder(setter(custom))]
    pub anchor: Point,
    #[builder(setter(into))]
    pub value: String,
    #[builder(default)]
    pub rotation: Orientation,
    /// Overrides the catalog footprint when set.
    #[builder(setter(into, strip_option), default)]
    pub footprint: Option<String>,
    /// Extra properties, emitted hidden.
    #[builder(setter(custom), default = "Vec::new()")]
    pub properties: Vec<(String, String)>,
}

impl PlacementBuilder {
    pub fn at(&mut self, x: f64, y: f64) -> &mut Self {
        self.anchor = Some(Point::new(x, y));
        self
    }

    pub fn anchor(&mut self, anchor: Point) -> &mut Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn property(&mut self, key: &str, value: &str) -> &mut Self {
        self.properties
            .get_or_insert_with(Vec::new)
            .push((key.to_string(), value.to_string()));
        self
    }
}

/// Map a symbol-local offset onto the sheet. Local Y grows upward and sheet Y
/// grows downward, so the Y offset is subtracted.
pub fn to_sheet(anchor: Point, local: Point) -> Point {
    Point::new(anchor.x + local.x, anchor.y - local.y)
}

/// Absolute sheet position of `pin` (number or name) on `placement`.
pub fn resolve(
    library: &SymbolLibrary,
    placement: &Placement,
    pin: &str,
) -> Result<Point, SchematicError> {
    if placement.rotation != Orientation::R0 {
        return Err(SchematicError::UnsupportedOrientation {
            reference: placement.reference.clone(),
            rotation: placement.rotation,
        });
    }
    let geometry = library.lookup_pin(&placement.symbol_id, pin)?;
    Ok(to_sheet(placement.anchor, geometry.offset))
}
