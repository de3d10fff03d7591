use std::fmt;

/// Number of fractional digits every sheet coordinate is rounded to.
pub const COORD_DECIMALS: usize = 4;

const COORD_SCALE: f64 = 10_000.0;

/// Round a coordinate to [`COORD_DECIMALS`] fractional digits.
///
/// Negative zero is folded into positive zero so that `-0.00001` and
/// `0.00001` land on the same grid point.
pub fn round_coord(value: f64) -> f64 {
    let rounded = (value * COORD_SCALE).round() / COORD_SCALE;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// A 2-D position. On the sheet, Y grows downward; inside a symbol
/// definition, Y grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: round_coord(x),
            y: round_coord(y),
        }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Exact grid key, used to find coincident points without comparing
    /// floats directly.
    pub fn key(self) -> GridKey {
        GridKey(
            (self.x * COORD_SCALE).round() as i64,
            (self.y * COORD_SCALE).round() as i64,
        )
    }

    pub fn coincides(self, other: Point) -> bool {
        self.key() == other.key()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridKey(i64, i64);

/// Rotation in quarter turns, counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Orientation {
    pub fn degrees(self) -> u16 {
        match self {
            Orientation::R0 => 0,
            Orientation::R90 => 90,
            Orientation::R180 => 180,
            Orientation::R270 => 270,
        }
    }

    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Orientation::R0),
            90 => Some(Orientation::R90),
            180 => Some(Orientation::R180),
            270 => Some(Orientation::R270),
            _ => None,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}
