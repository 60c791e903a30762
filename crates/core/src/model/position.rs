/// A geographic point in provider axis order.
///
/// `x` is the longitude and `y` is the latitude. The inversion relative to the
/// `latitude`/`longitude` column naming follows the convention of geocoding
/// services, which take points as `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
