/// Direction of address resolution for one pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Coordinates to address: `latitude`/`longitude` columns produce `address`.
    Forward,
    /// Address to coordinates: the `address` column produces `latitude`/`longitude`.
    Reverse,
}

impl Direction {
    /// Maps the manifest's `reverse` option onto a direction.
    pub fn from_reverse_flag(reverse: bool) -> Self {
        if reverse {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }
}
