use smallvec::SmallVec;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}
impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x: x, y: y }
    }
}

pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

pub const COMPASS_PRIMARIES: [CompassPrimary; 4] = [CompassPrimary::North,
                                                    CompassPrimary::South,
                                                    CompassPrimary::East,
                                                    CompassPrimary::West];

impl CompassPrimary {
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// Unit (dx, dy) offset of this direction. The y axis grows southwards,
    /// matching the usual screen coordinate system.
    pub fn offsets(self) -> (i64, i64) {
        match self {
            CompassPrimary::North => (0, -1),
            CompassPrimary::South => (0, 1),
            CompassPrimary::East => (1, 0),
            CompassPrimary::West => (-1, 0),
        }
    }
}

/// Creates a new coordinate offset 1 cell away in the given direction.
/// Returns None if the coordinate is not representable (west or north of
/// the origin).
pub fn offset_coordinate(coord: Cartesian2DCoordinate,
                         dir: CompassPrimary)
                         -> Option<Cartesian2DCoordinate> {
    let (dx, dy) = dir.offsets();
    let x = i64::from(coord.x) + dx;
    let y = i64::from(coord.y) + dy;
    if x >= 0 && y >= 0 {
        Some(Cartesian2DCoordinate::new(x as u32, y as u32))
    } else {
        None
    }
}
