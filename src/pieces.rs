//! Piece shapes, orientations and their 4-bit connector encoding.
//!
//! Every piece is a shape plus the direction it points to. The connectors it
//! exposes are packed in the 4 low bits of a mask, North-East-South-West from
//! the most significant bit down, so `0b1100` is a corner joining North and
//! East.

use crate::error::GridError;

/// One of the four compass sides of a cell, in clockwise order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    #[default]
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions, indexed by [`Direction::index`].
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rotates clockwise by `quarter_turns`; negative values turn the other way.
    #[inline]
    pub const fn rotated(self, quarter_turns: i32) -> Self {
        let steps = quarter_turns.rem_euclid(4) as usize;
        Self::ALL[(self as usize + steps) % 4]
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        self.rotated(2)
    }

    /// The connector bit for this side.
    #[inline]
    pub const fn bit(self) -> u8 {
        0b1000 >> self as u8
    }

    /// Character used by the text format.
    pub const fn code(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = GridError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(GridError::InvalidDirection(value))
    }
}

/// The fixed shape of a piece; only its orientation changes during play.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    #[default]
    Empty,
    Endpoint,
    Segment,
    Corner,
    Tee,
    Cross,
}

impl Shape {
    pub const ALL: [Shape; 6] = [
        Shape::Empty,
        Shape::Endpoint,
        Shape::Segment,
        Shape::Corner,
        Shape::Tee,
        Shape::Cross,
    ];

    /// Number of orientations that give distinct connector masks.
    ///
    /// Starting from any orientation, rotating through this many quarter
    /// turns visits every distinct placement of the shape exactly once.
    #[inline]
    pub const fn candidate_count(self) -> usize {
        match self {
            Shape::Empty | Shape::Cross => 1,
            Shape::Segment => 2,
            Shape::Endpoint | Shape::Corner | Shape::Tee => 4,
        }
    }

    /// Character used by the text format.
    pub const fn code(self) -> char {
        match self {
            Shape::Empty => 'E',
            Shape::Endpoint => 'N',
            Shape::Segment => 'S',
            Shape::Corner => 'C',
            Shape::Tee => 'T',
            Shape::Cross => 'X',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'E' => Some(Shape::Empty),
            'N' => Some(Shape::Endpoint),
            'S' => Some(Shape::Segment),
            'C' => Some(Shape::Corner),
            'T' => Some(Shape::Tee),
            'X' => Some(Shape::Cross),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Shape {
    type Error = GridError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(GridError::InvalidShape(value))
    }
}

/// Connector masks indexed by `[shape][orientation]`.
const MASKS: [[u8; 4]; 6] = [
    [0b0000, 0b0000, 0b0000, 0b0000], // empty
    [0b1000, 0b0100, 0b0010, 0b0001], // endpoint
    [0b1010, 0b0101, 0b1010, 0b0101], // segment
    [0b1100, 0b0110, 0b0011, 0b1001], // corner
    [0b1101, 0b1110, 0b0111, 0b1011], // tee
    [0b1111, 0b1111, 0b1111, 0b1111], // cross
];

/// Builds the reverse of [`MASKS`] at compile time.
///
/// Entries are `(shape index, orientation index)`. Masks shared by several
/// orientations keep the first one, so empty and cross decode to North and
/// segments to North or East.
const fn build_decode_table() -> [(u8, u8); 16] {
    let mut table = [(u8::MAX, u8::MAX); 16];

    let mut shape = 0;
    while shape < MASKS.len() {
        let mut dir = 0;
        while dir < 4 {
            let mask = MASKS[shape][dir] as usize;
            if table[mask].0 == u8::MAX {
                table[mask] = (shape as u8, dir as u8);
            }
            dir += 1;
        }
        shape += 1;
    }

    let mut mask = 0;
    while mask < 16 {
        assert!(table[mask].0 != u8::MAX, "every 4-bit mask must decode to a piece");
        mask += 1;
    }
    table
}

const DECODE: [(u8, u8); 16] = build_decode_table();

/// A shape together with its orientation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: Shape,
    pub orientation: Direction,
}

impl Piece {
    pub const EMPTY: Self = Self::new(Shape::Empty, Direction::North);

    pub const fn new(shape: Shape, orientation: Direction) -> Self {
        Self { shape, orientation }
    }

    /// The connector mask of this piece.
    #[inline]
    pub const fn mask(self) -> u8 {
        MASKS[self.shape as usize][self.orientation as usize]
    }

    /// Decodes a connector mask into its canonical piece.
    ///
    /// # Panics
    ///
    /// Panics if `mask` has bits above the low four.
    pub fn from_mask(mask: u8) -> Self {
        assert!(mask < 16, "connector mask {mask:#06b} is out of range");
        let (shape, orientation) = DECODE[mask as usize];
        Self::new(
            Shape::ALL[shape as usize],
            Direction::ALL[orientation as usize],
        )
    }

    /// Returns true if this piece has a connector on the `side` face.
    #[inline]
    pub const fn has_connector(self, side: Direction) -> bool {
        self.mask() & side.bit() != 0
    }

    #[inline]
    pub const fn rotated(self, quarter_turns: i32) -> Self {
        Self::new(self.shape, self.orientation.rotated(quarter_turns))
    }

    #[inline]
    pub const fn with_orientation(self, orientation: Direction) -> Self {
        Self::new(self.shape, orientation)
    }

    /// Returns the piece obtained by adding a connector on `side`.
    ///
    /// # Panics
    ///
    /// Panics if the connector is already present.
    pub fn with_connector(self, side: Direction) -> Self {
        assert!(
            !self.has_connector(side),
            "{self:?} already has a connector towards {side:?}"
        );
        Self::from_mask(self.mask() | side.bit())
    }
}

/// Side length of the built-in puzzle.
pub const DEFAULT_SIZE: usize = 5;

/// Shapes of the built-in 5x5 puzzle, row-major.
pub const DEFAULT_SHAPES: [Shape; DEFAULT_SIZE * DEFAULT_SIZE] = {
    use Shape::{Corner as C, Endpoint as N, Segment as S, Tee as T};
    [
        C, N, N, C, N, //
        T, T, T, T, T, //
        N, N, T, N, S, //
        N, T, T, C, S, //
        N, T, N, N, N, //
    ]
};

/// Starting (shuffled) orientations of the built-in puzzle.
pub const DEFAULT_ORIENTATIONS: [Direction; DEFAULT_SIZE * DEFAULT_SIZE] = {
    use Direction::{East as E, North as N, South as S, West as W};
    [
        W, N, W, N, S, //
        S, W, N, E, E, //
        E, N, W, W, E, //
        S, S, N, W, N, //
        E, W, S, E, S, //
    ]
};

/// Orientations solving the built-in puzzle.
pub const DEFAULT_SOLUTION: [Direction; DEFAULT_SIZE * DEFAULT_SIZE] = {
    use Direction::{East as E, North as N, South as S, West as W};
    [
        E, W, E, S, S, //
        E, S, S, N, W, //
        N, N, E, W, N, //
        E, S, N, S, S, //
        E, N, W, N, N, //
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mask_decodes_and_reencodes() {
        for mask in 0..16u8 {
            let piece = Piece::from_mask(mask);
            assert_eq!(piece.mask(), mask, "mask {mask:#06b} decoded to {piece:?}");
        }
    }

    #[test]
    fn test_decode_inverts_encode_up_to_symmetry() {
        for shape in Shape::ALL {
            for orientation in Direction::ALL {
                let piece = Piece::new(shape, orientation);
                let decoded = Piece::from_mask(piece.mask());
                assert_eq!(decoded.shape, shape);
                let expected = match shape {
                    Shape::Empty | Shape::Cross => Direction::North,
                    Shape::Segment => Direction::ALL[orientation.index() % 2],
                    _ => orientation,
                };
                assert_eq!(decoded.orientation, expected, "{piece:?}");
            }
        }
    }

    #[test]
    fn test_mask_count_per_shape() {
        for shape in Shape::ALL {
            let mut masks: Vec<u8> = Direction::ALL
                .iter()
                .map(|&dir| Piece::new(shape, dir).mask())
                .collect();
            masks.sort_unstable();
            masks.dedup();
            assert_eq!(masks.len(), shape.candidate_count(), "{shape:?}");
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_from_mask_rejects_wide_masks() {
        Piece::from_mask(16);
    }

    #[test]
    fn test_rotation_wraps_both_ways() {
        assert_eq!(Direction::West.rotated(1), Direction::North);
        assert_eq!(Direction::North.rotated(-1), Direction::West);
        assert_eq!(Direction::East.rotated(-6), Direction::West);
        assert_eq!(Direction::South.rotated(8), Direction::South);
        assert_eq!(Direction::North.rotated(i32::MIN), Direction::North);
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_adding_connectors_promotes_shapes() {
        let endpoint = Piece::EMPTY.with_connector(Direction::East);
        assert_eq!(endpoint, Piece::new(Shape::Endpoint, Direction::East));

        let corner = endpoint.with_connector(Direction::South);
        assert_eq!(corner, Piece::new(Shape::Corner, Direction::East));

        let tee = corner.with_connector(Direction::West);
        assert_eq!(tee, Piece::new(Shape::Tee, Direction::South));

        let cross = tee.with_connector(Direction::North);
        assert_eq!(cross.shape, Shape::Cross);
    }

    #[test]
    #[should_panic(expected = "already has a connector")]
    fn test_with_connector_rejects_duplicates() {
        Piece::new(Shape::Segment, Direction::North).with_connector(Direction::South);
    }

    #[test]
    fn test_codes_roundtrip_and_reject_unknown() {
        for shape in Shape::ALL {
            assert_eq!(Shape::from_code(shape.code()), Some(shape));
        }
        for dir in Direction::ALL {
            assert_eq!(Direction::from_code(dir.code()), Some(dir));
        }
        assert_eq!(Shape::from_code('Z'), None);
        assert_eq!(Direction::from_code('n'), None);
    }

    #[test]
    fn test_raw_codes_are_validated() {
        assert_eq!(Shape::try_from(5), Ok(Shape::Cross));
        assert_eq!(Shape::try_from(6), Err(GridError::InvalidShape(6)));
        assert_eq!(Direction::try_from(3), Ok(Direction::West));
        assert_eq!(Direction::try_from(4), Err(GridError::InvalidDirection(4)));
    }
}
