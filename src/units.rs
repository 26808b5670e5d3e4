#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);

/// Side length in pixels of one rendered cell, used when mapping pointer
/// coordinates back onto the grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellPixels(pub u32);
