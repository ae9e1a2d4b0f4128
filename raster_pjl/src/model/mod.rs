pub mod cups;
pub mod page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RasterByteOrder {
    BigEndian,
    LittleEndian,
}
