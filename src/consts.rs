pub(crate) const QOI_OP_INDEX: u8 = 0x00; // 00xxxxxx
pub(crate) const QOI_OP_DIFF: u8 = 0x40; // 01xxxxxx
pub(crate) const QOI_OP_LUMA: u8 = 0x80; // 10xxxxxx
pub(crate) const QOI_OP_RUN: u8 = 0xc0; // 11xxxxxx
pub(crate) const QOI_OP_RGB: u8 = 0xfe; // 11111110
pub(crate) const QOI_OP_RGBA: u8 = 0xff; // 11111111

pub(crate) const QOI_MASK_2: u8 = 0xc0;

pub(crate) const QOI_MAGIC: [u8; 4] = *b"qoif";
pub(crate) const QOI_HEADER_SIZE: usize = 14;
pub(crate) const QOI_TRAILER_SIZE: usize = 8;
pub(crate) const QOI_TRAILER: [u8; QOI_TRAILER_SIZE] = [0u8; QOI_TRAILER_SIZE];
