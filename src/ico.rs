use crate::restype::ResourceType;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

//===========================================================================//

// The signature that all PNG files start with.
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G'];

/// The size of the ICONDIR header, in bytes.
pub const HEADER_LEN: u32 = 6;

/// The size of one ICONDIRENTRY record, in bytes.
pub const ENTRY_LEN: u32 = 16;

/// The largest width/height an entry can declare.  A size byte of zero stands
/// for exactly this value.
pub const MAX_ICON_SIZE: u32 = 256;

// Every entry this crate writes describes full RGBA data.
const COLOR_PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 32;

//===========================================================================//

/// Wraps PNG-encoded image data in a single-entry ICO file.
///
/// The PNG data is treated as opaque bytes and copied verbatim; it is not
/// parsed or validated.  `declared_size` is the icon's width and height in
/// pixels; values above 256 are clamped to 256 (which the format stores as a
/// zero byte).  Returns an `InvalidInput` error if `png_data` is empty or if
/// `declared_size` is zero.
///
/// The result is always exactly `22 + png_data.len()` bytes long.
pub fn encode(png_data: &[u8], declared_size: u32) -> io::Result<Vec<u8>> {
    let container = IcoContainer::new(png_data, declared_size)?;
    let mut output = Vec::with_capacity(container.total_len());
    container.write(&mut output)?;
    debug_assert_eq!(output.len(), container.total_len());
    log::debug!(
        "Encoded {}x{} icon ({} bytes of image data, {} bytes total)",
        container.entry.width(),
        container.entry.height(),
        png_data.len(),
        output.len()
    );
    Ok(output)
}

//===========================================================================//

/// A single-entry ICO file: header, one directory entry, and the entry's
/// encoded image data.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IcoContainer {
    restype: ResourceType,
    entry: IcoDirectoryEntry,
}

impl IcoContainer {
    /// Creates a container around the given PNG data, applying the same size
    /// policy as [`encode`].
    pub fn new(png_data: &[u8], declared_size: u32) -> io::Result<IcoContainer> {
        if png_data.is_empty() {
            invalid_input!("Image data must not be empty");
        }
        if declared_size < 1 {
            invalid_input!(
                "Invalid icon size (was {}, but must be at least 1)",
                declared_size
            );
        }
        let max_data_len = (u32::MAX - HEADER_LEN - ENTRY_LEN) as usize;
        if png_data.len() > max_data_len {
            invalid_input!(
                "Image data too large (was {} bytes, but max is {})",
                png_data.len(),
                max_data_len
            );
        }
        let size = if declared_size > MAX_ICON_SIZE {
            log::warn!(
                "Clamping icon size {} to {}",
                declared_size,
                MAX_ICON_SIZE
            );
            MAX_ICON_SIZE
        } else {
            declared_size
        };
        let entry = IcoDirectoryEntry {
            width: size,
            height: size,
            num_colors: 0,
            color_planes: COLOR_PLANES,
            bits_per_pixel: BITS_PER_PIXEL,
            data: png_data.to_vec(),
        };
        if !entry.is_png() {
            log::warn!("Icon image data does not start with a PNG signature");
        }
        Ok(IcoContainer { restype: ResourceType::Icon, entry })
    }

    /// Returns the type of resource stored in this container.
    pub fn resource_type(&self) -> ResourceType {
        self.restype
    }

    /// Returns the container's only entry.
    pub fn entry(&self) -> &IcoDirectoryEntry {
        &self.entry
    }

    /// Returns the total number of bytes that `write` will produce.
    pub fn total_len(&self) -> usize {
        (HEADER_LEN + ENTRY_LEN) as usize + self.entry.data.len()
    }

    /// Reads a single-entry ICO file into memory.
    pub fn read<R: Read>(mut reader: R) -> io::Result<IcoContainer> {
        let reserved = reader.read_u16::<LittleEndian>()?;
        if reserved != 0 {
            invalid_data!(
                "Invalid reserved field value in ICONDIR \
                 (was {}, but must be 0)",
                reserved
            );
        }
        let restype = reader.read_u16::<LittleEndian>()?;
        let restype = match ResourceType::from_number(restype) {
            Some(restype) => restype,
            None => invalid_data!("Invalid resource type ({})", restype),
        };
        let num_entries = reader.read_u16::<LittleEndian>()?;
        if num_entries != 1 {
            invalid_data!(
                "Unsupported number of entries (was {}, but must be 1)",
                num_entries
            );
        }
        let width_byte = reader.read_u8()?;
        let height_byte = reader.read_u8()?;
        let num_colors = reader.read_u8()?;
        let reserved = reader.read_u8()?;
        if reserved != 0 {
            invalid_data!(
                "Invalid reserved field value in ICONDIRENTRY \
                 (was {}, but must be 0)",
                reserved
            );
        }
        let color_planes = reader.read_u16::<LittleEndian>()?;
        let bits_per_pixel = reader.read_u16::<LittleEndian>()?;
        let data_size = reader.read_u32::<LittleEndian>()?;
        let data_offset = reader.read_u32::<LittleEndian>()?;
        // The reader is consumed front to back, so the image data has to
        // follow the directory without a gap.
        if data_offset != HEADER_LEN + ENTRY_LEN {
            invalid_data!(
                "Unsupported image data offset (was {}, but must be {})",
                data_offset,
                HEADER_LEN + ENTRY_LEN
            );
        }
        // The size field is untrusted; only buffer what is actually present.
        let mut data = Vec::new();
        reader.take(data_size as u64).read_to_end(&mut data)?;
        if data.len() != data_size as usize {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Truncated image data (was {} bytes, but should be {})",
                    data.len(),
                    data_size
                ),
            ));
        }
        let entry = IcoDirectoryEntry {
            width: decode_size_byte(width_byte),
            height: decode_size_byte(height_byte),
            num_colors,
            color_planes,
            bits_per_pixel,
            data,
        };
        Ok(IcoContainer { restype, entry })
    }

    /// Writes the ICO file out.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u16::<LittleEndian>(0)?; // reserved
        writer.write_u16::<LittleEndian>(self.restype.number())?;
        writer.write_u16::<LittleEndian>(1)?; // number of entries
        let entry = &self.entry;
        writer.write_u8(encode_size_byte(entry.width))?;
        writer.write_u8(encode_size_byte(entry.height))?;
        writer.write_u8(entry.num_colors)?;
        writer.write_u8(0)?; // reserved
        writer.write_u16::<LittleEndian>(entry.color_planes)?;
        writer.write_u16::<LittleEndian>(entry.bits_per_pixel)?;
        writer.write_u32::<LittleEndian>(entry.data.len() as u32)?;
        writer.write_u32::<LittleEndian>(HEADER_LEN + ENTRY_LEN)?;
        writer.write_all(&entry.data)?;
        Ok(())
    }
}

// A width/height byte of zero indicates a size of 256.
fn encode_size_byte(size: u32) -> u8 {
    if size >= MAX_ICON_SIZE {
        0
    } else {
        size as u8
    }
}

fn decode_size_byte(byte: u8) -> u32 {
    if byte == 0 {
        MAX_ICON_SIZE
    } else {
        byte as u32
    }
}

//===========================================================================//

/// The directory entry describing the one image in an [`IcoContainer`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IcoDirectoryEntry {
    width: u32,
    height: u32,
    num_colors: u8,
    color_planes: u16,
    bits_per_pixel: u16,
    data: Vec<u8>,
}

impl IcoDirectoryEntry {
    /// Returns the declared width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the declared height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the color-count field; zero means the bit depth applies.
    pub fn num_colors(&self) -> u8 {
        self.num_colors
    }

    /// Returns the number of color planes.
    pub fn color_planes(&self) -> u16 {
        self.color_planes
    }

    /// Returns the bits-per-pixel (color depth) of the image.
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Returns true if the image data starts with the PNG signature.
    pub fn is_png(&self) -> bool {
        self.data.starts_with(PNG_SIGNATURE)
    }

    /// Returns the raw, encoded image data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{encode, IcoContainer, ResourceType};
    use std::io::{Cursor, ErrorKind};

    const TINY_PNG: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn encode_tiny_icon() {
        let output = encode(TINY_PNG, 64).unwrap();
        let expected: &[u8] = b"\
            \x00\x00\x01\x00\x01\x00\
            \
            \x40\x40\x00\x00\x01\x00\x20\x00\
            \x08\x00\x00\x00\x16\x00\x00\x00\
            \
            \x89PNG\r\n\x1a\n";
        assert_eq!(output.as_slice(), expected);
    }

    #[test]
    fn size_byte_policy() {
        assert_eq!(super::encode_size_byte(1), 1);
        assert_eq!(super::encode_size_byte(255), 255);
        assert_eq!(super::encode_size_byte(256), 0);
        assert_eq!(super::decode_size_byte(0), 256);
        assert_eq!(super::decode_size_byte(48), 48);
    }

    #[test]
    fn reject_empty_data() {
        let error = encode(&[], 32).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn reject_zero_size() {
        let error = encode(TINY_PNG, 0).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn read_what_was_written() {
        let output = encode(TINY_PNG, 256).unwrap();
        let container = IcoContainer::read(Cursor::new(&output)).unwrap();
        assert_eq!(container.resource_type(), ResourceType::Icon);
        let entry = container.entry();
        assert_eq!(entry.width(), 256);
        assert_eq!(entry.height(), 256);
        assert_eq!(entry.num_colors(), 0);
        assert_eq!(entry.color_planes(), 1);
        assert_eq!(entry.bits_per_pixel(), 32);
        assert!(entry.is_png());
        assert_eq!(entry.data(), TINY_PNG);
    }

    #[test]
    fn read_rejects_cursor_file() {
        let input = b"\x00\x00\x02\x00\x01\x00";
        let error = IcoContainer::read(Cursor::new(input)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn read_rejects_empty_icon_set() {
        let input = b"\x00\x00\x01\x00\x00\x00";
        let error = IcoContainer::read(Cursor::new(input)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn read_rejects_nonzero_reserved_field() {
        let input = b"\x01\x00\x01\x00\x01\x00";
        let error = IcoContainer::read(Cursor::new(input)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn read_rejects_nonzero_entry_reserved_byte() {
        let mut output = encode(TINY_PNG, 32).unwrap();
        output[9] = 1;
        let error = IcoContainer::read(Cursor::new(&output)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn read_rejects_data_offset_past_directory() {
        let mut output = encode(TINY_PNG, 32).unwrap();
        output[18] = 23;
        let error = IcoContainer::read(Cursor::new(&output)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn read_huge_declared_data_size() {
        // The header claims nearly 4 GiB of image data, but only 8 bytes
        // follow.
        let mut output = encode(TINY_PNG, 32).unwrap();
        output[14..18].copy_from_slice(b"\xf0\xff\xff\xff");
        let error = IcoContainer::read(Cursor::new(&output)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn read_truncated_data() {
        let mut output = encode(TINY_PNG, 16).unwrap();
        output.truncate(output.len() - 1);
        let error = IcoContainer::read(Cursor::new(&output)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnexpectedEof);
    }
}

//===========================================================================//
