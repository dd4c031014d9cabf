use std::io::{self, Read, Write};

//===========================================================================//

// Size limits for rendered and decoded images:
const MIN_WIDTH: u32 = 1;
const MIN_HEIGHT: u32 = 1;

//===========================================================================//

/// A decoded RGBA raster image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogoImage {
    width: u32,
    height: u32,
    rgba_data: Vec<u8>,
}

impl LogoImage {
    /// Creates a new image with the given dimensions and RGBA data.  The
    /// `width` and `height` must be nonzero, and `rgba_data` must have `4 *
    /// width * height` bytes and be in row-major order from top to bottom.
    /// Panics if the dimensions are out of range or if `rgba_data` is the
    /// wrong length.
    pub fn from_rgba_data(
        width: u32,
        height: u32,
        rgba_data: Vec<u8>,
    ) -> LogoImage {
        if width < MIN_WIDTH {
            panic!(
                "Invalid width (was {}, but must be at least {})",
                width, MIN_WIDTH
            );
        }
        if height < MIN_HEIGHT {
            panic!(
                "Invalid height (was {}, but must be at least {})",
                height, MIN_HEIGHT
            );
        }
        let expected_data_len = (width as u64) * (height as u64) * 4;
        if (rgba_data.len() as u64) != expected_data_len {
            panic!(
                "Invalid data length (was {}, but must be {} for {}x{} image)",
                rgba_data.len(),
                expected_data_len,
                width,
                height
            );
        }
        LogoImage { width, height, rgba_data }
    }

    /// Decodes an image from a PNG file.  Palette, grayscale and 16-bit
    /// images are converted to 8-bit RGBA.  Returns an error if the PNG data
    /// is malformed or can't be decoded.
    pub fn read_png<R: Read>(reader: R) -> io::Result<LogoImage> {
        let mut decoder = png::Decoder::new(reader);
        decoder.set_transformations(
            png::Transformations::EXPAND | png::Transformations::STRIP_16,
        );
        let mut png_reader = match decoder.read_info() {
            Ok(png_reader) => png_reader,
            Err(error) => invalid_data!("Malformed PNG data: {}", error),
        };
        let (width, height) = {
            let info = png_reader.info();
            (info.width, info.height)
        };
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            invalid_data!("Invalid PNG dimensions ({}x{})", width, height);
        }
        let mut buffer = vec![0u8; png_reader.output_buffer_size()];
        let frame = match png_reader.next_frame(&mut buffer) {
            Ok(frame) => frame,
            Err(error) => invalid_data!("Malformed PNG data: {}", error),
        };
        buffer.truncate(frame.buffer_size());
        let rgba_data = match frame.color_type {
            png::ColorType::Rgba => buffer,
            png::ColorType::Rgb => {
                let mut rgba = Vec::with_capacity(buffer.len() / 3 * 4);
                for pixel in buffer.chunks_exact(3) {
                    rgba.extend_from_slice(pixel);
                    rgba.push(u8::MAX);
                }
                rgba
            }
            png::ColorType::GrayscaleAlpha => {
                let mut rgba = Vec::with_capacity(buffer.len() * 2);
                for pixel in buffer.chunks_exact(2) {
                    let (gray, alpha) = (pixel[0], pixel[1]);
                    rgba.extend_from_slice(&[gray, gray, gray, alpha]);
                }
                rgba
            }
            png::ColorType::Grayscale => {
                let mut rgba = Vec::with_capacity(buffer.len() * 4);
                for gray in buffer.into_iter() {
                    rgba.extend_from_slice(&[gray, gray, gray, u8::MAX]);
                }
                rgba
            }
            png::ColorType::Indexed => {
                // EXPAND should have resolved the palette already.
                invalid_data!("Unexpanded indexed PNG data");
            }
        };
        let expected_data_len = (width as usize) * (height as usize) * 4;
        if rgba_data.len() != expected_data_len {
            invalid_data!(
                "Decoded PNG has wrong data length (was {}, but should be {})",
                rgba_data.len(),
                expected_data_len
            );
        }
        Ok(LogoImage::from_rgba_data(width, height, rgba_data))
    }

    /// Encodes the image as a PNG file.  Fully opaque images are written as
    /// 8-bit RGB, all others as 8-bit RGBA.
    pub fn write_png<W: Write>(&self, writer: W) -> io::Result<()> {
        match self.write_png_enc(writer) {
            Ok(()) => Ok(()),
            Err(png::EncodingError::IoError(error)) => Err(error),
            Err(png::EncodingError::Format(error)) => {
                invalid_input!("PNG format error: {}", error);
            }
            Err(png::EncodingError::LimitsExceeded) => {
                invalid_input!("PNG limits exceeded");
            }
            Err(png::EncodingError::Parameter(error)) => {
                invalid_input!("PNG parameter error: {}", error);
            }
        }
    }

    /// Encodes the image as PNG data in memory.
    pub fn encode_png(&self) -> io::Result<Vec<u8>> {
        let mut data = Vec::new();
        self.write_png(&mut data)?;
        Ok(data)
    }

    fn write_png_enc<W: Write>(
        &self,
        writer: W,
    ) -> Result<(), png::EncodingError> {
        let has_alpha = self.has_alpha();
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_depth(png::BitDepth::Eight);
        if has_alpha {
            encoder.set_color(png::ColorType::Rgba);
        } else {
            encoder.set_color(png::ColorType::Rgb);
        }
        let mut writer = encoder.write_header()?;
        if has_alpha {
            writer.write_image_data(&self.rgba_data)?;
        } else {
            let mut rgb_data =
                Vec::<u8>::with_capacity((self.rgba_data.len() / 4) * 3);
            for pixel in self.rgba_data.chunks_exact(4) {
                rgb_data.extend_from_slice(&pixel[..3]);
            }
            writer.write_image_data(&rgb_data)?;
        }
        writer.finish()
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the RGBA data for this image, in row-major order from top to
    /// bottom.
    pub fn rgba_data(&self) -> &[u8] {
        &self.rgba_data
    }

    /// Returns the RGBA value of the pixel at the given position.  Panics if
    /// the position is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height);
        let start = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.rgba_data[start..][..4]);
        rgba
    }

    /// Returns true if any pixel is not fully opaque.
    pub fn has_alpha(&self) -> bool {
        self.rgba_data.chunks_exact(4).any(|pixel| pixel[3] != u8::MAX)
    }
}

//===========================================================================//


//===========================================================================//
