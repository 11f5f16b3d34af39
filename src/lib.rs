//! Decoder for non-interlaced, 8-bit RGBA PNG images.
//!
//! The decoder walks the chunk stream, inflates the concatenated `IDAT`
//! payloads and reverses the per-scanline filters. The result is a
//! [`PixelBuffer`] of RGB rows; the alpha channel is dropped.
//!
//! ```no_run
//! let bytes = std::fs::read("image.png").unwrap();
//! let image = pngdump::decode(&bytes).unwrap();
//!
//! for row in image.rows() {
//!     assert_eq!(row.len(), image.width() as usize * 3);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "std")]
pub mod ppm;

use alloc::{vec, vec::Vec};
use crc32fast::Hasher;
use log::{debug, trace, warn};
use miniz_oxide::inflate::TINFLStatus;
use num_enum::TryFromPrimitive;

const PNG_MAGIC_BYTES: &[u8] = &[137, 80, 78, 71, 13, 10, 26, 10];

// width (4) + height (4) + five single byte fields.
const HEADER_LEN: usize = 13;

// length (4) + chunk type (4) + crc (4).
const CHUNK_OVERHEAD: usize = 12;

// Only the first three channels of each pixel make it into the output.
const OUTPUT_CHANNELS: usize = 3;

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, TryFromPrimitive)]
pub enum BitDepth {
    Eight = 8,
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, TryFromPrimitive)]
pub enum ColorType {
    Grayscale = 0,
    Rgb = 2,
    Palette = 3,
    GrayscaleAlpha = 4,
    RgbAlpha = 6,
}

impl ColorType {
    pub fn sample_multiplier(&self) -> usize {
        match self {
            ColorType::Grayscale => 1,
            ColorType::Rgb => 3,
            ColorType::Palette => 1,
            ColorType::GrayscaleAlpha => 2,
            ColorType::RgbAlpha => 4,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, TryFromPrimitive)]
pub enum CompressionMethod {
    Deflate = 0,
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, TryFromPrimitive)]
pub enum InterlaceMethod {
    None = 0,
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, TryFromPrimitive)]
pub enum FilterType {
    None = 0,
    Sub = 1,
    Up = 2,
    Average = 3,
    Paeth = 4,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("input does not start with the PNG signature")]
    NotRecognizedFormat,

    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEndOfInput { needed: usize, remaining: usize },

    #[error("{} chunk declares {declared} bytes but only {remaining} remain", type_name(.chunk_type))]
    TruncatedChunk { chunk_type: [u8; 4], declared: usize, remaining: usize },

    #[error("IHDR payload is {len} bytes, expected at least 13")]
    MalformedHeader { len: usize },

    #[error("first critical chunk is {}, expected IHDR", type_name(.0))]
    HeaderChunkNotFirst([u8; 4]),

    #[error("unsupported color type {0}, only RGBA (6) is supported")]
    UnsupportedColorModel(u8),

    #[error("unsupported bit depth {0}, only 8 is supported")]
    UnsupportedBitDepth(u8),

    #[error("unsupported compression method {0}")]
    UnsupportedCompression(u8),

    #[error("unsupported interlace method {0}")]
    UnsupportedInterlace(u8),

    #[error("unsupported scanline filter type {0}")]
    UnsupportedFilterMethod(u8),

    #[error("decompression failed: {0:?}")]
    DecompressionFailed(TINFLStatus),

    #[error("image data is {actual} bytes, expected at least {expected}")]
    TruncatedImageData { expected: usize, actual: usize },

    #[error("{} chunk CRC mismatch: stored {expected:#010x}, computed {actual:#010x}", type_name(.chunk_type))]
    IncorrectChunkCrc { chunk_type: [u8; 4], expected: u32, actual: u32 },

    // The width/height specified in the image contains too many
    // bytes to address with a usize on this platform.
    #[error("image dimensions overflow usize")]
    IntegerOverflow,
}

fn type_name(type_code: &[u8; 4]) -> &str {
    core::str::from_utf8(type_code).unwrap_or("<non-ascii>")
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ChunkType {
    ImageHeader,
    Palette,
    Transparency,
    Background,
    Srgb,
    ImageData,
    ImageEnd,
    Gamma,
    Unknown([u8; 4]),
}

impl ChunkType {
    fn from_bytes(bytes: &[u8; 4]) -> Self {
        match bytes {
            b"IHDR" => ChunkType::ImageHeader,
            b"PLTE" => ChunkType::Palette,
            b"tRNS" => ChunkType::Transparency,
            b"bKGD" => ChunkType::Background,
            b"sRGB" => ChunkType::Srgb,
            b"IDAT" => ChunkType::ImageData,
            b"IEND" => ChunkType::ImageEnd,
            b"gAMA" => ChunkType::Gamma,
            unknown_chunk_type => ChunkType::Unknown(*unknown_chunk_type),
        }
    }
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}

/// Forward-only reader over a borrowed byte buffer.
///
/// Reads either return exactly the requested number of bytes or fail
/// without moving the position.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub fn advance(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(DecodeError::UnexpectedEndOfInput { needed: n, remaining });
        }

        let start = self.position;
        self.position += n;
        Ok(&self.bytes[start..self.position])
    }

    fn read_u32(&mut self) -> Result<u32, DecodeError> {
        self.advance(4).map(|bytes| read_u32(bytes, 0))
    }

    fn read_type_code(&mut self) -> Result<[u8; 4], DecodeError> {
        let bytes = self.advance(4)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

/// One length-prefixed record of the chunk stream. The payload borrows
/// from the buffer being decoded.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Chunk<'a> {
    type_code: [u8; 4],
    data: &'a [u8],
    crc: u32,
}

impl<'a> Chunk<'a> {
    pub fn type_code(&self) -> [u8; 4] {
        self.type_code
    }

    pub fn chunk_type(&self) -> ChunkType {
        ChunkType::from_bytes(&self.type_code)
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn crc(&self) -> u32 {
        self.crc
    }

    /// Critical chunks have an upper-case first letter in their type code.
    pub fn is_critical(&self) -> bool {
        self.type_code[0].is_ascii_uppercase()
    }

    pub fn byte_size(&self) -> usize {
        CHUNK_OVERHEAD + self.data.len()
    }

    /// CRC-32 over the type code and payload, as stored in a well-formed chunk.
    pub fn computed_crc(&self) -> u32 {
        let mut hasher = Hasher::new();
        hasher.update(&self.type_code);
        hasher.update(self.data);
        hasher.finalize()
    }

    pub fn crc_matches(&self) -> bool {
        self.computed_crc() == self.crc
    }
}

/// Pulls chunks off a PNG byte stream, in stream order.
///
/// The `IEND` chunk is returned once; after it (or after any error) the
/// reader is exhausted.
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    cursor: ByteCursor<'a>,
    finished: bool,
}

impl<'a> ChunkReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        if !bytes.starts_with(PNG_MAGIC_BYTES) {
            return Err(DecodeError::NotRecognizedFormat);
        }

        let mut cursor = ByteCursor::new(bytes);
        cursor.advance(PNG_MAGIC_BYTES.len())?;

        Ok(Self { cursor, finished: false })
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Bytes left after the last chunk read.
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    pub fn next_chunk(&mut self) -> Result<Option<Chunk<'a>>, DecodeError> {
        if self.finished {
            return Ok(None);
        }

        let result = self.read_chunk();
        match &result {
            Ok(chunk) if chunk.chunk_type() == ChunkType::ImageEnd => self.finished = true,
            Ok(_) => {},
            Err(_) => self.finished = true,
        }

        result.map(Some)
    }

    fn read_chunk(&mut self) -> Result<Chunk<'a>, DecodeError> {
        let length = usize::try_from(self.cursor.read_u32()?)
            .map_err(|_| DecodeError::IntegerOverflow)?;
        let type_code = self.cursor.read_type_code()?;

        let remaining = self.cursor.remaining();
        if length.checked_add(4).map_or(true, |needed| needed > remaining) {
            return Err(DecodeError::TruncatedChunk {
                chunk_type: type_code,
                declared: length,
                remaining,
            });
        }

        let data = self.cursor.advance(length)?;
        let crc = self.cursor.read_u32()?;

        trace!("read {} chunk, {} bytes", type_name(&type_code), length);

        Ok(Chunk { type_code, data, crc })
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = Result<Chunk<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_chunk().transpose()
    }
}

impl<'a> core::iter::FusedIterator for ChunkReader<'a> {}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_model: u8,
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: u8,
}

impl ImageHeader {
    /// Decodes the fixed big-endian IHDR layout. Field values are not checked.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < HEADER_LEN {
            return Err(DecodeError::MalformedHeader { len: data.len() });
        }

        Ok(ImageHeader {
            width: read_u32(data, 0),
            height: read_u32(data, 4),
            bit_depth: data[8],
            color_model: data[9],
            compression_method: data[10],
            filter_method: data[11],
            interlace_method: data[12],
        })
    }

    pub fn color_type(&self) -> Option<ColorType> {
        ColorType::try_from(self.color_model).ok()
    }

    /// Rejects every parameter combination other than non-interlaced,
    /// deflate-compressed, 8-bit RGBA.
    pub fn validate(&self) -> Result<(), DecodeError> {
        match self.color_type() {
            Some(ColorType::RgbAlpha) => {},
            _ => return Err(DecodeError::UnsupportedColorModel(self.color_model)),
        }

        BitDepth::try_from(self.bit_depth)
            .map_err(|_| DecodeError::UnsupportedBitDepth(self.bit_depth))?;
        CompressionMethod::try_from(self.compression_method)
            .map_err(|_| DecodeError::UnsupportedCompression(self.compression_method))?;
        InterlaceMethod::try_from(self.interlace_method)
            .map_err(|_| DecodeError::UnsupportedInterlace(self.interlace_method))?;

        Ok(())
    }

    pub fn bytes_per_pixel(&self) -> Result<usize, DecodeError> {
        let color_type =
            self.color_type().ok_or(DecodeError::UnsupportedColorModel(self.color_model))?;

        Ok(color_type.sample_multiplier() * self.bit_depth as usize / 8)
    }

    /// Size of one row in the inflated stream, filter type byte included.
    pub fn scanline_stride(&self) -> Result<usize, DecodeError> {
        let width = usize::try_from(self.width).map_err(|_| DecodeError::IntegerOverflow)?;

        width
            .checked_mul(self.bytes_per_pixel()?)
            .and_then(|bytes| bytes.checked_add(1))
            .ok_or(DecodeError::IntegerOverflow)
    }

    /// Validates the header and derives the scanline geometry from it.
    pub fn layout(&self) -> Result<ScanlineLayout, DecodeError> {
        self.validate()?;

        Ok(ScanlineLayout {
            height: usize::try_from(self.height).map_err(|_| DecodeError::IntegerOverflow)?,
            scanline_stride: self.scanline_stride()?,
            bytes_per_pixel: self.bytes_per_pixel()?,
        })
    }
}

/// Row geometry of a validated header. Only obtainable through
/// [`ImageHeader::layout`], so `bytes_per_pixel` always covers the
/// three output channels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScanlineLayout {
    height: usize,
    scanline_stride: usize,
    bytes_per_pixel: usize,
}

impl ScanlineLayout {
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn scanline_stride(&self) -> usize {
        self.scanline_stride
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    fn bytes_per_scanline(&self) -> usize {
        self.scanline_stride - 1
    }

    fn width(&self) -> usize {
        self.bytes_per_scanline() / self.bytes_per_pixel
    }
}

/// Collects the compressed image stream from critical `IDAT` chunks.
#[derive(Debug, Default)]
struct PayloadAccumulator {
    compressed: Vec<u8>,
    chunk_count: usize,
}

impl PayloadAccumulator {
    fn push(&mut self, chunk: &Chunk) {
        if chunk.is_critical() && chunk.chunk_type() == ChunkType::ImageData {
            self.compressed.extend_from_slice(chunk.data());
            self.chunk_count += 1;
        }
    }

    fn into_inner(self) -> Vec<u8> {
        self.compressed
    }
}

/// Turns a zlib stream into raw bytes.
pub trait Inflate {
    fn inflate(&self, compressed: &[u8]) -> Result<Vec<u8>, TINFLStatus>;
}

/// The default [`Inflate`] implementation, backed by `miniz_oxide`.
#[derive(Debug, Default, Copy, Clone)]
pub struct ZlibInflater;

impl Inflate for ZlibInflater {
    fn inflate(&self, compressed: &[u8]) -> Result<Vec<u8>, TINFLStatus> {
        miniz_oxide::inflate::decompress_to_vec_zlib(compressed)
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Check every chunk's CRC-32 and fail on mismatch. Off by default.
    pub verify_checksums: bool,
}

/// Decoded image: `height` rows of `width * 3` bytes each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn row_len(&self) -> usize {
        self.width as usize * OUTPUT_CHANNELS
    }

    pub fn row(&self, y: usize) -> Option<&[u8]> {
        let row_len = self.row_len();
        if y >= self.height as usize {
            return None;
        }

        let start = y.checked_mul(row_len)?;
        self.pixels.get(start..start.checked_add(row_len)?)
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        let row_len = self.row_len();
        (0..self.height as usize).map(move |y| &self.pixels[y * row_len..(y + 1) * row_len])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }
}

fn defilter(
    filter_type: FilterType,
    bytes_per_pixel: usize,
    current_scanline: &mut [u8],
    last_scanline: &[u8],
) {
    match filter_type {
        FilterType::None => {},
        FilterType::Sub => {
            unpredict(bytes_per_pixel, current_scanline, last_scanline, |left, _, _| left)
        },
        FilterType::Up => {
            for (current, above) in current_scanline.iter_mut().zip(last_scanline) {
                *current = current.wrapping_add(*above);
            }
        },
        FilterType::Average => {
            unpredict(bytes_per_pixel, current_scanline, last_scanline, |left, up, _| {
                ((left as u16 + up as u16) / 2) as u8
            })
        },
        FilterType::Paeth => {
            unpredict(bytes_per_pixel, current_scanline, last_scanline, |left, up, upper_left| {
                paeth_predictor(left as i16, up as i16, upper_left as i16)
            })
        },
    }
}

// Adds `predict(left, up, upper_left)` to every byte of the row, left to right.
// Neighbors sit at the same channel offset one pixel over and are 0 past the
// left edge; `left` is always an already reconstructed byte.
#[inline(always)]
fn unpredict(
    bytes_per_pixel: usize,
    current_scanline: &mut [u8],
    last_scanline: &[u8],
    predict: impl Fn(u8, u8, u8) -> u8,
) {
    for x in 0..current_scanline.len() {
        let (left, upper_left) = match x.checked_sub(bytes_per_pixel) {
            Some(left_x) => (current_scanline[left_x], last_scanline[left_x]),
            None => (0, 0),
        };

        let predictor = predict(left, last_scanline[x], upper_left);
        current_scanline[x] = current_scanline[x].wrapping_add(predictor);
    }
}

#[inline(always)]
fn paeth_predictor(left: i16, up: i16, upper_left: i16) -> u8 {
    let p = left + up - upper_left;
    let pa = (p - left).abs();
    let pb = (p - up).abs();
    let pc = (p - upper_left).abs();

    let first = pa <= pb && pa <= pc;
    let first_bitmask = first as u8 * 255u8;

    let second = !first && pb <= pc;
    let second_bitmask = second as u8 * 255u8;

    let third = !first && !second;
    let third_bitmask = third as u8 * 255u8;

    (first_bitmask & left as u8) | (second_bitmask & up as u8) | (third_bitmask & upper_left as u8)
}

/// Reverses the scanline filters of an inflated image stream and returns
/// the RGB rows, concatenated top to bottom.
///
/// Each row is reconstructed against the already reconstructed row above
/// it. Bytes past `height * scanline_stride` are ignored.
pub fn defilter_scanlines(
    scanline_data: &[u8],
    layout: ScanlineLayout,
) -> Result<Vec<u8>, DecodeError> {
    if layout.height == 0 {
        return Ok(Vec::new());
    }

    let expected = layout
        .height
        .checked_mul(layout.scanline_stride)
        .ok_or(DecodeError::IntegerOverflow)?;
    if scanline_data.len() < expected {
        return Err(DecodeError::TruncatedImageData { expected, actual: scanline_data.len() });
    }

    let bytes_per_pixel = layout.bytes_per_pixel;
    let bytes_per_scanline = layout.bytes_per_scanline();
    let output_row_len = layout.width() * OUTPUT_CHANNELS;

    let mut output = Vec::with_capacity(output_row_len * layout.height);

    // Two row buffers: the row being reconstructed and the finished row above it.
    let mut last_scanline = vec![0u8; bytes_per_scanline];
    let mut current_scanline = vec![0u8; bytes_per_scanline];

    let rows = scanline_data.chunks_exact(layout.scanline_stride).take(layout.height);

    for (y, filtered) in rows.enumerate() {
        let filter_tag = filtered[0];
        let filter_type = FilterType::try_from(filter_tag)
            .map_err(|_| DecodeError::UnsupportedFilterMethod(filter_tag))?;

        trace!("row {}: {:?} filter", y, filter_type);

        current_scanline.copy_from_slice(&filtered[1..]);
        defilter(filter_type, bytes_per_pixel, &mut current_scanline, &last_scanline);

        for pixel in current_scanline.chunks_exact(bytes_per_pixel) {
            output.extend_from_slice(&pixel[..OUTPUT_CHANNELS]);
        }

        core::mem::swap(&mut last_scanline, &mut current_scanline);
    }

    Ok(output)
}

enum DecodeState {
    AwaitingHeader,
    AccumulatingData(ImageHeader),
    Done(ImageHeader),
}

fn check_crc(chunk: &Chunk, options: &DecodeOptions) -> Result<(), DecodeError> {
    if options.verify_checksums && !chunk.crc_matches() {
        return Err(DecodeError::IncorrectChunkCrc {
            chunk_type: chunk.type_code(),
            expected: chunk.crc(),
            actual: chunk.computed_crc(),
        });
    }

    Ok(())
}

fn parse_header(chunk: &Chunk) -> Result<ImageHeader, DecodeError> {
    if chunk.chunk_type() != ChunkType::ImageHeader {
        return Err(DecodeError::HeaderChunkNotFirst(chunk.type_code()));
    }

    let header = ImageHeader::from_bytes(chunk.data())?;
    header.validate()?;

    debug!(
        "IHDR: {}x{}, bit depth {}, color type {}",
        header.width, header.height, header.bit_depth, header.color_model
    );

    Ok(header)
}

fn read_chunks(
    reader: &mut ChunkReader,
    options: &DecodeOptions,
) -> Result<(ImageHeader, Vec<u8>), DecodeError> {
    let mut state = DecodeState::AwaitingHeader;
    let mut payload = PayloadAccumulator::default();
    let mut chunk_count = 0usize;

    while let Some(chunk) = reader.next_chunk()? {
        chunk_count += 1;
        check_crc(&chunk, options)?;

        if !chunk.is_critical() {
            continue;
        }

        state = match state {
            DecodeState::AwaitingHeader => DecodeState::AccumulatingData(parse_header(&chunk)?),
            DecodeState::AccumulatingData(header) => match chunk.chunk_type() {
                ChunkType::ImageData => {
                    payload.push(&chunk);
                    DecodeState::AccumulatingData(header)
                },
                ChunkType::ImageEnd => DecodeState::Done(header),
                ChunkType::ImageHeader => {
                    warn!("ignoring repeated IHDR chunk");
                    DecodeState::AccumulatingData(header)
                },
                _ => DecodeState::AccumulatingData(header),
            },
            DecodeState::Done(header) => DecodeState::Done(header),
        };

        if let DecodeState::Done(_) = state {
            break;
        }
    }

    match state {
        DecodeState::Done(header) => {
            debug!(
                "IEND after {} chunks, {} IDAT chunks with {} compressed bytes",
                chunk_count,
                payload.chunk_count,
                payload.compressed.len()
            );

            if reader.remaining() > 0 {
                warn!("ignoring {} bytes after IEND", reader.remaining());
            }

            Ok((header, payload.into_inner()))
        },
        // The reader only runs dry after IEND, which always ends in `Done`.
        _ => Err(DecodeError::UnexpectedEndOfInput {
            needed: CHUNK_OVERHEAD,
            remaining: reader.remaining(),
        }),
    }
}

/// Reads chunks up to and including the first critical one, which must be
/// a supported IHDR.
pub fn decode_header(bytes: &[u8]) -> Result<ImageHeader, DecodeError> {
    let mut reader = ChunkReader::new(bytes)?;

    while let Some(chunk) = reader.next_chunk()? {
        if chunk.is_critical() {
            return parse_header(&chunk);
        }
    }

    Err(DecodeError::UnexpectedEndOfInput {
        needed: CHUNK_OVERHEAD,
        remaining: reader.remaining(),
    })
}

pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    decode_with(bytes, &DecodeOptions::default(), &ZlibInflater)
}

pub fn decode_with<I: Inflate + ?Sized>(
    bytes: &[u8],
    options: &DecodeOptions,
    inflater: &I,
) -> Result<PixelBuffer, DecodeError> {
    let mut reader = ChunkReader::new(bytes)?;
    let (header, compressed_data) = read_chunks(&mut reader, options)?;
    let layout = header.layout()?;

    let scanline_data =
        inflater.inflate(&compressed_data).map_err(DecodeError::DecompressionFailed)?;

    debug!("inflated {} bytes into {}", compressed_data.len(), scanline_data.len());

    let pixels = defilter_scanlines(&scanline_data, layout)?;

    Ok(PixelBuffer { width: header.width, height: header.height, pixels })
}
