//! Histogram builder: decode an image and fold its RGB samples into one depth-quantized histogram.

use image::{DynamicImage, GenericImageView, ImageBuffer, ImageReader, Rgba};
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek};
use std::path::Path;

use crate::Histogram;
use crate::errors::{HistogramError, HistogramResult};
use crate::utils::config::{DecodeConsts, SearchDefaults};

/// Decoded pixel grid with 16-bit RGBA samples.
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Anything that can hand out its pixels as `[r, g, b, a]`, each channel in `0..=65535`.
pub trait PixelSource {
    fn dimensions(&self) -> (u32, u32);

    /// Visit every pixel once, row-major.
    fn for_each_rgba16<F: FnMut([u16; 4])>(&self, f: F);
}

impl PixelSource for Rgba16Image {
    fn dimensions(&self) -> (u32, u32) {
        ImageBuffer::dimensions(self)
    }

    fn for_each_rgba16<F: FnMut([u16; 4])>(&self, mut f: F) {
        for px in self.pixels() {
            f(px.0);
        }
    }
}

impl PixelSource for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn for_each_rgba16<F: FnMut([u16; 4])>(&self, f: F) {
        match self {
            DynamicImage::ImageRgba16(buf) => buf.for_each_rgba16(f),
            other => other.to_rgba16().for_each_rgba16(f),
        }
    }
}

/// Map a 16-bit channel sample to its bin, clamped to `depth`.
#[inline]
pub fn quantize(sample: u16, depth: usize) -> usize {
    ((sample >> SearchDefaults::QUANTIZE_SHIFT) as usize).min(depth)
}

/// Build the histogram of `src`. Red, green and blue share one set of `depth + 1` bins; alpha is ignored.
pub fn histogram_from_pixels<P: PixelSource>(name: &Path, src: &P, depth: usize) -> Histogram {
    let mut bins = vec![0_u64; depth + 1];
    src.for_each_rgba16(|[r, g, b, _]| {
        bins[quantize(r, depth)] += 1;
        bins[quantize(g, depth)] += 1;
        bins[quantize(b, depth)] += 1;
    });
    Histogram {
        name: name.to_path_buf(),
        bins,
    }
}

fn decode_from<R: BufRead + Seek>(reader: R, path: &Path) -> HistogramResult<DynamicImage> {
    ImageReader::new(reader)
        .with_guessed_format()
        .map_err(|e| HistogramError::decode(path, e))?
        .decode()
        .map_err(|e| HistogramError::decode(path, e))
}

/// Open and decode `path`. The format is sniffed from the file contents.
/// Files above [`DecodeConsts::MMAP_THRESHOLD`] are read through a memory map.
pub fn decode_image(path: &Path) -> HistogramResult<DynamicImage> {
    let open_failed = |source| HistogramError::OpenFailed {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(open_failed)?;
    let size = file.metadata().map_err(open_failed)?.len();

    if size > DecodeConsts::MMAP_THRESHOLD {
        let mmap = unsafe { Mmap::map(&file) }.map_err(open_failed)?;
        decode_from(Cursor::new(&mmap[..]), path)
    } else {
        let reader = BufReader::with_capacity(DecodeConsts::READ_BUFFER_SIZE, file);
        decode_from(reader, path)
    }
}

/// Decode `path` and build its histogram.
pub fn compute_histogram(path: &Path, depth: usize) -> HistogramResult<Histogram> {
    let img = decode_image(path)?;
    Ok(histogram_from_pixels(path, &img, depth))
}
