//! Loader for MNIST-style IDX file pairs.
//!
//! # IDX3 image file layout
//! ```text
//! bytes  0-3:   0x00000803  (magic, big-endian)
//! bytes  4-7:   N           (number of images, big-endian u32)
//! bytes  8-11:  rows        (image height in pixels, big-endian u32)
//! bytes 12-15:  cols        (image width in pixels, big-endian u32)
//! bytes 16..:   N * rows * cols bytes, row-major, uint8
//! ```
//!
//! # IDX1 label file layout
//! ```text
//! bytes  0-3:   0x00000801  (magic, big-endian)
//! bytes  4-7:   N           (number of labels, big-endian u32)
//! bytes  8..:   N bytes, each a class index in [0, 10)
//! ```

use std::fs;
use std::path::Path;

use log::info;

use crate::data::example::LabeledExample;
use crate::error::{Error, Result};

pub const IMAGE_MAGIC: u32 = 0x0000_0803;
pub const LABEL_MAGIC: u32 = 0x0000_0801;
pub const NUM_CLASSES: usize = 10;

const TRAIN_IMAGES: &str = "train-images-idx3-ubyte";
const TRAIN_LABELS: &str = "train-labels-idx1-ubyte";
const TEST_IMAGES: &str = "t10k-images-idx3-ubyte";
const TEST_LABELS: &str = "t10k-labels-idx1-ubyte";

/// Which half of the dataset to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    fn file_names(self) -> (&'static str, &'static str) {
        match self {
            Split::Train => (TRAIN_IMAGES, TRAIN_LABELS),
            Split::Test => (TEST_IMAGES, TEST_LABELS),
        }
    }
}

/// Reads the image/label pair for `split` from `dir`.
pub fn load(split: Split, dir: &Path) -> Result<Vec<LabeledExample>> {
    let (image_name, label_name) = split.file_names();
    let image_bytes = read_file(&dir.join(image_name))?;
    let label_bytes = read_file(&dir.join(label_name))?;

    let examples = parse_idx_pair(&image_bytes, &label_bytes)?;
    info!("Loaded {} {:?} examples from {}", examples.len(), split, dir.display());
    Ok(examples)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::DatasetIo { path: path.to_path_buf(), source })
}

/// Parses raw IDX image and label bytes into labelled examples with
/// normalised pixel inputs and one-hot targets of length 10.
pub fn parse_idx_pair(image_bytes: &[u8], label_bytes: &[u8]) -> Result<Vec<LabeledExample>> {
    // ── Image header ────────────────────────────────────────────────────────

    if image_bytes.len() < 16 {
        return Err(Error::DatasetFormat(format!(
            "image file too short: expected at least 16 header bytes, got {}",
            image_bytes.len()
        )));
    }
    let magic = be_u32(image_bytes, 0);
    if magic != IMAGE_MAGIC {
        return Err(Error::DatasetFormat(format!(
            "image file magic number mismatch (got {:#010x})", magic
        )));
    }
    let n_images = be_u32(image_bytes, 4) as usize;
    let rows = be_u32(image_bytes, 8) as usize;
    let cols = be_u32(image_bytes, 12) as usize;

    let n_pixels = rows.checked_mul(cols).ok_or_else(|| {
        Error::DatasetFormat(format!("rows * cols overflows (rows={}, cols={})", rows, cols))
    })?;
    if n_pixels == 0 {
        return Err(Error::DatasetFormat(format!("images have no pixels ({}x{})", rows, cols)));
    }
    let image_len = n_images
        .checked_mul(n_pixels)
        .and_then(|n| n.checked_add(16))
        .ok_or_else(|| Error::DatasetFormat("image data length overflows".to_owned()))?;
    if image_bytes.len() < image_len {
        return Err(Error::DatasetFormat(format!(
            "image file truncated: header declares {} images of {}x{} pixels, file is only {} bytes",
            n_images, rows, cols, image_bytes.len()
        )));
    }

    // ── Label header ────────────────────────────────────────────────────────

    if label_bytes.len() < 8 {
        return Err(Error::DatasetFormat(format!(
            "label file too short: expected at least 8 header bytes, got {}",
            label_bytes.len()
        )));
    }
    let magic = be_u32(label_bytes, 0);
    if magic != LABEL_MAGIC {
        return Err(Error::DatasetFormat(format!(
            "label file magic number mismatch (got {:#010x})", magic
        )));
    }
    let n_labels = be_u32(label_bytes, 4) as usize;
    if label_bytes.len() < 8 + n_labels {
        return Err(Error::DatasetFormat(format!(
            "label file truncated: header declares {} labels, file is only {} bytes",
            n_labels, label_bytes.len()
        )));
    }

    if n_images != n_labels {
        return Err(Error::DatasetMismatch { images: n_images, labels: n_labels });
    }

    // ── Examples ────────────────────────────────────────────────────────────

    let pixels = &image_bytes[16..image_len];
    let labels = &label_bytes[8..8 + n_labels];

    let mut examples = Vec::with_capacity(n_images);
    for (i, (image, &label)) in pixels.chunks_exact(n_pixels).zip(labels).enumerate() {
        let class = label as usize;
        if class >= NUM_CLASSES {
            return Err(Error::DatasetFormat(format!(
                "label {} at index {} is out of range for {} classes", class, i, NUM_CLASSES
            )));
        }
        let mut target = vec![0.0; NUM_CLASSES];
        target[class] = 1.0;
        examples.push(LabeledExample::new(
            image.iter().map(|&px| pixel_weight(px)).collect(),
            target,
        ));
    }
    Ok(examples)
}

/// Maps an intensity in [0, 255] into [0.1, 1.0). The exact value 1.0 is
/// pulled down to 0.999 so no input sits at full saturation.
pub fn pixel_weight(px: u8) -> f64 {
    let w = px as f64 / 255.0 * 0.9 + 0.1;
    if w == 1.0 {
        0.999
    } else {
        w
    }
}

fn be_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}
