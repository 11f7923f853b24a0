//! Pixel ordering schemes
//!
//! Each [`Scheme`] is a total order over [`Pixel`] derived from a scalar key.
//! "Greater" means "dequeued earlier" from a max-heap.
//!
//! | Scheme          | Label | Key                                         |
//! |-----------------|-------|---------------------------------------------|
//! | Lexicographic   | `LEX` | `(R << 16) \| (G << 8) \| B`                  |
//! | EuclideanNorm   | `EUC` | `sqrt(R² + G² + B²)`                        |
//! | BitInterleave   | `BMX` | `r7 g7 b7 r6 g6 b6 ... r0 g0 b0` (24 bits)  |

mod keys;

pub use keys::{bit_interleave_key, euclidean_norm, lexicographic_key, squared_norm};

use crate::heap::Comparator;
use crate::pixel::{Pixel, PixelSample};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Scheme {
    #[serde(rename = "LEX")]
    Lexicographic,
    #[serde(rename = "EUC")]
    EuclideanNorm,
    #[serde(rename = "BMX")]
    BitInterleave,
}

impl Scheme {
    /// All schemes, in the order their queues are fed
    pub const ALL: [Scheme; 3] = [
        Scheme::Lexicographic,
        Scheme::EuclideanNorm,
        Scheme::BitInterleave,
    ];

    /// Stable short identifier used in reports
    pub const fn label(&self) -> &'static str {
        match self {
            Scheme::Lexicographic => "LEX",
            Scheme::EuclideanNorm => "EUC",
            Scheme::BitInterleave => "BMX",
        }
    }

    /// Position of this scheme in [`Scheme::ALL`]
    pub const fn index(&self) -> usize {
        match self {
            Scheme::Lexicographic => 0,
            Scheme::EuclideanNorm => 1,
            Scheme::BitInterleave => 2,
        }
    }

    pub fn compare_pixels(&self, a: &Pixel, b: &Pixel) -> Ordering {
        match self {
            Scheme::Lexicographic => lexicographic_key(a).cmp(&lexicographic_key(b)),
            // sqrt is monotonic, so squared norms order identically
            Scheme::EuclideanNorm => squared_norm(a).cmp(&squared_norm(b)),
            Scheme::BitInterleave => bit_interleave_key(a).cmp(&bit_interleave_key(b)),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Comparator<Pixel> for Scheme {
    fn compare(&self, a: &Pixel, b: &Pixel) -> Ordering {
        self.compare_pixels(a, b)
    }
}

impl Comparator<PixelSample> for Scheme {
    fn compare(&self, a: &PixelSample, b: &PixelSample) -> Ordering {
        self.compare_pixels(&a.pixel, &b.pixel)
    }
}
