//! # pixveil core
//!
//! Hides a file inside an image or a sequence of video frames and recovers it byte for byte.
//!
//! - [`api::hide`] writes a file into a carrier
//! - [`api::unveil`] reads it back, algorithm and edge mode are taken from the carrier
//! - [`api::capacity`] tells how many bytes a carrier takes
//!
//! Underneath, [`StegoEngine`] writes a small [`Header`] into the first pixels and then the
//! file name and content through either least significant bit substitution or pixel value
//! differencing, optionally restricted to the edges found by a Sobel or Canny detector.
//!
//! # Usage Examples
//!
//! ## Hide a file inside an image and unveil it again
//!
//! ```rust
//! use image::{Rgb, RgbImage};
//! use pixveil_core::{Algorithm, CodecOptions, EdgeMode};
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let carrier = temp_dir.path().join("carrier.png");
//! RgbImage::from_fn(128, 128, |x, y| Rgb([x as u8, y as u8, (x ^ y) as u8]))
//!     .save(&carrier)
//!     .expect("Failed to write carrier");
//! let secret = temp_dir.path().join("secret.txt");
//! std::fs::write(&secret, "Hello, World!").expect("Failed to write secret");
//!
//! pixveil_core::api::hide::prepare()
//!     .with_file(&secret)
//!     .with_image(&carrier)
//!     .with_options(CodecOptions::new(Algorithm::Pvd, EdgeMode::None))
//!     .with_output(temp_dir.path().join("image-with-a-file-inside.png"))
//!     .execute()
//!     .expect("Failed to hide file in image");
//!
//! let unveiled = pixveil_core::api::unveil::prepare()
//!     .from_secret_file(temp_dir.path().join("image-with-a-file-inside.png"))
//!     .into_output_folder(temp_dir.path().join("unveiled"))
//!     .execute()
//!     .expect("Failed to unveil file from image");
//!
//! assert_eq!(std::fs::read_to_string(unveiled).unwrap(), "Hello, World!");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
mod bits;
pub mod codec;
pub mod commands;
pub mod cursor;
pub mod edge;
pub mod engine;
pub mod error;
pub mod header;
pub mod media;
pub mod result;

pub use crate::bits::{BitSink, BitSource};
pub use crate::cursor::Cursor;
pub use crate::edge::{EdgeDetector, EdgeMask};
pub use crate::engine::{StegoEngine, Unveiled};
pub use crate::error::{StegoError, StegoStatus};
pub use crate::header::{Header, HeaderCodec};
pub use crate::media::{Algorithm, CodecOptions, EdgeMode, Frame, Media};
pub use crate::result::Result;
