//! Single-image resize, auto-crop and format conversion.
//!
//! This crate provides:
//! - Auto-crop of a solid border, by alpha or by background color
//! - Color-keyed transparency when converting opaque images to PNG
//! - Background compositing when converting transparent images to JPEG
//! - Format detection, decoding and encoding
//! - Persisted form settings and derived form state
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use resizer_image::{
//!     compose, Color, OutputFormat, SourceKind, TransformOptions, TransformRequest,
//! };
//!
//! let mut source = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
//! source.put_pixel(5, 5, Rgba([0, 0, 0, 255]));
//!
//! let options = TransformOptions {
//!     auto_crop: true,
//!     format: OutputFormat::Png,
//!     background: Color::WHITE,
//!     ..TransformOptions::sized(4, 4)
//! };
//! let request = TransformRequest::new(&source, SourceKind::OpaqueLossy, &options).unwrap();
//! let result = compose(&request).unwrap();
//!
//! assert_eq!(result.image.dimensions(), (4, 4));
//! assert_eq!((result.crop.left, result.crop.top), (5, 5));
//! ```

#![warn(missing_docs)]

mod bounds;
mod codec;
mod color;
mod compositor;
mod error;
mod format;
mod metadata;
mod pipeline;
mod request;
mod transparency;
pub mod form;
pub mod settings;

#[cfg(feature = "wasm")]
mod wasm;

pub use bounds::{scan, Rect, ScanMode};
pub use codec::{decode, encode, DecodedImage};
pub use color::{matches, Color, ColorMatcher, DEFAULT_TOLERANCE};
pub use compositor::{compose, ComposeStats, TransformResult};
pub use error::{ImageError, ImageErrorCode, Result};
pub use format::{detect_format, ImageFormat, OutputFormat, SourceKind};
pub use metadata::ImageMetadata;
pub use pipeline::{process_image, ProcessedImage};
pub use request::{TransformOptions, TransformRequest, DEFAULT_QUALITY};
pub use settings::{FileStore, MemoryStore, PreferenceStore, Settings, SETTINGS_KEY};
pub use transparency::{make_color_transparent, rewrite};

pub use image::imageops::FilterType;
pub use image::RgbaImage;
