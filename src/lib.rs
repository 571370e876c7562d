//! checkout-button: vector-icon checkout buttons for storefront SDKs
//!
//! This crate turns a small SVG icon into a fixed-size bitmap and hands out
//! checkout buttons that display it and report activation to a
//! caller-supplied delegate.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use checkout_button::{ButtonFactory, CheckoutButton, CheckoutDelegate};
//!
//! struct Cart;
//!
//! impl CheckoutDelegate for Cart {
//!     fn checkout_selected(&self, _button: &CheckoutButton) {
//!         println!("checkout!");
//!     }
//! }
//!
//! let cart = Arc::new(Cart);
//! let factory = ButtonFactory::shared();
//!
//! // The first call renders the built-in icon; later calls reuse it.
//! let first = factory.checkout_button(Arc::downgrade(&cart)).unwrap();
//! let second = factory.checkout_button(Arc::downgrade(&cart)).unwrap();
//! assert!(Arc::ptr_eq(first.icon(), second.icon()));
//! ```
//!
//! # Rendering directly
//!
//! ```
//! use checkout_button::{rasterize, VectorDocument};
//!
//! let doc: VectorDocument = r##"<svg viewBox="0 0 24 24">
//!     <path d="M3 6h18l-2 10H5z" fill="#1a1f71"/>
//! </svg>"##.parse().unwrap();
//!
//! let icon = rasterize(&doc, 24.0, 24.0, 3.0).unwrap();
//! assert_eq!(icon.dimensions().width, 72);
//! ```

mod button;
mod error;
mod factory;
mod icon;
mod profile;
mod raster;
mod source;
mod vector;

pub use button::{CheckoutButton, CheckoutDelegate};
pub use error::{Error, ParseError, PathDataError, Result};
pub use factory::{ButtonFactory, IconCache, IconCacheKey, IconRequest};
pub use icon::{RasterImage, RectPx, SizePx};
pub use profile::{ButtonProfile, ButtonStyle};
pub use raster::rasterize;
pub use source::{BUILT_IN_ICON, IconSource};
pub use vector::{Color, FillRule, Paint, PathElement, Point, Segment, VectorDocument, ViewBox};
