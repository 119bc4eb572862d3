//! I/O utilities for TIFF byte streams
//!
//! This module provides the byte order strategies and the random-access
//! byte source contract the reader and writers operate on.

pub mod seekable;
pub mod byte_order;
pub mod byte_source;

pub use byte_order::ByteOrder;
pub use byte_source::{ByteSource, ByteSourceArray, ByteSourceFile};
