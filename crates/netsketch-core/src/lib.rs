//! Netsketch Core Types and Definitions
//!
//! This crate provides the foundational drawing types used to render layer
//! diagrams. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Palettes**: Named four-color themes ([`palette::Palette`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: The recording [`draw::Canvas`] and its primitives ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod palette;
