//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout libraries and renders into a simple framebuffer that can be
//! flushed to a terminal backend.
//!
//! - [`fb`]: styled cell framebuffer and the [`Canvas`] drawing primitives
//! - [`game_view`]: board, next-piece preview, level, score, help and overlays
//! - [`renderer`]: crossterm backend with diff flushing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Canvas, Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, Blink, BoardLayout, GameView, Viewport, SCORE_DIGITS};
pub use renderer::{collect_spans, encode_frame, Span, TerminalRenderer};
