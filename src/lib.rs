//! Editing core for sprite atlases: rectangular named regions drawn over a
//! sprite sheet, exported as JSON, XML, CSS or a Unity C# script.
//!
//! [`Session`] ties the pieces together and is what a GUI host drives. The
//! modules underneath are usable on their own.

pub mod atlas;
pub mod config;
pub mod crop;
pub mod error;
pub mod export;
pub mod geometry;
pub mod grid;
pub mod image_info;
pub mod input;
pub mod selection;
pub mod session;
pub mod view;

pub use atlas::{Atlas, SpriteRect};
pub use config::EditorConfig;
pub use error::{EditorError, EditorResult, Warning};
pub use export::{ExportFormat, ExportOptions};
pub use geometry::{CoordinateMapper, Point, Rect, Size};
pub use input::{Input, Key, PointerButton};
pub use session::{Change, Session};
