#![forbid(unsafe_code)]

//! Keyboard-driven tag editing for a host text widget.
//!
//! The host implements [`TextSurface`] and [`ChoiceSurface`], starts a
//! [`Session`] once, and forwards key presses to [`Session::handle_key`].
//!
//! # Example
//! ```
//! use tagkit_fonts::{Catalog, KeyOptions};
//! use tagkit_session::testing::MemoryHost;
//! use tagkit_session::{KeyCode, KeyEvent, Modifiers, Session, SessionConfig};
//!
//! let catalog = Catalog::from_names(["Arial", "Meiryo"], KeyOptions::default());
//! let session = Session::with_catalog(catalog, SessionConfig::default());
//!
//! let mut host = MemoryHost::new("Hi <#ff0000>there").with_caret(5);
//! let key = KeyEvent::new(KeyCode::Down).with_modifiers(Modifiers::ALT);
//! assert!(session.handle_key(&mut host, key));
//! assert_eq!(host.text, "Hi <#fe0000>there");
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod menu;
pub mod session;
pub mod surface;
pub mod testing;

pub use config::{DEFAULT_TEMPLATE_FONT, SessionConfig};
pub use error::{Result, SessionError};
pub use event::{KeyCode, KeyEvent, Modifiers};
pub use logging::LOG_ENV;
#[cfg(feature = "subscriber")]
pub use logging::init_logging;
pub use menu::{TagTemplate, insert_menu};
pub use session::Session;
pub use surface::{ChoiceSurface, SurfaceError, TextSurface};
