//! Service layer for the voting server.
//!
//! This module contains the collaborators handlers orchestrate:
//! - Identity provider client (credentials, login, password reset)
//! - Random image selection

pub mod identity;
pub mod image_picker;

pub use identity::{IdentityClient, IdentityError};
pub use image_picker::ImagePicker;
