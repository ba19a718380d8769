//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who authored a chat message.
///
/// # Examples
///
/// ```
/// use sqlhelper_core::Role;
///
/// assert_ne!(Role::System, Role::User);
/// assert_eq!(format!("{}", Role::System), "System");
/// assert_eq!(Role::User.as_ref(), "user");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::AsRefStr,
)]
pub enum Role {
    /// System messages provide context and instructions
    #[strum(serialize = "system")]
    System,
    /// User messages are from the human
    #[strum(serialize = "user")]
    User,
    /// Assistant messages are from the model
    #[strum(serialize = "assistant")]
    Assistant,
}
