//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "validate and submit the form" or "react to a
//! live-reload signal".

pub mod live_reload;
pub mod registration_form;

pub use live_reload::LiveReload;
pub use registration_form::{
    DEFAULT_BANNER_HIDE_AFTER, RegistrationForm, RegistrationFormBuilder, SUCCESS_MESSAGE,
    SubmitOutcome,
};
