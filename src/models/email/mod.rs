//! The email record in its stored, pending and wire forms.

pub mod api_email;
pub mod db_email;
pub mod email_status;
pub mod email_type;
pub mod new_email;
