pub mod email_request;
