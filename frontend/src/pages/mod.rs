pub mod call_logs;
pub mod contact_groups;
pub mod contacts;
pub mod email_events;
pub mod home;
pub mod triggers;
