pub mod dto;
pub mod rest;
pub mod state;

// Re-export the handlers to make them easily accessible to the binary that
// builds the web server router.
pub use rest::{
    build_notification_handler, get_access_handler, get_header_handler, health_handler,
    list_rooms_handler, list_suggestions_handler, put_snapshot_handler,
};
