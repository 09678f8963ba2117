//! API constants

/// Version segment of every versioned route
pub const API_VERSION: &str = "v0";

/// Prefix shared by all versioned routes
pub const API_PREFIX: &str = "/api/v0";

/// Subject line of workspace invitation emails
pub const INVITATION_SUBJECT: &str = "Zloom - Workspace Invitation";

/// Subject line of the email telling an author about their video's first viewer
pub const FIRST_VIEW_SUBJECT: &str = "Zloom - You've got a viewer";
