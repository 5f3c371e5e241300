pub mod admin_service;
pub mod api_client;
pub mod auth_service;
pub mod college_service;
pub mod course_service;
pub mod mark_service;
