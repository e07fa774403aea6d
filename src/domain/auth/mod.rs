pub mod sign_request;
pub mod verify_request;
