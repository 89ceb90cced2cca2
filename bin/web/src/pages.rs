//! Page components for the application.
//!
//! Each page is a Leptos component that renders a specific route. All
//! of them are mounted behind [`crate::guard::Guarded`], so a page can
//! assume its route requirement already holds when it renders.

pub mod admin_home;
pub mod login;
pub mod unauthorized;
pub mod user_home;

// Re-export all page components for convenient access
pub use admin_home::AdminHomePage;
pub use login::LoginPage;
pub use unauthorized::UnauthorizedPage;
pub use user_home::UserHomePage;
