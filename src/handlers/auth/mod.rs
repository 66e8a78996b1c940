// handlers/auth/mod.rs - credential endpoints
//
// POST /api/auth/register - create an account with a bcrypt-hashed password
// POST /api/auth/login     - check email, role and password

pub mod login;
pub mod register;

pub use login::login;
pub use register::register;
