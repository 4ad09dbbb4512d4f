// handlers/mod.rs - HTTP handlers grouped by resource
//
// styles: /styles and /styles/:id (anon store handle, subject to RLS)
// users:  /users/:id profile admin (service-role store handle)
// system: / and /health (no store access)

pub mod styles;
pub mod system;
pub mod users;
