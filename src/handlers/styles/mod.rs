pub mod collection;
pub mod record;

// Re-export handler functions for use in routing
pub use collection::get as styles_get;
pub use collection::post as styles_post;

pub use record::get as style_get;
pub use record::put as style_put;
pub use record::patch as style_patch;
pub use record::delete as style_delete;
