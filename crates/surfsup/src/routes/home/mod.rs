pub mod index;

pub use index::{
    index_handler, method_not_allowed_handler, not_found_handler, RouteListing, AVAILABLE_ROUTES,
};
