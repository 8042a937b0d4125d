pub mod serper;

pub use serper::{site_scoped_query, SerperClient, ALLOWED_SITES};

pub mod prelude {
    pub use super::serper::SerperClient;
    pub use dn_core::{Result, SearchProvider, SearchResult};
}
