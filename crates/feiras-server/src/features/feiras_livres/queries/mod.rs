pub mod get;
pub mod list;

pub use get::{GetFeiraLivreError, GetFeiraLivreQuery, GetFeiraLivreResponse};
pub use list::{ListFeirasLivresError, ListFeirasLivresQuery, ListFeirasLivresResponse};
