pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateFeiraLivreCommand, CreateFeiraLivreError, CreateFeiraLivreResponse};
pub use delete::{DeleteFeiraLivreCommand, DeleteFeiraLivreError, DeleteFeiraLivreResponse};
pub use update::{UpdateFeiraLivreCommand, UpdateFeiraLivreError, UpdateFeiraLivreResponse};
