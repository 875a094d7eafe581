pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use error::Error;
pub use models::RewriteModel;
pub use storage::ArticleStore;
pub use types::{Article, NewArticle, ReferenceArticle, UpdateArticle};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::storage::ArticleStore;
    pub use crate::types::{Article, NewArticle, ReferenceArticle, UpdateArticle};
    pub use crate::{Error, Result};
}
