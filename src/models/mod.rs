mod article;

pub use article::{Article, Media, NewArticle, NewMedia};
