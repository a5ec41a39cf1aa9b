pub const PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

pub const SCHEMA: &str = r#"
-- articles table
CREATE TABLE IF NOT EXISTS articles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    body TEXT,
    publishedAt TEXT
);

-- medias table
CREATE TABLE IF NOT EXISTS medias (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    article_id INTEGER,
    contentUrl TEXT,
    contentType TEXT,
    FOREIGN KEY(article_id) REFERENCES articles(id)
);

CREATE INDEX IF NOT EXISTS idx_medias_article_id ON medias(article_id);
"#;
