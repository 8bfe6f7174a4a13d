//! Demo article routes over a fixed in-memory fixture.

use std::convert::Infallible;

use oxide_edge_router::{Request, Result, Router};
use serde::Serialize;

/// A published article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Article {
    pub slug: &'static str,
    pub title: &'static str,
    pub author: &'static str,
}

pub const ARTICLES: &[Article] = &[
    Article {
        slug: "routing-at-the-edge",
        title: "Routing at the edge",
        author: "ada",
    },
    Article {
        slug: "cors-preflight-explained",
        title: "CORS preflight explained",
        author: "grace",
    },
    Article {
        slug: "first-match-wins",
        title: "First match wins",
        author: "ada",
    },
];

/// Registers the article routes.
///
/// `.*/articles` is tried first but covers only paths ending in
/// `/articles`, so `/v1/articles/getBySlug` still reaches its own route.
pub fn register(router: Router) -> Result<Router> {
    router
        .get(".*/articles", list)?
        .get(".*/countArticles", count)?
        .get(".*/articles/getBySlug", by_slug)
}

async fn list(_req: Request) -> std::result::Result<&'static [Article], Infallible> {
    Ok(ARTICLES)
}

async fn count(_req: Request) -> std::result::Result<usize, Infallible> {
    Ok(ARTICLES.len())
}

async fn by_slug(req: Request) -> std::result::Result<Option<Article>, Infallible> {
    let slug = req.get_query("slug");
    Ok(ARTICLES
        .iter()
        .find(|article| slug.as_deref() == Some(article.slug))
        .copied())
}
