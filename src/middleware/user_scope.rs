// src/middleware/user_scope.rs

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

// Cabeçalho que identifica o usuário dono dos registros
const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Deserialize)]
struct UserIdQuery {
    user_id: Option<String>,
}

/// Filtro opcional de usuário. É só um filtro (não há autenticação por trás):
/// ausente, inválido ou não positivo vira `None`, que significa "todos".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserScope(pub Option<i64>);

fn positive_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

impl<S> FromRequestParts<S> for UserScope
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // 1. Cabeçalho X-User-ID
        let from_header = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(positive_id);

        if from_header.is_some() {
            return Ok(UserScope(from_header));
        }

        // 2. Parâmetro ?user_id= na query
        let from_query = Query::<UserIdQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.user_id)
            .as_deref()
            .and_then(positive_id);

        Ok(UserScope(from_query))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(request: Request<()>) -> UserScope {
        let (mut parts, _) = request.into_parts();
        match UserScope::from_request_parts(&mut parts, &()).await {
            Ok(scope) => scope,
            Err(never) => match never {},
        }
    }

    #[tokio::test]
    async fn header_wins_over_query() {
        let request = Request::builder()
            .uri("/finances/debt?user_id=9")
            .header("X-User-ID", "4")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await, UserScope(Some(4)));
    }

    #[tokio::test]
    async fn query_is_used_without_header() {
        let request = Request::builder()
            .uri("/finances/debt?user_id=9")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await, UserScope(Some(9)));
    }

    #[tokio::test]
    async fn missing_or_invalid_ids_mean_no_filter() {
        for uri in ["/finances/debt", "/finances/debt?user_id=abc", "/finances/debt?user_id=0"] {
            let request = Request::builder().uri(uri).body(()).unwrap();
            assert_eq!(extract(request).await, UserScope(None), "{uri}");
        }

        let negative = Request::builder()
            .uri("/finances/debt")
            .header("X-User-ID", "-3")
            .body(())
            .unwrap();
        assert_eq!(extract(negative).await, UserScope(None));
    }
}
