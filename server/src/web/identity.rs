// stockroom/server/src/web/identity.rs

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use stockroom::Caller;
use tracing::debug;

use crate::errors::AppError;

pub const ROLE_HEADER: &str = "X-User-Role";

// --- Caller identity extractor ---
// Stand-in for real authentication middleware: the role arrives in a header set by an
// upstream identity service. A missing or unreadable header yields an anonymous caller,
// who may read but not write.
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub Caller);

impl CallerIdentity {
  pub fn into_inner(self) -> Caller {
    self.0
  }
}

impl FromRequest for CallerIdentity {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let caller = match req.headers().get(ROLE_HEADER).map(|v| v.to_str()) {
      Some(Ok(role)) if !role.is_empty() => Caller::with_role(role),
      Some(Err(_)) => {
        debug!("Unreadable {} header, treating caller as anonymous.", ROLE_HEADER);
        Caller::anonymous()
      }
      _ => Caller::anonymous(),
    };
    futures_util::future::ready(Ok(CallerIdentity(caller)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  async fn extract(req: TestRequest) -> Caller {
    let (req, mut payload) = req.to_http_parts();
    CallerIdentity::from_request(&req, &mut payload).await.unwrap().into_inner()
  }

  #[actix_web::test]
  async fn reads_the_role_header() {
    let caller = extract(TestRequest::default().insert_header((ROLE_HEADER, "admin"))).await;
    assert!(caller.is_admin());
  }

  #[actix_web::test]
  async fn missing_or_empty_header_is_anonymous() {
    assert_eq!(extract(TestRequest::default()).await, Caller::anonymous());
    assert_eq!(
      extract(TestRequest::default().insert_header((ROLE_HEADER, ""))).await,
      Caller::anonymous()
    );
  }
}
