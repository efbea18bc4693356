use async_trait::async_trait;
use log::{debug, error, trace};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Api, ApiError, Envelope, Page, Result};
use crate::auth::Credentials;
use crate::project::Project;
use crate::user::UserRecord;

/// `Api` over HTTP. No timeout is set: a request runs until it completes or fails.
pub struct HttpApi {
    client: Client,
    host: String,
}

#[derive(Serialize)]
struct EmailUpdate<'a> {
    email: &'a str,
}

impl HttpApi {
    pub fn new(host: &str) -> Self {
        Self {
            client: Client::new(),
            host: host.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    async fn send(&self, request: RequestBuilder, creds: &Credentials) -> Result<Response> {
        let response = request
            .header(AUTHORIZATION, creds.authorization())
            .send()
            .await
            .map_err(|e| {
                error!("{}: request failed: {e}", creds.user_id());
                ApiError::Transport(e.to_string())
            })?;

        let status = response.status();
        trace!("{}: {} -> {status}", creds.user_id(), response.url());

        if status.is_success() {
            Ok(response)
        } else {
            debug!("{}: {} rejected with {status}", creds.user_id(), response.url());
            Err(ApiError::Status(status))
        }
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str, creds: &Credentials) -> Result<T> {
        let response = self.send(self.client.get(self.url(path)), creds).await?;

        let Envelope { data } = response.json::<Envelope<T>>().await.map_err(|e| {
            error!("{}: couldn't decode {path}: {e}", creds.user_id());
            ApiError::Decode(e.to_string())
        })?;

        Ok(data)
    }
}

#[async_trait]
impl Api for HttpApi {
    async fn user(&self, creds: &Credentials) -> Result<UserRecord> {
        self.get_data(&format!("/users/{}", creds.user_id()), creds)
            .await
    }

    async fn projects(&self, creds: &Credentials) -> Result<Vec<Project>> {
        let Page { results } = self.get_data::<Page<Project>>("/projects/", creds).await?;
        Ok(results)
    }

    async fn update_email(&self, creds: &Credentials, email: &str) -> Result<()> {
        let request = self
            .client
            .put(self.url("/email/"))
            .json(&EmailUpdate { email });

        self.send(request, creds).await.map(|_| ())
    }
}

#[cfg(test)]
mod test {
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use reqwest::StatusCode;
    use serde_json::{json, Value};
    use warp::http::StatusCode as WarpStatus;
    use warp::{Filter, Reply};

    use super::*;

    const AUTH: &str = "JWT abc";

    fn creds(user_id: &str) -> Credentials {
        Credentials::new(user_id.into(), "abc".into())
    }

    fn reply(auth: &str, body: Value) -> warp::reply::Response {
        if auth != AUTH {
            return warp::reply::with_status(warp::reply(), WarpStatus::UNAUTHORIZED).into_response();
        }
        warp::reply::json(&body).into_response()
    }

    async fn serve(emails: Arc<Mutex<Vec<Value>>>) -> SocketAddr {
        let user = warp::path!("users" / String)
            .and(warp::get())
            .and(warp::header::<String>("authorization"))
            .map(|id: String, auth: String| match id.as_str() {
                "7" => reply(
                    &auth,
                    json!({"data": {"id": 7, "username": "ann", "mobile": null, "email": "a@b.cn"}}),
                ),
                "8" => reply(&auth, json!({"data": {"name": "missing fields"}})),
                _ => warp::reply::with_status(warp::reply(), WarpStatus::FORBIDDEN).into_response(),
            });

        let projects = warp::path("projects")
            .and(warp::get())
            .and(warp::header::<String>("authorization"))
            .map(|auth: String| {
                reply(
                    &auth,
                    json!({"data": {"count": 2, "next": null, "results": [
                        {"id": 2, "name": "ner"},
                        {"id": 1, "name": "sentiment", "project_type": "text_classification"},
                    ]}}),
                )
            });

        let email = warp::path("email")
            .and(warp::put())
            .and(warp::header::<String>("authorization"))
            .and(warp::body::json())
            .map(move |auth: String, body: Value| {
                emails.lock().unwrap().push(body);
                reply(&auth, json!({"status": 200}))
            });

        let (addr, server) = warp::serve(user.or(projects).or(email)).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        addr
    }

    async fn api() -> (HttpApi, Arc<Mutex<Vec<Value>>>) {
        let emails = Arc::new(Mutex::new(vec![]));
        let addr = serve(Arc::clone(&emails)).await;
        (HttpApi::new(&format!("http://{addr}/")), emails)
    }

    #[tokio::test]
    async fn user_unwraps_envelope() {
        let (api, _) = api().await;

        let user = api.user(&creds("7")).await.unwrap();

        assert_eq!(user.id, "7");
        assert_eq!(user.username, "ann");
        assert_eq!(user.mobile, "");
    }

    #[tokio::test]
    async fn user_status_is_kept() {
        let (api, _) = api().await;

        let bad_token = Credentials::new("7".into(), "nope".into());
        match api.user(&bad_token).await {
            Err(ApiError::Status(s)) if s == StatusCode::UNAUTHORIZED => {}
            other => panic!("expected 401, got {other:?}"),
        }

        match api.user(&creds("9")).await {
            Err(ApiError::Status(s)) if s == StatusCode::FORBIDDEN => {}
            other => panic!("expected 403, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn user_with_wrong_shape() {
        let (api, _) = api().await;

        let err = api.user(&creds("8")).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
    }

    #[tokio::test]
    async fn projects_in_server_order() {
        let (api, _) = api().await;

        let projects = api.projects(&creds("7")).await.unwrap();

        let ids: Vec<_> = projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
        assert!(projects.iter().all(|p| p.url.is_empty()));
        assert_eq!(projects[1].fields["project_type"], "text_classification");
    }

    #[tokio::test]
    async fn email_is_put_as_json() {
        let (api, emails) = api().await;

        api.update_email(&creds("7"), "user@example.com").await.unwrap();

        assert_eq!(*emails.lock().unwrap(), [json!({"email": "user@example.com"})]);
    }

    #[tokio::test]
    async fn unreachable_host() {
        // nothing listens on the discard port
        let api = HttpApi::new("http://127.0.0.1:9");

        let err = api.projects(&creds("7")).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
    }
}
