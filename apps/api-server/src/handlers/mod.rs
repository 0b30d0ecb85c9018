//! HTTP handlers and route configuration.

mod articles;
mod auth;
mod engagement;
mod health;
mod views;

use actix_web::web;

#[cfg(feature = "rate-limit")]
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::state::AppState;

/// Configure all application routes.
#[cfg_attr(not(feature = "rate-limit"), allow(unused_variables))]
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    let users = web::scope("/user")
        .route("/signup", web::post().to(auth::signup))
        .route("/activation", web::post().to(auth::activation))
        .route("/signin", web::post().to(auth::signin))
        .route("/get/data", web::get().to(auth::current_user))
        .route("/get/all-users", web::get().to(auth::all_users))
        .route("/signout", web::post().to(auth::signout))
        .route("/reset-password", web::post().to(auth::reset_password))
        .route("/set/new-password", web::post().to(auth::set_new_password))
        .route("/profile/{userId}", web::get().to(engagement::profile));

    // Account endpoints send email and hash passwords; throttle them per client.
    #[cfg(feature = "rate-limit")]
    let users = users.wrap(RateLimitMiddleware::new(state.limiter.clone()));

    cfg.route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health_check))
        .service(users)
        // Articles
        .service(
            web::resource("/article")
                .route(web::post().to(articles::create_article))
                .route(web::put().to(articles::edit_article)),
        )
        .route("/article/upload/image", web::post().to(articles::upload_image))
        .route(
            "/article/upload/thumbnail",
            web::post().to(articles::upload_thumbnail),
        )
        .route("/article/{postId}", web::delete().to(articles::delete_article))
        .route("/articles", web::get().to(articles::all_articles))
        .route(
            "/articles/{filter}/{pageNo}",
            web::get().to(articles::home_feed),
        )
        // Engagement
        .service(
            web::resource("/comment/{id}")
                .route(web::post().to(engagement::add_comment))
                .route(web::delete().to(engagement::delete_comment)),
        )
        .route("/comments/{postId}", web::get().to(engagement::comments))
        .route("/like/{postId}", web::put().to(engagement::like))
        .route("/dislike/{postId}", web::put().to(engagement::dislike))
        .route("/follow/{userId}", web::put().to(engagement::follow))
        .route("/unfollow/{userId}", web::put().to(engagement::unfollow));
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use async_trait::async_trait;
    use chrono::{TimeDelta, Utc};
    use serde_json::{Value, json};

    use blog_core::domain::{Article, ArticleContent, User};
    use blog_core::ports::{
        ArticleRepository, Email, ImageStore, MailError, Mailer, MediaError, TokenService,
        UploadedImage, UserRepository,
    };
    use blog_core::services::AccountLinks;
    use blog_infra::{Argon2PasswordService, InMemoryStore, JwtConfig, JwtTokenService};

    use crate::state::{Clients, Repositories};

    #[derive(Default)]
    struct CapturingMailer {
        sent: Mutex<Vec<Email>>,
    }

    #[async_trait]
    impl Mailer for CapturingMailer {
        async fn send(&self, email: Email) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }

    struct FakeImageStore;

    #[async_trait]
    impl ImageStore for FakeImageStore {
        async fn upload(&self, path: &Path) -> Result<UploadedImage, MediaError> {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| MediaError::Io(e.to_string()))?;
            Ok(UploadedImage {
                url: "https://img.example/upload.png".to_string(),
                metadata: json!({ "bytes": bytes.len() }),
            })
        }
    }

    struct Harness {
        state: AppState,
        store: Arc<InMemoryStore>,
        tokens: Arc<JwtTokenService>,
        mailer: Arc<CapturingMailer>,
    }

    impl Harness {
        fn new() -> Self {
            let store = Arc::new(InMemoryStore::new());
            let tokens = Arc::new(JwtTokenService::new(JwtConfig {
                secret: "handler-tests".to_string(),
                ..JwtConfig::default()
            }));
            let mailer = Arc::new(CapturingMailer::default());

            let clients = Clients {
                tokens: tokens.clone(),
                passwords: Arc::new(Argon2PasswordService::new()),
                mailer: mailer.clone(),
                images: Some(Arc::new(FakeImageStore)),
                #[cfg(feature = "rate-limit")]
                limiter: Arc::new(blog_infra::InMemoryRateLimiter::new(
                    blog_infra::RateLimitConfig {
                        max_requests: std::num::NonZeroU32::new(1000).unwrap(),
                        window: std::time::Duration::from_secs(60),
                    },
                )),
            };
            let state = AppState::from_parts(
                Repositories::in_memory(store.clone()),
                clients,
                AccountLinks {
                    client_url: "http://client.test".to_string(),
                    email_from: "noreply@client.test".to_string(),
                },
            );

            Self {
                state,
                store,
                tokens,
                mailer,
            }
        }

        async fn user(&self, name: &str) -> (User, String) {
            let user = UserRepository::insert(
                self.store.as_ref(),
                User::new(
                    name.to_string(),
                    format!("{name}@example.com"),
                    "other".to_string(),
                    "not-a-real-hash".to_string(),
                ),
            )
            .await
            .unwrap();
            let token = self.tokens.issue_session(&user).unwrap();
            (user, format!("Bearer {token}"))
        }

        async fn article(&self, author: &User, title: &str, hours_ago: i64) -> Article {
            let mut article = Article::new(
                author.id,
                ArticleContent {
                    title: title.to_string(),
                    thumbnail: String::new(),
                    body: "body".to_string(),
                    tags: vec![],
                    read_time: "1 min read".to_string(),
                },
            );
            article.created_at = Utc::now() - TimeDelta::hours(hours_ago);
            ArticleRepository::insert(self.store.as_ref(), article)
                .await
                .unwrap()
        }
    }

    macro_rules! app {
        ($harness:expr) => {{
            let state = $harness.state.clone();
            test::init_service(
                App::new()
                    .app_data(web::Data::new(state.clone()))
                    .configure(|cfg| configure_routes(cfg, &state)),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_root_reports_running() {
        let harness = Harness::new();
        let app = app!(harness);

        let body: Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/").to_request())
                .await;

        assert_eq!(body, json!({ "result": "My Blog Server is running" }));
    }

    #[actix_web::test]
    async fn test_home_feed_pages() {
        let harness = Harness::new();
        let (ada, _) = harness.user("ada").await;
        for hours_ago in 1..=7 {
            harness
                .article(&ada, &format!("h{hours_ago}"), hours_ago)
                .await;
        }
        let app = app!(harness);

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/articles/latest/2").to_request(),
        )
        .await;

        assert_eq!(body["totalPage"], 3);
        assert_eq!(body["currentPage"], 2);
        let titles: Vec<&str> = body["homeArticles"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["h4", "h5", "h6"]);
        assert_eq!(body["homeArticles"][0]["author"]["username"], "ada");
        assert!(body["homeArticles"][0]["author"].get("passwordHash").is_none());
    }

    #[actix_web::test]
    async fn test_non_numeric_page_is_first_page() {
        let harness = Harness::new();
        let app = app!(harness);

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/articles/all/abc").to_request(),
        )
        .await;

        assert_eq!(body, json!({ "homeArticles": [], "totalPage": 0, "currentPage": 1 }));
    }

    #[actix_web::test]
    async fn test_largest_page_number_is_empty_page() {
        let harness = Harness::new();
        let app = app!(harness);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/articles/all/18446744073709551615")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({ "homeArticles": [], "totalPage": 0, "currentPage": u64::MAX })
        );
    }

    #[actix_web::test]
    async fn test_create_article_requires_sign_in() {
        let harness = Harness::new();
        let app = app!(harness);

        let req = test::TestRequest::post()
            .uri("/article")
            .set_json(json!({ "title": "T", "body": "B" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_create_then_delete_article() {
        let harness = Harness::new();
        let (_, bearer) = harness.user("ada").await;
        let app = app!(harness);

        let req = test::TestRequest::post()
            .uri("/article")
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .set_json(json!({
                "title": "Hello",
                "articleThumbnail": "https://img.example/t.png",
                "body": "Some body text",
                "searchTags": "rust,web"
            }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;

        let id = created["createdArticle"]["id"].as_str().unwrap().to_string();
        assert_eq!(created["success"], "Article Successfully Posted");
        assert_eq!(created["createdArticle"]["tags"], json!(["rust", "web"]));
        assert_eq!(created["updatedUser"]["posts"], json!([id]));
        assert!(created["updatedUser"].get("passwordHash").is_none());

        let req = test::TestRequest::delete()
            .uri(&format!("/article/{id}"))
            .insert_header((header::AUTHORIZATION, bearer))
            .to_request();
        let deleted: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(deleted["deletedArticle"]["id"], id);
        assert_eq!(deleted["updatedUser"]["posts"], json!([]));
    }

    #[actix_web::test]
    async fn test_delete_by_non_author_is_rejected() {
        let harness = Harness::new();
        let (ada, _) = harness.user("ada").await;
        let (_, mallory) = harness.user("mallory").await;
        let article = harness.article(&ada, "mine", 1).await;
        let app = app!(harness);

        let req = test::TestRequest::delete()
            .uri(&format!("/article/{}", article.id))
            .insert_header((header::AUTHORIZATION, mallory))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "error": "You are not author of this article" }));
    }

    #[actix_web::test]
    async fn test_edit_without_article_id_is_rejected() {
        let harness = Harness::new();
        let (ada, bearer) = harness.user("ada").await;
        harness.article(&ada, "mine", 1).await;
        let app = app!(harness);

        let req = test::TestRequest::put()
            .uri("/article")
            .insert_header((header::AUTHORIZATION, bearer))
            .set_json(json!({ "title": "New", "body": "B", "searchTags": "" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_edit_article() {
        let harness = Harness::new();
        let (ada, bearer) = harness.user("ada").await;
        let article = harness.article(&ada, "mine", 1).await;
        let app = app!(harness);

        let req = test::TestRequest::put()
            .uri("/article")
            .insert_header((header::AUTHORIZATION, bearer))
            .set_json(json!({
                "articleId": article.id,
                "title": "Renamed",
                "articleThumbnail": "",
                "body": "B",
                "searchTags": "x"
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["updatedArticle"]["title"], "Renamed");
        assert_eq!(body["updatedArticle"]["author"]["id"], json!(ada.id));
        assert_eq!(body["success"], "Article Successfully Edited");
    }

    #[actix_web::test]
    async fn test_upload_thumbnail() {
        let harness = Harness::new();
        let (_, bearer) = harness.user("ada").await;
        let app = app!(harness);

        let req = test::TestRequest::post()
            .uri("/article/upload/thumbnail")
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .set_payload(vec![1u8, 2, 3, 4])
            .to_request();
        let thumb: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(thumb["url"], "https://img.example/upload.png");
        assert_eq!(thumb["metadata"]["bytes"], 4);

        let req = test::TestRequest::post()
            .uri("/article/upload/image")
            .insert_header((header::AUTHORIZATION, bearer))
            .set_payload(vec![9u8; 10])
            .to_request();
        let image: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(image["postImgUrl"]["metadata"]["bytes"], 10);
    }

    #[actix_web::test]
    async fn test_account_flow_over_http() {
        let harness = Harness::new();
        let app = app!(harness);

        let req = test::TestRequest::post()
            .uri("/user/signup")
            .set_json(json!({
                "username": "bob",
                "email": "bob@example.com",
                "gender": "male",
                "password": "secret1"
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body["success"],
            "Email has been sent to bob@example.com. Please check your email to activate your account"
        );

        let html = harness.mailer.sent.lock().unwrap()[0].html.clone();
        let marker = "http://client.test/account/activate/";
        let start = html.find(marker).unwrap() + marker.len();
        let token = &html[start..start + html[start..].find('"').unwrap()];

        let req = test::TestRequest::post()
            .uri("/user/activation")
            .set_json(json!({ "token": token }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "success": "Account create successful" }));

        let req = test::TestRequest::post()
            .uri("/user/signin")
            .set_json(json!({ "email": "bob@example.com", "password": "secret1" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["correctUser"]["username"], "bob");
        assert!(body["correctUser"].get("passwordHash").is_none());
        let session = body["token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/user/get/data")
            .insert_header((header::AUTHORIZATION, format!("Bearer {session}")))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["email"], "bob@example.com");
    }

    #[actix_web::test]
    async fn test_signup_validation() {
        let harness = Harness::new();
        let app = app!(harness);

        let req = test::TestRequest::post()
            .uri("/user/signup")
            .set_json(json!({
                "username": "bob",
                "email": "bob@example.com",
                "gender": "male",
                "password": "123"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(harness.mailer.sent.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_signin_with_wrong_password() {
        let harness = Harness::new();
        let app = app!(harness);

        let req = test::TestRequest::post()
            .uri("/user/signin")
            .set_json(json!({ "email": "nobody@example.com", "password": "whatever" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "error": "Email or password is incorrect." }));
    }

    #[actix_web::test]
    async fn test_like_then_dislike() {
        let harness = Harness::new();
        let (ada, _) = harness.user("ada").await;
        let (bob, bearer) = harness.user("bob").await;
        let article = harness.article(&ada, "mine", 1).await;
        let app = app!(harness);

        let req = test::TestRequest::put()
            .uri(&format!("/like/{}", article.id))
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .to_request();
        let liked: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(liked["likes"], json!([bob.id]));

        let req = test::TestRequest::put()
            .uri(&format!("/dislike/{}", article.id))
            .insert_header((header::AUTHORIZATION, bearer))
            .to_request();
        let disliked: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(disliked["likes"], json!([]));
        assert_eq!(disliked["dislikes"], json!([bob.id]));
    }

    #[actix_web::test]
    async fn test_comment_on_missing_article_is_not_found() {
        let harness = Harness::new();
        let (_, bearer) = harness.user("ada").await;
        let app = app!(harness);

        let req = test::TestRequest::post()
            .uri(&format!("/comment/{}", uuid::Uuid::new_v4()))
            .insert_header((header::AUTHORIZATION, bearer))
            .set_json(json!({ "comment": "hello?" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_follow_shows_on_profile() {
        let harness = Harness::new();
        let (ada, _) = harness.user("ada").await;
        let (bob, bearer) = harness.user("bob").await;
        let app = app!(harness);

        let req = test::TestRequest::put()
            .uri(&format!("/follow/{}", ada.id))
            .insert_header((header::AUTHORIZATION, bearer))
            .to_request();
        let followed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(followed["followers"], json!([bob.id]));

        let req = test::TestRequest::get()
            .uri(&format!("/user/profile/{}", bob.id))
            .to_request();
        let profile: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(profile["following"], json!([ada.id]));
    }
}
