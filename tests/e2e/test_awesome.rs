use crate::e2e::helpers;

use helpers::fixtures::{blog, put_content, solo_form, SOLO_PATH};
use helpers::{TestContext, ORG_TOKEN};
use hyper::StatusCode;
use test_context::test_context;

const SHOWCASE_README: &str = "/repos/b3log/awesome-solo/contents/README.md";
const SHOWCASE_REPO_PATH: &str = "/repos/b3log/awesome-solo";

fn showcase_readme(ctx: &TestContext) -> String {
    let puts = ctx.github.calls_to("PUT", SHOWCASE_README);
    assert_eq!(puts.len(), 1, "expected one showcase README write");
    String::from_utf8(put_content(&puts[0])).unwrap()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_skip_refresh_with_empty_registry(ctx: &TestContext) {
    let response = ctx.client.get("/awesome-solo").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert!(response.body_bytes.is_empty());
    assert!(ctx.github.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_skip_refresh_when_every_title_is_empty(ctx: &TestContext) {
    ctx.registry.upsert(blog("alice/blog", "<p> </p>", 1, 1_000));
    ctx.registry.upsert(blog("bob/blog", "-", 1, 2_000));

    ctx.client
        .get("/awesome-solo")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    assert!(ctx.github.puts().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_publish_uploaded_blog_to_showcase(ctx: &TestContext) {
    let form = solo_form(200)
        .field("favicon", "https://alice.example.com/images/solo-favicon.png")
        .field("stat", r#"{"articleCount": 5, "recentArticleTime": 1700000000000}"#);
    ctx.client
        .post_form(SOLO_PATH, &form)
        .await
        .unwrap()
        .assert_code(0);

    ctx.client
        .get("/awesome-solo")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let readme = showcase_readme(&ctx);
    assert!(
        readme.contains(
            "|  | Alice's notes | https://alice.example.com | 5 | [:octocat:](https://github.com/alice/demo) |"
        ),
        "unexpected README: {}",
        readme
    );

    let put = &ctx.github.calls_to("PUT", SHOWCASE_README)[0];
    assert_eq!(put.access_token.as_deref(), Some(ORG_TOKEN));

    let patches = ctx.github.calls_to("PATCH", SHOWCASE_REPO_PATH);
    assert_eq!(patches.len(), 1);
    let body = patches[0].body.as_ref().unwrap();
    assert_eq!(body.get("name").and_then(|v| v.as_str()), Some("awesome-solo"));
    assert_eq!(body.get("has_issues").and_then(|v| v.as_bool()), Some(true));
    let description = body.get("description").and_then(|v| v.as_str()).unwrap();
    assert!(description.contains("1 sites and 5 articles"), "{}", description);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_most_recent_blogs_first(ctx: &TestContext) {
    ctx.registry.upsert(blog("alice/blog", "Older blog", 1, 1_000));
    ctx.registry.upsert(blog("bob/blog", "Newer blog", 1, 2_000));

    ctx.client.get("/awesome-solo").await.unwrap();

    let readme = showcase_readme(&ctx);
    let newer = readme.find("Newer blog").unwrap();
    let older = readme.find("Older blog").unwrap();
    assert!(newer < older);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_truncate_long_titles(ctx: &TestContext) {
    ctx.registry.upsert(blog(
        "carol/blog",
        "卡罗尔的个人博客 - 记录生活与代码的点点滴滴，欢迎来访",
        1,
        1_000,
    ));

    ctx.client.get("/awesome-solo").await.unwrap();

    let readme = showcase_readme(&ctx);
    let row = readme
        .lines()
        .find(|l| l.contains("carol/blog"))
        .unwrap();
    let title = row.split(" | ").nth(1).unwrap();
    assert!(title.chars().count() <= 26, "{}", title);
    assert!(!title.ends_with('-'));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_update_description_when_readme_write_fails(ctx: &TestContext) {
    ctx.github
        .configure(|s| s.put_status = StatusCode::INTERNAL_SERVER_ERROR);
    ctx.registry.upsert(blog("alice/blog", "Alice", 1, 1_000));

    ctx.client
        .get("/awesome-solo")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    assert_eq!(ctx.github.calls_to("PUT", SHOWCASE_README).len(), 1);
    assert!(ctx.github.calls_to("PATCH", SHOWCASE_REPO_PATH).is_empty());
}
