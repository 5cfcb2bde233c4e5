//! Integration tests for article assembly.

use blockdoc::article::{ArticleAssembler, ArticleRequest, ArticleUpdate};
use blockdoc::{ArticleStatus, BlockRegistry, Error, ExcerptOptions, ExcerptState, ParseOptions};
use serde_json::{json, Value};

fn request(value: Value) -> ArticleRequest {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_create_from_json_request() {
    let req = request(json!({
        "title": "Atlético Madrid sign a striker",
        "status": "published",
        "author": {"name": "Ada", "affiliation": "Staff"},
        "category": {"name": "Atletico Madrid", "slug": "atletico-madrid"},
        "featureImage": {"url": "https://img", "altText": "Striker"},
        "currentPageBody": [
            {"type": "image", "content": "https://img/1.png"},
            {"type": "paragraph", "content": [{"type": "text", "text": "The deal is done."}]}
        ]
    }));

    let record = ArticleAssembler::default().create(req).unwrap();
    assert_eq!(record.slug, "atletico-madrid-sign-a-striker");
    assert_eq!(record.status, ArticleStatus::Published);
    assert_eq!(record.publish_date, Some(record.date_created));
    assert_eq!(record.excerpt.text(), Some("The deal is done."));

    let stored = record.to_json();
    assert_eq!(stored["status"], json!("published"));
    assert_eq!(stored["author"]["name"], json!("Ada"));
    assert_eq!(
        stored["currentPageBody"][0],
        json!({"type": "image", "props": {"url": "https://img/1.png"}})
    );
    assert_eq!(stored["excerptSource"], json!("generated"));
}

#[test]
fn test_body_exclusivity_checked_before_parsing() {
    let req = request(json!({
        "title": "Both",
        "currentPageBody": [{"type": "paragraph"}],
        "pages": [{"pageNumber": 1, "pageBody": []}]
    }));
    assert!(matches!(
        ArticleAssembler::default().create(req),
        Err(Error::BodyConflict)
    ));

    let req = request(json!({"title": "Neither"}));
    assert!(matches!(
        ArticleAssembler::default().create(req),
        Err(Error::MissingBody)
    ));

    let req = request(json!({
        "title": "Duplicate pages",
        "pages": [{"pageNumber": 1, "pageBody": []}, {"pageNumber": 1, "pageBody": []}]
    }));
    assert!(matches!(
        ArticleAssembler::default().create(req),
        Err(Error::InvalidPage(_))
    ));
}

#[test]
fn test_empty_title_rejected() {
    let req = request(json!({"title": " \t", "currentPageBody": []}));
    assert!(matches!(
        ArticleAssembler::default().create(req),
        Err(Error::EmptyTitle)
    ));
}

#[test]
fn test_untitled_slug_and_custom_excerpt_options() {
    let registry = BlockRegistry::with_defaults();
    let assembler = ArticleAssembler::new(
        &registry,
        ParseOptions::new().sequential(),
        ExcerptOptions::new().with_max_length(5),
    );

    let req = request(json!({
        "title": "!!!",
        "currentPageBody": [{"type": "paragraph", "content": "Lengthy opening"}]
    }));
    let record = assembler.create(req).unwrap();
    assert_eq!(record.slug, "untitled-blog");
    assert_eq!(record.excerpt, ExcerptState::Generated("Lengt...".to_string()));
}

#[test]
fn test_update_flow() {
    let assembler = ArticleAssembler::default();
    let record = assembler
        .create(request(json!({
            "title": "Draft",
            "currentPageBody": [{"type": "divider"}]
        })))
        .unwrap();
    assert_eq!(record.excerpt, ExcerptState::Unset);

    let update: ArticleUpdate = serde_json::from_value(json!({
        "pages": [
            {"pageNumber": 1, "pageBody": [{"type": "paragraph", "content": "Now with text"}]},
            {"pageNumber": 2, "pageBody": [{"type": "paragraph", "content": "More"}]}
        ],
        "status": "published"
    }))
    .unwrap();
    let updated = assembler.update(&record, update).unwrap();

    assert_eq!(updated.slug, "draft");
    assert_eq!(
        updated.excerpt,
        ExcerptState::Generated("Now with text".to_string())
    );
    assert_eq!(updated.status, ArticleStatus::Published);
    assert!(updated.publish_date.is_some());
    assert!(updated.body.is_paged());
    assert_eq!(updated.body.page_count(), 2);

    let blank_title = ArticleUpdate {
        title: Some(String::new()),
        ..Default::default()
    };
    assert!(matches!(
        assembler.update(&updated, blank_title),
        Err(Error::EmptyTitle)
    ));
}

#[test]
fn test_stored_record_reparses_to_same_body() {
    let assembler = ArticleAssembler::default();
    let record = assembler
        .create(request(json!({
            "title": "Round trip",
            "currentPageBody": [
                {"type": "heading", "props": {"level": 2}, "content": "Intro"},
                {"type": "mystery", "payload": [1, 2]}
            ]
        })))
        .unwrap();

    let stored = record.to_json();
    let again = assembler
        .create(request(json!({
            "title": "Round trip",
            "currentPageBody": stored["currentPageBody"].clone()
        })))
        .unwrap();

    assert_eq!(again.body, record.body);
}
