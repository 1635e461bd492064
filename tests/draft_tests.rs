use tagmark::{BlockKind, DraftWarning, TagError, TopicDraft, TopicLimits, ValidationError};

fn ready_draft() -> TopicDraft {
    let mut draft = TopicDraft::new();
    draft.title = "Best co-op games of the year".into();
    draft.category = Some("general".into());
    let first = draft.editor.blocks()[0].id;
    draft.editor.update_block(first, "Post yours below.");
    draft
}

// --- Tags ---

#[test]
fn tags_reject_duplicates_case_sensitively() {
    let mut draft = TopicDraft::new();
    draft.add_tag("rpg").unwrap();
    assert_eq!(draft.add_tag("rpg"), Err(TagError::Duplicate("rpg".into())));
    assert_eq!(draft.add_tag(" rpg "), Err(TagError::Duplicate("rpg".into())));
    assert_eq!(draft.add_tag("RPG"), Ok(()));
    assert_eq!(draft.tags, vec!["rpg", "RPG"]);
}

#[test]
fn tags_capped_at_ten() {
    let mut draft = TopicDraft::new();
    for n in 0..10 {
        draft.add_tag(&format!("tag{n}")).unwrap();
    }
    assert_eq!(draft.add_tag("extra"), Err(TagError::TooMany { max: 10 }));
    assert_eq!(draft.tags.len(), 10);
}

#[test]
fn tag_bounds_are_inclusive() {
    let mut draft = TopicDraft::new();
    assert_eq!(draft.add_tag("ab"), Ok(()));
    assert_eq!(draft.add_tag(&"z".repeat(20)), Ok(()));
}

#[test]
fn remove_tag() {
    let mut draft = TopicDraft::new();
    draft.add_tag("fps").unwrap();
    assert!(draft.remove_tag("fps"));
    assert!(!draft.remove_tag("fps"));
}

// --- Validation ---

#[test]
fn valid_draft_builds_submission() {
    let mut draft = ready_draft();
    draft.add_tag("coop").unwrap();
    let image = draft.editor.add_block(BlockKind::Image);
    draft.editor.update_block(image, "https://x/cover.png");

    let submission = draft.validate(&TopicLimits::default()).unwrap();
    assert_eq!(submission.title, "Best co-op games of the year");
    assert_eq!(submission.category, "general");
    assert_eq!(
        submission.content,
        "Post yours below.\n\n[image]https://x/cover.png[/image]"
    );
    assert_eq!(submission.tags, vec!["coop"]);
}

#[test]
fn empty_draft_reports_every_field() {
    let errors = TopicDraft::new()
        .validate(&TopicLimits::default())
        .unwrap_err();
    assert_eq!(errors.len(), 3);
    assert!(errors.contains(&ValidationError::MissingTitle));
    assert!(errors.contains(&ValidationError::MissingCategory));
    assert!(errors.contains(&ValidationError::EmptyContent));
    assert_eq!(
        errors.to_string(),
        "title is required; a category must be selected; content cannot be empty"
    );
}

#[test]
fn whitespace_title_and_content_are_blank() {
    let mut draft = ready_draft();
    draft.title = "   ".into();
    let first = draft.editor.blocks()[0].id;
    draft.editor.update_block(first, " \n ");
    let errors = draft.validate(&TopicLimits::default()).unwrap_err();
    assert!(errors.contains(&ValidationError::MissingTitle));
    assert!(errors.contains(&ValidationError::EmptyContent));
}

#[test]
fn title_length_bound() {
    let mut draft = ready_draft();
    let limits = TopicLimits {
        max_title_chars: 10,
        ..TopicLimits::default()
    };
    draft.title = "0123456789".into();
    assert!(draft.validate(&limits).is_ok());
    draft.title = "0123456789x".into();
    let errors = draft.validate(&limits).unwrap_err();
    assert_eq!(
        errors.iter().collect::<Vec<_>>(),
        vec![&ValidationError::TitleTooLong { max: 10 }]
    );
}

#[test]
fn directly_set_tags_are_rechecked() {
    let mut draft = ready_draft();
    draft.tags = vec!["ok".into(), "ok".into(), "x".into()];
    let errors = draft.validate(&TopicLimits::default()).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.contains(&ValidationError::InvalidTag {
        tag: "ok".into(),
        source: TagError::Duplicate("ok".into()),
    }));
    assert!(errors.contains(&ValidationError::InvalidTag {
        tag: "x".into(),
        source: TagError::TooShort { min: 2 },
    }));
}

#[test]
fn editing_existing_topic_round_trips_content() {
    let content = "Patch notes\n\n[image]https://x/p.png[/image]\n\n[quote]gg[/quote]";
    let draft = TopicDraft::from_existing("Patch 1.2", "news", vec!["patch".into()], content);
    assert_eq!(draft.editor.len(), 3);
    let submission = draft.validate(&TopicLimits::default()).unwrap();
    assert_eq!(submission.content, content);
}

#[test]
fn submission_json_shape() {
    let submission = ready_draft().validate(&TopicLimits::default()).unwrap();
    let json = serde_json::to_value(&submission).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "title": "Best co-op games of the year",
            "category": "general",
            "content": "Post yours below.",
            "tags": [],
        })
    );
}

// --- Warnings ---

#[test]
fn unclosed_tag_before_image_warns() {
    let mut draft = ready_draft();
    let first = draft.editor.blocks()[0].id;
    draft.editor.update_block(first, "Type [image] to add pictures");
    assert!(draft.warnings().is_empty());

    let image = draft.editor.add_block(BlockKind::Image);
    draft.editor.update_block(image, "https://x/a.png");
    assert_eq!(draft.warnings(), vec![DraftWarning::UnclosedTag { block: first }]);
    assert_eq!(
        draft.warnings()[0].to_string(),
        "block-0 has an unclosed tag and will absorb the block after it"
    );

    // Still submittable.
    assert!(draft.validate(&TopicLimits::default()).is_ok());
}

#[test]
fn closed_tags_in_text_do_not_warn() {
    let mut draft = ready_draft();
    let first = draft.editor.blocks()[0].id;
    draft.editor.update_block(first, "See [quote]this[/quote] and [b]that");
    draft.editor.add_block(BlockKind::Image);
    assert!(draft.warnings().is_empty());
}
