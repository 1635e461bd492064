//! Forum topic drafts and their validation.
//!
//! A [`TopicDraft`] is the form state behind the topic composer: title,
//! category, tags and the block editor. [`TopicDraft::validate`] turns it
//! into the [`TopicSubmission`] payload sent to the API, or reports every
//! failing field at once.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::editor::{BlockEditor, BlockId};
use crate::limits::{MAX_TAG_CHARS, MAX_TAGS, MAX_TITLE_CHARS, MIN_TAG_CHARS};

/// Bounds checked by draft validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicLimits {
    pub max_title_chars: usize,
    pub min_tag_chars: usize,
    pub max_tag_chars: usize,
    pub max_tags: usize,
}

impl Default for TopicLimits {
    fn default() -> Self {
        Self {
            max_title_chars: MAX_TITLE_CHARS,
            min_tag_chars: MIN_TAG_CHARS,
            max_tag_chars: MAX_TAG_CHARS,
            max_tags: MAX_TAGS,
        }
    }
}

/// Why a tag was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("tag must be at least {min} characters")]
    TooShort { min: usize },
    #[error("tag must be at most {max} characters")]
    TooLong { max: usize },
    #[error("a topic can have at most {max} tags")]
    TooMany { max: usize },
    #[error("tag \"{0}\" is already added")]
    Duplicate(String),
}

/// A single failing form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("a category must be selected")]
    MissingCategory,
    #[error("content cannot be empty")]
    EmptyContent,
    #[error("invalid tag \"{tag}\": {source}")]
    InvalidTag {
        tag: String,
        #[source]
        source: TagError,
    },
}

/// A problem that does not block submission but likely changes the content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftWarning {
    #[error("{block} has an unclosed tag and will absorb the block after it")]
    UnclosedTag { block: BlockId },
}

/// Every field error found by one validation pass, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(SmallVec<[ValidationError; 4]>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, error) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// The payload for creating or updating a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSubmission {
    pub title: String,
    pub category: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// Form state for composing or editing a topic.
#[derive(Debug, Clone, Default)]
pub struct TopicDraft {
    pub title: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub editor: BlockEditor,
}

impl TopicDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an existing topic.
    pub fn from_existing(
        title: impl Into<String>,
        category: impl Into<String>,
        tags: Vec<String>,
        content: &str,
    ) -> Self {
        Self {
            title: title.into(),
            category: Some(category.into()),
            tags,
            editor: BlockEditor::deserialize(content),
        }
    }

    /// Add a tag with the default limits.
    pub fn add_tag(&mut self, tag: &str) -> Result<(), TagError> {
        self.add_tag_with_limits(tag, &TopicLimits::default())
    }

    /// Add a tag. The tag is trimmed; comparison is case-sensitive.
    pub fn add_tag_with_limits(&mut self, tag: &str, limits: &TopicLimits) -> Result<(), TagError> {
        let tag = tag.trim();
        check_tag(tag, limits)?;
        if self.tags.iter().any(|t| t == tag) {
            return Err(TagError::Duplicate(tag.to_owned()));
        }
        if self.tags.len() >= limits.max_tags {
            return Err(TagError::TooMany {
                max: limits.max_tags,
            });
        }
        self.tags.push(tag.to_owned());
        Ok(())
    }

    /// Remove a tag. Returns false if it was not present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Non-blocking problems to show next to the composer.
    pub fn warnings(&self) -> Vec<DraftWarning> {
        let warnings: Vec<_> = self
            .editor
            .unclosed_text_blocks()
            .map(|block| DraftWarning::UnclosedTag { block })
            .collect();
        if !warnings.is_empty() {
            log::debug!("topic draft has {} warning(s)", warnings.len());
        }
        warnings
    }

    /// Check every field and build the submission payload.
    ///
    /// Warnings from [`TopicDraft::warnings`] are not errors here.
    ///
    /// Tags are re-checked here because `tags` can be set directly when an
    /// existing topic is loaded.
    pub fn validate(&self, limits: &TopicLimits) -> Result<TopicSubmission, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(ValidationError::MissingTitle);
        } else if title.chars().count() > limits.max_title_chars {
            errors.push(ValidationError::TitleTooLong {
                max: limits.max_title_chars,
            });
        }

        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());
        if category.is_none() {
            errors.push(ValidationError::MissingCategory);
        }

        if !self.editor.has_content() {
            errors.push(ValidationError::EmptyContent);
        }

        let mut seen = FxHashSet::default();
        for (idx, tag) in self.tags.iter().enumerate() {
            let checked = if idx >= limits.max_tags {
                Err(TagError::TooMany {
                    max: limits.max_tags,
                })
            } else if !seen.insert(tag.as_str()) {
                Err(TagError::Duplicate(tag.clone()))
            } else {
                check_tag(tag, limits)
            };
            if let Err(source) = checked {
                errors.push(ValidationError::InvalidTag {
                    tag: tag.clone(),
                    source,
                });
            }
        }

        if !errors.is_empty() {
            log::debug!("topic draft rejected: {errors}");
            return Err(errors);
        }

        Ok(TopicSubmission {
            title: title.to_owned(),
            category: category.unwrap_or_default().to_owned(),
            content: self.editor.serialize(),
            tags: self.tags.clone(),
        })
    }
}

fn check_tag(tag: &str, limits: &TopicLimits) -> Result<(), TagError> {
    let chars = tag.chars().count();
    if chars < limits.min_tag_chars {
        Err(TagError::TooShort {
            min: limits.min_tag_chars,
        })
    } else if chars > limits.max_tag_chars {
        Err(TagError::TooLong {
            max: limits.max_tag_chars,
        })
    } else {
        Ok(())
    }
}
