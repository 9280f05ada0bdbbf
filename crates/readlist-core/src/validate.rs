// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field checks applied to drafts and patches before any request is sent.
//!
//! Limits mirror the entry service: titles are 1..=500 characters and
//! descriptions at most 5000.

use crate::ReadlistError;

pub const TITLE_MAX_CHARS: usize = 500;
pub const DESCRIPTION_MAX_CHARS: usize = 5000;

pub fn title(title: &str) -> Result<(), ReadlistError> {
    if title.trim().is_empty() {
        return Err(ReadlistError::Validation {
            field: "title",
            message: "title must not be empty".to_string(),
        });
    }
    let len = title.chars().count();
    if len > TITLE_MAX_CHARS {
        return Err(ReadlistError::Validation {
            field: "title",
            message: format!("title must be at most {TITLE_MAX_CHARS} characters, got {len}"),
        });
    }
    Ok(())
}

pub fn description(description: &str) -> Result<(), ReadlistError> {
    let len = description.chars().count();
    if len > DESCRIPTION_MAX_CHARS {
        return Err(ReadlistError::Validation {
            field: "description",
            message: format!(
                "description must be at most {DESCRIPTION_MAX_CHARS} characters, got {len}"
            ),
        });
    }
    Ok(())
}

/// Links must be absolute http(s) URLs.
pub fn link(link: &str) -> Result<(), ReadlistError> {
    let parsed = url::Url::parse(link.trim()).map_err(|e| ReadlistError::Validation {
        field: "link",
        message: format!("`{link}` is not a valid URL: {e}"),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ReadlistError::Validation {
            field: "link",
            message: format!("unsupported link scheme `{other}`, expected http or https"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntryDraft, EntryKind, EntryPatch};

    #[test]
    fn empty_and_blank_titles_are_rejected() {
        for bad in ["", "   ", "\n\t"] {
            let err = title(bad).unwrap_err();
            assert!(matches!(err, ReadlistError::Validation { field: "title", .. }));
        }
        assert!(title("Dune").is_ok());
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        let max = "é".repeat(TITLE_MAX_CHARS);
        assert!(title(&max).is_ok());
        let over = "é".repeat(TITLE_MAX_CHARS + 1);
        assert!(title(&over).is_err());
    }

    #[test]
    fn description_limit() {
        assert!(description(&"x".repeat(DESCRIPTION_MAX_CHARS)).is_ok());
        assert!(description(&"x".repeat(DESCRIPTION_MAX_CHARS + 1)).is_err());
    }

    #[test]
    fn links_must_be_http_urls() {
        assert!(link("https://example.com/post").is_ok());
        assert!(link("http://example.com").is_ok());
        assert!(link("example.com").is_err());
        assert!(link("ftp://example.com/file").is_err());
        assert!(link("javascript:alert(1)").is_err());
    }

    #[test]
    fn draft_validation_checks_optional_fields() {
        let draft = EntryDraft::new("Dune", EntryKind::Book).with_link("not a url");
        assert!(matches!(
            draft.validate(),
            Err(ReadlistError::Validation { field: "link", .. })
        ));
        let draft = EntryDraft::new("", EntryKind::Book);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn patch_validation_skips_unset_fields() {
        assert!(EntryPatch::new().validate().is_ok());
        assert!(EntryPatch::new().title("").validate().is_err());
        assert!(EntryPatch::new().link(None).validate().is_ok());
    }

    proptest::proptest! {
        #[test]
        fn any_non_blank_short_title_is_accepted(s in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,100}") {
            proptest::prop_assert!(title(&s).is_ok());
        }
    }
}
