// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entry commands: `list`, `show`, `add`, `edit` and `delete`.
//!
//! Each command renders the dashboard through the entry store, so writes are
//! followed by the same refetch the store performs for any other view.

use std::fmt::Write as _;
use std::io::IsTerminal;
use std::sync::Arc;

use clap::Args;
use readlist_core::{Entry, EntryDraft, EntryId, EntryKind, EntryStatus, ReadlistError};
use readlist_store::{DeleteOutcome, PageError, SAVE_FAILED, StoreSnapshot};

use crate::context::Context;
use crate::error::CliError;
use crate::prompt;

const TITLE_WIDTH: usize = 48;

/// Fields accepted by `readlist add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Entry title.
    #[arg(long)]
    pub title: String,
    /// book, article, video, podcast or other.
    #[arg(long)]
    pub kind: EntryKind,
    /// to_read, in_progress, completed or archived.
    #[arg(long, default_value_t = EntryStatus::ToRead)]
    pub status: EntryStatus,
    /// Absolute http(s) URL.
    #[arg(long)]
    pub link: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl AddArgs {
    fn into_draft(self) -> EntryDraft {
        EntryDraft {
            title: self.title,
            kind: self.kind,
            status: self.status,
            link: self.link,
            description: self.description,
        }
    }
}

/// Fields accepted by `readlist edit`. Omitted fields keep their value.
#[derive(Args, Debug, Default)]
pub struct EditArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub kind: Option<EntryKind>,
    #[arg(long)]
    pub status: Option<EntryStatus>,
    #[arg(long, conflicts_with = "clear_link")]
    pub link: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    /// Remove the stored link.
    #[arg(long)]
    pub clear_link: bool,
    /// Remove the stored description.
    #[arg(long)]
    pub clear_description: bool,
}

impl EditArgs {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.kind.is_none()
            && self.status.is_none()
            && self.link.is_none()
            && self.description.is_none()
            && !self.clear_link
            && !self.clear_description
    }

    /// The edit form: the entry's current values with the given overrides.
    fn apply(self, entry: &Entry) -> EntryDraft {
        let mut draft = EntryDraft::from_entry(entry);
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(kind) = self.kind {
            draft.kind = kind;
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
        if self.clear_link {
            draft.link = None;
        } else if let Some(link) = self.link {
            draft.link = Some(link);
        }
        if self.clear_description {
            draft.description = None;
        } else if let Some(description) = self.description {
            draft.description = Some(description);
        }
        draft
    }
}

pub async fn run_list(
    ctx: &Context,
    status: Option<EntryStatus>,
    json: bool,
    plain: bool,
) -> Result<(), CliError> {
    ctx.require_dashboard()?;

    let result = ctx.store.set_filter(status).await;
    let snapshot = ctx.store.snapshot().await;
    if let Err(source) = result {
        return Err(CliError::Page {
            banner: snapshot.page_error.unwrap_or(PageError::EntriesUnavailable),
            source,
        });
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot.entries).unwrap_or_else(|_| "[]".to_string())
        );
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print!("{}", render_table(&snapshot.entries, snapshot.filter, use_color));
    }
    Ok(())
}

pub async fn run_show(ctx: &Context, id: EntryId, json: bool) -> Result<(), CliError> {
    ctx.require_dashboard()?;
    let entry = ctx.store.get(id).await?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&entry).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        print!("{}", render_detail(&entry));
    }
    Ok(())
}

pub async fn run_add(ctx: &Context, args: AddArgs) -> Result<(), CliError> {
    ctx.require_dashboard()?;

    ctx.store.begin_create().await;
    match ctx.store.submit(args.into_draft()).await {
        Ok(entry) => {
            println!("Created entry {}: {}", entry.id, entry.title);
            report_refetch(&ctx.store.snapshot().await);
            Ok(())
        }
        Err(e) => Err(form_failure(ctx, e).await),
    }
}

pub async fn run_edit(ctx: &Context, id: EntryId, args: EditArgs) -> Result<(), CliError> {
    ctx.require_dashboard()?;
    if args.is_empty() {
        return Err(ReadlistError::Validation {
            field: "entry",
            message: "nothing to change; pass at least one field flag".to_string(),
        }
        .into());
    }

    let entry = ctx.store.get(id).await?;
    let draft = args.apply(&entry);
    ctx.store.begin_edit(entry).await;
    match ctx.store.submit(draft).await {
        Ok(entry) => {
            println!("Updated entry {}: {}", entry.id, entry.title);
            report_refetch(&ctx.store.snapshot().await);
            Ok(())
        }
        Err(e) => Err(form_failure(ctx, e).await),
    }
}

pub async fn run_delete(ctx: &Context, id: EntryId, yes: bool) -> Result<(), CliError> {
    ctx.require_dashboard()?;

    let confirm = |id: EntryId| yes || prompt::confirm_delete(id);
    match ctx.store.delete(id, confirm).await {
        Ok(DeleteOutcome::Deleted) => {
            println!("Deleted entry {id}.");
            report_refetch(&ctx.store.snapshot().await);
            Ok(())
        }
        Ok(DeleteOutcome::Declined) => {
            println!("Cancelled.");
            Ok(())
        }
        Err(e) => Err(CliError::Page {
            banner: PageError::DeleteFailed,
            source: Arc::new(e),
        }),
    }
}

/// Maps a rejected submit to what the form would show, keeping auth
/// failures as errors so the login hint is printed.
async fn form_failure(ctx: &Context, error: ReadlistError) -> CliError {
    if error.is_unauthorized() {
        return CliError::Readlist(error);
    }
    let message = ctx
        .store
        .snapshot()
        .await
        .form_error
        .unwrap_or_else(|| SAVE_FAILED.to_string());
    CliError::Form(message)
}

/// The write succeeded but the follow-up refetch may not have.
fn report_refetch(snapshot: &StoreSnapshot) {
    if let Some(banner) = snapshot.page_error {
        eprintln!("warning: {banner}");
    }
}

fn render_table(entries: &[Entry], filter: Option<EntryStatus>, use_color: bool) -> String {
    let mut out = String::new();
    let heading = match filter {
        Some(status) => format!("Entries ({})", status.label()),
        None => "Entries (all)".to_string(),
    };
    let _ = writeln!(out);
    let _ = writeln!(out, "  {heading}");
    let _ = writeln!(out, "  {}", "-".repeat(TITLE_WIDTH + 32));

    if entries.is_empty() {
        let _ = writeln!(out, "    No entries found.");
        let _ = writeln!(out);
        return out;
    }

    let _ = writeln!(out, "    {:>5}  {:<12} {:<8} TITLE", "ID", "STATUS", "KIND");
    for entry in entries {
        let label = format!("{:<12}", entry.status.label());
        let label = if use_color {
            colorize(entry.status, &label)
        } else {
            label
        };
        let _ = writeln!(
            out,
            "    {:>5}  {} {:<8} {}",
            entry.id,
            label,
            entry.kind.to_string(),
            truncate(&entry.title, TITLE_WIDTH)
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "  {} entries", entries.len());
    let _ = writeln!(out);
    out
}

fn render_detail(entry: &Entry) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "  #{} {}", entry.id, entry.title);
    let _ = writeln!(out, "  {}", "-".repeat(35));
    let _ = writeln!(out, "    Kind:     {}", entry.kind);
    let _ = writeln!(out, "    Status:   {}", entry.status.label());
    if let Some(link) = &entry.link {
        let _ = writeln!(out, "    Link:     {link}");
    }
    let _ = writeln!(
        out,
        "    Added:    {}",
        entry.created_at.format("%Y-%m-%d %H:%M")
    );
    if let Some(updated) = entry.updated_at {
        let _ = writeln!(out, "    Updated:  {}", updated.format("%Y-%m-%d %H:%M"));
    }
    if let Some(description) = &entry.description {
        let _ = writeln!(out);
        for line in description.lines() {
            let _ = writeln!(out, "    {line}");
        }
    }
    let _ = writeln!(out);
    out
}

fn colorize(status: EntryStatus, text: &str) -> String {
    use colored::Colorize;
    match status {
        EntryStatus::ToRead => text.blue().to_string(),
        EntryStatus::InProgress => text.yellow().to_string(),
        EntryStatus::Completed => text.green().to_string(),
        EntryStatus::Archived => text.dimmed().to_string(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, title: &str, status: &str) -> Entry {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "kind": "article",
            "status": status,
            "link": "https://example.com/a",
            "description": "first line\nsecond line",
            "created_at": "2024-03-01T12:30:00Z",
            "updated_at": null
        }))
        .unwrap()
    }

    #[test]
    fn truncate_keeps_short_titles() {
        assert_eq!(truncate("Dune", 10), "Dune");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("ééééé", 5), "ééééé");
    }

    #[test]
    fn table_lists_every_entry_plainly() {
        let out = render_table(
            &[entry(1, "Dune", "to_read"), entry(2, "Emma", "completed")],
            None,
            false,
        );
        assert!(out.contains("Entries (all)"));
        assert!(out.contains("To Read"));
        assert!(out.contains("Completed"));
        assert!(out.contains("article"));
        assert!(out.contains("2 entries"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn empty_table_says_so() {
        let out = render_table(&[], Some(EntryStatus::Archived), false);
        assert!(out.contains("Entries (Archived)"));
        assert!(out.contains("No entries found."));
    }

    #[test]
    fn detail_shows_optional_fields() {
        let out = render_detail(&entry(7, "Dune", "in_progress"));
        assert!(out.contains("#7 Dune"));
        assert!(out.contains("In Progress"));
        assert!(out.contains("https://example.com/a"));
        assert!(out.contains("2024-03-01 12:30"));
        assert!(out.contains("    second line"));
        assert!(!out.contains("Updated:"));
    }

    #[test]
    fn edit_args_override_only_given_fields() {
        let base = entry(3, "Dune", "to_read");
        let draft = EditArgs {
            status: Some(EntryStatus::Completed),
            clear_link: true,
            ..EditArgs::default()
        }
        .apply(&base);
        assert_eq!(draft.title, "Dune");
        assert_eq!(draft.status, EntryStatus::Completed);
        assert_eq!(draft.link, None);
        assert_eq!(draft.description, base.description);
    }

    #[test]
    fn empty_edit_args_detected() {
        assert!(EditArgs::default().is_empty());
        assert!(
            !EditArgs {
                clear_description: true,
                ..EditArgs::default()
            }
            .is_empty()
        );
    }
}
