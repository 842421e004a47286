use std::fmt::Write;

use chrono::DateTime;
use postlist_core::{DialogView, NoticeLevel, Post, PostListViewModel, PostRowView};

use super::viewport::Viewport;

const SKELETON_ROWS: usize = 3;

/// Draws the whole list view as plain text.
pub fn render(view: &PostListViewModel, viewport: &Viewport) -> String {
    let mut out = String::new();
    let search = if view.search_input.is_empty() {
        "(none)".to_string()
    } else {
        format!("\"{}\"", view.search_input)
    };
    let _ = writeln!(out, "── Posts ── search: {search} | sort: {}", view.sort);

    if view.show_skeleton {
        for _ in 0..SKELETON_ROWS {
            let _ = writeln!(out, "  ░░░░░░░░░░░░░░░░░░░░");
        }
    } else if let Some(error) = &view.error {
        let _ = writeln!(
            out,
            "  ! Could not load posts ({}): {}",
            error.kind, error.message
        );
        let _ = writeln!(out, "  Type `retry` to try again.");
    } else if view.is_empty {
        let _ = writeln!(out, "  No results");
    } else {
        render_rows(&mut out, view, viewport);
    }

    if let Some(dialog) = &view.dialog {
        render_dialog(&mut out, dialog);
    }
    for (level, text) in &view.notifications {
        let tag = match level {
            NoticeLevel::Info => "info",
            NoticeLevel::Danger => "error",
        };
        let _ = writeln!(out, "  [{tag}] {text}");
    }
    out
}

fn render_rows(out: &mut String, view: &PostListViewModel, viewport: &Viewport) {
    let total = view.rows.len();
    let range = viewport.visible_rows(total);
    if range.start > 0 {
        let _ = writeln!(out, "  … {} above", range.start);
    }
    for row in &view.rows[range.clone()] {
        render_row(out, row);
    }
    if !viewport.sentinel_visible(total) {
        let _ = writeln!(out, "  … {} more below", total - range.end);
    } else if view.show_more_skeleton {
        let _ = writeln!(out, "  ░░░░ loading more");
    } else if view.show_end_message {
        let _ = writeln!(out, "  You've reached the end");
    }
}

fn render_row(out: &mut String, row: &PostRowView) {
    let _ = writeln!(
        out,
        "{:>4}. {}  by {} · {}",
        row.index + 1,
        row.title,
        if row.author.is_empty() { "unknown" } else { row.author.as_str() },
        format_timestamp(&row.created_at)
    );
    if !row.excerpt.is_empty() {
        let _ = writeln!(out, "      {}", row.excerpt);
    }
}

fn render_dialog(out: &mut String, dialog: &DialogView) {
    let _ = writeln!(out, "  ┌ {}", dialog.title);
    let _ = writeln!(out, "  │ {}", dialog.message);
    if dialog.running {
        let _ = writeln!(out, "  └ deleting…");
    } else {
        let _ = writeln!(
            out,
            "  └ [yes] {}   [no] {}",
            dialog.confirm_text, dialog.cancel_text
        );
    }
}

/// Shows a post handed over for editing, body in full.
pub fn render_editor(post: &Post) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "── Editing {} ──", post.id);
    let _ = writeln!(out, "  title:  {}", post.title);
    let author = if post.author.is_empty() { "unknown" } else { post.author.as_str() };
    let _ = writeln!(out, "  author: {author}");
    let _ = writeln!(out, "  posted: {}", format_timestamp(&post.created_at));
    for line in post.body.lines() {
        let _ = writeln!(out, "  | {line}");
    }
    out
}

/// RFC 3339 timestamps are shortened to minutes; anything else is shown raw.
pub fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use postlist_core::{ErrorKind, FetchFailure, PostId, Sort};

    fn row(index: usize, title: &str) -> PostRowView {
        PostRowView {
            index,
            id: PostId::new(format!("p{index}")),
            title: title.to_string(),
            author: "Ana".to_string(),
            created_at: "2024-03-01T12:30:00Z".to_string(),
            excerpt: format!("About {title}"),
        }
    }

    #[test]
    fn timestamps_are_shortened() {
        assert_eq!(format_timestamp("2024-03-01T12:30:45+00:00"), "2024-03-01 12:30");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn loading_shows_skeleton_only() {
        let view = PostListViewModel {
            show_skeleton: true,
            rows: vec![row(0, "Hidden")],
            ..PostListViewModel::default()
        };
        let text = render(&view, &Viewport::new(5));
        assert!(text.contains('░'));
        assert!(!text.contains("Hidden"));
    }

    #[test]
    fn error_replaces_the_list() {
        let view = PostListViewModel {
            error: Some(FetchFailure::new(ErrorKind::Timeout, "slow server")),
            ..PostListViewModel::default()
        };
        let text = render(&view, &Viewport::new(5));
        assert!(text.contains("Could not load posts (request timed out): slow server"));
        assert!(text.contains("retry"));
    }

    #[test]
    fn rows_are_windowed_and_numbered_from_one() {
        let view = PostListViewModel {
            search_input: "cat".to_string(),
            sort: Sort::Oldest,
            rows: (0..8).map(|i| row(i, &format!("Post {i}"))).collect(),
            ..PostListViewModel::default()
        };
        let text = render(&view, &Viewport::new(3));
        assert!(text.contains("search: \"cat\" | sort: oldest"));
        assert!(text.contains("   1. Post 0  by Ana · 2024-03-01 12:30"));
        assert!(text.contains("   3. Post 2"));
        assert!(!text.contains("Post 3"));
        assert!(text.contains("5 more below"));
    }

    #[test]
    fn end_message_appears_at_the_bottom() {
        let view = PostListViewModel {
            rows: vec![row(0, "Only")],
            show_end_message: true,
            ..PostListViewModel::default()
        };
        let text = render(&view, &Viewport::new(3));
        assert!(text.contains("You've reached the end"));
    }

    #[test]
    fn editor_shows_the_whole_body() {
        let post = Post {
            id: PostId::new("p3"),
            title: "Cats".to_string(),
            body: "First line\nSecond line".to_string(),
            author: String::new(),
            created_at: "2024-03-01T12:30:00Z".to_string(),
        };
        let text = render_editor(&post);
        assert!(text.contains("Editing p3"));
        assert!(text.contains("author: unknown"));
        assert!(text.contains("posted: 2024-03-01 12:30"));
        assert!(text.contains("  | Second line"));
    }

    #[test]
    fn dialog_and_notifications_follow_the_list() {
        let view = PostListViewModel {
            rows: vec![row(0, "Only")],
            dialog: Some(DialogView {
                title: "Delete post".to_string(),
                message: "\"Only\" will be removed permanently.".to_string(),
                confirm_text: "Accept".to_string(),
                cancel_text: "Cancel".to_string(),
                running: false,
            }),
            notifications: vec![(NoticeLevel::Danger, "Could not delete the post: locked".into())],
            ..PostListViewModel::default()
        };
        let text = render(&view, &Viewport::new(3));
        assert!(text.contains("┌ Delete post"));
        assert!(text.contains("[yes] Accept   [no] Cancel"));
        assert!(text.contains("[error] Could not delete the post: locked"));
    }
}
