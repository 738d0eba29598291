//! HTML rendering of the feed view model.
//!
//! The attribute set is the contract automation relies on: `data-slide-index`,
//! `data-active`, `data-visible`, `data-extension-mode`, `role="article"` and
//! the `"Repository {name} by {author}"` label on each slide, and
//! `role="main"` / `aria-live="polite"` on the viewport.

use std::fmt::Write;

use crate::{ErrorDisplay, FeedAction, FeedViewModel, RepositoryCard, SlideMount, SlideView};

pub fn render(view: &FeedViewModel) -> String {
    let mut out = String::new();
    let mode = view.extension_mode.as_str();
    let _ = write!(
        out,
        r#"<div class="feed feed--{mode}" role="main" aria-live="polite" data-extension-mode="{mode}" style="height: {}px">"#,
        view.viewport.height
    );

    let stack_hidden = matches!(
        view.error.as_ref().map(|error| error.display),
        Some(ErrorDisplay::Panel)
    );
    if !stack_hidden {
        for slide in &view.slides {
            render_slide(&mut out, view, slide);
        }
    }

    if view.initial_loading {
        out.push_str(r#"<div class="feed-loading" role="status">Loading repositories...</div>"#);
    }
    if view.loading_more {
        out.push_str(r#"<div class="feed-loading-more" role="status">Loading more...</div>"#);
    }
    if let Some(position) = view.position {
        let _ = write!(out, r#"<div class="feed-position">{position}</div>"#);
    }
    if view.end_of_results {
        out.push_str(r#"<div class="feed-end">You have reached the end</div>"#);
    }
    if let Some(error) = &view.error {
        let class = match error.display {
            ErrorDisplay::Panel => "feed-error",
            ErrorDisplay::Banner => "feed-error feed-error--banner",
        };
        let _ = write!(
            out,
            r#"<div class="{class}" role="alert"><p>{}</p><button type="button" data-action="{}">{}</button></div>"#,
            escape(&error.message),
            error.action.as_str(),
            FeedAction::Retry.label()
        );
    }
    if let Some(empty) = &view.empty {
        let _ = write!(
            out,
            r#"<div class="feed-empty"><h2>{}</h2><button type="button" data-action="{}">{}</button></div>"#,
            empty.title,
            empty.action.as_str(),
            empty.action.label()
        );
    }

    out.push_str("</div>");
    out
}

fn render_slide(out: &mut String, view: &FeedViewModel, slide: &SlideView) {
    let height = view.viewport.height;
    let Some(card) = slide.card.as_ref().filter(|_| slide.mount == SlideMount::Full) else {
        let _ = write!(
            out,
            r#"<div class="feed-slide feed-slide--placeholder" data-slide-index="{}" aria-hidden="true" style="transform: {}; height: {height}px"></div>"#,
            slide.index,
            slide.transform()
        );
        return;
    };

    let pointer_events = if slide.visible { "auto" } else { "none" };
    let _ = write!(
        out,
        r#"<div class="feed-slide" data-slide-index="{}" data-active="{}" data-visible="{}" data-extension-mode="{}" role="article" aria-label="{}" aria-hidden="{}" style="transform: {}; height: {height}px; pointer-events: {pointer_events}">"#,
        slide.index,
        slide.active,
        slide.visible,
        view.extension_mode.as_str(),
        escape(&card.aria_label),
        !slide.visible,
        slide.transform()
    );
    render_card(out, card);
    out.push_str("</div>");
}

fn render_card(out: &mut String, card: &RepositoryCard) {
    let _ = write!(
        out,
        r#"<h2 class="repo-name"><a href="{}">{}</a></h2><p class="repo-author">{}</p>"#,
        escape(&card.url),
        escape(&card.name),
        escape(&card.author)
    );
    if let Some(description) = &card.description {
        let _ = write!(out, r#"<p class="repo-description">{}</p>"#, escape(description));
    }
    let _ = write!(
        out,
        r#"<ul class="repo-stats"><li data-stat="stars">{}</li><li data-stat="forks">{}</li>"#,
        card.stars, card.forks
    );
    if let Some(language) = &card.language {
        let _ = write!(out, r#"<li data-stat="language">{}</li>"#, escape(language));
    }
    out.push_str("</ul>");

    if let Some(summary) = &card.ai_summary {
        let expanded = card.summary_expanded;
        let _ = write!(
            out,
            r#"<section class="repo-summary" data-expanded="{expanded}"><button type="button" data-action="toggle-summary" aria-expanded="{expanded}">AI summary</button>"#
        );
        if expanded {
            let _ = write!(out, "<p>{}</p>", escape(summary));
        }
        out.push_str("</section>");
    }
    let _ = write!(
        out,
        r#"<footer class="repo-actions"><a href="{}" data-action="open">View on GitHub</a><span class="repo-date">{}</span></footer>"#,
        escape(&card.url),
        card.trending_date
    );
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
