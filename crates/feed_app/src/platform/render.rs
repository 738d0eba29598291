use std::fmt::Write;

use feed_core::{Density, ErrorDisplay, FeedViewModel, RepositoryCard, SlideMount};

/// Turns a view model into whatever the host surface shows.
pub trait Renderer {
    fn render(&self, view: &FeedViewModel) -> String;
}

/// Plain text frame for terminals. Popup density prints one line per card.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, view: &FeedViewModel) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "== trending [{}] {}x{} ==",
            view.extension_mode.as_str(),
            view.viewport.width,
            view.viewport.height
        );

        if let Some(error) = &view.error {
            let _ = writeln!(out, "! {} [{}]", error.message, error.action.as_str());
            if error.display == ErrorDisplay::Panel {
                return out;
            }
        }
        if view.initial_loading {
            out.push_str("Loading repositories...\n");
        }
        if let Some(empty) = &view.empty {
            let _ = writeln!(out, "{} [{}]", empty.title, empty.action.as_str());
        }

        if let Some(card) = view
            .active_slide()
            .filter(|slide| slide.mount == SlideMount::Full)
            .and_then(|slide| slide.card.as_ref())
        {
            match view.density {
                Density::Compact => write_compact(&mut out, card),
                Density::Comfortable => write_comfortable(&mut out, card),
            }
        }

        let mut footer = Vec::new();
        if let Some(position) = view.position {
            footer.push(position.to_string());
        }
        if view.is_transitioning {
            footer.push("...".to_string());
        }
        if view.loading_more {
            footer.push("Loading more...".to_string());
        }
        if view.end_of_results {
            footer.push("You have reached the end".to_string());
        }
        if !footer.is_empty() {
            let _ = writeln!(out, "-- {} --", footer.join(" | "));
        }
        out
    }
}

fn write_compact(out: &mut String, card: &RepositoryCard) {
    let language = card.language.as_deref().unwrap_or("-");
    let _ = writeln!(
        out,
        "{}/{}  *{} forks {}  {}",
        card.author, card.name, card.stars, card.forks, language
    );
    if let Some(summary) = card.ai_summary.as_ref().filter(|_| card.summary_expanded) {
        let _ = writeln!(out, "  {summary}");
    }
}

fn write_comfortable(out: &mut String, card: &RepositoryCard) {
    let _ = writeln!(out, "{}", card.name);
    let _ = writeln!(out, "by {}  ({})", card.author, card.trending_date);
    if let Some(description) = &card.description {
        let _ = writeln!(out, "\n{description}\n");
    }
    let _ = write!(out, "stars {}  forks {}", card.stars, card.forks);
    if let Some(language) = &card.language {
        let _ = write!(out, "  {language}");
    }
    out.push('\n');
    match (&card.ai_summary, card.summary_expanded) {
        (Some(summary), true) => {
            let _ = writeln!(out, "summary: {summary}");
        }
        (Some(_), false) => out.push_str("summary: (hidden, press s)\n"),
        (None, _) => {}
    }
    let _ = writeln!(out, "{}", card.url);
}

/// Emits the HTML slide stack, for piping into a browser harness.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupRenderer;

impl Renderer for MarkupRenderer {
    fn render(&self, view: &FeedViewModel) -> String {
        feed_core::markup::render(view)
    }
}
