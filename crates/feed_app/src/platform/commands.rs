use feed_core::{FeedKey, Msg};

/// One line typed on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Feed(Msg),
    /// Toggle the AI summary of whatever slide is current.
    ToggleCurrentSummary,
    Help,
    Quit,
}

pub const HELP: &str = "\
j/n/down  next            k/p/up  previous
g <n>     go to slide n   home/end first/last
s         toggle summary  more    load more
r         refresh         retry   retry failed load
size <w> <h>  resize      q       quit";

pub fn parse(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("empty command".to_string());
    };
    let rest: Vec<&str> = words.collect();

    let command = match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
        ("j" | "n" | "down", []) => Command::Feed(Msg::KeyPressed(FeedKey::ArrowDown)),
        ("k" | "p" | "up", []) => Command::Feed(Msg::KeyPressed(FeedKey::ArrowUp)),
        ("home", []) => Command::Feed(Msg::KeyPressed(FeedKey::Home)),
        ("end", []) => Command::Feed(Msg::KeyPressed(FeedKey::End)),
        ("g" | "goto", [n]) => {
            let position: usize = n.parse().map_err(|_| format!("not a slide number: {n}"))?;
            // Slides are numbered from 1 on screen.
            match position.checked_sub(1) {
                Some(index) => Command::Feed(Msg::NavigateTo(index)),
                None => return Err("slides start at 1".to_string()),
            }
        }
        ("s" | "summary", []) => Command::ToggleCurrentSummary,
        ("more", []) => Command::Feed(Msg::LoadMore),
        ("r" | "refresh", []) => Command::Feed(Msg::Refresh),
        ("retry", []) => Command::Feed(Msg::Retry),
        ("size", [w, h]) => {
            let width = w.parse().map_err(|_| format!("bad width: {w}"))?;
            let height = h.parse().map_err(|_| format!("bad height: {h}"))?;
            Command::Feed(Msg::WindowResized { width, height })
        }
        ("h" | "help" | "?", []) => Command::Help,
        ("q" | "quit" | "exit", []) => Command::Quit,
        _ => return Err(format!("unknown command: {}", line.trim())),
    };
    Ok(command)
}
