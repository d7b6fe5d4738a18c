use std::fmt::Write;

use crate::session::SessionSnapshot;
use crate::vibe::Vibe;

/// Plain-text rendering of a session for the terminal.
pub fn render_text(snap: &SessionSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Prompt: {}", snap.prompt);
    let vibes: Vec<String> = Vibe::ALL
        .iter()
        .map(|v| if *v == snap.vibe { format!("[{v}]") } else { v.to_string() })
        .collect();
    let _ = writeln!(out, "Vibe:   {}", vibes.join(" "));
    if let Some(status) = &snap.status {
        let _ = writeln!(out, "> {status}");
    }
    if snap.is_pending {
        let _ = writeln!(out, "Preview: Generating…");
    } else {
        let _ = writeln!(out, "Preview: {}", snap.active.image_url);
        let _ = writeln!(out, "         {}", snap.active.prompt);
    }
    let _ = writeln!(out, "Recent previews:");
    for (i, item) in snap.visible_history.iter().enumerate() {
        let marker = if item.id == snap.active.id { '*' } else { ' ' };
        let _ = writeln!(out, " {marker}{}. {}", i + 1, item.prompt);
    }
    out
}
