//! Console output formatting with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::detect::{Detection, DetectionReport, LayoutScore};
use crate::map::ConversionOutcome;

const BORDER_WIDTH: usize = 50;

/// Format a detection report: verdict line, then one line per layout.
pub fn format_detection_report(report: &DetectionReport) -> String {
    let mut output = String::new();

    let verdict = match &report.detection {
        Detection::Definite { map_type } => {
            format!("Detected {} map", map_type.to_string().to_uppercase().bold()).green().to_string()
        }
        Detection::Ambiguous { best_guess, score } => format!(
            "{} (best guess {} at {:.0}%)",
            "Ambiguous structure".yellow(),
            best_guess.to_string().to_uppercase(),
            score * 100.0
        ),
        Detection::NotFound => "No known map structure found".red().to_string(),
    };
    let _ = writeln!(output, "{}", verdict);

    for score in &report.scores {
        let _ = writeln!(output, "  {}", format_layout_score(score));
    }
    output
}

fn format_layout_score(score: &LayoutScore) -> String {
    let percent = format!("{:>3.0}%", score.score() * 100.0);
    let percent = if score.is_complete() {
        percent.green().to_string()
    } else if score.matched > 0 {
        percent.yellow().to_string()
    } else {
        percent.dimmed().to_string()
    };
    format!(
        "{:<4} {} {}",
        score.map_type.to_string().to_uppercase(),
        percent,
        format!("({}/{} {})", score.matched, score.total, score.sub_version).dimmed()
    )
}

/// Format a boxed summary of one converted map.
pub fn format_conversion_summary(outcome: &ConversionOutcome) -> String {
    let mut output = String::new();
    let best = &outcome.best;
    let border = "━".repeat(BORDER_WIDTH);

    let _ = writeln!(output, "{}", border.dimmed());
    let _ = writeln!(
        output,
        "  {} {}",
        best.song.title.bold(),
        format!("({})", best.map_name()).dimmed()
    );
    let _ = writeln!(output, "{}", border.dimmed());
    let _ = writeln!(
        output,
        "  Markers    {}",
        best.music_track.markers.len().cyan()
    );
    let _ = writeln!(output, "  Dance      {}", best.dance.clips.len().cyan());
    let _ = writeln!(output, "  Karaoke    {}", best.karaoke.clips.len().cyan());
    let _ = writeln!(output, "  Cinematics {}", best.cinematics.clips.len().cyan());
    let _ = writeln!(
        output,
        "  Ambient    {}",
        outcome.assets.amb_files.len().cyan()
    );

    let written = format!("{}/5 records written", outcome.export.written.len());
    let _ = writeln!(
        output,
        "  {}",
        if outcome.export.is_complete() {
            written.green().to_string()
        } else {
            written.red().to_string()
        }
    );
    for (path, reason) in &outcome.export.failed {
        let _ = writeln!(output, "    {} {}: {}", "✗".red(), path, reason);
    }
    let _ = writeln!(
        output,
        "  {}",
        outcome.output_dir.display().to_string().dimmed()
    );
    let _ = write!(output, "{}", border.dimmed());

    output
}
