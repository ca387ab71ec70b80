use std::sync::LazyLock;

use regex::Regex;

use super::classify::{classify_module, classify_mood};
use crate::pipeline::types::StructuredSummary;

/// Named sections of a case summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryField {
    Problem,
    Solution,
    Upsell,
    Prints,
    Mood,
    Module,
}

/// Section labels as the summary prompt asks the model to write them,
/// bolded and followed by a colon.
pub const MARKERS: &[(SummaryField, &str)] = &[
    (SummaryField::Problem, "PROBLEMA / DÚVIDA:"),
    (SummaryField::Solution, "SOLUÇÃO APRESENTADA:"),
    (SummaryField::Upsell, "OPORTUNIDADE DE UPSELL:"),
    (SummaryField::Prints, "PRINTS DE ERRO OU DE MENSAGENS RELEVANTES:"),
    (SummaryField::Mood, "HUMOR DO CLIENTE:"),
    (SummaryField::Module, "MÓDULO:"),
];

/// Affirmative answer for the prints section, compared lower-cased.
const PRINTS_AFFIRMATIVE: &str = "sim";

/// Patterns for one marker: the bolded form, found anywhere, and the bare
/// form, accepted only at the start of a line.
struct MarkerPattern {
    field: SummaryField,
    bold: Regex,
    bare: Regex,
}

/// Bold asterisks may sit on either side of the colon.
static MARKER_PATTERNS: LazyLock<Vec<MarkerPattern>> = LazyLock::new(|| {
    MARKERS
        .iter()
        .map(|(field, label)| {
            let name = regex::escape(label.trim_end_matches(':'));
            let bold = format!(r"\*\*[ \t]*{name}[ \t]*\*{{0,2}}[ \t]*:[ \t]*\*{{0,2}}");
            let bare = format!(r"(?m)^[ \t]*{name}[ \t]*:");
            MarkerPattern {
                field: *field,
                bold: Regex::new(&bold).unwrap(),
                bare: Regex::new(&bare).unwrap(),
            }
        })
        .collect()
});

/// Split a marker-delimited model answer into its structured fields.
///
/// Never fails: a missing marker yields an empty field, an unknown mood
/// or module falls back to the enum default.
pub fn extract_summary(raw: &str) -> StructuredSummary {
    let sections = locate_sections(raw);

    let prints_text = section_text(raw, &sections, SummaryField::Prints);
    let mood_text = section_text(raw, &sections, SummaryField::Mood);
    let module_text = section_text(raw, &sections, SummaryField::Module);

    StructuredSummary {
        full_summary: raw.to_string(),
        problem: section_text(raw, &sections, SummaryField::Problem),
        solution: section_text(raw, &sections, SummaryField::Solution),
        upsell: section_text(raw, &sections, SummaryField::Upsell),
        prints: prints_text.to_lowercase().starts_with(PRINTS_AFFIRMATIVE),
        mood: classify_mood(&mood_text),
        module: classify_module(&module_text),
    }
}

/// Byte span of a marker occurrence: (field, marker start, value start).
type Section = (SummaryField, usize, usize);

fn locate_sections(raw: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = MARKER_PATTERNS
        .iter()
        .filter_map(|p| {
            p.bold
                .find(raw)
                .or_else(|| p.bare.find(raw))
                .map(|m| (p.field, m.start(), m.end()))
        })
        .collect();
    sections.sort_by_key(|(_, start, _)| *start);
    sections
}

/// Text between a field's marker and the next recognized marker, trimmed.
fn section_text(raw: &str, sections: &[Section], field: SummaryField) -> String {
    let Some(idx) = sections.iter().position(|(f, _, _)| *f == field) else {
        return String::new();
    };
    let (_, start, value_start) = sections[idx];
    let value_end = sections[idx + 1..]
        .iter()
        .map(|(_, s, _)| *s)
        .find(|s| *s >= value_start && *s > start)
        .unwrap_or(raw.len())
        .max(value_start);

    raw[value_start..value_end]
        .trim()
        .trim_matches('*')
        .trim()
        .to_string()
}
