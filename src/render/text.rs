//! Plain text rendering for terminals and logs.

use std::fmt::Write;

use crate::model::{PdfOutline, PersonaAnalysis};

/// Render an outline as an indented tree.
///
/// H1 items are flush left; each deeper level indents by two spaces.
pub fn outline_to_text(outline: &PdfOutline) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", outline.title);

    if outline.is_empty() {
        output.push_str("(no headings found)\n");
        return output;
    }

    for item in &outline.outline {
        let indent = "  ".repeat(usize::from(item.level.depth() - 1));
        let _ = writeln!(output, "{}{} (p. {})", indent, item.text, item.page);
    }
    output
}

/// Render a persona analysis as a numbered ranking followed by excerpts.
pub fn analysis_to_text(analysis: &PersonaAnalysis) -> String {
    let meta = &analysis.metadata;
    let mut output = String::new();

    let _ = writeln!(output, "Persona: {}", meta.persona);
    let _ = writeln!(output, "Job: {}", meta.job_to_be_done);
    let _ = writeln!(output, "Documents: {}", meta.documents.join(", "));
    output.push('\n');

    if analysis.extracted_sections.is_empty() {
        output.push_str("No relevant sections found.\n");
        return output;
    }

    output.push_str("Sections\n");
    for (i, section) in analysis.extracted_sections.iter().enumerate() {
        let _ = writeln!(
            output,
            "{:>3}. [{}/10] {} ({}, p. {})",
            i + 1,
            section.importance_rank,
            section.section_title,
            section.document,
            section.page_number
        );
    }

    if !analysis.sub_section_analysis.is_empty() {
        output.push_str("\nExcerpts\n");
        for excerpt in &analysis.sub_section_analysis {
            let _ = writeln!(
                output,
                "- {} (p. {}): {}",
                excerpt.document, excerpt.page_number, excerpt.refined_text
            );
        }
    }

    output
}
