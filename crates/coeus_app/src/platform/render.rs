use coeus_core::{AppViewModel, Route, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub severity: Severity,
    pub text: String,
}

impl Line {
    fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Information,
            text: text.into(),
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            text: text.into(),
        }
    }
}

/// Turns the view model into terminal lines for the active page.
pub fn render(view: &AppViewModel) -> Vec<Line> {
    let mut lines = Vec::new();

    match view.route {
        Route::Home => {
            lines.push(Line::info("Coeus - Chat with your PDFs"));
            if view.clean_name.is_empty() {
                lines.push(Line::info(format!("Name: (none) [{}]", view.name_counter)));
            } else {
                lines.push(Line::info(format!(
                    "Name: {} [{}]",
                    view.clean_name, view.name_counter
                )));
            }
        }
        Route::Upload => {
            let name = view.display_name.as_deref().unwrap_or("User");
            lines.push(Line::info(format!("Hey {name}, upload your PDF")));
            lines.push(Line::info(format!("Stage: {}", stage_label(view.stage))));
        }
        Route::Chat => {
            lines.push(Line::success("Ingestion finished. Your PDF is ready to chat."));
        }
    }

    if let Some(busy) = view.busy_label {
        lines.push(Line::info(busy));
    }
    if let Some(file_line) = &view.file_line {
        let severity = if view.stage == Stage::Idle {
            Severity::Information
        } else {
            Severity::Success
        };
        lines.push(Line {
            severity,
            text: file_line.clone(),
        });
    }
    if let Some(result) = view.ingestion {
        lines.push(Line::info(format!(
            "Last ingestion: {} vectors stored, {} docs indexed",
            result.vectors_stored, result.docs_indexed
        )));
    }
    if view.route == Route::Upload {
        if view.ingest_enabled {
            lines.push(Line::info("Next: coeus ingest"));
        } else if view.picker_enabled {
            lines.push(Line::info("Next: coeus upload <file.pdf>"));
        }
        if view.reset_visible {
            lines.push(Line::info("Upload a different PDF: coeus reset"));
        }
    }
    if let Some(error) = &view.error {
        lines.push(Line {
            severity: Severity::Error,
            text: error.clone(),
        });
    }

    lines
}

fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Idle => "waiting for a PDF",
        Stage::Uploading => "uploading",
        Stage::Uploaded => "uploaded",
        Stage::Ingesting => "ingesting",
        Stage::Done => "done",
    }
}
