//! Qualification wizard overlay

use crate::app::App;
use crate::state::{
    BindingTable, Focus, Role, WizardScreen, WizardSession, QUESTIONS, QUESTION_COUNT,
    RESULTS_CLOSING, RESULTS_INTRO,
};
use crate::ui::components::{render_dialog, DialogConfig};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Option labels of the given answers, in question order
fn answer_summary(session: &WizardSession) -> String {
    session
        .answers()
        .iter()
        .map(|(number, token)| {
            QUESTIONS
                .get(number - 1)
                .and_then(|q| q.options.iter().find(|o| o.token == token))
                .map_or(token, |o| o.label)
        })
        .collect::<Vec<_>>()
        .join(" · ")
}

/// Body of the current wizard screen
fn screen_lines(session: &WizardSession) -> Vec<Line<'static>> {
    let screen = session.screen();

    if let Some(number) = screen.question_number() {
        let question = &QUESTIONS[number - 1];
        let mut lines = vec![
            Line::from(Span::styled(
                format!("Question {number} of {QUESTION_COUNT}"),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                question.prompt,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(question.options.iter().enumerate().map(|(i, option)| {
            Line::from(vec![
                Span::styled(format!("  {} ", i + 1), key_style()),
                Span::raw(option.label),
            ])
        }));
        return lines;
    }

    match screen {
        WizardScreen::Results => {
            let mut lines = vec![
                Line::from(RESULTS_INTRO),
                Line::from(Span::styled(
                    format!("You said: {}", answer_summary(session)),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
            ];
            if let Some(rec) = session.recommendation() {
                lines.push(Line::from(Span::styled(
                    rec.headline.clone(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )));
                lines.extend(
                    rec.highlights
                        .iter()
                        .map(|h| Line::from(format!("✓ {h}"))),
                );
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("Next step: {}", rec.next_step),
                    Style::default().fg(Color::Green),
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(RESULTS_CLOSING));
            lines
        }
        _ => vec![
            Line::from("Answer three quick questions and we'll tell you how a"),
            Line::from("Rabuste Coffee franchise could fit your goals."),
        ],
    }
}

/// Key hints for the current screen, with the close control highlighted when focused
fn hint_spans(
    screen: WizardScreen,
    bindings: &BindingTable,
    close_focused: bool,
) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut push = |role: Role, text: &str| {
        spans.push(Span::styled(bindings.label_for(role), key_style()));
        spans.push(Span::raw(format!(" {text}   ")));
    };

    match screen {
        WizardScreen::Welcome => push(Role::Start, "Start"),
        WizardScreen::Results => {
            push(Role::GoToForm, "Apply now");
            push(Role::Restart, "Start over");
        }
        _ => {}
    }

    let close_style = if close_focused {
        key_style().add_modifier(Modifier::REVERSED)
    } else {
        key_style()
    };
    spans.push(Span::styled(
        format!("[{}] Close", bindings.label_for(Role::Close)),
        close_style,
    ));
    spans
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.state.wizard.session();
    let screen = session.screen();
    let title = match screen {
        WizardScreen::Results => "☕ Your Franchise Fit",
        _ => "☕ Franchise Qualification Helper",
    };

    render_dialog(
        frame,
        area,
        DialogConfig {
            title,
            title_color: Color::Yellow,
            border_color: Color::Yellow,
            body: screen_lines(session),
            hint: Some(hint_spans(
                screen,
                app.state.wizard.bindings(),
                app.state.focus == Focus::WizardClose,
            )),
            max_width: 76,
        },
    );
}
